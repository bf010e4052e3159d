//! Identifier strings for feed-forward networks.

use itertools::Itertools;

/// A single layer in a network stack, as far as identification is concerned.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Layer {
    /// Fully connected layer with `units` outputs.
    Dense { units: usize },
    Dropout { rate: f64 },
    Activation,
    Normalization,
}

impl Layer {
    /// Return the layer width if `self` is a dense layer.
    pub fn dense_units(&self) -> Option<usize> {
        match *self {
            Self::Dense { units } => Some(units),
            _ => None,
        }
    }
}

/// Join the input width and the layer widths with `x`.
///
/// ```
/// # use pulse_fidelity::model_id::model_id;
/// assert_eq!(model_id(4, &[12, 8]), "4x12x8");
/// ```
pub fn model_id(input_width: usize, layer_widths: &[usize]) -> String {
    std::iter::once(&input_width)
        .chain(layer_widths.iter())
        .join("x")
}

/// Like [`model_id`], but skipping over every layer in `layers` that isn't
/// [`Layer::Dense`].
pub fn basic_id(input_width: usize, layers: &[Layer]) -> String {
    let widths: Vec<usize>
        = layers.iter().filter_map(Layer::dense_units).collect();
    model_id(input_width, &widths)
}
