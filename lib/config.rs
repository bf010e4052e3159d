//! Per-experiment parameters for the rotation-gate training runs.
//!
//! Each experiment is described by an [`ExperimentConfig`] value rather than
//! module-level constants, so several experiments can be handled in the same
//! process. The two experiments used so far are available as presets; anything
//! else can be read from a TOML file.

use std::{ fs, path::{ Path, PathBuf } };
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ Error, Result },
    model_id::model_id,
};

/// Solver configuration shared by both rotation experiments: 20 parameters,
/// `Pmin = 200`.
pub const D1_10_PMIN_200: &str = "D1_10_Pmin_200";

/// Model-id prefix for the small feed-forward networks.
pub const SMALL_MLP: &str = "smallMLP_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Directory where trained models are stored.
    pub prefix: PathBuf,
    /// Number of pulse-data CSV files making up the training set.
    pub n_csv_files: usize,
    /// Name of the solver configuration, e.g. `D1_10_Pmin_200`.
    pub solver_config: String,
    /// Directory holding the pulse-data CSV files.
    pub base_dir: PathBuf,
    /// Hidden layer widths of the feed-forward network.
    pub neurons_per_layer: Vec<usize>,
    pub model_id_prefix: String,
}

impl Default for ExperimentConfig {
    fn default() -> Self { Self::y_rotation() }
}

impl ExperimentConfig {
    pub fn x_rotation() -> Self {
        Self {
            prefix: "../model/xrotation".into(),
            n_csv_files: 100,
            solver_config: D1_10_PMIN_200.into(),
            base_dir: "../data_pulse/xrotation".into(),
            neurons_per_layer: vec![4],
            model_id_prefix: SMALL_MLP.into(),
        }
    }

    pub fn y_rotation() -> Self {
        Self {
            prefix: "./model/yrotation".into(),
            n_csv_files: 1,
            solver_config: D1_10_PMIN_200.into(),
            base_dir: "/local/ml4qcontrol/data_pulse/yrotation".into(),
            neurons_per_layer: vec![12, 8, 16, 12, 8],
            model_id_prefix: SMALL_MLP.into(),
        }
    }

    /// Look up a preset by name (`x-rotation` or `y-rotation`; underscores and
    /// the short forms `x`/`y` are accepted too).
    pub fn preset(name: &str) -> Result<Self> {
        match name.to_lowercase().replace('_', "-").as_str() {
            "x" | "x-rotation" | "xrotation" => Ok(Self::x_rotation()),
            "y" | "y-rotation" | "yrotation" => Ok(Self::y_rotation()),
            _ => Err(Error::UnknownPreset(name.into())),
        }
    }

    /// Read a config from a TOML file. Missing keys take their values from
    /// [`Self::y_rotation`].
    pub fn load<P>(path: P) -> Result<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(Error::io(path))?;
        toml::from_str(&text)
            .map_err(|source| Error::Toml { path: path.to_path_buf(), source })
    }

    /// Resolve either a preset name or a path to a TOML file.
    pub fn from_arg(arg: &str) -> Result<Self> {
        let path = Path::new(arg);
        if path.is_file() { Self::load(path) } else { Self::preset(arg) }
    }

    /// Name used for the pulse-data CSV files.
    pub fn csv_config(&self) -> &str { &self.solver_config }

    /// File name of the solver's JSON config template.
    pub fn config_template(&self) -> String {
        format!("config_template_{}.json", self.solver_config)
    }

    /// Full model identifier, e.g. `smallMLP_4x12x8x16x12x8`.
    pub fn model_id(&self, input_width: usize) -> String {
        format!(
            "{}{}",
            self.model_id_prefix,
            model_id(input_width, &self.neurons_per_layer),
        )
    }

    /// Directory a trained model with the given input width is saved to.
    pub fn model_dir(&self, input_width: usize) -> PathBuf {
        self.prefix.join(self.model_id(input_width))
    }
}
