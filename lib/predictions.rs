//! Reshaping of network predictions back into the solver's parameter layout.
//!
//! The networks are trained on a compact 5-parameter representation of each
//! pulse. The solver expects 20 parameters per pulse: the third compact
//! parameter is shared by six consecutive slots and the trailing ten slots are
//! always zero.

use ndarray::{ self as nd, s };
use crate::error::{ Error, Result };

/// Number of parameters in a compact prediction row.
pub const COMPACT_WIDTH: usize = 5;

/// Number of parameters in a full solver row.
pub const FULL_WIDTH: usize = 20;

/// Expand a single compact row `[a, b, c, d, e]` into
/// `[a, b, c, c, c, c, c, c, d, e, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]`.
pub fn expand_row(row: [f64; COMPACT_WIDTH]) -> [f64; FULL_WIDTH] {
    let [a, b, c, d, e] = row;
    let mut full = [0.0; FULL_WIDTH];
    full[0] = a;
    full[1] = b;
    full[2..8].fill(c);
    full[8] = d;
    full[9] = e;
    full
}

/// Apply [`expand_row`] to every row of `predictions`, preserving row order.
///
/// Fails with [`Error::InvalidShape`] if `predictions` doesn't have exactly
/// [`COMPACT_WIDTH`] columns.
pub fn recover_original_structure<S>(predictions: &nd::ArrayBase<S, nd::Ix2>)
    -> Result<nd::Array2<f64>>
where S: nd::Data<Elem = f64>
{
    let (nrows, ncols) = predictions.dim();
    if ncols != COMPACT_WIDTH {
        return Err(Error::InvalidShape { expected: COMPACT_WIDTH, found: ncols });
    }
    let mut recovered: nd::Array2<f64> = nd::Array2::zeros((nrows, FULL_WIDTH));
    for (row, mut full) in predictions.outer_iter().zip(recovered.outer_iter_mut()) {
        full[0] = row[0];
        full[1] = row[1];
        full.slice_mut(s![2..8]).fill(row[2]);
        full[8] = row[3];
        full[9] = row[4];
    }
    Ok(recovered)
}

/// Same as [`recover_original_structure`] for predictions held as plain
/// vectors.
pub fn expand_rows(rows: &[Vec<f64>]) -> Result<Vec<[f64; FULL_WIDTH]>> {
    rows.iter()
        .map(|row| {
            <[f64; COMPACT_WIDTH]>::try_from(row.as_slice())
                .map(expand_row)
                .map_err(|_| Error::InvalidShape {
                    expected: COMPACT_WIDTH,
                    found: row.len(),
                })
        })
        .collect()
}
