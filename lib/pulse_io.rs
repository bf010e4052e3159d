//! Plain-text files exchanged with the external Julia programs.
//!
//! Pulse data is written as header-less CSV, one sample per row, target
//! columns first and predicted columns second. Objective values come back as a
//! single header-less column.

use std::{
    fs::{ self, File },
    io::{ BufWriter, Write },
    path::Path,
};
use ndarray as nd;
use crate::error::{ Error, Result };

/// Check that a target/prediction pair can be concatenated row-wise.
pub fn check_pair<SX, SY>(
    x: &nd::ArrayBase<SX, nd::Ix2>,
    y: &nd::ArrayBase<SY, nd::Ix2>,
) -> Result<()>
where
    SX: nd::Data<Elem = f64>,
    SY: nd::Data<Elem = f64>,
{
    if x.dim() != y.dim() {
        return Err(Error::ShapeMismatch { target: y.dim(), predicted: x.dim() });
    }
    Ok(())
}

/// Write the rows of `[y | x]` to `path`, keeping at most `limit` rows.
///
/// Returns the number of rows written. The file is flushed and closed before
/// this function returns, including on error.
pub fn write_pulse_csv<P, SX, SY>(
    path: P,
    x: &nd::ArrayBase<SX, nd::Ix2>,
    y: &nd::ArrayBase<SY, nd::Ix2>,
    limit: Option<usize>,
) -> Result<usize>
where
    P: AsRef<Path>,
    SX: nd::Data<Elem = f64>,
    SY: nd::Data<Elem = f64>,
{
    check_pair(x, y)?;
    let path = path.as_ref();
    let nrows = limit.map_or(y.nrows(), |k| k.min(y.nrows()));
    let mut out = BufWriter::new(File::create(path).map_err(Error::io(path))?);
    for (yk, xk) in y.outer_iter().zip(x.outer_iter()).take(nrows) {
        write_row(&mut out, yk.iter().chain(xk.iter()))
            .map_err(Error::io(path))?;
    }
    out.flush().map_err(Error::io(path))?;
    Ok(nrows)
}

/// Write a single row `[y | x]` from two flat vectors.
pub fn write_pulse_row<P, SX, SY>(
    path: P,
    x: &nd::ArrayBase<SX, nd::Ix1>,
    y: &nd::ArrayBase<SY, nd::Ix1>,
) -> Result<()>
where
    P: AsRef<Path>,
    SX: nd::Data<Elem = f64>,
    SY: nd::Data<Elem = f64>,
{
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path).map_err(Error::io(path))?);
    write_row(&mut out, y.iter().chain(x.iter())).map_err(Error::io(path))?;
    out.flush().map_err(Error::io(path))?;
    Ok(())
}

fn write_row<'a, W, I>(out: &mut W, values: I) -> std::io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a f64>,
{
    for (k, v) in values.enumerate() {
        if k > 0 { out.write_all(b",")?; }
        write!(out, "{}", v)?;
    }
    out.write_all(b"\n")
}

/// Read a single column of objective values, skipping blank lines.
pub fn read_objective<P>(path: P) -> Result<nd::Array1<f64>>
where P: AsRef<Path>
{
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(Error::io(path))?;
    let values: nd::Array1<f64>
        = text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(k, line)| {
            let field = line.split(',').next().unwrap_or("").trim();
            field.parse::<f64>()
                .map_err(|_| Error::Objective {
                    path: path.to_path_buf(),
                    line: k + 1,
                    value: line.to_string(),
                })
        })
        .collect::<Result<_>>()?;
    if values.is_empty() {
        return Err(Error::EmptyObjective(path.to_path_buf()));
    }
    Ok(values)
}

/// Mean of `1 - |v|` over all objective values `v`, skipping NaNs. Returns
/// `None` if no values are left.
pub fn fidelity<S>(objective: &nd::ArrayBase<S, nd::Ix1>) -> Option<f64>
where S: nd::Data<Elem = f64>
{
    let fids: nd::Array1<f64>
        = objective.iter()
        .filter(|v| !v.is_nan())
        .map(|v| 1.0 - v.abs())
        .collect();
    fids.mean()
}
