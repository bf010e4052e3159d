//! `.npy` input and output for the arrays exchanged with the training code.

use std::{ fs, path::Path };
use ndarray as nd;
use ndarray_npy::{ read_npy, write_npy };
use crate::error::{ Error, Result };

/// Read a 2D `f64` array.
pub fn read_matrix<P>(path: P) -> Result<nd::Array2<f64>>
where P: AsRef<Path>
{
    let path = path.as_ref();
    read_npy(path)
        .map_err(|source| Error::ReadNpy { path: path.to_path_buf(), source })
}

/// Write a 2D `f64` array, creating parent directories as needed.
pub fn write_matrix<P, S>(path: P, arr: &nd::ArrayBase<S, nd::Ix2>) -> Result<()>
where
    P: AsRef<Path>,
    S: nd::Data<Elem = f64>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }
    write_npy(path, arr)
        .map_err(|source| Error::WriteNpy { path: path.to_path_buf(), source })
}
