//! Drawing a single target/predicted pulse pair with an external script.

use std::{ io, path::PathBuf };
use log::{ info, warn };
use ndarray as nd;
use crate::{
    error::{ Error, Result },
    fidelity::{ absolute, remove_quietly },
    pulse_io::write_pulse_row,
    solver::{ JuliaScript, PulseRenderer },
};

pub const VISUALIZATION_SCRIPT: &str = "visualization_ugate_pulse.jl";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlotOptions {
    pub pulse_data_path: PathBuf,
    pub image_path: PathBuf,
    /// Remove `pulse_data_path` afterwards. The image is always kept.
    pub cleanup: bool,
}

impl Default for PlotOptions {
    fn default() -> Self {
        let tmp = std::env::temp_dir();
        Self {
            pulse_data_path: tmp.join("pulse.csv"),
            image_path: tmp.join("image.png"),
            cleanup: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PulsePlotter<R> {
    renderer: R,
}

impl PulsePlotter<JuliaScript> {
    /// Plotter running the visualization script from `base_dir` (usually
    /// `..`). Unless `verbose`, both stdout and stderr of the script are
    /// discarded.
    pub fn julia<P>(base_dir: P, verbose: bool) -> Self
    where P: Into<PathBuf>
    {
        let renderer
            = JuliaScript::new(VISUALIZATION_SCRIPT, base_dir)
            .verbose(verbose)
            .quiet_stderr(true);
        Self { renderer }
    }
}

impl<R> PulsePlotter<R>
where R: PulseRenderer
{
    pub fn new(renderer: R) -> Self { Self { renderer } }

    /// Draw the predicted pulse `x` together with its target `y` and return
    /// the path of the resulting image.
    pub fn plot<SX, SY>(
        &self,
        x: &nd::ArrayBase<SX, nd::Ix1>,
        y: &nd::ArrayBase<SY, nd::Ix1>,
        opts: &PlotOptions,
    ) -> Result<PathBuf>
    where
        SX: nd::Data<Elem = f64>,
        SY: nd::Data<Elem = f64>,
    {
        let pulse_data_path = absolute(&opts.pulse_data_path)?;
        let image_path = absolute(&opts.image_path)?;
        write_pulse_row(&pulse_data_path, x, y)?;
        let status = self.renderer.render(&pulse_data_path, &image_path)?;
        if status.is_success() {
            info!("renderer finished with {}", status);
        } else {
            warn!("renderer finished with {}", status);
        }
        if opts.cleanup {
            remove_quietly(&pulse_data_path);
        }
        if !image_path.is_file() {
            return Err(Error::Io {
                path: image_path,
                source: io::Error::new(
                    io::ErrorKind::NotFound, "renderer produced no image"),
            });
        }
        Ok(image_path)
    }
}
