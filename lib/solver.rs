//! Out-of-process programs that evaluate or visualize pulses.
//!
//! All of them are Julia scripts taking `--name value` style arguments, run
//! from a fixed base directory.

use std::{
    ffi::OsStr,
    path::{ Path, PathBuf },
    process::{ Command, Stdio },
};
use log::debug;
use crate::error::{ Error, Result };

/// Exit status of an external program.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SolverExit {
    /// `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl SolverExit {
    pub fn success() -> Self { Self { code: Some(0) } }

    pub fn is_success(&self) -> bool { self.code == Some(0) }
}

impl std::fmt::Display for SolverExit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

impl From<std::process::ExitStatus> for SolverExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self { code: status.code() }
    }
}

/// Something that computes per-sample objective values for a file of pulse
/// data.
///
/// Implementors read the pulse CSV at `input`, and write one objective value
/// per row to `output`.
pub trait ExternalSolver {
    fn run(&self, config: &Path, input: &Path, output: &Path) -> Result<SolverExit>;
}

impl<T> ExternalSolver for &T
where T: ExternalSolver + ?Sized
{
    fn run(&self, config: &Path, input: &Path, output: &Path) -> Result<SolverExit> {
        (**self).run(config, input, output)
    }
}

/// Something that draws a single pulse to an image file.
pub trait PulseRenderer {
    fn render(&self, input: &Path, image: &Path) -> Result<SolverExit>;
}

/// Default interpreter used to run scripts.
pub const JULIA: &str = "julia";

/// A Julia script run with a given working directory.
#[derive(Clone, Debug)]
pub struct JuliaScript {
    pub interpreter: PathBuf,
    pub script: PathBuf,
    pub working_dir: PathBuf,
    /// Pass the script's stdout through instead of discarding it.
    pub verbose: bool,
    /// Also discard stderr when not verbose.
    pub quiet_stderr: bool,
}

impl JuliaScript {
    pub fn new<S, D>(script: S, working_dir: D) -> Self
    where
        S: Into<PathBuf>,
        D: Into<PathBuf>,
    {
        Self {
            interpreter: JULIA.into(),
            script: script.into(),
            working_dir: working_dir.into(),
            verbose: false,
            quiet_stderr: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet_stderr(mut self, quiet_stderr: bool) -> Self {
        self.quiet_stderr = quiet_stderr;
        self
    }

    pub fn interpreter<P>(mut self, interpreter: P) -> Self
    where P: Into<PathBuf>
    {
        self.interpreter = interpreter.into();
        self
    }

    /// Run the script to completion with the given named arguments.
    ///
    /// A non-zero exit is not treated as an error; the caller decides what to
    /// make of the program's output.
    pub fn run_with<'a, I>(&self, args: I) -> Result<SolverExit>
    where I: IntoIterator<Item = (&'a str, &'a Path)>
    {
        let mut cmd = Command::new(&self.interpreter);
        cmd.current_dir(&self.working_dir).arg(&self.script);
        for (name, value) in args {
            cmd.arg(name).arg(value);
        }
        if !self.verbose {
            cmd.stdout(Stdio::null());
            if self.quiet_stderr {
                cmd.stderr(Stdio::null());
            }
        }
        debug!("running {:?} in {:?}", cmd, self.working_dir);
        cmd.status()
            .map(SolverExit::from)
            .map_err(|source| Error::Solver { program: self.describe(), source })
    }

    /// Interpreter and script name, for diagnostics.
    pub fn describe(&self) -> String {
        let script
            = self.script.file_name()
            .unwrap_or_else(|| OsStr::new("<script>"));
        format!("{} {}", self.interpreter.display(), script.to_string_lossy())
    }
}

impl ExternalSolver for JuliaScript {
    fn run(&self, config: &Path, input: &Path, output: &Path) -> Result<SolverExit> {
        self.run_with([
            ("--config_path", config),
            ("--pulse_data_path", input),
            ("--output_objf_path", output),
        ])
    }
}

impl PulseRenderer for JuliaScript {
    fn render(&self, input: &Path, image: &Path) -> Result<SolverExit> {
        self.run_with([
            ("--pulse_data_path", input),
            ("--output_image_path", image),
        ])
    }
}
