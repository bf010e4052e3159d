//! Gate fidelity of predicted pulses, as judged by an external solver.
//!
//! The procedure is the same for every gate: the target and predicted pulses
//! are written side by side to a CSV file, the solver computes one objective
//! value per pulse, and the fidelity is the mean of `1 - |objective|`.
//! Gates differ only in which script is run and where it lives; see
//! [`Gate`].

use std::{
    fs,
    path::{ Path, PathBuf },
};
use log::{ debug, error, info, warn };
use ndarray as nd;
use crate::{
    error::{ Error, Result },
    gate::Gate,
    pulse_io::{ check_pair, fidelity, read_objective, write_pulse_csv },
    solver::{ ExternalSolver, JuliaScript },
};

/// Default name of the solver's config file.
pub const DEFAULT_CONFIG: &str = "config_template.json";

/// Per-call options for [`FidelityEvaluator::evaluate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalOptions {
    /// Only use the first `limit` pulses.
    pub limit: Option<usize>,
    /// Solver config, relative to the evaluator's base directory unless
    /// absolute.
    pub config_path: PathBuf,
    pub pulse_data_path: PathBuf,
    pub output_path: PathBuf,
    /// Remove `pulse_data_path` and `output_path` afterwards.
    pub cleanup: bool,
}

impl EvalOptions {
    /// Default options for `gate`, using the gate's temporary file names.
    pub fn for_gate(gate: Gate) -> Self {
        Self {
            limit: None,
            config_path: DEFAULT_CONFIG.into(),
            pulse_data_path: gate.default_pulse_data_path(),
            output_path: gate.default_output_path(),
            cleanup: true,
        }
    }

    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn config_path<P>(mut self, path: P) -> Self
    where P: Into<PathBuf>
    {
        self.config_path = path.into();
        self
    }

    pub fn pulse_data_path<P>(mut self, path: P) -> Self
    where P: Into<PathBuf>
    {
        self.pulse_data_path = path.into();
        self
    }

    pub fn output_path<P>(mut self, path: P) -> Self
    where P: Into<PathBuf>
    {
        self.output_path = path.into();
        self
    }

    pub fn cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }
}

/// Computes the fidelity of predicted pulses with respect to target pulses.
///
/// Calls using the same temporary file paths must not run concurrently.
#[derive(Clone, Debug)]
pub struct FidelityEvaluator<S> {
    solver: S,
    base_dir: PathBuf,
}

impl FidelityEvaluator<JuliaScript> {
    /// Evaluator running `gate`'s checking script from `base_dir`.
    ///
    /// With `verbose`, the script's stdout is passed through.
    pub fn for_gate<P>(gate: Gate, base_dir: P, verbose: bool) -> Self
    where P: Into<PathBuf>
    {
        let base_dir: PathBuf = base_dir.into();
        let solver
            = JuliaScript::new(gate.script(), base_dir.clone())
            .verbose(verbose);
        Self { solver, base_dir }
    }
}

impl<S> FidelityEvaluator<S>
where S: ExternalSolver
{
    pub fn new<P>(solver: S, base_dir: P) -> Self
    where P: Into<PathBuf>
    {
        Self { solver, base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path { &self.base_dir }

    pub fn solver(&self) -> &S { &self.solver }

    /// Compute the mean fidelity of the pulses in `x` (predicted) against those
    /// in `y` (target), matched by row.
    ///
    /// Returns `Ok(None)` without touching the filesystem if the solver config
    /// can't be found. `x` and `y` must have the same shape.
    pub fn evaluate<SX, SY>(
        &self,
        x: &nd::ArrayBase<SX, nd::Ix2>,
        y: &nd::ArrayBase<SY, nd::Ix2>,
        opts: &EvalOptions,
    ) -> Result<Option<f64>>
    where
        SX: nd::Data<Elem = f64>,
        SY: nd::Data<Elem = f64>,
    {
        check_pair(x, y)?;
        if let Some(limit) = opts.limit {
            warn!(
                "limiting fidelity computation to {} entries out of {}",
                limit, x.nrows(),
            );
        }

        let config = self.base_dir.join(&opts.config_path);
        if !config.is_file() {
            error!("{}", Error::MissingConfig(config));
            return Ok(None);
        }
        // the solver runs from `base_dir`, so relative paths would resolve
        // differently for it
        let config = absolute(&config)?;
        let pulse_data_path = absolute(&opts.pulse_data_path)?;
        let output_path = absolute(&opts.output_path)?;

        let nrows = write_pulse_csv(&pulse_data_path, x, y, opts.limit)?;
        debug!("wrote {} pulses to {:?}", nrows, pulse_data_path);

        let status = self.solver.run(&config, &pulse_data_path, &output_path)?;
        if status.is_success() {
            info!("solver finished with {}", status);
        } else {
            warn!("solver finished with {}", status);
        }

        let objective = read_objective(&output_path)?;
        let fid
            = fidelity(&objective)
            .ok_or_else(|| Error::EmptyObjective(output_path.clone()))?;

        if opts.cleanup {
            remove_quietly(&pulse_data_path);
            remove_quietly(&output_path);
        }
        Ok(Some(fid))
    }
}

pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .map_err(Error::io(path))
    }
}

pub(crate) fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        debug!("couldn't remove {:?}: {}", path, e);
    }
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use ndarray::array;
    use crate::solver::SolverExit;
    use super::*;

    /// Writes fixed objective values and records what it was called with.
    struct FakeSolver {
        objective: &'static str,
        exit: SolverExit,
        calls: RefCell<Vec<(PathBuf, String)>>,
    }

    impl FakeSolver {
        fn new(objective: &'static str) -> Self {
            Self {
                objective,
                exit: SolverExit::success(),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl ExternalSolver for FakeSolver {
        fn run(&self, config: &Path, input: &Path, output: &Path)
            -> Result<SolverExit>
        {
            let pulses = fs::read_to_string(input).map_err(Error::io(input))?;
            self.calls.borrow_mut().push((config.to_path_buf(), pulses));
            fs::write(output, self.objective).map_err(Error::io(output))?;
            Ok(self.exit)
        }
    }

    struct Scratch {
        dir: tempfile::TempDir,
        opts: EvalOptions,
    }

    fn scratch(with_config: bool) -> Scratch {
        let dir = tempfile::tempdir().unwrap();
        if with_config {
            fs::write(dir.path().join(DEFAULT_CONFIG), "{}").unwrap();
        }
        let opts
            = EvalOptions::for_gate(Gate::RX)
            .pulse_data_path(dir.path().join("xgate.csv"))
            .output_path(dir.path().join("xgate_fidelity.csv"));
        Scratch { dir, opts }
    }

    fn pulses() -> (nd::Array2<f64>, nd::Array2<f64>) {
        let y = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let x = array![[0.5, 1.5], [2.5, 3.5], [4.5, 5.5]];
        (x, y)
    }

    #[test]
    fn mean_fidelity() {
        let s = scratch(true);
        let solver = FakeSolver::new("0.1\n-0.2\n0.05\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        let fid = evaluator.evaluate(&x, &y, &s.opts).unwrap().unwrap();
        assert!((fid - 0.883_333_333_333_333_3).abs() < 1e-12);

        let calls = solver.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, s.dir.path().join(DEFAULT_CONFIG));
        assert_eq!(calls[0].1, "0,1,0.5,1.5\n2,3,2.5,3.5\n4,5,4.5,5.5\n");

        assert!(!s.opts.pulse_data_path.exists());
        assert!(!s.opts.output_path.exists());
    }

    #[test]
    fn missing_config() {
        let s = scratch(false);
        let solver = FakeSolver::new("0.0\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        assert_eq!(evaluator.evaluate(&x, &y, &s.opts).unwrap(), None);
        assert!(solver.calls.borrow().is_empty());
        assert!(!s.opts.pulse_data_path.exists());
        assert!(!s.opts.output_path.exists());
    }

    #[test]
    fn limit_and_keep_files() {
        let s = scratch(true);
        let solver = FakeSolver::new("0.5\n0.5\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        let opts = s.opts.clone().limit(Some(2)).cleanup(false);
        let fid = evaluator.evaluate(&x, &y, &opts).unwrap().unwrap();
        assert!((fid - 0.5).abs() < 1e-12);

        let written = fs::read_to_string(&opts.pulse_data_path).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(opts.output_path.exists());
    }

    #[test]
    fn nonzero_exit_still_reads_output() {
        let s = scratch(true);
        let mut solver = FakeSolver::new("0.25\n");
        solver.exit = SolverExit { code: Some(1) };
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        let opts = s.opts.clone().limit(Some(1));
        let fid = evaluator.evaluate(&x, &y, &opts).unwrap().unwrap();
        assert!((fid - 0.75).abs() < 1e-12);
    }

    #[test]
    fn shape_mismatch() {
        let s = scratch(true);
        let solver = FakeSolver::new("0.0\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, _) = pulses();
        let y = array![[0.0, 1.0]];
        assert!(matches!(
            evaluator.evaluate(&x, &y, &s.opts),
            Err(Error::ShapeMismatch { .. }),
        ));
        assert!(solver.calls.borrow().is_empty());
        assert!(!s.opts.pulse_data_path.exists());
    }

    #[test]
    fn nan_rows_ignored() {
        let s = scratch(true);
        let solver = FakeSolver::new("0.1\nNaN\n0.3\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        let fid = evaluator.evaluate(&x, &y, &s.opts).unwrap().unwrap();
        assert!((fid - 0.8).abs() < 1e-12);

        let solver = FakeSolver::new("NaN\nNaN\nNaN\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        assert!(matches!(
            evaluator.evaluate(&x, &y, &s.opts),
            Err(Error::EmptyObjective(_)),
        ));
    }

    #[test]
    fn malformed_output() {
        let s = scratch(true);
        let solver = FakeSolver::new("converged\n");
        let evaluator = FidelityEvaluator::new(&solver, s.dir.path());
        let (x, y) = pulses();
        assert!(matches!(
            evaluator.evaluate(&x, &y, &s.opts),
            Err(Error::Objective { line: 1, .. }),
        ));
    }

    #[test]
    fn julia_evaluator() {
        let evaluator = FidelityEvaluator::for_gate(Gate::U, "../..", true);
        assert_eq!(evaluator.base_dir(), Path::new("../.."));
        assert_eq!(
            evaluator.solver().script,
            PathBuf::from("check_UGate_pulse_objective_function.jl"),
        );
        assert!(evaluator.solver().verbose);
        assert!(!evaluator.solver().quiet_stderr);
    }
}
