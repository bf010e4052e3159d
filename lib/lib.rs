//! Fidelity evaluation and bookkeeping for machine-learned rotation-gate
//! pulses.
//!
//! The heavy lifting (simulating the pulses) is done by external Julia
//! scripts; this crate prepares their inputs, runs them, and reduces their
//! outputs. See [`fidelity::FidelityEvaluator`].

pub mod error;
pub mod config;
pub mod gate;
pub mod solver;
pub mod pulse_io;
pub mod fidelity;
pub mod plot;
pub mod model_id;
pub mod predictions;
pub mod npy;

pub use error::{ Error, Result };
pub use config::ExperimentConfig;
pub use gate::Gate;
pub use solver::{ ExternalSolver, JuliaScript, PulseRenderer, SolverExit };
pub use fidelity::{ EvalOptions, FidelityEvaluator };
pub use plot::{ PlotOptions, PulsePlotter };
pub use model_id::{ basic_id, model_id, Layer };
pub use predictions::recover_original_structure;
