//! The gates whose pulses can be checked, and where their checking scripts
//! live.

use std::{ fmt, path::PathBuf, str::FromStr };
use crate::error::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// General single-qubit unitary.
    U,
    /// Rotation about the x-axis.
    RX,
    /// Rotation about the y-axis.
    RY,
}

impl Gate {
    pub const ALL: [Gate; 3] = [Gate::U, Gate::RX, Gate::RY];

    /// File name of the script computing the pulse objective function.
    pub fn script(&self) -> &'static str {
        match self {
            Self::U => "check_UGate_pulse_objective_function.jl",
            Self::RX => "check_RX_pulse_objective_function.jl",
            Self::RY => "check_RY_pulse_objective_function.jl",
        }
    }

    /// Location of the scripts relative to the directory the experiment's
    /// training code runs from.
    pub fn default_base_dir(&self) -> PathBuf {
        match self {
            Self::U => "../..".into(),
            Self::RX | Self::RY => "..".into(),
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Self::U => "ugate",
            Self::RX => "xgate",
            Self::RY => "ygate",
        }
    }

    /// Default location of the temporary pulse-data file.
    pub fn default_pulse_data_path(&self) -> PathBuf {
        std::env::temp_dir().join(format!("{}.csv", self.tag()))
    }

    /// Default location of the temporary objective-output file.
    pub fn default_output_path(&self) -> PathBuf {
        std::env::temp_dir().join(format!("{}_fidelity.csv", self.tag()))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U => write!(f, "U"),
            Self::RX => write!(f, "RX"),
            Self::RY => write!(f, "RY"),
        }
    }
}

impl FromStr for Gate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u" | "ugate" => Ok(Self::U),
            "x" | "rx" | "xgate" => Ok(Self::RX),
            "y" | "ry" | "ygate" => Ok(Self::RY),
            _ => Err(Error::UnknownGate(s.into())),
        }
    }
}
