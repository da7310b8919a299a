use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::core::data::calculation_information::CalculationInformation;

/// Which composite render produced a telemetry report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryKind {
    Matrix,
    Animation { fps: u32, duration_seconds: u32 },
}

#[derive(Debug)]
pub enum TelemetryError {
    Io(io::Error),
    Serialization(serde_json::Error),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not write telemetry: {}", err),
            Self::Serialization(err) => write!(f, "could not serialise telemetry: {}", err),
        }
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialization(err) => Some(err),
        }
    }
}

impl From<io::Error> for TelemetryError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TelemetryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err)
    }
}

/// Persists the aggregate and per-unit timing records of a composite render.
/// Returns where the report was written.
pub trait TelemetrySinkPort {
    fn store(
        &self,
        kind: TelemetryKind,
        aggregate: &CalculationInformation,
        units: &[CalculationInformation],
    ) -> Result<PathBuf, TelemetryError>;
}
