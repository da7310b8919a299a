use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::info;
use serde::Serialize;

use crate::controllers::ports::telemetry_sink::{TelemetryError, TelemetryKind, TelemetrySinkPort};
use crate::core::data::calculation_information::CalculationInformation;
use crate::core::data::resolution::Resolution;

pub const TELEMETRY_DIRECTORY: &str = "CalculationInformation";

const FILENAME_DATE_FORMAT: &str = "%d-%m-%Y_%H-%M-%S";

/// Serialised form of one timing record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationRecord {
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub method: String,
    pub start_time: Option<DateTime<Local>>,
    pub calculation_done_time: Option<DateTime<Local>>,
    pub end_time: Option<DateTime<Local>>,
    pub calculation_seconds: f64,
    pub printing_seconds: f64,
    pub total_seconds: f64,
}

impl From<&CalculationInformation> for CalculationRecord {
    fn from(info: &CalculationInformation) -> Self {
        Self {
            resolution_x: info.resolution().width(),
            resolution_y: info.resolution().height(),
            method: info.method().to_string(),
            start_time: info.start_time(),
            calculation_done_time: info.computed_time(),
            end_time: info.end_time(),
            calculation_seconds: info.computation_seconds(),
            printing_seconds: info.encoding_seconds(),
            total_seconds: info.total_seconds(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TelemetryDocument {
    summary: CalculationRecord,
    units: Vec<CalculationRecord>,
}

#[must_use]
pub fn telemetry_filename(kind: TelemetryKind, resolution: Resolution, date: DateTime<Local>) -> String {
    let stamp = date.format(FILENAME_DATE_FORMAT);

    match kind {
        TelemetryKind::Matrix => format!("Matrix_{}_{}.json", resolution, stamp),
        TelemetryKind::Animation {
            fps,
            duration_seconds,
        } => format!(
            "Animation{}_{}fps_{}s_{}.json",
            resolution, fps, duration_seconds, stamp
        ),
    }
}

/// Writes composite render timings as indented JSON files into one directory.
pub struct JsonTelemetrySink {
    directory: PathBuf,
}

impl JsonTelemetrySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Sink writing to `CalculationInformation` below `output_directory`.
    pub fn below(output_directory: impl AsRef<Path>) -> Self {
        Self::new(output_directory.as_ref().join(TELEMETRY_DIRECTORY))
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl TelemetrySinkPort for JsonTelemetrySink {
    fn store(
        &self,
        kind: TelemetryKind,
        aggregate: &CalculationInformation,
        units: &[CalculationInformation],
    ) -> Result<PathBuf, TelemetryError> {
        let document = TelemetryDocument {
            summary: aggregate.into(),
            units: units.iter().map(CalculationRecord::from).collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;

        fs::create_dir_all(&self.directory)?;
        let path = self
            .directory
            .join(telemetry_filename(kind, aggregate.resolution(), Local::now()));
        fs::write(&path, json)?;

        info!("Wrote calculation information to {}", path.display());
        Ok(path)
    }
}
