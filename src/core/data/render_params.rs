use crate::core::data::resolution::{Resolution, ResolutionError};
use crate::core::data::viewport::{Viewport, ViewportError};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Numeric precision and execution backend of the escape-time computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalculationMethod {
    #[default]
    Cpu,
    GpuFloat,
    GpuDouble,
}

impl CalculationMethod {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cpu => "CPU",
            Self::GpuFloat => "GPUFloat",
            Self::GpuDouble => "GPUDouble",
        }
    }

    #[must_use]
    pub const fn uses_accelerator(self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderParametersError {
    MissingResolution,
    MissingViewport,
    Resolution(ResolutionError),
    Viewport(ViewportError),
    ZeroIterations,
    EmptyFilename,
}

impl fmt::Display for RenderParametersError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingResolution => write!(f, "no resolution was given"),
            Self::MissingViewport => write!(f, "no viewport was given"),
            Self::Resolution(err) => write!(f, "invalid resolution: {}", err),
            Self::Viewport(err) => write!(f, "invalid viewport: {}", err),
            Self::ZeroIterations => write!(f, "maximum iterations must be greater than zero"),
            Self::EmptyFilename => write!(f, "filename must not be empty"),
        }
    }
}

impl Error for RenderParametersError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolution(err) => Some(err),
            Self::Viewport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ResolutionError> for RenderParametersError {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}

impl From<ViewportError> for RenderParametersError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

/// Where a rendered image lands. Without a filename the image is named
/// after its resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    directory: PathBuf,
    filename: Option<String>,
}

impl OutputTarget {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            filename: None,
        }
    }

    /// Appends `.png` when the name has no such extension.
    pub fn with_filename(&self, filename: &str) -> Result<Self, RenderParametersError> {
        let trimmed = filename.trim();

        if trimmed.is_empty() || trimmed == ".png" {
            return Err(RenderParametersError::EmptyFilename);
        }

        let filename = if trimmed.ends_with(".png") {
            trimmed.to_string()
        } else {
            format!("{}.png", trimmed)
        };

        Ok(Self {
            directory: self.directory.clone(),
            filename: Some(filename),
        })
    }

    #[must_use]
    pub fn in_subdirectory(&self, name: &str) -> Self {
        Self {
            directory: self.directory.join(name),
            filename: self.filename.clone(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    #[must_use]
    pub fn file_path(&self, resolution: Resolution) -> PathBuf {
        match &self.filename {
            Some(filename) => self.directory.join(filename),
            None => self
                .directory
                .join(format!("MB_{}x{}.png", resolution.width(), resolution.height())),
        }
    }
}

/// Everything one render needs. Immutable; derived parameter sets for
/// tiles and frames are new values.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderParameters {
    resolution: Resolution,
    viewport: Viewport,
    iterations: u32,
    method: CalculationMethod,
    output: OutputTarget,
}

impl RenderParameters {
    #[must_use]
    pub fn builder() -> RenderParametersBuilder {
        RenderParametersBuilder::default()
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    #[must_use]
    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.output.file_path(self.resolution)
    }

    #[must_use]
    pub fn with_viewport(&self, viewport: Viewport) -> Self {
        Self {
            viewport,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_resolution(&self, resolution: Resolution) -> Self {
        Self {
            resolution,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_method(&self, method: CalculationMethod) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_output(&self, output: OutputTarget) -> Self {
        Self {
            output,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RenderParametersBuilder {
    resolution: Option<(u32, u32)>,
    viewport: Option<(f64, f64, f64, f64)>,
    iterations: Option<u32>,
    method: CalculationMethod,
    directory: Option<PathBuf>,
    filename: Option<String>,
}

impl RenderParametersBuilder {
    const DEFAULT_ITERATIONS: u32 = 255;

    #[must_use]
    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.resolution = Some((width, height));
        self
    }

    #[must_use]
    pub fn viewport(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.viewport = Some((top, bottom, left, right));
        self
    }

    #[must_use]
    pub fn iterations(mut self, iterations: u32) -> Self {
        self.iterations = Some(iterations);
        self
    }

    #[must_use]
    pub fn method(mut self, method: CalculationMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    #[must_use]
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn build(self) -> Result<RenderParameters, RenderParametersError> {
        let (width, height) = self
            .resolution
            .ok_or(RenderParametersError::MissingResolution)?;
        let (top, bottom, left, right) =
            self.viewport.ok_or(RenderParametersError::MissingViewport)?;
        let iterations = self.iterations.unwrap_or(Self::DEFAULT_ITERATIONS);

        if iterations == 0 {
            return Err(RenderParametersError::ZeroIterations);
        }

        let output = OutputTarget::new(self.directory.unwrap_or_else(|| PathBuf::from(".")));
        let output = match self.filename {
            Some(filename) => output.with_filename(&filename)?,
            None => output,
        };

        Ok(RenderParameters {
            resolution: Resolution::new(width, height)?,
            viewport: Viewport::new(top, bottom, left, right)?,
            iterations,
            method: self.method,
            output,
        })
    }
}
