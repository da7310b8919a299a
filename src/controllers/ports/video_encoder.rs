use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum VideoEncoderError {
    NoFrames,
    EncoderNotFound { executable: PathBuf },
    Io(io::Error),
    EncoderFailed { status: String, stderr: String },
}

impl fmt::Display for VideoEncoderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFrames => write!(f, "no frames to encode"),
            Self::EncoderNotFound { executable } => {
                write!(f, "video encoder {} was not found", executable.display())
            }
            Self::Io(err) => write!(f, "video encoder i/o error: {}", err),
            Self::EncoderFailed { status, stderr } => {
                write!(f, "video encoder exited with {}: {}", status, stderr)
            }
        }
    }
}

impl Error for VideoEncoderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for VideoEncoderError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Assembles ordered frame files into one video at `fps` frames per second.
pub trait VideoEncoderPort {
    fn encode(&self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<(), VideoEncoderError>;
}
