use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::controllers::ports::video_encoder::{VideoEncoderError, VideoEncoderPort};

const CONCAT_LIST_NAME: &str = "frames.ffconcat";

// Keeps error messages readable when ffmpeg prints its full banner
const STDERR_TAIL_LINES: usize = 8;

/// Assembles PNG frames into an H.264 video by running the external
/// `ffmpeg` executable with the concat demuxer.
pub struct FfmpegVideoEncoder {
    executable: PathBuf,
}

impl FfmpegVideoEncoder {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Default for FfmpegVideoEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

/// One `file '<path>'` line per frame, single quotes escaped the way the
/// concat demuxer expects.
#[must_use]
pub fn concat_list(frames: &[PathBuf]) -> String {
    frames
        .iter()
        .map(|frame| {
            let escaped = frame.to_string_lossy().replace('\'', r"'\''");
            format!("file '{}'\n", escaped)
        })
        .collect()
}

#[must_use]
pub fn ffmpeg_arguments(list: &Path, fps: u32, output: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-f", "concat", "-safe", "0", "-r"]
        .iter()
        .map(OsString::from)
        .collect();

    args.push(fps.to_string().into());
    args.push("-i".into());
    args.push(list.as_os_str().to_owned());
    args.push("-pix_fmt".into());
    args.push("yuv420p".into());
    args.push(output.as_os_str().to_owned());
    args
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);

    lines[start..].join("\n")
}

impl VideoEncoderPort for FfmpegVideoEncoder {
    fn encode(&self, frames: &[PathBuf], fps: u32, output: &Path) -> Result<(), VideoEncoderError> {
        let first = frames.first().ok_or(VideoEncoderError::NoFrames)?;

        let absolute: Vec<PathBuf> = frames
            .iter()
            .map(fs::canonicalize)
            .collect::<io::Result<_>>()?;

        let list_directory = first
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        let list_path = list_directory.join(CONCAT_LIST_NAME);
        fs::write(&list_path, concat_list(&absolute))?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let args = ffmpeg_arguments(&list_path, fps, output);
        debug!("Running {} {:?}", self.executable.display(), args);

        let result = Command::new(&self.executable)
            .args(&args)
            .stdin(Stdio::null())
            .output();

        // the list is scratch data whatever the outcome
        let _ = fs::remove_file(&list_path);

        let result = match result {
            Ok(result) => result,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(VideoEncoderError::EncoderNotFound {
                    executable: self.executable.clone(),
                });
            }
            Err(err) => return Err(err.into()),
        };

        if !result.status.success() {
            return Err(VideoEncoderError::EncoderFailed {
                status: result.status.to_string(),
                stderr: stderr_tail(&result.stderr),
            });
        }

        info!(
            "Encoded {} frames at {} fps into {}",
            frames.len(),
            fps,
            output.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concat_list_lists_frames_in_order() {
        let frames = vec![PathBuf::from("/tmp/a/MB_1.png"), PathBuf::from("/tmp/a/MB_2.png")];

        assert_eq!(
            concat_list(&frames),
            "file '/tmp/a/MB_1.png'\nfile '/tmp/a/MB_2.png'\n"
        );
    }

    #[test]
    fn test_concat_list_escapes_single_quotes() {
        let frames = vec![PathBuf::from("/tmp/it's/MB_1.png")];

        assert_eq!(concat_list(&frames), "file '/tmp/it'\\''s/MB_1.png'\n");
    }

    #[test]
    fn test_ffmpeg_arguments() {
        let args = ffmpeg_arguments(Path::new("list.txt"), 30, Path::new("out.mp4"));
        let args: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-y", "-f", "concat", "-safe", "0", "-r", "30", "-i", "list.txt", "-pix_fmt",
                "yuv420p", "out.mp4"
            ]
        );
    }

    #[test]
    fn test_encode_without_frames() {
        let encoder = FfmpegVideoEncoder::default();
        let result = encoder.encode(&[], 30, Path::new("out.mp4"));

        assert!(matches!(result, Err(VideoEncoderError::NoFrames)));
    }

    #[test]
    fn test_encode_with_missing_executable() {
        let dir = tempfile::tempdir().unwrap();
        let frame = dir.path().join("MB_1.png");
        fs::write(&frame, b"not really a png").unwrap();
        let encoder = FfmpegVideoEncoder::new(dir.path().join("no-such-ffmpeg"));

        let result = encoder.encode(&[frame], 30, &dir.path().join("out.mp4"));

        assert!(matches!(result, Err(VideoEncoderError::EncoderNotFound { .. })));
        assert!(!dir.path().join(CONCAT_LIST_NAME).exists());
    }

    #[test]
    fn test_stderr_tail_keeps_last_lines() {
        let stderr = (0..20).map(|i| format!("line {}\n", i)).collect::<String>();
        let tail = stderr_tail(stderr.as_bytes());

        assert!(tail.starts_with("line 12"));
        assert!(tail.ends_with("line 19"));
    }
}
