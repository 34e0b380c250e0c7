use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("failed to launch encoder `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encoder exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("encoder did not produce {0}")]
    MissingOutput(PathBuf),
}

/// Everything an encoder needs to turn a numbered image sequence into a video.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodeJob {
    /// printf-style input pattern, e.g. `clip-frames/%06d.png`.
    pub frame_pattern: PathBuf,
    pub framerate: f64,
    pub output: PathBuf,
}

impl EncodeJob {
    pub fn new(frame_pattern: impl Into<PathBuf>, framerate: f64, output: &Path) -> Self {
        Self {
            frame_pattern: frame_pattern.into(),
            framerate,
            output: output.to_path_buf(),
        }
    }
}

/// Encodes an on-disk image sequence into a video container.
///
/// Implementations must overwrite an existing output, keep their own
/// console output quiet and produce `yuv420p` video.
pub trait VideoEncoder {
    fn encode(&self, job: &EncodeJob) -> Result<(), EncodeError>;
}
