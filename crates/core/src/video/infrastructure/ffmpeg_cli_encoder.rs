use std::ffi::OsString;
use std::process::Command;

use crate::shared::constants::{FFMPEG_BINARY, OUTPUT_PIXEL_FORMAT};
use crate::video::domain::video_encoder::{EncodeError, EncodeJob, VideoEncoder};

/// Encodes image sequences by running the `ffmpeg` command-line tool.
///
/// The codec is left to ffmpeg's default for the output container (H.264
/// for `.mp4`); only the pixel format is pinned so the result plays in
/// common players.
pub struct FfmpegCliEncoder {
    program: OsString,
}

impl FfmpegCliEncoder {
    pub fn new() -> Self {
        Self::with_program(FFMPEG_BINARY)
    }

    /// Uses a specific ffmpeg executable instead of the one on `PATH`.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args(job: &EncodeJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "error"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push("-framerate".into());
        args.push(job.framerate.to_string().into());
        args.push("-i".into());
        args.push(job.frame_pattern.clone().into_os_string());
        args.push("-pix_fmt".into());
        args.push(OUTPUT_PIXEL_FORMAT.into());
        args.push(job.output.clone().into_os_string());
        args
    }
}

impl Default for FfmpegCliEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoEncoder for FfmpegCliEncoder {
    fn encode(&self, job: &EncodeJob) -> Result<(), EncodeError> {
        let args = Self::args(job);
        log::debug!("running {:?} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| EncodeError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })?;

        if !output.status.success() {
            return Err(EncodeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        if !job.output.exists() {
            return Err(EncodeError::MissingOutput(job.output.clone()));
        }
        Ok(())
    }
}
