use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::recording::frame_pacer::FramePacer;
use crate::recording::progress_reporter::{ConsoleProgressReporter, ProgressReporter};
use crate::recording::scratch_dir::ScratchFrameDir;
use crate::shared::constants::{DEFAULT_FRAMERATE, DEFAULT_PLAY_SPEED};
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_encoder::{EncodeError, EncodeJob, VideoEncoder};
use crate::video::infrastructure::ffmpeg_cli_encoder::FfmpegCliEncoder;
use crate::video::infrastructure::image_file_writer::ImageFileWriter;

#[derive(Error, Debug)]
pub enum VideoWriterError {
    #[error("`{0}` has already been written")]
    AlreadyWritten(PathBuf),
    #[error("invalid recording settings: {0}")]
    InvalidConfig(String),
    #[error("failed to prepare frame directory {path}: {source}")]
    ScratchDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("render callback failed: {0}")]
    Render(#[source] Box<dyn std::error::Error>),
    #[error("frame shape changed from {expected:?} to {actual:?}")]
    FrameShapeMismatch {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },
    #[error("failed to write frame {path}: {source}")]
    FrameWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error>,
    },
    #[error("failed to encode {path} (frames kept in {frame_dir}): {source}")]
    Encode {
        path: PathBuf,
        frame_dir: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("failed to remove frame directory {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What a single [`VideoWriter::submit`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The timestamp is before the next frame time; nothing was rendered.
    Skipped,
    /// A frame was rendered and stored under this index.
    Written { index: usize },
    /// The last frame was stored and the video has been encoded.
    Finalized { frames: usize },
}

/// Records a simulation into a video at a fixed output framerate.
///
/// The caller drives the simulation and calls [`submit`](Self::submit)
/// as often as it likes, typically once per step. A frame is rendered
/// only when the simulation has reached the next frame time, so step
/// size and output cadence stay independent. Frames go to a scratch
/// directory next to the destination; once `duration` is covered the
/// encoder runs and the scratch directory is removed.
///
/// ```no_run
/// use sim_recorder_core::recording::video_writer::VideoWriter;
/// use sim_recorder_core::shared::frame::Frame;
///
/// let mut writer = VideoWriter::new("out/fall.mp4", 2.0).with_framerate(30.0);
/// let mut t = 0.0;
/// while writer.is_accepting() {
///     writer.submit(t, || Frame::filled(64, 48, 3, 0))?;
///     t += 0.002;
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct VideoWriter {
    path: PathBuf,
    pacer: FramePacer,
    verbose: bool,
    frame_shape: Option<(usize, usize, usize)>,
    image_writer: Box<dyn ImageWriter>,
    encoder: Box<dyn VideoEncoder>,
    progress: Box<dyn ProgressReporter>,
}

impl VideoWriter {
    /// `duration` is the span of simulation time the video covers.
    pub fn new(path: impl Into<PathBuf>, duration: f64) -> Self {
        Self {
            path: path.into(),
            pacer: FramePacer::new(duration, DEFAULT_PLAY_SPEED, DEFAULT_FRAMERATE),
            verbose: true,
            frame_shape: None,
            image_writer: Box::new(ImageFileWriter::new()),
            encoder: Box::new(FfmpegCliEncoder::new()),
            progress: Box::new(ConsoleProgressReporter::stdout()),
        }
    }

    /// Simulation seconds consumed per second of video.
    pub fn with_play_speed(mut self, play_speed: f64) -> Self {
        self.pacer = FramePacer::new(self.pacer.duration(), play_speed, self.pacer.framerate());
        self
    }

    pub fn with_framerate(mut self, framerate: f64) -> Self {
        self.pacer = FramePacer::new(self.pacer.duration(), self.pacer.play_speed(), framerate);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn VideoEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn with_image_writer(mut self, image_writer: Box<dyn ImageWriter>) -> Self {
        self.image_writer = image_writer;
        self
    }

    /// Replaces the console progress line; only consulted when verbose.
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn duration(&self) -> f64 {
        self.pacer.duration()
    }

    pub fn play_speed(&self) -> f64 {
        self.pacer.play_speed()
    }

    pub fn framerate(&self) -> f64 {
        self.pacer.framerate()
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn frames_written(&self) -> usize {
        self.pacer.frames_written()
    }

    pub fn next_frame_time(&self) -> f64 {
        self.pacer.next_frame_time()
    }

    /// Frame count used for progress output.
    pub fn total_frames(&self) -> usize {
        self.pacer.total_frames()
    }

    /// Where the intermediate frame images are stored.
    pub fn frame_dir(&self) -> Option<PathBuf> {
        ScratchFrameDir::for_destination(&self.path).map(|dir| dir.path().to_path_buf())
    }

    /// True until the last frame has been written.
    pub fn is_accepting(&self) -> bool {
        self.pacer.is_accepting()
    }

    /// Renders and stores a frame if `timestamp` has reached the next frame time.
    pub fn submit<F>(&mut self, timestamp: f64, render: F) -> Result<SubmitOutcome, VideoWriterError>
    where
        F: FnOnce() -> Frame,
    {
        self.try_submit(timestamp, || {
            Ok::<_, std::convert::Infallible>(render())
        })
    }

    /// Like [`submit`](Self::submit) for render callbacks that can fail.
    ///
    /// A render error leaves the writer untouched, so the same frame is
    /// attempted again on the next call.
    pub fn try_submit<F, E>(
        &mut self,
        timestamp: f64,
        render: F,
    ) -> Result<SubmitOutcome, VideoWriterError>
    where
        F: FnOnce() -> Result<Frame, E>,
        E: Into<Box<dyn std::error::Error>>,
    {
        let scratch = self.checked_scratch_dir()?;
        if !self.is_accepting() {
            return Err(VideoWriterError::AlreadyWritten(self.path.clone()));
        }
        if !self.pacer.is_due(timestamp) {
            return Ok(SubmitOutcome::Skipped);
        }

        let frame = render().map_err(|e| VideoWriterError::Render(e.into()))?;
        let index = self.write_frame(&scratch, &frame)?;

        if self.is_accepting() {
            return Ok(SubmitOutcome::Written { index });
        }
        self.finalize(&scratch)?;
        Ok(SubmitOutcome::Finalized {
            frames: self.frames_written(),
        })
    }

    /// Checks the settings without touching the filesystem.
    pub fn validate(&self) -> Result<(), VideoWriterError> {
        self.checked_scratch_dir().map(|_| ())
    }

    fn checked_scratch_dir(&self) -> Result<ScratchFrameDir, VideoWriterError> {
        let invalid = |msg: String| Err(VideoWriterError::InvalidConfig(msg));
        let (duration, play_speed, framerate) =
            (self.duration(), self.play_speed(), self.framerate());

        if !duration.is_finite() {
            return invalid(format!("duration must be finite, got {duration}"));
        }
        if !(play_speed.is_finite() && play_speed > 0.0) {
            return invalid(format!("play speed must be positive, got {play_speed}"));
        }
        if !(framerate.is_finite() && framerate > 0.0) {
            return invalid(format!("framerate must be positive, got {framerate}"));
        }
        match ScratchFrameDir::for_destination(&self.path) {
            Some(dir) => Ok(dir),
            None => invalid(format!("{} has no file name", self.path.display())),
        }
    }

    fn write_frame(
        &mut self,
        scratch: &ScratchFrameDir,
        frame: &Frame,
    ) -> Result<usize, VideoWriterError> {
        let index = self.frames_written();
        match self.frame_shape {
            Some(expected) if expected != frame.shape() => {
                return Err(VideoWriterError::FrameShapeMismatch {
                    expected,
                    actual: frame.shape(),
                });
            }
            _ => {}
        }

        if index == 0 {
            scratch
                .reset()
                .map_err(|source| VideoWriterError::ScratchDir {
                    path: scratch.path().to_path_buf(),
                    source,
                })?;
            log::info!(
                "recording {} frames to {}",
                self.total_frames(),
                self.path.display()
            );
        }

        if self.verbose {
            self.progress.progress(index + 1, self.total_frames());
        }

        let frame_path = scratch.frame_path(index);
        self.image_writer
            .write(&frame_path, frame)
            .map_err(|source| VideoWriterError::FrameWrite {
                path: frame_path,
                source,
            })?;

        self.frame_shape = Some(frame.shape());
        Ok(self.pacer.advance())
    }

    fn finalize(&mut self, scratch: &ScratchFrameDir) -> Result<(), VideoWriterError> {
        if self.verbose {
            self.progress.encoding();
        }

        let job = EncodeJob::new(scratch.frame_pattern(), self.framerate(), &self.path);
        log::info!(
            "encoding {} frames into {}",
            self.frames_written(),
            self.path.display()
        );

        if let Err(source) = self.encoder.encode(&job) {
            log::error!(
                "encoding {} failed, frames kept in {}: {source}",
                self.path.display(),
                scratch.path().display()
            );
            return Err(VideoWriterError::Encode {
                path: self.path.clone(),
                frame_dir: scratch.path().to_path_buf(),
                source,
            });
        }

        scratch
            .remove()
            .map_err(|source| VideoWriterError::Cleanup {
                path: scratch.path().to_path_buf(),
                source,
            })
    }
}
