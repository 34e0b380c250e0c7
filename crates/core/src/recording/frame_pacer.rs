/// Maps simulation timestamps onto a fixed output cadence.
///
/// Frame `n` is due at simulation time `n * play_speed / framerate`; the
/// job covers every frame whose due time lies before `duration`, capped
/// at [`max_frames`](Self::max_frames) so rounding in the due time can
/// never add a frame past the bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePacer {
    duration: f64,
    play_speed: f64,
    framerate: f64,
    frames_written: usize,
}

impl FramePacer {
    pub fn new(duration: f64, play_speed: f64, framerate: f64) -> Self {
        Self {
            duration,
            play_speed,
            framerate,
            frames_written: 0,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn play_speed(&self) -> f64 {
        self.play_speed
    }

    pub fn framerate(&self) -> f64 {
        self.framerate
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn next_frame_time(&self) -> f64 {
        self.frames_written as f64 * self.play_speed / self.framerate
    }

    pub fn is_accepting(&self) -> bool {
        self.next_frame_time() < self.duration && self.frames_written < self.max_frames()
    }

    pub fn is_due(&self, timestamp: f64) -> bool {
        timestamp >= self.next_frame_time()
    }

    /// Frame count shown in progress output.
    pub fn total_frames(&self) -> usize {
        let total = (self.duration / self.play_speed * self.framerate).floor();
        if total.is_finite() && total > 0.0 {
            total as usize
        } else {
            0
        }
    }

    /// Upper bound on the number of frames a job can produce.
    pub fn max_frames(&self) -> usize {
        let max = (self.duration / self.play_speed * self.framerate).ceil();
        if max.is_finite() && max > 0.0 {
            max as usize
        } else {
            0
        }
    }

    /// Records one written frame and returns its index.
    pub(crate) fn advance(&mut self) -> usize {
        let index = self.frames_written;
        self.frames_written += 1;
        index
    }
}
