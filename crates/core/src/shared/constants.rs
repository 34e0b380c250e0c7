pub const DEFAULT_FRAMERATE: f64 = 25.0;
pub const DEFAULT_PLAY_SPEED: f64 = 1.0;

/// Appended to the destination file stem to name the scratch frame directory.
pub const FRAME_DIR_SUFFIX: &str = "-frames";
pub const FRAME_INDEX_DIGITS: usize = 6;
pub const FRAME_EXTENSION: &str = "png";

pub const FFMPEG_BINARY: &str = "ffmpeg";
pub const OUTPUT_PIXEL_FORMAT: &str = "yuv420p";

pub const BODY_MODEL_REPO_URL: &str = "https://github.com/TuragaLab/flybody.git";
pub const BODY_MODEL_REVISION: &str = "e1a6135c310c39291f4fb68d682f2fd0b05e0555";
pub const BODY_MODEL_SUBDIR: &str = "flybody/fruitfly/assets";
pub const BODY_MODEL_DEST: &str = "_inbox/flybody";
