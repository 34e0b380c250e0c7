pub mod frame_pacer;
pub mod progress_reporter;
pub mod scratch_dir;
pub mod video_writer;
