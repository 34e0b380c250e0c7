pub mod ffmpeg_cli_encoder;
pub mod image_file_writer;
