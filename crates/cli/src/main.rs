mod settings;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use sim_recorder_core::assets::model_fetcher::{download_body_model_if_missing, FetchOutcome};
use sim_recorder_core::recording::video_writer::VideoWriter;
use sim_recorder_core::rendering::infrastructure::raster_renderer::RasterRenderer;
use sim_recorder_core::rendering::renderer_cache::RendererCache;
use sim_recorder_core::shared::constants::BODY_MODEL_DEST;
use sim_recorder_core::simulation::infrastructure::bouncing_ball::BouncingBallModel;
use sim_recorder_core::simulation::stepper::advance;
use sim_recorder_core::video::infrastructure::ffmpeg_cli_encoder::FfmpegCliEncoder;

use crate::settings::Settings;

/// Record physics simulations to video.
#[derive(Parser)]
#[command(name = "sim-recorder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Download the body model assets unless they are already present.
    FetchModel {
        /// Where the asset directory should end up.
        #[arg(long, default_value = BODY_MODEL_DEST)]
        dest: PathBuf,
    },

    /// Record a bouncing-ball simulation.
    Demo(DemoArgs),

    /// Show the stored recording defaults.
    Settings {
        /// Overwrite the stored defaults with the built-in ones.
        #[arg(long)]
        reset: bool,
    },
}

#[derive(clap::Args)]
struct DemoArgs {
    /// Output video file (container follows the extension).
    output: PathBuf,

    /// Simulation seconds to record.
    #[arg(long, default_value = "3.0")]
    duration: f64,

    /// Simulation seconds per video second.
    #[arg(long)]
    play_speed: Option<f64>,

    /// Output frames per second.
    #[arg(long)]
    framerate: Option<f64>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    /// Camera to render from (side or wide).
    #[arg(long)]
    camera: Option<String>,

    /// Initial height of the ball above the ground, in metres.
    #[arg(long, default_value = "1.0")]
    drop_height: f64,

    /// Initial horizontal velocity, in metres per second.
    #[arg(long, default_value = "0.0")]
    speed: f64,

    /// Path to the ffmpeg executable.
    #[arg(long)]
    ffmpeg: Option<String>,

    /// Suppress the progress line.
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::FetchModel { dest } => run_fetch_model(dest),
        Command::Demo(args) => run_demo(args, Settings::load()),
        Command::Settings { reset } => run_settings(reset),
    }
}

fn run_fetch_model(dest: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    match download_body_model_if_missing(&dest)? {
        FetchOutcome::AlreadyPresent => log::info!("{} already exists", dest.display()),
        FetchOutcome::Fetched => log::info!("Body model written to {}", dest.display()),
    }
    Ok(())
}

fn run_demo(args: DemoArgs, settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let play_speed = args.play_speed.unwrap_or(settings.play_speed);
    let framerate = args.framerate.unwrap_or(settings.framerate);
    let width = args.width.unwrap_or(settings.width);
    let height = args.height.unwrap_or(settings.height);
    let camera = args.camera.unwrap_or(settings.camera);
    let ffmpeg = args.ffmpeg.unwrap_or(settings.ffmpeg);

    let model = BouncingBallModel::default();
    let mut state = model.make_state(args.drop_height, args.speed);
    let mut renderers = RendererCache::<RasterRenderer>::new();

    let mut writer = VideoWriter::new(&args.output, args.duration)
        .with_play_speed(play_speed)
        .with_framerate(framerate)
        .with_verbose(!args.quiet)
        .with_encoder(Box::new(FfmpegCliEncoder::with_program(ffmpeg)));
    writer.validate()?;

    while writer.is_accepting() {
        advance(&model, &mut state, writer.next_frame_time())?;
        writer.try_submit(state.time, || {
            renderers.render(&model, &state, &camera, height, width)
        })?;
    }

    log::info!(
        "Output written to {} ({} frames)",
        args.output.display(),
        writer.frames_written()
    );
    Ok(())
}

fn run_settings(reset: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = Settings::config_path().ok_or("could not determine config directory")?;
    let settings = if reset {
        let defaults = Settings::default();
        defaults.save_to(&path)?;
        defaults
    } else {
        Settings::load_from(&path)
    };
    println!("{}", path.display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_demo_flags_parse() {
        let cli = Cli::try_parse_from([
            "sim-recorder",
            "demo",
            "out.mp4",
            "--duration",
            "1.5",
            "--framerate",
            "30",
            "--quiet",
        ])
        .unwrap();
        match cli.command {
            Command::Demo(args) => {
                assert_eq!(args.output, PathBuf::from("out.mp4"));
                assert_eq!(args.duration, 1.5);
                assert_eq!(args.framerate, Some(30.0));
                assert_eq!(args.play_speed, None);
                assert!(args.quiet);
            }
            _ => panic!("expected demo command"),
        }
    }

    #[test]
    fn test_fetch_model_defaults_to_inbox() {
        let cli = Cli::try_parse_from(["sim-recorder", "fetch-model"]).unwrap();
        match cli.command {
            Command::FetchModel { dest } => assert_eq!(dest, PathBuf::from(BODY_MODEL_DEST)),
            _ => panic!("expected fetch-model command"),
        }
    }

    #[test]
    fn test_fetch_model_leaves_existing_destination_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("flybody");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("fly.xml"), b"<mujoco/>").unwrap();

        run_fetch_model(dest.clone()).unwrap();
        assert_eq!(std::fs::read(dest.join("fly.xml")).unwrap(), b"<mujoco/>");
    }

    #[test]
    fn test_demo_with_unknown_camera_fails_before_encoding() {
        let tmp = tempfile::tempdir().unwrap();
        let args = DemoArgs {
            output: tmp.path().join("ball.mp4"),
            duration: 0.2,
            play_speed: None,
            framerate: Some(10.0),
            width: Some(32),
            height: Some(24),
            camera: Some("overhead".to_string()),
            drop_height: 1.0,
            speed: 0.0,
            ffmpeg: Some("/nonexistent/bin/ffmpeg".to_string()),
            quiet: true,
        };
        let err = run_demo(args, Settings::default()).unwrap_err();
        assert!(err.to_string().contains("overhead"));
        assert!(!tmp.path().join("ball-frames").exists());
    }

    #[test]
    fn test_demo_surfaces_missing_encoder_and_keeps_frames() {
        let tmp = tempfile::tempdir().unwrap();
        let args = DemoArgs {
            output: tmp.path().join("ball.mp4"),
            duration: 0.2,
            play_speed: None,
            framerate: Some(10.0),
            width: Some(32),
            height: Some(24),
            camera: None,
            drop_height: 1.0,
            speed: 0.0,
            ffmpeg: Some("/nonexistent/bin/ffmpeg".to_string()),
            quiet: true,
        };
        let err = run_demo(args, Settings::default()).unwrap_err();
        assert!(err.to_string().contains("failed to encode"));
        assert!(tmp.path().join("ball-frames/000001.png").exists());
    }
}
