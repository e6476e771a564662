use anyhow::Result;
use clap::Parser;
use shortreel::script;
use shortreel::{
    AppConfig, CommandSynthesizer, FfmpegExporter, OllamaScriptSource, VideoGenerator,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shortreel")]
#[command(about = "Short-form Video Composer", long_about = None)]
struct Cli {
    /// Topic to build the video around
    topic: String,

    /// Total video duration in seconds
    #[arg(short, long, default_value_t = 60.0)]
    duration: f32,

    /// Output directory for finished videos
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Scratch directory for intermediate artifacts
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Caption font file (TTF/OTF)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Seed for the decorative scene overlay
    #[arg(long)]
    seed: Option<u64>,

    /// Print the planned scenes as JSON instead of rendering
    #[arg(long)]
    plan: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.output_dir {
        config.paths.output_dir = dir;
    }
    if let Some(dir) = cli.scratch_dir {
        config.paths.scratch_dir = dir;
    }
    if let Some(font) = cli.font {
        config.caption.font_path = font;
    }
    if cli.seed.is_some() {
        config.video.seed = cli.seed;
    }

    println!("🎬 shortreel - Short-form Video Composer\n");

    let source = OllamaScriptSource::new(&config.script)?;

    if cli.plan {
        let outcome = script::acquire_script(&source, &cli.topic, cli.duration);
        let scenes = shortreel::scene::plan_scenes(outcome.text(), cli.duration);
        println!("{}", serde_json::to_string_pretty(&scenes)?);
        return Ok(());
    }

    if !FfmpegExporter::is_available() {
        println!("⚠️  FFmpeg not found. Install ffmpeg to enable video export.");
    }

    let narration = CommandSynthesizer::new(&config.narration);
    let exporter = FfmpegExporter::new(&config.video);
    let generator = VideoGenerator::new(config, &source, &narration, &exporter);

    match generator.create_video(&cli.topic, cli.duration) {
        Ok(path) => {
            println!("✨ Video created successfully: {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Video generation failed: {e}");
            std::process::exit(1);
        }
    }
}
