use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub video: VideoConfig,
    pub caption: CaptionConfig,
    pub script: ScriptConfig,
    pub narration: NarrationConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VideoConfig {
    /// Portrait output dimensions.
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Optional seed for the decorative overlay; scene `i` derives `seed + i`.
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CaptionConfig {
    pub wrap_chars: usize,
    pub font_size: f32,
    pub font_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptConfig {
    pub ollama_url: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NarrationConfig {
    /// TTS command; receives the script on stdin and writes a WAV file.
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PathsConfig {
    pub output_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            video: VideoConfig {
                width: 1080,
                height: 1920,
                fps: 30,
                seed: None,
            },
            caption: CaptionConfig {
                wrap_chars: 30,
                font_size: 70.0,
                font_path: PathBuf::from("assets/fonts/DejaVuSans-Bold.ttf"),
            },
            script: ScriptConfig {
                ollama_url: "http://localhost:11434".to_string(),
                model: "llama3.2".to_string(),
            },
            narration: NarrationConfig {
                command: "piper".to_string(),
                args: vec![],
            },
            paths: PathsConfig {
                output_dir: PathBuf::from("output"),
                scratch_dir: PathBuf::from("temp"),
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("video.width", 1080)?
            .set_default("video.height", 1920)?
            .set_default("video.fps", 30)?
            .set_default("video.seed", None::<u64>)?
            .set_default("caption.wrap_chars", 30)?
            .set_default("caption.font_size", 70.0)?
            .set_default("caption.font_path", "assets/fonts/DejaVuSans-Bold.ttf")?
            .set_default("script.ollama_url", "http://localhost:11434")?
            .set_default("script.model", "llama3.2")?
            .set_default("narration.command", "piper")?
            .set_default("narration.args", Vec::<String>::new())?
            .set_default("paths.output_dir", "output")?
            .set_default("paths.scratch_dir", "temp")?
            // Load from file if exists
            .add_source(config::File::with_name("shortreel").required(false))
            // Allow env var overrides (e.g. SHORTREEL_VIDEO__FPS=24)
            .add_source(config::Environment::with_prefix("SHORTREEL").separator("__"));

        builder.build()?.try_deserialize()
    }
}
