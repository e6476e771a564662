pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod script;

pub use audio::{AudioDecoder, CommandSynthesizer, NarrationAudio, NarrationSynthesizer};
pub use config::AppConfig;
pub use error::{PipelineError, Result};
pub use export::{ExportAdapter, FfmpegExporter};
pub use pipeline::{RunContext, VideoGenerator};
pub use renderer::{ClipBuilder, FinalVideo, FrameBuffer, SceneClip, SceneRenderer, TimelineComposer};
pub use scene::Scene;
pub use script::{OllamaScriptSource, ScriptOutcome, ScriptSource};
