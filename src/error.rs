use thiserror::Error;

/// Fatal failure classes of a generation run.
///
/// Recoverable conditions (script source unavailable, caption rendering
/// failure) never reach this enum; they are handled where they occur and only
/// logged.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("script produced no usable sentences")]
    EmptyScript,

    #[error("cannot compose a timeline from zero scene clips")]
    EmptyTimeline,

    #[error("narration synthesis failed: {0}")]
    Narration(String),

    #[error("composition failed: {0}")]
    Composition(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
