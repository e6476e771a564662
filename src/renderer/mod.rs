pub mod caption;
pub mod clip;
pub mod frame_buffer;
pub mod timeline;
pub mod visual;

pub use caption::CaptionRenderer;
pub use clip::{ClipBuilder, SceneClip};
pub use frame_buffer::FrameBuffer;
pub use timeline::{FinalVideo, TimelineComposer};
pub use visual::SceneRenderer;
