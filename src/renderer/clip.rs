use crate::config::{CaptionConfig, VideoConfig};
use crate::renderer::caption::{self, CaptionRenderer};
use crate::renderer::{FrameBuffer, SceneRenderer};
use crate::scene::Scene;
use anyhow::Result;
use rand::Rng;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

/// A timed visual unit: one baked scene still and its duration.
#[derive(Debug, Clone)]
pub struct SceneClip {
    pub index: usize,
    pub image_path: PathBuf,
    pub duration: f32,
    /// False when the clip degraded to background-only.
    pub captioned: bool,
}

/// Builds scene clips: background render, caption overlay, scratch write.
///
/// Caption rendering is best-effort. A font that fails to load disables
/// captions for the run; a per-scene draw failure degrades that scene to its
/// background. Neither aborts the pipeline.
pub struct ClipBuilder {
    renderer: SceneRenderer,
    caption: Option<CaptionRenderer>,
    wrap_chars: usize,
}

impl ClipBuilder {
    pub fn new(video: &VideoConfig, caption_cfg: &CaptionConfig) -> Self {
        let caption =
            match CaptionRenderer::from_file(&caption_cfg.font_path, caption_cfg.font_size) {
                Ok(renderer) => Some(renderer),
                Err(e) => {
                    warn!("caption rendering disabled, clips will be background-only: {e:#}");
                    None
                }
            };

        Self {
            renderer: SceneRenderer::new(video.width, video.height),
            caption,
            wrap_chars: caption_cfg.wrap_chars,
        }
    }

    /// Render one scene into a clip still under the scratch directory.
    pub fn build<R: Rng>(&self, scene: &Scene, rng: &mut R, scratch: &Path) -> Result<SceneClip> {
        let mut buffer = self.renderer.render(scene.index, rng);
        let captioned = self.draw_caption(&mut buffer, scene);

        let image_path = scratch.join(format!("scene_{}_{}.png", scene.index, Uuid::new_v4()));
        buffer.save_png(&image_path)?;

        Ok(SceneClip {
            index: scene.index,
            image_path,
            duration: scene.duration,
            captioned,
        })
    }

    fn draw_caption(&self, buffer: &mut FrameBuffer, scene: &Scene) -> bool {
        let Some(renderer) = &self.caption else {
            return false;
        };

        let lines = caption::wrap(&scene.text, self.wrap_chars);
        match renderer.draw(buffer, &lines) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "caption rendering failed for scene {}, using background only: {e:#}",
                    scene.index
                );
                false
            }
        }
    }
}
