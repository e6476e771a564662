use crate::audio::NarrationSynthesizer;
use crate::config::AppConfig;
use crate::error::{PipelineError, Result};
use crate::export::ExportAdapter;
use crate::renderer::{ClipBuilder, SceneClip, TimelineComposer};
use crate::scene::{self, Scene};
use crate::script::{self, ScriptSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Filesystem scope of a single generation run.
///
/// Scratch artifacts live under a per-run directory and are removed when the
/// run ends, successfully or not. Nothing is shared across runs.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    scratch: PathBuf,
    output: PathBuf,
}

impl RunContext {
    pub fn create(scratch_root: &Path, output_dir: &Path) -> Result<Self> {
        let run_id = Uuid::new_v4();
        let scratch = scratch_root.join(format!("run_{run_id}"));
        std::fs::create_dir_all(&scratch)?;
        std::fs::create_dir_all(output_dir)?;

        Ok(Self {
            run_id,
            scratch,
            output: output_dir.to_path_buf(),
        })
    }

    pub fn scratch(&self) -> &Path {
        &self.scratch
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn scratch_path(&self, name: &str) -> PathBuf {
        self.scratch.join(name)
    }

    /// Remove this run's scratch directory. Best-effort.
    pub fn cleanup(&self) {
        if let Err(e) = std::fs::remove_dir_all(&self.scratch) {
            warn!("failed to clean scratch {}: {}", self.scratch.display(), e);
        }
    }
}

/// Orchestrates one topic-to-video run over the injected collaborators.
pub struct VideoGenerator<'a> {
    config: AppConfig,
    script_source: &'a dyn ScriptSource,
    narration: &'a dyn NarrationSynthesizer,
    exporter: &'a dyn ExportAdapter,
}

impl<'a> VideoGenerator<'a> {
    pub fn new(
        config: AppConfig,
        script_source: &'a dyn ScriptSource,
        narration: &'a dyn NarrationSynthesizer,
        exporter: &'a dyn ExportAdapter,
    ) -> Self {
        Self {
            config,
            script_source,
            narration,
            exporter,
        }
    }

    /// Generate one video. Scratch resources are cleaned up whether the run
    /// succeeds or fails.
    pub fn create_video(&self, topic: &str, duration: f32) -> Result<PathBuf> {
        let ctx = RunContext::create(&self.config.paths.scratch_dir, &self.config.paths.output_dir)?;
        let result = self.run(topic, duration, &ctx);
        ctx.cleanup();
        result
    }

    fn run(&self, topic: &str, duration: f32, ctx: &RunContext) -> Result<PathBuf> {
        info!("starting run {} for topic '{}'", ctx.run_id, topic);

        let outcome = script::acquire_script(self.script_source, topic, duration);
        let scenes = scene::plan_scenes(outcome.text(), duration);
        if scenes.is_empty() {
            return Err(PipelineError::EmptyScript);
        }
        info!("planned {} scenes", scenes.len());

        let builder = ClipBuilder::new(&self.config.video, &self.config.caption);
        let script_text = outcome.text().to_string();
        let narration_path = ctx.scratch_path("narration.wav");

        // Narration and scene stills have no data dependency; build both
        // sides concurrently and join before composition.
        let (audio, clips) = rayon::join(
            || self.narration.synthesize(&script_text, &narration_path),
            || self.build_clips(&builder, &scenes, ctx),
        );

        let audio = audio.map_err(|e| PipelineError::Narration(format!("{e:#}")))?;
        let clips = clips?;

        let video = TimelineComposer::compose(clips, audio, ctx.scratch())?;
        info!(
            "composed timeline: {:.2}s over {} clips",
            video.duration,
            video.clips.len()
        );

        let output = self
            .exporter
            .export(&video, ctx.scratch(), ctx.output())
            .map_err(|e| PipelineError::Export(format!("{e:#}")))?;

        info!("run {} exported {}", ctx.run_id, output.display());
        Ok(output)
    }

    fn build_clips(
        &self,
        builder: &ClipBuilder,
        scenes: &[Scene],
        ctx: &RunContext,
    ) -> Result<Vec<SceneClip>> {
        // par_iter keeps input order in collect, so clips land in scene index
        // order regardless of completion order.
        scenes
            .par_iter()
            .map(|scene| {
                let mut rng = match self.config.video.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(scene.index as u64)),
                    None => StdRng::from_os_rng(),
                };
                builder.build(scene, &mut rng, ctx.scratch())
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|e| PipelineError::Composition(format!("{e:#}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_context_creates_and_cleans_scratch() {
        let root = TempDir::new().unwrap();
        let scratch_root = root.path().join("scratch");
        let output = root.path().join("out");

        let ctx = RunContext::create(&scratch_root, &output).unwrap();
        assert!(ctx.scratch().exists());
        assert!(output.exists());

        let file = ctx.scratch_path("probe.txt");
        std::fs::write(&file, "x").unwrap();

        ctx.cleanup();
        assert!(!ctx.scratch().exists());
        // The output directory outlives the run.
        assert!(output.exists());
    }

    #[test]
    fn test_run_contexts_are_isolated() {
        let root = TempDir::new().unwrap();
        let a = RunContext::create(root.path(), root.path()).unwrap();
        let b = RunContext::create(root.path(), root.path()).unwrap();
        assert_ne!(a.scratch(), b.scratch());
    }
}
