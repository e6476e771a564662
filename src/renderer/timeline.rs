use crate::audio::{self, NarrationAudio};
use crate::error::{PipelineError, Result};
use crate::renderer::SceneClip;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Allowable drift between reconciled durations, in seconds.
const DURATION_EPSILON: f32 = 1e-3;

/// The composed timeline: ordered clips plus the single narration track,
/// with one reconciled duration.
#[derive(Debug, Clone)]
pub struct FinalVideo {
    pub clips: Vec<SceneClip>,
    pub audio: NarrationAudio,
    pub duration: f32,
}

impl FinalVideo {
    /// Sum of the (possibly cut) clip durations.
    pub fn visual_duration(&self) -> f32 {
        self.clips.iter().map(|c| c.duration).sum()
    }
}

/// Concatenates scene clips and reconciles the result with the narration.
pub struct TimelineComposer;

impl TimelineComposer {
    /// Compose clips (already in index order) with the narration audio.
    ///
    /// Whichever track runs longer is trimmed to the shorter one: either the
    /// clip list is cut at the audio duration, or the narration WAV is
    /// trimmed to the visual duration. Scene order is preserved, cuts are
    /// hard (no transitions).
    pub fn compose(
        clips: Vec<SceneClip>,
        audio: NarrationAudio,
        scratch: &Path,
    ) -> Result<FinalVideo> {
        if clips.is_empty() {
            return Err(PipelineError::EmptyTimeline);
        }

        let visual: f32 = clips.iter().map(|c| c.duration).sum();

        if visual > audio.duration + DURATION_EPSILON {
            info!(
                "visual track ({visual:.2}s) longer than narration ({:.2}s), cutting clips",
                audio.duration
            );
            let duration = audio.duration;
            let clips = cut_clips(clips, duration);
            if clips.is_empty() {
                return Err(PipelineError::Composition(
                    "narration track is empty".to_string(),
                ));
            }
            Ok(FinalVideo {
                clips,
                audio,
                duration,
            })
        } else if audio.duration > visual + DURATION_EPSILON {
            info!(
                "narration ({:.2}s) longer than visual track ({visual:.2}s), trimming audio",
                audio.duration
            );
            let trimmed_path = scratch.join(format!("narration_{}.wav", Uuid::new_v4()));
            let audio = audio::trim_wav(&audio.path, visual, &trimmed_path)
                .map_err(|e| PipelineError::Composition(format!("{e:#}")))?;
            Ok(FinalVideo {
                clips,
                audio,
                duration: visual,
            })
        } else {
            Ok(FinalVideo {
                clips,
                audio,
                duration: visual,
            })
        }
    }
}

/// Keep clips from t=0 up to `target` seconds: the clip crossing the cut is
/// shortened, everything after it is dropped.
fn cut_clips(clips: Vec<SceneClip>, target: f32) -> Vec<SceneClip> {
    let mut kept = Vec::new();
    let mut elapsed = 0.0f32;

    for mut clip in clips {
        if elapsed + clip.duration <= target + DURATION_EPSILON {
            elapsed += clip.duration;
            kept.push(clip);
            continue;
        }

        let remaining = target - elapsed;
        if remaining > DURATION_EPSILON {
            clip.duration = remaining;
            kept.push(clip);
        }
        break;
    }

    kept
}
