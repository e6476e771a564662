use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Scenes aim for roughly this many seconds of narration each.
pub const SECONDS_PER_SCENE: f32 = 4.0;

/// A run never plans fewer scenes than this, no matter how short the request.
pub const MIN_SCENES: usize = 3;

/// One timed text+visual unit of the output video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Position in the timeline; also selects the visual theme.
    pub index: usize,
    /// Narration text shown as the scene caption.
    pub text: String,
    /// Seconds this scene occupies in the timeline.
    pub duration: f32,
}

impl Scene {
    pub fn new(index: usize, text: String, duration: f32) -> Self {
        Self {
            index,
            text,
            duration,
        }
    }
}

fn sentence_end() -> &'static Regex {
    static SENTENCE_END: OnceLock<Regex> = OnceLock::new();
    SENTENCE_END.get_or_init(|| Regex::new(r"[.!?]").unwrap())
}

/// Split a script into trimmed, non-empty sentences.
///
/// `.`, `!` and `?` are all treated as equivalent terminators.
pub fn split_sentences(script: &str) -> Vec<String> {
    sentence_end()
        .split(script)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Partition a script into scene texts bounded by the requested duration.
///
/// Targets `max(3, floor(duration / 4))` scenes; consecutive sentences are
/// grouped evenly and joined with single spaces. Scripts with fewer sentences
/// than the target yield fewer scenes; scripts with more are truncated to the
/// target. A script with no usable sentences yields no scenes.
pub fn segment(script: &str, total_duration: f32) -> Vec<String> {
    let sentences = split_sentences(script);

    let target_scenes = MIN_SCENES.max((total_duration / SECONDS_PER_SCENE) as usize);
    let group_size = 1.max(sentences.len() / target_scenes);

    let mut scenes: Vec<String> = sentences
        .chunks(group_size)
        .map(|group| group.join(" "))
        .filter(|text| !text.is_empty())
        .collect();

    scenes.truncate(target_scenes);
    scenes
}

/// Segment a script and assign each scene an equal share of the duration.
pub fn plan_scenes(script: &str, total_duration: f32) -> Vec<Scene> {
    let texts = segment(script, total_duration);
    if texts.is_empty() {
        return Vec::new();
    }

    let per_scene = total_duration / texts.len() as f32;
    texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| Scene::new(index, text, per_scene))
        .collect()
}
