use crate::config::VideoConfig;
use crate::renderer::FinalVideo;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// External muxing boundary: a reconciled timeline goes in, a playable file
/// comes out. Encoding parameters are the adapter's business.
pub trait ExportAdapter: Send + Sync {
    fn export(&self, video: &FinalVideo, scratch: &Path, output_dir: &Path) -> Result<PathBuf>;
}

/// Exports the timeline with an external FFmpeg process.
pub struct FfmpegExporter {
    width: u32,
    height: u32,
    fps: u32,
}

impl FfmpegExporter {
    pub fn new(config: &VideoConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            fps: config.fps,
        }
    }

    /// Check if FFmpeg is available
    pub fn is_available() -> bool {
        Command::new("ffmpeg").arg("-version").output().is_ok()
    }

    /// Write the ffconcat still list for the clip sequence.
    ///
    /// The final still is listed a second time without a duration so the
    /// concat demuxer holds the last frame to the end.
    fn write_concat_list(video: &FinalVideo, scratch: &Path) -> Result<PathBuf> {
        let mut content = String::from("ffconcat version 1.0\n");
        for clip in &video.clips {
            content.push_str(&format!(
                "file '{}'\nduration {:.3}\n",
                clip.image_path.display(),
                clip.duration
            ));
        }
        if let Some(last) = video.clips.last() {
            content.push_str(&format!("file '{}'\n", last.image_path.display()));
        }

        let path = scratch.join("concat.txt");
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write concat list: {}", path.display()))?;
        Ok(path)
    }
}

impl ExportAdapter for FfmpegExporter {
    fn export(&self, video: &FinalVideo, scratch: &Path, output_dir: &Path) -> Result<PathBuf> {
        if !Self::is_available() {
            anyhow::bail!("FFmpeg not found. Please install ffmpeg to enable video export.");
        }

        let concat_list = Self::write_concat_list(video, scratch)?;
        let output_path = output_dir.join(format!("{}.mp4", Uuid::new_v4()));

        let status = Command::new("ffmpeg")
            .arg("-y") // Overwrite output
            .arg("-f")
            .arg("concat")
            .arg("-safe")
            .arg("0")
            .arg("-i")
            .arg(&concat_list)
            .arg("-i")
            .arg(&video.audio.path)
            .arg("-c:v")
            .arg("libx264") // Video codec
            .arg("-pix_fmt")
            .arg("yuv420p") // Pixel format for compatibility
            .arg("-r")
            .arg(self.fps.to_string())
            .arg("-s")
            .arg(format!("{}x{}", self.width, self.height))
            .arg("-c:a")
            .arg("aac") // Audio codec
            .arg("-t")
            .arg(format!("{:.3}", video.duration))
            .arg(&output_path)
            .status()
            .context("Failed to execute ffmpeg")?;

        if !status.success() {
            anyhow::bail!("FFmpeg export failed");
        }

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NarrationAudio;
    use crate::renderer::SceneClip;
    use tempfile::TempDir;

    fn test_video() -> FinalVideo {
        FinalVideo {
            clips: vec![
                SceneClip {
                    index: 0,
                    image_path: PathBuf::from("/tmp/scene_0.png"),
                    duration: 4.0,
                    captioned: true,
                },
                SceneClip {
                    index: 1,
                    image_path: PathBuf::from("/tmp/scene_1.png"),
                    duration: 3.5,
                    captioned: false,
                },
            ],
            audio: NarrationAudio {
                path: PathBuf::from("/tmp/narration.wav"),
                duration: 7.5,
            },
            duration: 7.5,
        }
    }

    #[test]
    fn test_concat_list_contents() {
        let scratch = TempDir::new().unwrap();
        let video = test_video();

        let path = FfmpegExporter::write_concat_list(&video, scratch.path()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.starts_with("ffconcat version 1.0"));
        assert!(content.contains("file '/tmp/scene_0.png'\nduration 4.000"));
        assert!(content.contains("file '/tmp/scene_1.png'\nduration 3.500"));
        // Last still repeated so the final frame holds.
        assert_eq!(content.matches("file '/tmp/scene_1.png'").count(), 2);
    }

    #[test]
    fn test_availability_probe_does_not_panic() {
        let _ = FfmpegExporter::is_available();
    }
}
