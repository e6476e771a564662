use crate::renderer::FrameBuffer;
use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Outline thickness in pixels around the caption fill.
const STROKE_WIDTH: i32 = 3;

const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-STROKE_WIDTH, -STROKE_WIDTH),
    (0, -STROKE_WIDTH),
    (STROKE_WIDTH, -STROKE_WIDTH),
    (-STROKE_WIDTH, 0),
    (STROKE_WIDTH, 0),
    (-STROKE_WIDTH, STROKE_WIDTH),
    (0, STROKE_WIDTH),
    (STROKE_WIDTH, STROKE_WIDTH),
];

/// Greedy word wrap at a fixed character width.
///
/// Words never split mid-word: a single word longer than `max_line_chars` is
/// emitted alone on its own line. Every other line stays within the limit.
/// Width is measured in grapheme clusters, words are joined by single spaces.
pub fn wrap(text: &str, max_line_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.graphemes(true).count();

        if !current.is_empty() && current_len + 1 + word_len > max_line_chars {
            lines.push(current.join(" "));
            current = vec![word];
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current_len += 1;
            }
            current_len += word_len;
            current.push(word);
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

/// Rasterizes wrapped caption lines with a high-contrast outlined style.
pub struct CaptionRenderer {
    font: Font,
    font_size: f32,
}

impl CaptionRenderer {
    /// Load a TTF/OTF font from disk.
    pub fn from_file(path: &Path, font_size: f32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to load font: {}", path.display()))?;
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))?;

        Ok(Self { font, font_size })
    }

    /// Draw the caption lines stacked and centered over the buffer.
    ///
    /// White fill over a black offset outline keeps the text legible on any
    /// gradient background.
    pub fn draw(&self, buffer: &mut FrameBuffer, lines: &[String]) -> Result<()> {
        if lines.is_empty() {
            return Ok(());
        }

        let line_metrics = self
            .font
            .horizontal_line_metrics(self.font_size)
            .context("Font has no horizontal line metrics")?;
        let line_height = line_metrics.new_line_size.ceil() as i32;

        let (width, height) = buffer.dimensions();
        let block_height = line_height * lines.len() as i32;
        let mut baseline = (height as i32 - block_height) / 2 + line_metrics.ascent.ceil() as i32;

        for line in lines {
            let line_width = self.line_width(line).ceil() as i32;
            let origin_x = (width as i32 - line_width) / 2;

            for (dx, dy) in OUTLINE_OFFSETS {
                self.draw_line(buffer, line, origin_x + dx, baseline + dy, [0, 0, 0, 255]);
            }
            self.draw_line(buffer, line, origin_x, baseline, [255, 255, 255, 255]);

            baseline += line_height;
        }

        Ok(())
    }

    fn line_width(&self, line: &str) -> f32 {
        line.chars()
            .map(|c| self.font.metrics(c, self.font_size).advance_width)
            .sum()
    }

    fn draw_line(
        &self,
        buffer: &mut FrameBuffer,
        text: &str,
        origin_x: i32,
        baseline: i32,
        color: [u8; 4],
    ) {
        let mut pen_x = origin_x as f32;

        for c in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(c, self.font_size);
            let glyph_x = pen_x as i32 + metrics.xmin;
            let glyph_y = baseline - metrics.height as i32 - metrics.ymin;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let coverage = bitmap[row * metrics.width + col];
                    if coverage == 0 {
                        continue;
                    }

                    let px = glyph_x + col as i32;
                    let py = glyph_y + row as i32;
                    if px >= 0 && py >= 0 {
                        let alpha = (coverage as u16 * color[3] as u16 / 255) as u8;
                        buffer.blend_pixel(
                            px as u32,
                            py as u32,
                            [color[0], color[1], color[2], alpha],
                        );
                    }
                }
            }

            pen_x += metrics.advance_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use unicode_segmentation::UnicodeSegmentation;

    #[test]
    fn test_wrap_stays_within_limit() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 15);

        assert!(!lines.is_empty());
        for line in &lines {
            assert!(line.graphemes(true).count() <= 15, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_wrap_preserves_word_order() {
        let lines = wrap("one two three four", 9);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, "one two three four");
    }

    #[test]
    fn test_wrap_overlong_word_kept_whole() {
        let lines = wrap("a pneumonoultramicroscopic b", 10);

        assert_eq!(lines[0], "a");
        assert_eq!(lines[1], "pneumonoultramicroscopic");
        assert_eq!(lines[2], "b");
    }

    #[test]
    fn test_wrap_exact_fit() {
        // "abc def" is exactly 7 characters.
        let lines = wrap("abc def", 7);
        assert_eq!(lines, vec!["abc def"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", 30).is_empty());
        assert!(wrap("   ", 30).is_empty());
    }

    #[test]
    fn test_wrap_collapses_whitespace() {
        let lines = wrap("hello   world", 30);
        assert_eq!(lines, vec!["hello world"]);
    }

    #[test]
    fn test_renderer_missing_font() {
        let result = CaptionRenderer::from_file(Path::new("/nonexistent/font.ttf"), 70.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_renderer_invalid_font_data() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let result = CaptionRenderer::from_file(file.path(), 70.0);
        assert!(result.is_err());
    }
}
