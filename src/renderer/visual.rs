use crate::renderer::FrameBuffer;
use rand::Rng;

/// Two RGB endpoints of a vertical gradient.
pub type ColorPair = ([u8; 3], [u8; 3]);

/// Fixed background palette; scene `i` uses `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [ColorPair; 5] = [
    ([255, 107, 107], [255, 193, 7]),  // Red to Yellow
    ([74, 144, 226], [80, 227, 194]),  // Blue to Teal
    ([167, 112, 239], [247, 187, 151]), // Purple to Peach
    ([52, 211, 153], [88, 80, 236]),   // Green to Blue
    ([251, 146, 60], [239, 68, 68]),   // Orange to Red
];

const DISK_COUNT: usize = 5;
const DISK_RADIUS_MIN: i32 = 50;
const DISK_RADIUS_MAX: i32 = 200;
const DISK_OPACITY_MIN: u8 = 20;
const DISK_OPACITY_MAX: u8 = 60;

/// Renders deterministic gradient backgrounds with a decorative overlay.
///
/// The gradient is keyed entirely by the scene index; only the disk overlay
/// consumes the passed-in RNG, so callers control reproducibility.
pub struct SceneRenderer {
    width: u32,
    height: u32,
}

impl SceneRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Palette entry for a scene index, wrapping past the palette end.
    pub fn color_pair(scene_index: usize) -> ColorPair {
        PALETTE[scene_index % PALETTE.len()]
    }

    /// Render the full background for one scene: gradient plus disk overlay.
    pub fn render<R: Rng>(&self, scene_index: usize, rng: &mut R) -> FrameBuffer {
        let mut buffer = self.fill_gradient(scene_index);
        self.overlay_disks(&mut buffer, rng);
        buffer
    }

    /// Vertical linear gradient between the indexed palette pair.
    pub fn fill_gradient(&self, scene_index: usize) -> FrameBuffer {
        let (start, end) = Self::color_pair(scene_index);
        let mut buffer = FrameBuffer::new(self.width, self.height);

        for y in 0..self.height {
            let ratio = y as f32 / self.height as f32;
            let color = [
                lerp(start[0], end[0], ratio),
                lerp(start[1], end[1], ratio),
                lerp(start[2], end[2], ratio),
                255,
            ];

            for x in 0..self.width {
                buffer.set_pixel(x, y, color);
            }
        }

        buffer
    }

    /// Scatter translucent white disks over the buffer.
    ///
    /// Placement is cosmetic; radius and opacity stay within the documented
    /// bounds regardless of the RNG.
    fn overlay_disks<R: Rng>(&self, buffer: &mut FrameBuffer, rng: &mut R) {
        for _ in 0..DISK_COUNT {
            let cx = rng.random_range(0..self.width as i32);
            let cy = rng.random_range(0..self.height as i32);
            let radius = rng.random_range(DISK_RADIUS_MIN..=DISK_RADIUS_MAX);
            let opacity = rng.random_range(DISK_OPACITY_MIN..=DISK_OPACITY_MAX);

            draw_disk(buffer, cx, cy, radius, opacity);
        }
    }
}

fn lerp(start: u8, end: u8, ratio: f32) -> u8 {
    (start as f32 * (1.0 - ratio) + end as f32 * ratio) as u8
}

fn draw_disk(buffer: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, opacity: u8) {
    let (width, height) = buffer.dimensions();

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > radius * radius {
                continue;
            }

            let px = cx + dx;
            let py = cy + dy;
            if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                buffer.blend_pixel(px as u32, py as u32, [255, 255, 255, opacity]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_palette_wraps_around() {
        assert_eq!(SceneRenderer::color_pair(0), SceneRenderer::color_pair(5));
        assert_eq!(SceneRenderer::color_pair(2), SceneRenderer::color_pair(7));
    }

    #[test]
    fn test_gradient_endpoints() {
        let renderer = SceneRenderer::new(64, 128);
        let buffer = renderer.fill_gradient(0);
        let (start, end) = SceneRenderer::color_pair(0);

        let top = buffer.get_pixel(0, 0).unwrap();
        assert_eq!([top[0], top[1], top[2]], start);

        // Bottom row ratio is (h-1)/h, so allow a small rounding margin.
        let bottom = buffer.get_pixel(0, 127).unwrap();
        for c in 0..3 {
            assert!((bottom[c] as i32 - end[c] as i32).abs() <= 3);
        }
    }

    #[test]
    fn test_render_is_fully_opaque() {
        let renderer = SceneRenderer::new(64, 64);
        let mut rng = StdRng::seed_from_u64(7);
        let buffer = renderer.render(1, &mut rng);

        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(buffer.get_pixel(x, y).unwrap()[3], 255);
            }
        }
    }

    #[test]
    fn test_render_deterministic_with_seed() {
        let renderer = SceneRenderer::new(32, 32);
        let a = renderer.render(3, &mut StdRng::seed_from_u64(42));
        let b = renderer.render(3, &mut StdRng::seed_from_u64(42));

        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_disks_brighten_but_respect_bounds() {
        // Maximum opacity disk over a black buffer stays translucent.
        let mut buffer = FrameBuffer::new(32, 32);
        buffer.clear([0, 0, 0, 255]);
        draw_disk(&mut buffer, 16, 16, 10, DISK_OPACITY_MAX);

        let center = buffer.get_pixel(16, 16).unwrap();
        assert!(center[0] > 0);
        // 60/255 of white over black is ~60.
        assert!(center[0] <= 61);
    }
}
