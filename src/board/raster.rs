//! Stroke replay onto a pixel raster.
//!
//! The raster is drawn at twice the logical resolution and downsampled at
//! display time, which keeps diagonal strokes from looking like staircases
//! in half-block cells. `None` pixels are background; an eraser stroke
//! punches pixels back to `None`, restoring the grid underneath.

use super::{Point, Stroke, StrokeStyle};

/// Raster pixels per logical surface pixel.
pub const SCALE: usize = 2;
/// Ruled-grid spacing in raster pixels.
const GRID_SPACING: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

const GRID_COLOR: Rgb = Rgb(60, 64, 72);

#[derive(Debug)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Option<Rgb>>,
}

impl Raster {
    fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![None; width * height] }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    fn set(&mut self, x: i32, y: i32, value: Option<Rgb>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// Stamp a filled disc. `value` of `None` erases.
    fn stamp(&mut self, cx: i32, cy: i32, radius: i32, value: Option<Rgb>) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set(cx + dx, cy + dy, value);
                }
            }
        }
    }

    fn line(&mut self, a: Point, b: Point, radius: i32, value: Option<Rgb>) {
        // Bresenham over the segment, stamping a disc at each step.
        let (mut x0, mut y0) = (a.x.round() as i32, a.y.round() as i32);
        let (x1, y1) = (b.x.round() as i32, b.y.round() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x0, y0, radius, value);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn paint_grid(&mut self) {
        for y in (GRID_SPACING..self.height).step_by(GRID_SPACING) {
            for x in 0..self.width {
                self.pixels[y * self.width + x] = Some(GRID_COLOR);
            }
        }
        for x in (GRID_SPACING..self.width).step_by(GRID_SPACING) {
            for y in 0..self.height {
                self.pixels[y * self.width + x] = Some(GRID_COLOR);
            }
        }
    }

    /// Downsample a SCALE x SCALE block to one logical pixel by averaging
    /// the set samples; an empty block stays background.
    pub fn sample(&self, lx: usize, ly: usize) -> Option<Rgb> {
        let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
        for dy in 0..SCALE {
            for dx in 0..SCALE {
                if let Some(Rgb(pr, pg, pb)) = self.get(lx * SCALE + dx, ly * SCALE + dy) {
                    r += pr as u32;
                    g += pg as u32;
                    b += pb as u32;
                    n += 1;
                }
            }
        }
        if n == 0 {
            return None;
        }
        Some(Rgb((r / n) as u8, (g / n) as u8, (b / n) as u8))
    }
}

/// Replay `strokes` in order onto a fresh raster of `width` x `height`
/// logical pixels.
pub fn render(strokes: &[Stroke], width: usize, height: usize) -> Raster {
    let mut raster = Raster::new(width * SCALE, height * SCALE);
    raster.paint_grid();
    for stroke in strokes {
        let value = match stroke.style {
            StrokeStyle::Pen(color) => Some(color),
            StrokeStyle::Erase => None,
        };
        let radius = (stroke.width / 2.0).max(1.0) as i32;
        let scaled: Vec<Point> = stroke
            .points
            .iter()
            .map(|p| Point { x: p.x * SCALE as f32, y: p.y * SCALE as f32 })
            .collect();
        match scaled.as_slice() {
            [] => {}
            [only] => raster.stamp(only.x.round() as i32, only.y.round() as i32, radius, value),
            segments => {
                for pair in segments.windows(2) {
                    raster.line(pair[0], pair[1], radius, value);
                }
            }
        }
    }
    raster
}
