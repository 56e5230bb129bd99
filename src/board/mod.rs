//! Freehand drawing surface: stroke model and editing operations.
//!
//! Strokes are stored as ordered point lists and replayed in insertion
//! order at render time, so an eraser stroke only removes what was drawn
//! before it.

pub mod raster;

pub use raster::{render, Raster, Rgb, SCALE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    Pen(Rgb),
    Erase,
}

#[derive(Debug, Clone)]
pub struct Stroke {
    pub id: u64,
    pub points: Vec<Point>,
    pub style: StrokeStyle,
    /// Radius basis in raster pixels.
    pub width: f32,
}

pub const PEN_COLORS: &[Rgb] = &[
    Rgb(255, 255, 255), // chalk white
    Rgb(253, 224, 71),  // yellow
    Rgb(134, 239, 172), // green
    Rgb(147, 197, 253), // blue
    Rgb(252, 165, 165), // red
];

const PEN_WIDTH: f32 = 2.0;
/// The eraser sweeps a much wider path than the pen.
const ERASER_MULTIPLIER: f32 = 5.0;

#[derive(Debug)]
pub struct Board {
    pub strokes: Vec<Stroke>,
    pub tool: Tool,
    pub color_index: usize,
    drawing: bool,
    next_id: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self { strokes: Vec::new(), tool: Tool::Pen, color_index: 0, drawing: false, next_id: 1 }
    }
}

impl Board {
    pub fn color(&self) -> Rgb {
        PEN_COLORS[self.color_index % PEN_COLORS.len()]
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PEN_COLORS.len();
    }

    pub fn toggle_tool(&mut self) {
        self.tool = match self.tool {
            Tool::Pen => Tool::Eraser,
            Tool::Eraser => Tool::Pen,
        };
    }

    pub fn begin_stroke(&mut self, point: Point) {
        let (style, width) = match self.tool {
            Tool::Pen => (StrokeStyle::Pen(self.color()), PEN_WIDTH),
            Tool::Eraser => (StrokeStyle::Erase, PEN_WIDTH * ERASER_MULTIPLIER),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.strokes.push(Stroke { id, points: vec![point], style, width });
        self.drawing = true;
    }

    pub fn extend_stroke(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        if let Some(stroke) = self.strokes.last_mut() {
            stroke.points.push(point);
        }
    }

    pub fn end_stroke(&mut self) {
        self.drawing = false;
    }

    /// Drop the most recent stroke, finished or not.
    pub fn undo(&mut self) {
        self.strokes.pop();
        self.drawing = false;
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.drawing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_lifecycle() {
        let mut board = Board::default();
        board.begin_stroke(Point { x: 1.0, y: 1.0 });
        board.extend_stroke(Point { x: 2.0, y: 2.0 });
        board.end_stroke();
        // A drag with no preceding press is ignored.
        board.extend_stroke(Point { x: 9.0, y: 9.0 });
        assert_eq!(board.strokes.len(), 1);
        assert_eq!(board.strokes[0].points.len(), 2);
    }

    #[test]
    fn test_eraser_strokes_are_wider() {
        let mut board = Board::default();
        board.begin_stroke(Point { x: 0.0, y: 0.0 });
        board.end_stroke();
        board.toggle_tool();
        board.begin_stroke(Point { x: 0.0, y: 0.0 });
        board.end_stroke();
        assert!(board.strokes[1].width > board.strokes[0].width);
        assert_eq!(board.strokes[1].style, StrokeStyle::Erase);
    }

    #[test]
    fn test_undo_and_clear() {
        let mut board = Board::default();
        board.begin_stroke(Point { x: 0.0, y: 0.0 });
        board.end_stroke();
        board.begin_stroke(Point { x: 1.0, y: 1.0 });
        board.undo();
        assert_eq!(board.strokes.len(), 1);
        board.clear();
        assert!(board.strokes.is_empty());
    }
}
