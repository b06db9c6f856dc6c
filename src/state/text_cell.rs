//! Display surface shared by every component

use serde::{Deserialize, Serialize};

/// Position and size of a cell, in renderer pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive on every edge
    pub fn collide_point(&self, point: Point) -> bool {
        self.x <= point.x
            && point.x <= self.x + self.width
            && self.y <= point.y
            && point.y <= self.y + self.height
    }

    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 100.0, 100.0)
    }
}

/// Pointer position reported by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A piece of text with its font size and placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCell {
    pub text: String,
    pub font_size: f32,
    pub bounds: Bounds,
}

impl TextCell {
    pub fn new(font_size: f32) -> Self {
        Self {
            text: String::new(),
            font_size,
            bounds: Bounds::default(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.font_size = font_size;
    }

    pub fn place(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn collide_point(&self, point: Point) -> bool {
        self.bounds.collide_point(point)
    }

    pub fn min_dimension(&self) -> f32 {
        self.bounds.min_dimension()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_includes_edges() {
        let bounds = Bounds::new(10.0, 20.0, 100.0, 50.0);
        assert!(bounds.collide_point(Point { x: 10.0, y: 20.0 }));
        assert!(bounds.collide_point(Point { x: 110.0, y: 70.0 }));
        assert!(bounds.collide_point(Point { x: 60.0, y: 45.0 }));
        assert!(!bounds.collide_point(Point { x: 9.9, y: 45.0 }));
        assert!(!bounds.collide_point(Point { x: 60.0, y: 70.1 }));
    }

    #[test]
    fn min_dimension_follows_placement() {
        let mut cell = TextCell::new(12.0);
        assert_eq!(cell.min_dimension(), 100.0);
        cell.place(Bounds::new(0.0, 0.0, 300.0, 90.0));
        assert_eq!(cell.min_dimension(), 90.0);
    }
}
