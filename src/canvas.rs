//! Immediate-mode 2D drawing API.
//!
//! Every call draws straight away, and nothing about the shapes is kept.
//! Colours are passed per call rather than held as "current colour" state.

use crate::surface::{Color, Point, Rectangle};

pub trait Canvas {
    /// Paint everything with the background colour.
    fn clear(&mut self);

    /// One pixel wide outline, corners included.
    fn rectangle(&mut self, rect: Rectangle, color: Color);

    /// Paint the 4-connected region around `seed` up to pixels of `border`.
    fn flood_fill(&mut self, seed: Point, fill: Color, border: Color);

    fn line(&mut self, from: Point, to: Point, color: Color);

    fn fill_ellipse(&mut self, center: Point, rx: i32, ry: i32, outline: Color, fill: Color);

    /// `at` is the top-left corner of the text.
    fn out_text(&mut self, at: Point, text: &str, color: Color);
}
