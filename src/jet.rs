//! The jet sprite: a body, a tail fin, a nose and two windows, all positioned
//! relative to an anchor at the top-left corner of the body.

use crate::canvas::Canvas;
use crate::surface::{Color, Point, Rectangle};

pub const BODY_LENGTH: i32 = 100;
pub const BODY_HEIGHT: i32 = 20;
pub const FIN_LENGTH: i32 = 20;
pub const NOSE_LENGTH: i32 = 20;
pub const WINDOW_RADIUS: i32 = 5;
/// Distance of each window centre from the back of the nose.
pub const WINDOW_OFFSETS: [i32; 2] = [30, 50];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JetStyle {
    /// Outlines, lines and the body fill.
    pub ink: Color,
    /// Window fill.
    pub accent: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: i32,
    pub ry: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jet {
    anchor: Point,
}

impl Jet {
    pub fn at(anchor: impl Into<Point>) -> Self {
        Self {
            anchor: anchor.into(),
        }
    }

    pub fn body(&self) -> Rectangle {
        Rectangle::from_corners(self.anchor, self.anchor.offset(BODY_LENGTH, BODY_HEIGHT))
    }

    /// Both strokes start at the middle of the back of the body.
    pub fn fin(&self) -> [Segment; 2] {
        let root = self.anchor.offset(BODY_LENGTH, BODY_HEIGHT / 2);
        [
            Segment::new(root, self.anchor.offset(BODY_LENGTH + FIN_LENGTH, 0)),
            Segment::new(
                root,
                self.anchor.offset(BODY_LENGTH + FIN_LENGTH, BODY_HEIGHT),
            ),
        ]
    }

    pub fn nose(&self) -> [Segment; 2] {
        let tip = self.anchor.offset(-NOSE_LENGTH, BODY_HEIGHT / 2);
        [
            Segment::new(self.anchor, tip),
            Segment::new(tip, self.anchor.offset(0, BODY_HEIGHT)),
        ]
    }

    pub fn windows(&self) -> [Ellipse; 2] {
        WINDOW_OFFSETS.map(|dx| Ellipse {
            center: self.anchor.offset(dx, BODY_HEIGHT / 2),
            rx: WINDOW_RADIUS,
            ry: WINDOW_RADIUS,
        })
    }

    /// Bounding box of every pixel `draw` can touch.
    pub fn footprint(&self) -> Rectangle {
        Rectangle::from_corners(
            self.anchor.offset(-NOSE_LENGTH, 0),
            self.anchor.offset(BODY_LENGTH + FIN_LENGTH, BODY_HEIGHT),
        )
    }

    /// Body first so the fin and nose strokes stay visible on top of its
    /// fill, windows last so they sit over the body.
    pub fn draw(&self, canvas: &mut impl Canvas, style: JetStyle) {
        let body = self.body();
        canvas.rectangle(body, style.ink);
        canvas.flood_fill(
            Point::new(body.left() + 1, body.top() + 1),
            style.ink,
            style.ink,
        );

        for Segment { from, to } in self.fin().into_iter().chain(self.nose()) {
            canvas.line(from, to, style.ink);
        }

        for Ellipse { center, rx, ry } in self.windows() {
            canvas.fill_ellipse(center, rx, ry, style.ink, style.accent);
        }
    }
}
