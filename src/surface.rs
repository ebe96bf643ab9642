use crate::canvas::Canvas;

/// An owned raster framebuffer with a text layer on top.
///
/// Pixel `(0, 0)` is the top-left corner and y grows downwards. Every
/// primitive clips against the surface bounds, so drawing never fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    rect: Rectangle,
    pixels: Vec<Color>,
    background: Color,
    text: Vec<TextRun>,
}

impl Surface {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let rect = Rectangle::from((width, height));
        let pixels = vec![background; width * height];

        Self {
            rect,
            pixels,
            background,
            text: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.rect.width as _
    }

    pub fn height(&self) -> usize {
        self.rect.height as _
    }

    pub fn max_x(&self) -> i32 {
        self.rect.right()
    }

    pub fn max_y(&self) -> i32 {
        self.rect.bottom()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Takes effect on the next `clear`.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    pub fn pixel(&self, point: impl Into<Point>) -> Option<Color> {
        self.index(point.into()).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    fn index(&self, point: Point) -> Option<usize> {
        if !self.rect.contains(point) {
            return None;
        }
        Some(point.y as usize * self.width() + point.x as usize)
    }

    fn put_pixel(&mut self, point: Point, color: Color) {
        if let Some(i) = self.index(point) {
            self.pixels[i] = color;
        }
    }
}

impl Canvas for Surface {
    fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.text.clear();
    }

    fn rectangle(&mut self, rect: Rectangle, color: Color) {
        let (left, top, right, bottom) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        self.line(Point::new(left, top), Point::new(right, top), color);
        self.line(Point::new(right, top), Point::new(right, bottom), color);
        self.line(Point::new(right, bottom), Point::new(left, bottom), color);
        self.line(Point::new(left, bottom), Point::new(left, top), color);
    }

    fn flood_fill(&mut self, seed: Point, fill: Color, border: Color) {
        match self.pixel(seed) {
            Some(color) if color != border => {}
            _ => return,
        }

        // Tracked separately so a fill colour that differs from the border
        // can't send the walk back over pixels it has already painted.
        let mut visited = vec![false; self.pixels.len()];
        let mut pending = vec![seed];

        while let Some(point) = pending.pop() {
            let Some(i) = self.index(point) else {
                continue;
            };
            if visited[i] || self.pixels[i] == border {
                continue;
            }
            visited[i] = true;
            self.pixels[i] = fill;

            let Point { x, y } = point;
            pending.extend([
                Point::new(x + 1, y),
                Point::new(x - 1, y),
                Point::new(x, y + 1),
                Point::new(x, y - 1),
            ]);
        }
    }

    fn line(&mut self, from: Point, to: Point, color: Color) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };

        let mut error = dx + dy;
        let mut point = from;

        loop {
            self.put_pixel(point, color);
            if point == to {
                break;
            }
            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                point.x += sx;
            }
            if doubled <= dx {
                error += dx;
                point.y += sy;
            }
        }
    }

    fn fill_ellipse(&mut self, center: Point, rx: i32, ry: i32, outline: Color, fill: Color) {
        let (rx, ry) = (rx.abs() as i64, ry.abs() as i64);
        let inside = |dx: i64, dy: i64| dx * dx * ry * ry + dy * dy * rx * rx <= rx * rx * ry * ry;

        for dy in -ry..=ry {
            for dx in -rx..=rx {
                if !inside(dx, dy) {
                    continue;
                }
                let on_edge = !inside(dx + 1, dy)
                    || !inside(dx - 1, dy)
                    || !inside(dx, dy + 1)
                    || !inside(dx, dy - 1);
                let color = if on_edge { outline } else { fill };
                self.put_pixel(
                    Point::new(center.x + dx as i32, center.y + dy as i32),
                    color,
                );
            }
        }
    }

    fn out_text(&mut self, at: Point, text: &str, color: Color) {
        self.text.push(TextRun {
            at,
            text: text.to_string(),
            color,
        });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub at: Point,
    pub text: String,
    pub color: Color,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 170);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(Color { r, g, b }: Color) -> Self {
        Self::Rgb { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl Rectangle {
    /// Both corners are part of the rectangle.
    pub fn from_corners(first: Point, second: Point) -> Self {
        let (left, right) = (first.x.min(second.x), first.x.max(second.x));
        let (top, bottom) = (first.y.min(second.y), first.y.max(second.y));

        Self {
            x: left,
            y: top,
            width: right - left + 1,
            height: bottom - top + 1,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + (self.width - 1).max(0)
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + (self.height - 1).max(0)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, Point { x, y }: Point) -> bool {
        self.width > 0
            && self.height > 0
            && self.left() <= x
            && x <= self.right()
            && self.top() <= y
            && y <= self.bottom()
    }
}

impl From<(usize, usize)> for Rectangle {
    fn from((width, height): (usize, usize)) -> Self {
        Self {
            x: 0,
            y: 0,
            width: width as _,
            height: height as _,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKY: Color = Color::BLUE;
    const INK: Color = Color::WHITE;

    fn count(surface: &Surface, color: Color) -> usize {
        surface.pixels().iter().filter(|&&c| c == color).count()
    }

    #[test]
    fn new_surface_is_background() {
        let surface = Surface::new(8, 4, SKY);
        assert_eq!((surface.width(), surface.height()), (8, 4));
        assert_eq!(surface.max_x(), 7);
        assert_eq!(surface.max_y(), 3);
        assert_eq!(count(&surface, SKY), 32);
    }

    #[test]
    fn line_includes_both_endpoints() {
        let mut surface = Surface::new(10, 10, SKY);
        surface.line(Point::new(1, 1), Point::new(6, 1), INK);
        assert_eq!(count(&surface, INK), 6);
        assert_eq!(surface.pixel((1, 1)), Some(INK));
        assert_eq!(surface.pixel((6, 1)), Some(INK));

        let mut surface = Surface::new(10, 10, SKY);
        surface.line(Point::new(0, 0), Point::new(4, 4), INK);
        assert_eq!(count(&surface, INK), 5);
        assert_eq!(surface.pixel((4, 4)), Some(INK));
    }

    #[test]
    fn line_is_clipped_instead_of_panicking() {
        let mut surface = Surface::new(10, 10, SKY);
        surface.line(Point::new(-20, 5), Point::new(30, 5), INK);
        assert_eq!(count(&surface, INK), 10);
        assert_eq!(surface.pixel((-1, 5)), None);
    }

    #[test]
    fn rectangle_outline_is_inclusive() {
        let mut surface = Surface::new(10, 10, SKY);
        let rect = Rectangle::from_corners(Point::new(1, 1), Point::new(4, 3));
        assert_eq!((rect.width(), rect.height()), (4, 3));

        surface.rectangle(rect, INK);
        // 4x3 box, one pixel in the middle stays untouched
        assert_eq!(count(&surface, INK), 10);
        assert_eq!(surface.pixel((2, 2)), Some(SKY));
        assert_eq!(surface.pixel((4, 3)), Some(INK));
    }

    #[test]
    fn flood_fill_stops_at_border() {
        let mut surface = Surface::new(12, 12, SKY);
        let rect = Rectangle::from_corners(Point::new(2, 2), Point::new(8, 6));
        surface.rectangle(rect, INK);
        surface.flood_fill(Point::new(3, 3), INK, INK);

        assert_eq!(count(&surface, INK), 7 * 5);
        assert_eq!(surface.pixel((1, 1)), Some(SKY));
        assert_eq!(surface.pixel((9, 7)), Some(SKY));
    }

    #[test]
    fn flood_fill_with_distinct_fill_color_terminates() {
        let mut surface = Surface::new(12, 12, SKY);
        surface.rectangle(
            Rectangle::from_corners(Point::new(2, 2), Point::new(8, 6)),
            INK,
        );
        surface.flood_fill(Point::new(3, 3), Color::BLACK, INK);
        assert_eq!(count(&surface, Color::BLACK), 5 * 3);
    }

    #[test]
    fn flood_fill_on_border_or_off_surface_does_nothing() {
        let mut surface = Surface::new(6, 6, SKY);
        surface.line(Point::new(0, 0), Point::new(5, 0), INK);
        let before = surface.clone();

        surface.flood_fill(Point::new(2, 0), Color::BLACK, INK);
        surface.flood_fill(Point::new(-1, 3), Color::BLACK, INK);
        assert_eq!(surface, before);
    }

    #[test]
    fn fill_ellipse_has_outline_and_fill() {
        let mut surface = Surface::new(20, 20, Color::BLACK);
        surface.fill_ellipse(Point::new(10, 10), 5, 5, INK, SKY);

        assert_eq!(surface.pixel((10, 10)), Some(SKY));
        assert_eq!(surface.pixel((15, 10)), Some(INK));
        assert_eq!(surface.pixel((5, 10)), Some(INK));
        assert_eq!(surface.pixel((10, 5)), Some(INK));
        assert_eq!(surface.pixel((10, 15)), Some(INK));
        assert_eq!(surface.pixel((16, 10)), Some(Color::BLACK));
        assert_eq!(surface.pixel((14, 14)), Some(Color::BLACK));
    }

    #[test]
    fn fill_ellipse_is_symmetric() {
        let mut surface = Surface::new(21, 21, Color::BLACK);
        surface.fill_ellipse(Point::new(10, 10), 6, 4, INK, SKY);

        for y in 0..21 {
            for x in 0..21 {
                assert_eq!(surface.pixel((x, y)), surface.pixel((20 - x, y)));
                assert_eq!(surface.pixel((x, y)), surface.pixel((x, 20 - y)));
            }
        }
    }

    #[test]
    fn clear_resets_pixels_and_text() {
        let mut surface = Surface::new(8, 8, SKY);
        surface.line(Point::new(0, 0), Point::new(7, 7), INK);
        surface.out_text(Point::new(1, 1), "hi", INK);
        assert_eq!(surface.text_runs().len(), 1);

        surface.clear();
        assert_eq!(count(&surface, SKY), 64);
        assert!(surface.text_runs().is_empty());
    }

    #[test]
    fn background_change_applies_on_clear() {
        let mut surface = Surface::new(4, 4, SKY);
        surface.set_background(Color::BLACK);
        assert_eq!(count(&surface, SKY), 16);

        surface.clear();
        assert_eq!(count(&surface, Color::BLACK), 16);
    }
}
