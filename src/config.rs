use std::time::Duration;

use crate::jet::JetStyle;
use crate::surface::{Color, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    /// 640x480, what the graphics driver settles on when asked to detect.
    pub const VGA: Self = Self::new(640, 480);

    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` uses whatever the display reports.
    pub resolution: Option<Resolution>,
    /// Horizontal distance between frames. Zero is treated as one.
    pub step: usize,
    /// Anchor y of the jet.
    pub altitude: i32,
    pub frame_delay: Duration,
    pub sky: Color,
    pub ink: Color,
    pub accent: Color,
    pub prompt: String,
    /// Prompt position, relative to the horizontal middle and the bottom edge.
    pub prompt_offset: (i32, i32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: None,
            step: 5,
            altitude: 200,
            frame_delay: Duration::from_millis(30),
            sky: Color::BLUE,
            ink: Color::WHITE,
            accent: Color::BLUE,
            prompt: String::from("Press any key to exit..."),
            prompt_offset: (100, 30),
        }
    }
}

impl Config {
    pub fn with_resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = Some(resolution);
        self
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = step;
        self
    }

    pub fn jet_style(&self) -> JetStyle {
        JetStyle {
            ink: self.ink,
            accent: self.accent,
        }
    }

    pub fn step(&self) -> usize {
        self.step.max(1)
    }

    /// Where the prompt goes on a surface whose last pixel is `(max_x, max_y)`.
    pub fn prompt_position(&self, max_x: i32, max_y: i32) -> Point {
        let (dx, dy) = self.prompt_offset;
        Point::new(max_x / 2 - dx, max_y - dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.step(), 5);
        assert_eq!(config.altitude, 200);
        assert_eq!(config.frame_delay, Duration::from_millis(30));
        assert_eq!(config.resolution, None);
        assert_eq!(
            config.jet_style(),
            JetStyle {
                ink: Color::WHITE,
                accent: Color::BLUE
            }
        );
    }

    #[test]
    fn zero_step_is_treated_as_one() {
        assert_eq!(Config::default().with_step(0).step(), 1);
    }

    #[test]
    fn prompt_sits_near_bottom_middle() {
        let config = Config::default();
        assert_eq!(config.prompt_position(639, 479), Point::new(219, 449));
    }
}
