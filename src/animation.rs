use crate::canvas::Canvas;
use crate::config::{Config, Resolution};
use crate::jet::Jet;
use crate::pacing::Pacer;
use crate::surface::{Color, Surface};

/// Where finished frames go.
pub trait Display {
    /// The resolution a surface should have to fill this display.
    fn resolution(&self) -> Resolution;

    fn present(&mut self, surface: &Surface) -> anyhow::Result<()>;

    /// Blocks until the user presses a key. No timeout.
    fn wait_for_key(&mut self) -> anyhow::Result<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: usize,
    pub last_x: Option<i32>,
}

/// Anchor x of every frame, from 0 up to (not including) `width`.
pub fn frame_positions(width: usize, step: usize) -> impl Iterator<Item = i32> {
    (0..width as i32).step_by(step.max(1))
}

pub struct AnimationLoop<'a, D, P> {
    config: &'a Config,
    surface: Surface,
    display: &'a mut D,
    pacer: &'a mut P,
}

impl<'a, D: Display, P: Pacer> AnimationLoop<'a, D, P> {
    /// Sets up a surface sized for `display`, cleared to the sky colour.
    pub fn new(config: &'a Config, display: &'a mut D, pacer: &'a mut P) -> Self {
        let Resolution { width, height } = config
            .resolution
            .unwrap_or_else(|| display.resolution());
        log::info!("drawing on a {width}x{height} surface");

        let mut surface = Surface::new(width, height, Color::BLACK);
        surface.set_background(config.sky);
        surface.clear();

        Self {
            config,
            surface,
            display,
            pacer,
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn draw_jet_at(&mut self, x: i32, y: i32) {
        Jet::at((x, y)).draw(&mut self.surface, self.config.jet_style());
    }

    /// Flies the jet across the whole width, one frame per position.
    pub fn run_animation(&mut self) -> anyhow::Result<FrameStats> {
        let mut stats = FrameStats::default();

        for x in frame_positions(self.surface.width(), self.config.step()) {
            log::debug!("frame {} at x = {x}", stats.frames);

            self.surface.clear();
            self.draw_jet_at(x, self.config.altitude);
            self.display.present(&self.surface)?;
            self.pacer.tick();

            stats.frames += 1;
            stats.last_x = Some(x);
        }

        log::info!(
            "animation finished after {} frames, last x = {:?}",
            stats.frames,
            stats.last_x
        );
        Ok(stats)
    }

    /// Puts the exit prompt over the last frame and waits for a key.
    pub fn finalize(mut self) -> anyhow::Result<()> {
        let at = self
            .config
            .prompt_position(self.surface.max_x(), self.surface.max_y());
        self.surface.out_text(at, &self.config.prompt, self.config.ink);
        self.display.present(&self.surface)?;

        log::debug!("waiting for a key press");
        self.display.wait_for_key()
    }

    pub fn run(mut self) -> anyhow::Result<FrameStats> {
        let stats = self.run_animation()?;
        self.finalize()?;
        Ok(stats)
    }
}
