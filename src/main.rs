use anyhow::Context;
use jetflight::{
    animation::AnimationLoop, config::Config, pacing::FixedRate, screen::TerminalScreen,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::default();
    let mut screen = TerminalScreen::acquire().context("couldn't acquire a drawable surface")?;
    let mut pacer = FixedRate::new(config.frame_delay);

    let stats = AnimationLoop::new(&config, &mut screen, &mut pacer).run()?;
    drop(screen);

    log::info!("done after {} frames", stats.frames);
    Ok(())
}
