pub mod animation;
pub mod canvas;
pub mod config;
pub mod jet;
pub mod pacing;
pub mod screen;
pub mod surface;

pub mod terminal {
    use crossterm::{
        cursor::{Hide, Show},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use std::io::{self, stdout};

    /// Raw mode on the alternate screen with the cursor hidden. Dropping it
    /// puts the terminal back.
    pub struct AlternateScreen;

    impl AlternateScreen {
        pub fn enter() -> io::Result<Self> {
            enable_raw_mode()?;
            if let Err(error) = execute!(stdout(), EnterAlternateScreen, Hide) {
                let _ = disable_raw_mode();
                return Err(error);
            }
            Ok(Self)
        }
    }

    impl Drop for AlternateScreen {
        fn drop(&mut self) {
            let _ = disable_raw_mode();
            let _ = execute!(stdout(), Show, LeaveAlternateScreen);
        }
    }
}
