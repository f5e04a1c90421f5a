pub mod app;
pub mod login;
pub mod services;
pub mod ui;

use std::io;

pub use app::App;
pub use login::LoginScreen;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, DisableMouseCapture},
    terminal::{LeaveAlternateScreen, disable_raw_mode, is_raw_mode_enabled},
};

/// Puts the terminal back into cooked mode so a panic report is readable.
pub fn destruct_terminal_for_panic() {
    if let Ok(true) = is_raw_mode_enabled() {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste,
            cursor::Show
        );
    }
}
