mod app;
mod host;
mod logging;
mod page;

use std::io::stdout;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use ratatui::DefaultTerminal;
use starfall_config::Config;

use crate::app::App;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    if let Some(dir) = Config::data_dir() {
        if let Err(err) = logging::init(&dir) {
            eprintln!("starfall: logging disabled: {err:#}");
        }
    }

    let terminal = ratatui::init();
    let result = run(terminal, config);
    let _ = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result
}

/// Enable pointer input and run the app on the full terminal.
fn run(terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;
    let size = terminal.size()?;
    App::new(config, size.width, size.height).run(terminal)
}
