use color_eyre::{Result, eyre::WrapErr};
use crossterm::{
    event::{
        EnableFocusChange, EnableMouseCapture, KeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{EnterAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;

use paradox_kick::app::{self, App};
use paradox_kick::config::{CONFIG_FILE, GameConfig};

/// The terminal owns stdout, so logs go to a file
const LOG_FILE: &str = "debug.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = GameConfig::load(CONFIG_FILE)?;

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    log::info!("keyboard enhancement supported: {supports_keyboard_enhancement}");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;

    // Release events are only reported with keyboard enhancement
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    install_panic_hook(supports_keyboard_enhancement);

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = App::new(config, supports_keyboard_enhancement).run(&mut terminal);

    // Restore even when the game loop failed; its error takes precedence
    let restored = restore_terminal(supports_keyboard_enhancement);
    result.and(restored)
}

fn restore_terminal(keyboard_enhancement: bool) -> Result<()> {
    app::restore_terminal(&mut stdout(), keyboard_enhancement, disable_raw_mode)
        .wrap_err("failed to restore the terminal")
}

/// Leaves raw mode before the color-eyre report is printed
fn install_panic_hook(keyboard_enhancement: bool) {
    let report = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if let Err(err) = restore_terminal(keyboard_enhancement) {
            log::error!("{err:#}");
        }
        report(info);
    }));
}

fn init_logging() -> Result<()> {
    let file = File::create(LOG_FILE).wrap_err_with(|| format!("failed to create {LOG_FILE}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
