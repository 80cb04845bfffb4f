use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{DisableFocusChange, DisableMouseCapture, PopKeyboardEnhancementFlags},
    execute,
    terminal::LeaveAlternateScreen,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::input::{Command, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::scene::Game;

/// Target time per simulation frame (~60 FPS)
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// The host: owns the terminal-facing components and drives one
/// simulation step per displayed frame.
pub struct App {
    running: bool,
    game: Game,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: GameConfig, reports_key_release: bool) -> Self {
        let input_manager = InputManager::new(&config, reports_key_release);
        let audio_manager = AudioManager::new(&config);
        if audio_manager.is_silent() {
            log::warn!("audio unavailable, playing without sound");
        }

        Self {
            running: true,
            game: Game::new(config),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events()?;
            for command in self.input_manager.take_commands() {
                self.process_command(command);
            }

            let snapshot = self.input_manager.snapshot();
            self.game.step(&snapshot);
            for event in self.game.drain_events() {
                self.process_event(&event);
            }
            self.input_manager.end_frame();

            terminal.draw(|frame| {
                let view = RenderView {
                    game: &self.game,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep off the rest of the frame to keep the step rate steady
            if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }
        log::info!("quitting, high score {}", self.game.high_score());
        Ok(())
    }

    fn process_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::Play => {
                self.game.press_play();
            }
        }
    }

    fn process_event(&self, event: &GameEvent) {
        if let Some(cue) = event.sound() {
            self.audio_manager.play(cue);
        }
        if let GameEvent::ReturnedToMenu {
            high_score,
            released,
        } = event
        {
            log::debug!("menu entered, high score {high_score}, released {released} entities");
        }
    }
}

/// Undoes the terminal setup done at startup.
///
/// Every step runs even when an earlier one fails, so raw mode is always
/// released; the first failure is returned.
pub fn restore_terminal<W: Write>(
    out: &mut W,
    keyboard_enhancement: bool,
    disable_raw_mode: impl FnOnce() -> io::Result<()>,
) -> io::Result<()> {
    let mut steps = Vec::new();
    if keyboard_enhancement {
        steps.push(execute!(out, PopKeyboardEnhancementFlags));
    }
    steps.push(execute!(out, DisableFocusChange));
    steps.push(execute!(out, DisableMouseCapture));
    steps.push(execute!(out, LeaveAlternateScreen));
    steps.push(disable_raw_mode());
    steps.push(execute!(out, Show));
    steps.into_iter().collect()
}
