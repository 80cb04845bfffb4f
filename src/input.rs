use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

/// Logical controls the simulation reads each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Fire,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Resolves a physical key to the action it drives, if any
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Action::MoveForward),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Action::MoveBack),
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Action::StrafeLeft),
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Action::StrafeRight),
            KeyCode::Char(' ') => Some(Action::Fire),
            _ => None,
        }
    }
}

/// Which actions are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSet {
    held: [bool; Action::ALL.len()],
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ActionSet::set`], handy for scripted input
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, held: bool) {
        self.held[action.index()] = held;
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held[action.index()]
    }
}

/// Accumulated view orientation, in radians
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Look {
    pub yaw: f32,
    pub pitch: f32,
}

impl Look {
    /// Adds a pointer delta; pitch is clamped into `[pitch_min, pitch_max]`
    pub fn apply_delta(&mut self, d_yaw: f32, d_pitch: f32, pitch_min: f32, pitch_max: f32) {
        self.yaw += d_yaw;
        self.pitch = (self.pitch + d_pitch).clamp(pitch_min, pitch_max);
    }
}

/// Everything the simulation reads from the host for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub actions: ActionSet,
    pub look: Look,
}

/// One-shot requests that drive the host rather than the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    Quit,
}

/// How long a press counts as held when the terminal never reports releases.
/// Key repeat refreshes it, so it only needs to outlast the repeat delay.
const HOLD_FRAMES_WITHOUT_RELEASE: u16 = 32;
const HELD_UNTIL_RELEASE: u16 = u16::MAX;

/// Polls crossterm and folds raw events into an [`InputSnapshot`]
pub struct InputManager {
    /// Frames left for each action; `HELD_UNTIL_RELEASE` when releases are reported
    hold_frames: [u16; Action::ALL.len()],
    reports_release: bool,
    look: Look,
    last_pointer: Option<(u16, u16)>,
    commands: Vec<Command>,
    mouse_sensitivity: f32,
    look_key_step: f32,
    pitch_min: f32,
    pitch_max: f32,
}

impl InputManager {
    pub fn new(config: &crate::config::GameConfig, reports_release: bool) -> Self {
        Self {
            hold_frames: [0; Action::ALL.len()],
            reports_release,
            look: Look::default(),
            last_pointer: None,
            commands: Vec::new(),
            mouse_sensitivity: config.mouse_sensitivity,
            look_key_step: config.look_key_step,
            pitch_min: config.pitch_min,
            pitch_max: config.pitch_max,
        }
    }

    /// Drains every pending terminal event without blocking.
    /// Call once per frame before [`InputManager::snapshot`].
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            let event = event::read()?;
            self.handle_event(event);
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Mouse(mouse_event) => self.handle_mouse_event(mouse_event),
            // Focus loss would leave keys stuck without release events
            Event::FocusLost => self.hold_frames = [0; Action::ALL.len()],
            _ => {}
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.handle_key_press(key_event),
            KeyEventKind::Release => {
                if let Some(action) = Action::from_key(key_event.code) {
                    self.hold_frames[action.index()] = 0;
                }
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.commands.push(Command::Quit);
            return;
        }

        if let Some(action) = Action::from_key(key_event.code) {
            self.hold_frames[action.index()] = if self.reports_release {
                HELD_UNTIL_RELEASE
            } else {
                HOLD_FRAMES_WITHOUT_RELEASE
            };
            // Space doubles as the menu's play button
            if action == Action::Fire {
                self.commands.push(Command::Play);
            }
            return;
        }

        let step = self.look_key_step;
        match key_event.code {
            KeyCode::Enter => self.commands.push(Command::Play),
            KeyCode::Char('j') | KeyCode::Char('J') => self.turn(-step, 0.0),
            KeyCode::Char('l') | KeyCode::Char('L') => self.turn(step, 0.0),
            KeyCode::Char('i') | KeyCode::Char('I') => self.turn(0.0, -step),
            KeyCode::Char('k') | KeyCode::Char('K') => self.turn(0.0, step),
            _ => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        let position = (mouse_event.column, mouse_event.row);
        match mouse_event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if let Some((last_col, last_row)) = self.last_pointer {
                    let dx = f32::from(position.0) - f32::from(last_col);
                    let dy = f32::from(position.1) - f32::from(last_row);
                    self.turn(dx * self.mouse_sensitivity, dy * self.mouse_sensitivity);
                }
                self.last_pointer = Some(position);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.last_pointer = Some(position);
                self.commands.push(Command::Play);
            }
            _ => {}
        }
    }

    fn turn(&mut self, d_yaw: f32, d_pitch: f32) {
        self.look
            .apply_delta(d_yaw, d_pitch, self.pitch_min, self.pitch_max);
    }

    /// Current held actions and accumulated look
    pub fn snapshot(&self) -> InputSnapshot {
        let mut actions = ActionSet::new();
        for action in Action::ALL {
            actions.set(action, self.hold_frames[action.index()] > 0);
        }
        InputSnapshot {
            actions,
            look: self.look,
        }
    }

    /// Takes the one-shot commands gathered since the last call
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Ages presses that will never see a release event
    pub fn end_frame(&mut self) {
        for frames in &mut self.hold_frames {
            if *frames != HELD_UNTIL_RELEASE {
                *frames = frames.saturating_sub(1);
            }
        }
    }
}
