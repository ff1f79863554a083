/// Keyboard stand-in for the rotation crank
use crossterm::event::KeyCode;

/// Degrees turned per key press
pub const CRANK_STEP: f32 = 5.0;
/// Degrees turned per frame while auto-cranking
pub const AUTO_CRANK_STEP: f32 = 2.0;

/// What a key press asks the app to do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Turn(f32),
    ToggleAutoCrank,
    Quit,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            KeyCode::Char('a') | KeyCode::Left => Some(Self::Turn(-CRANK_STEP)),
            KeyCode::Char('d') | KeyCode::Right => Some(Self::Turn(CRANK_STEP)),
            KeyCode::Char(' ') => Some(Self::ToggleAutoCrank),
            _ => None,
        }
    }
}

/// Crank position in degrees, kept in `[0, 360)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Crank {
    angle: f32,
    auto: bool,
}

impl Crank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn turn(&mut self, degrees: f32) {
        self.angle = (self.angle + degrees).rem_euclid(360.0);
    }

    pub fn toggle_auto(&mut self) {
        self.auto = !self.auto;
    }

    /// Advance one frame; only moves while auto-cranking.
    pub fn tick(&mut self) {
        if self.auto {
            self.turn(AUTO_CRANK_STEP);
        }
    }
}
