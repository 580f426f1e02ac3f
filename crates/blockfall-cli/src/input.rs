use std::{
    thread,
    time::{Duration, Instant},
};

use blockfall_engine::TickInput;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::runner::InputSource;

/// Reads the keyboard of a terminal in raw mode.
///
/// Keys pressed while a tick window is open are latched into that tick's
/// input. Pressing the same key twice in one window has the same effect as
/// pressing it once.
#[derive(Debug, Default)]
pub(crate) struct KeyboardInput;

impl KeyboardInput {
    /// Blocks until a quit key or `Enter` is pressed.
    pub(crate) fn wait_for_dismiss(&mut self) -> anyhow::Result<()> {
        loop {
            if let Event::Key(key) = event::read()?
                && key.kind != KeyEventKind::Release
                && (key.code == KeyCode::Enter || KeyAction::from_key(key) == Some(KeyAction::Quit))
            {
                return Ok(());
            }
        }
    }
}

impl InputSource for KeyboardInput {
    fn sample(&mut self, window: Duration) -> anyhow::Result<Option<TickInput>> {
        let deadline = Instant::now() + window;
        let mut input = TickInput::NONE;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if timeout.is_zero() || !event::poll(timeout)? {
                return Ok(Some(input));
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match KeyAction::from_key(key) {
                Some(KeyAction::Quit) => return Ok(None),
                Some(action) => action.latch(&mut input),
                None => {}
            }
        }
    }
}

/// Never asserts a signal; waits out each tick window.
#[derive(Debug, Default)]
pub(crate) struct IdleInput;

impl InputSource for IdleInput {
    fn sample(&mut self, window: Duration) -> anyhow::Result<Option<TickInput>> {
        if !window.is_zero() {
            thread::sleep(window);
        }
        Ok(Some(TickInput::NONE))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    RotateClockwise,
    RotateCounterClockwise,
    MoveLeft,
    MoveRight,
    Quit,
}

impl KeyAction {
    fn from_key(key: KeyEvent) -> Option<Self> {
        let action = match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Quit,
            KeyCode::Char('d' | 'x') => Self::RotateClockwise,
            KeyCode::Char('a' | 'z') => Self::RotateCounterClockwise,
            KeyCode::Left | KeyCode::Char('h') => Self::MoveLeft,
            KeyCode::Right | KeyCode::Char('l') => Self::MoveRight,
            KeyCode::Char('q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(action)
    }

    fn latch(self, input: &mut TickInput) {
        match self {
            Self::RotateClockwise => input.rotate_clockwise = true,
            Self::RotateCounterClockwise => input.rotate_counter_clockwise = true,
            Self::MoveLeft => input.move_left = true,
            Self::MoveRight => input.move_right = true,
            Self::Quit => {}
        }
    }
}
