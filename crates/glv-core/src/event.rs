use std::fmt;

use crate::Vec2;

/// Kind of the event currently being dispatched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EventKind {
    #[default]
    Null,
    Quit,
    WindowCreate,
    WindowDestroy,
    WindowResize,
    FocusGained,
    FocusLost,
    MouseDown,
    MouseUp,
    MouseMove,
    MouseDrag,
    MouseWheel,
    KeyDown,
    KeyUp,
    KeyRepeat,
    /// Application-defined kinds, dispatched like any other.
    Custom(u16),
}

impl EventKind {
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Null => "Null",
            EventKind::Quit => "Quit",
            EventKind::WindowCreate => "WindowCreate",
            EventKind::WindowDestroy => "WindowDestroy",
            EventKind::WindowResize => "WindowResize",
            EventKind::FocusGained => "FocusGained",
            EventKind::FocusLost => "FocusLost",
            EventKind::MouseDown => "MouseDown",
            EventKind::MouseUp => "MouseUp",
            EventKind::MouseMove => "MouseMove",
            EventKind::MouseDrag => "MouseDrag",
            EventKind::MouseWheel => "MouseWheel",
            EventKind::KeyDown => "KeyDown",
            EventKind::KeyUp => "KeyUp",
            EventKind::KeyRepeat => "KeyRepeat",
            EventKind::Custom(_) => "Custom",
        }
    }

    pub fn is_mouse(&self) -> bool {
        matches!(
            self,
            EventKind::MouseDown
                | EventKind::MouseUp
                | EventKind::MouseMove
                | EventKind::MouseDrag
                | EventKind::MouseWheel
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Custom(code) => write!(f, "Custom({code})"),
            other => f.write_str(other.name()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
    Back,
    Forward,
}

impl MouseButton {
    pub const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Back => 3,
            MouseButton::Forward => 4,
        }
    }
}

/// Shift a new sample into a three-entry history, newest first.
fn buffer(history: &mut [f32; 3], v: f32) {
    history[2] = history[1];
    history[1] = history[0];
    history[0] = v;
}

/// Mouse state written by the input entry points and read by hooks.
#[derive(Clone, Debug, Default)]
pub struct Mouse {
    x: [f32; 3],
    y: [f32; 3],
    w: [f32; 3],
    rel: Vec2,
    down: [bool; MouseButton::COUNT],
    button: MouseButton,
    clicks: u32,
}

impl Mouse {
    /// Absolute position in surface coordinates.
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x[0], self.y[0])
    }

    /// Position relative to the view receiving the event.
    pub fn rel(&self) -> Vec2 {
        self.rel
    }

    pub fn dx(&self) -> f32 {
        self.x[0] - self.x[1]
    }

    pub fn dy(&self) -> f32 {
        self.y[0] - self.y[1]
    }

    /// Accumulated wheel position.
    pub fn wheel(&self) -> f32 {
        self.w[0]
    }

    /// Change in wheel position from the last wheel event.
    pub fn dw(&self) -> f32 {
        self.w[0] - self.w[1]
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.down[button.index()]
    }

    pub fn any_down(&self) -> bool {
        self.down.iter().any(|d| *d)
    }

    /// Last button pressed or released.
    pub fn button(&self) -> MouseButton {
        self.button
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub(crate) fn set_pos(&mut self, abs: Vec2) {
        buffer(&mut self.x, abs.x);
        buffer(&mut self.y, abs.y);
    }

    pub(crate) fn set_rel(&mut self, rel: Vec2) {
        self.rel = rel;
    }

    pub(crate) fn add_wheel(&mut self, delta: f32) {
        let next = self.w[0] + delta;
        buffer(&mut self.w, next);
    }

    pub(crate) fn update_button(&mut self, button: MouseButton, down: bool, clicks: u32) {
        self.button = button;
        self.down[button.index()] = down;
        self.clicks = clicks;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool, // Cmd on Mac, Win key on Windows
}

#[derive(Clone, Debug, Default)]
pub struct Keyboard {
    key: i32,
    down: bool,
    pub modifiers: Modifiers,
}

impl Keyboard {
    pub fn key(&self) -> i32 {
        self.key
    }

    pub fn key_char(&self) -> Option<char> {
        u32::try_from(self.key).ok().and_then(char::from_u32)
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub(crate) fn set(&mut self, key: i32, down: bool) {
        self.key = key;
        self.down = down;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_accumulates_with_history() {
        let mut m = Mouse::default();
        m.add_wheel(3.0);
        m.add_wheel(-1.0);
        assert_eq!(m.wheel(), 2.0);
        assert_eq!(m.dw(), -1.0);
    }

    #[test]
    fn button_state_tracks_last_button() {
        let mut m = Mouse::default();
        m.update_button(MouseButton::Right, true, 2);
        assert!(m.is_down(MouseButton::Right));
        assert!(!m.is_down(MouseButton::Left));
        assert_eq!(m.clicks(), 2);
        m.update_button(MouseButton::Right, false, 0);
        assert!(!m.any_down());
        assert_eq!(m.button(), MouseButton::Right);
    }

    #[test]
    fn custom_kinds_display_their_code() {
        assert_eq!(EventKind::Custom(7).to_string(), "Custom(7)");
        assert_eq!(EventKind::MouseDrag.to_string(), "MouseDrag");
    }
}
