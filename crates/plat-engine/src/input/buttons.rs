//! Logical buttons sampled once per tick.
//!
//! Games never look at key codes. The runner feeds raw [`InputEvent`]s through
//! a [`KeyMap`] into a [`ButtonState`], which answers "is it held" (level) and
//! "was it pressed this tick" (edge).

use std::collections::{HashMap, HashSet};

use crate::input::queue::InputEvent;

/// Logical controls a game can ask about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Left,
    Right,
    Jump,
    Confirm,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Left, Button::Right, Button::Jump, Button::Confirm];

    /// Decode the numeric id the host uses for on-screen controls.
    pub fn from_index(index: u32) -> Option<Button> {
        Self::ALL.get(index as usize).copied()
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Browser `keyCode` values used by the default bindings.
pub mod keys {
    pub const ENTER: u32 = 13;
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const A: u32 = 65;
    pub const D: u32 = 68;
    pub const W: u32 = 87;
    pub const Z: u32 = 90;
}

/// Key code to logical button bindings. Several keys may share a button.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<u32, Button>,
}

impl KeyMap {
    /// A map with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key_code: u32, button: Button) {
        self.bindings.insert(key_code, button);
    }

    pub fn button_for(&self, key_code: u32) -> Option<Button> {
        self.bindings.get(&key_code).copied()
    }
}

impl Default for KeyMap {
    /// Arrows and A/D move; Space, Up, Z and W jump; Enter confirms.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(keys::LEFT, Button::Left);
        map.bind(keys::A, Button::Left);
        map.bind(keys::RIGHT, Button::Right);
        map.bind(keys::D, Button::Right);
        map.bind(keys::SPACE, Button::Jump);
        map.bind(keys::UP, Button::Jump);
        map.bind(keys::Z, Button::Jump);
        map.bind(keys::W, Button::Jump);
        map.bind(keys::ENTER, Button::Confirm);
        map
    }
}

/// A host-defined event received this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomEvent {
    pub kind: u32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

/// Held/pressed state of every [`Button`] for the current tick.
#[derive(Debug, Clone, Default)]
pub struct ButtonState {
    /// Bits held at the end of this tick's events.
    held: u8,
    /// Bits held at the end of the previous tick.
    previous: u8,
    /// Bits that went down during this tick, even if released again before it ended.
    tapped: u8,
    keys_down: HashSet<u32>,
    pads_down: u8,
    custom: Vec<CustomEvent>,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply this tick's events. Call exactly once per tick, with an empty
    /// slice on ticks that received no events, so edges expire.
    pub fn advance(&mut self, events: &[InputEvent], keymap: &KeyMap) {
        self.previous = self.held;
        self.custom.clear();
        let mut went_down = 0u8;

        for event in events {
            match *event {
                InputEvent::KeyDown { key_code } => {
                    if let Some(button) = keymap.button_for(key_code) {
                        self.keys_down.insert(key_code);
                        went_down |= button.bit();
                    }
                }
                InputEvent::KeyUp { key_code } => {
                    self.keys_down.remove(&key_code);
                }
                InputEvent::ButtonDown { button } => {
                    self.pads_down |= button.bit();
                    went_down |= button.bit();
                }
                InputEvent::ButtonUp { button } => {
                    self.pads_down &= !button.bit();
                }
                InputEvent::Custom { kind, a, b, c } => {
                    self.custom.push(CustomEvent { kind, a, b, c });
                }
            }
        }

        self.held = self
            .keys_down
            .iter()
            .filter_map(|&key| keymap.button_for(key))
            .fold(self.pads_down, |bits, button| bits | button.bit());
        // Auto-repeat while already held is not a new press.
        self.tapped = went_down & !self.previous;
    }

    pub fn held(&self, button: Button) -> bool {
        self.held & button.bit() != 0
    }

    /// True only on the tick the button went down.
    pub fn pressed(&self, button: Button) -> bool {
        ((self.held & !self.previous) | self.tapped) & button.bit() != 0
    }

    /// -1, 0 or +1. Right wins when both directions are held.
    pub fn horizontal_axis(&self) -> f32 {
        if self.held(Button::Right) {
            1.0
        } else if self.held(Button::Left) {
            -1.0
        } else {
            0.0
        }
    }

    /// Custom events delivered with this tick, in arrival order.
    pub fn custom_events(&self) -> &[CustomEvent] {
        &self.custom
    }

    /// Forget everything, e.g. when the host window loses focus.
    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(key_code: u32) -> InputEvent {
        InputEvent::KeyDown { key_code }
    }

    fn up(key_code: u32) -> InputEvent {
        InputEvent::KeyUp { key_code }
    }

    #[test]
    fn press_is_an_edge_hold_is_a_level() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();

        state.advance(&[down(keys::SPACE)], &map);
        assert!(state.pressed(Button::Jump));
        assert!(state.held(Button::Jump));

        state.advance(&[], &map);
        assert!(!state.pressed(Button::Jump));
        assert!(state.held(Button::Jump));

        state.advance(&[up(keys::SPACE)], &map);
        assert!(!state.held(Button::Jump));
    }

    #[test]
    fn auto_repeat_does_not_retrigger() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[down(keys::SPACE)], &map);
        state.advance(&[down(keys::SPACE)], &map);
        assert!(!state.pressed(Button::Jump));
    }

    #[test]
    fn tap_within_one_tick_still_counts() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[down(keys::ENTER), up(keys::ENTER)], &map);
        assert!(state.pressed(Button::Confirm));
        assert!(!state.held(Button::Confirm));
        state.advance(&[], &map);
        assert!(!state.pressed(Button::Confirm));
    }

    #[test]
    fn two_keys_on_one_button() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[down(keys::SPACE), down(keys::UP)], &map);
        state.advance(&[up(keys::SPACE)], &map);
        assert!(state.held(Button::Jump));
        state.advance(&[up(keys::UP)], &map);
        assert!(!state.held(Button::Jump));
    }

    #[test]
    fn right_wins_over_left() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[down(keys::LEFT)], &map);
        assert_eq!(state.horizontal_axis(), -1.0);
        state.advance(&[down(keys::RIGHT)], &map);
        assert_eq!(state.horizontal_axis(), 1.0);
        state.advance(&[up(keys::RIGHT), up(keys::LEFT)], &map);
        assert_eq!(state.horizontal_axis(), 0.0);
    }

    #[test]
    fn on_screen_buttons_and_unbound_keys() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[InputEvent::ButtonDown { button: Button::Right }, down(999)], &map);
        assert!(state.pressed(Button::Right));
        assert_eq!(state.horizontal_axis(), 1.0);
        state.advance(&[InputEvent::ButtonUp { button: Button::Right }], &map);
        assert!(!state.held(Button::Right));
    }

    #[test]
    fn custom_events_last_one_tick() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[InputEvent::Custom { kind: 2, a: 1.0, b: 0.0, c: 0.0 }], &map);
        assert_eq!(state.custom_events().len(), 1);
        assert_eq!(state.custom_events()[0].kind, 2);
        state.advance(&[], &map);
        assert!(state.custom_events().is_empty());
    }

    #[test]
    fn button_index_round_trip() {
        assert_eq!(Button::from_index(2), Some(Button::Jump));
        assert_eq!(Button::from_index(4), None);
    }

    #[test]
    fn release_all_clears_state() {
        let map = KeyMap::default();
        let mut state = ButtonState::new();
        state.advance(&[down(keys::D)], &map);
        state.release_all();
        assert!(!state.held(Button::Right));
        assert!(!state.pressed(Button::Right));
    }
}
