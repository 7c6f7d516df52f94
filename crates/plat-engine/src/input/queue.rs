use crate::input::buttons::{Button, ButtonState, KeyMap};

/// Events a host can deliver between frames. Key codes are host codes;
/// what they mean is decided by the `KeyMap`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// On-screen controls (touch pads, UI buttons) that bypass the key map.
    ButtonDown { button: Button },
    ButtonUp { button: Button },
    /// Free-form command from the UI layer, surfaced to the game untouched.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// Events received since the last tick that ran.
///
/// Bounded: a host that stops ticking (hidden tab) cannot grow it without
/// limit. Events past `capacity` are dropped and counted.
pub struct InputQueue {
    pending: Vec<InputEvent>,
    capacity: usize,
    dropped: u32,
}

impl InputQueue {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Vec::with_capacity(capacity.min(32)),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        if self.pending.len() < self.capacity {
            self.pending.push(event);
        } else {
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Feed every pending event into `state` as one tick's batch, in arrival
    /// order, and empty the queue.
    pub fn drain_into(&mut self, state: &mut ButtonState, keymap: &KeyMap) {
        if self.dropped > 0 {
            log::debug!("input queue full, dropped {} events", self.dropped);
            self.dropped = 0;
        }
        state.advance(&self.pending, keymap);
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Events discarded since the last drain.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
