//! Immediate-mode draw list handed to the host once per frame.
//!
//! Coordinates are viewport pixels; colours are indices into [`palette`].
//! The host replays the list in order.

use glam::Vec2;
use serde::Serialize;

/// 16-colour palette. Index constants plus the RGB values the host should use.
pub mod palette {
    pub const BLACK: u8 = 0;
    pub const NAVY: u8 = 1;
    pub const PURPLE: u8 = 2;
    pub const TEAL: u8 = 3;
    pub const BROWN: u8 = 4;
    pub const DARK_BLUE: u8 = 5;
    pub const SKY: u8 = 6;
    pub const WHITE: u8 = 7;
    pub const RED: u8 = 8;
    pub const ORANGE: u8 = 9;
    pub const YELLOW: u8 = 10;
    pub const LIME: u8 = 11;
    pub const BLUE: u8 = 12;
    pub const GRAY: u8 = 13;
    pub const PINK: u8 = 14;
    pub const PEACH: u8 = 15;

    pub const COUNT: usize = 16;

    pub const RGB: [u32; COUNT] = [
        0x000000, 0x2B335F, 0x7E2072, 0x19959C, 0x8B4852, 0x395C98, 0xA9C1FF, 0xEEEEEE,
        0xD4186C, 0xD38441, 0xE9C35B, 0x70C6A9, 0x7696DE, 0xA3A3A3, 0xFF9798, 0xEDC7B0,
    ];

    /// Wrap any id into the palette.
    pub fn wrap(id: u16) -> u8 {
        (id as usize % COUNT) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: u8,
    },
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: u8,
    },
    RectOutline {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: u8,
    },
    /// Copy a `w`x`h` region at (`u`,`v`) of sprite sheet `sheet` to (`x`,`y`).
    Blit {
        x: f32,
        y: f32,
        sheet: u32,
        u: f32,
        v: f32,
        w: f32,
        h: f32,
        #[serde(skip_serializing_if = "Option::is_none")]
        transparent: Option<u8>,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        color: u8,
    },
}

pub struct DrawList {
    commands: Vec<DrawCommand>,
    capacity: usize,
    dropped: usize,
}

impl DrawList {
    pub fn new() -> Self {
        Self::with_capacity(2048)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            commands: Vec::with_capacity(capacity.min(4096)),
            capacity,
            dropped: 0,
        }
    }

    /// Append a command. Commands past capacity are counted and dropped.
    pub fn push(&mut self, command: DrawCommand) {
        if self.commands.len() < self.capacity {
            self.commands.push(command);
        } else {
            self.dropped += 1;
        }
    }

    pub fn clear(&mut self) {
        if self.dropped > 0 {
            log::debug!("draw list overflowed, {} commands dropped", self.dropped);
        }
        self.commands.clear();
        self.dropped = 0;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn clear_screen(&mut self, color: u8) {
        self.push(DrawCommand::Clear { color });
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: u8) {
        self.push(DrawCommand::FillRect {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
            color,
        });
    }

    pub fn rect_outline(&mut self, pos: Vec2, size: Vec2, color: u8) {
        self.push(DrawCommand::RectOutline {
            x: pos.x,
            y: pos.y,
            w: size.x,
            h: size.y,
            color,
        });
    }

    pub fn blit(&mut self, pos: Vec2, sheet: u32, uv: Vec2, size: Vec2, transparent: Option<u8>) {
        self.push(DrawCommand::Blit {
            x: pos.x,
            y: pos.y,
            sheet,
            u: uv.x,
            v: uv.y,
            w: size.x,
            h: size.y,
            transparent,
        });
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, color: u8) {
        self.push(DrawCommand::Text {
            x: pos.x,
            y: pos.y,
            text: text.into(),
            color,
        });
    }

    /// Serialize the list as a JSON array for the host.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_keep_order() {
        let mut list = DrawList::new();
        list.clear_screen(palette::SKY);
        list.fill_rect(Vec2::new(1.0, 2.0), Vec2::new(8.0, 8.0), palette::BROWN);
        list.text(Vec2::ZERO, "SCORE 0", palette::WHITE);
        assert_eq!(list.len(), 3);
        assert_eq!(list.commands()[0], DrawCommand::Clear { color: palette::SKY });
        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn overflow_is_dropped_not_grown() {
        let mut list = DrawList::with_capacity(2);
        for _ in 0..5 {
            list.clear_screen(0);
        }
        assert_eq!(list.len(), 2);
        assert_eq!(list.dropped(), 3);
        list.clear();
        assert_eq!(list.dropped(), 0);
    }

    #[test]
    fn json_is_tagged_by_op() {
        let mut list = DrawList::new();
        list.rect_outline(Vec2::new(4.0, 4.0), Vec2::new(2.0, 3.0), palette::RED);
        list.blit(Vec2::ZERO, 0, Vec2::new(8.0, 0.0), Vec2::splat(8.0), None);
        let json = list.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["op"], "rect_outline");
        assert_eq!(value[0]["color"], 8);
        assert_eq!(value[1]["op"], "blit");
        assert!(value[1].get("transparent").is_none());
    }

    #[test]
    fn palette_wraps_ids() {
        assert_eq!(palette::wrap(3), 3);
        assert_eq!(palette::wrap(17), 1);
        assert_eq!(palette::RGB.len(), palette::COUNT);
    }
}
