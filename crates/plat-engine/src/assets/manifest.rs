use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Sprite sheets and named sprite rectangles for a game.
/// Loaded from a JSON file at runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpriteManifest {
    /// Sprite sheets, addressed by their index in this list.
    #[serde(default)]
    pub sheets: Vec<SheetDescriptor>,
    /// Named sprite lookup: name → sheet index + pixel rectangle.
    #[serde(default)]
    pub sprites: HashMap<String, SpriteDescriptor>,
    /// Optional audio assets.
    #[serde(default)]
    pub sounds: HashMap<String, SoundDescriptor>,
}

/// A single sprite sheet image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDescriptor {
    /// Human-readable name (e.g., "tiles").
    pub name: String,
    /// Relative path to the image (e.g., "tiles.png").
    pub path: String,
}

/// A named rectangle within a sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDescriptor {
    /// Index into the sheets array.
    pub sheet: u32,
    pub u: f32,
    pub v: f32,
    #[serde(default = "default_cell")]
    pub w: f32,
    #[serde(default = "default_cell")]
    pub h: f32,
    /// Palette index drawn as transparent.
    #[serde(default)]
    pub transparent: Option<u8>,
}

/// Describes an audio asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Relative path to the audio file.
    pub path: String,
    /// Numeric event ID that triggers this sound from Rust.
    #[serde(default)]
    pub event_id: Option<u32>,
}

fn default_cell() -> f32 {
    8.0
}

impl SpriteManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Index of the sheet called `name`.
    pub fn sheet_id(&self, name: &str) -> Option<u32> {
        self.sheets.iter().position(|s| s.name == name).map(|i| i as u32)
    }

    /// Named sprite, only if it points at a sheet that exists.
    pub fn sprite(&self, name: &str) -> Option<&SpriteDescriptor> {
        self.sprites
            .get(name)
            .filter(|s| (s.sheet as usize) < self.sheets.len())
    }
}
