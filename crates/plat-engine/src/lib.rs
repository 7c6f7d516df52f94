pub mod api;
pub mod core;
pub mod components;
pub mod input;
pub mod renderer;
pub mod assets;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{SoundEvent, GameEvent};
pub use components::tilemap::{TileId, TileMap};
pub use core::body::KinematicBody;
pub use core::collision::{resolve_tiles, Contacts};
pub use core::time::{Countdown, FixedTimestep};
pub use input::buttons::{keys, Button, ButtonState, CustomEvent, KeyMap};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::Camera2D;
pub use renderer::draw::{palette, DrawCommand, DrawList};
pub use assets::manifest::{SpriteDescriptor, SpriteManifest};
pub use systems::rng::Rng;
