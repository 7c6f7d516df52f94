use crate::api::types::{GameEvent, SoundEvent};
use crate::assets::manifest::{SpriteDescriptor, SpriteManifest};
use crate::input::buttons::ButtonState;
use crate::renderer::draw::DrawList;

/// Configuration for the engine, provided by the game.
///
/// This is the one place viewport size and tick rate live; systems receive it
/// explicitly instead of reading toolkit globals.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Visible playfield width in pixels.
    pub viewport_width: f32,
    /// Visible playfield height in pixels.
    pub viewport_height: f32,
    /// Maximum number of draw commands per frame (default: 2048).
    pub max_draw_commands: usize,
    /// Maximum number of sound events per frame (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl GameConfig {
    /// Whole ticks per simulated second, derived from `fixed_dt`.
    pub fn tick_rate(&self) -> u32 {
        if self.fixed_dt <= 0.0 {
            return 1;
        }
        ((1.0 / self.fixed_dt).round() as u32).max(1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            viewport_width: 160.0,
            viewport_height: 128.0,
            max_draw_commands: 2048,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. `input` has already been sampled for this tick.
    fn update(&mut self, ctx: &mut EngineContext, input: &ButtonState);

    /// Read-only render pass, called once per host frame after the updates.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Receive a host-provided document (level data, overrides).
    fn load_data(&mut self, _ctx: &mut EngineContext, _json: &str) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub config: GameConfig,
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    tick: u64,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        Self {
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            config,
            tick: 0,
        }
    }

    /// Number of fixed ticks run so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Called by the runner after every fixed update.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// Emit a sound event to be forwarded to the host. Dropped when the frame is full.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() < self.config.max_sounds {
            self.sounds.push(event);
        }
    }

    /// Emit a game event to be forwarded to the host. Dropped when the frame is full.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.config.max_events {
            self.events.push(event);
        } else {
            log::debug!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data (sounds, events).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context for the draw pass.
pub struct RenderContext<'a> {
    pub draw: &'a mut DrawList,
    pub sprites: Option<&'a SpriteManifest>,
}

impl<'a> RenderContext<'a> {
    pub fn new(draw: &'a mut DrawList) -> Self {
        Self { draw, sprites: None }
    }

    pub fn with_sprites(mut self, sprites: &'a SpriteManifest) -> Self {
        self.sprites = Some(sprites);
        self
    }

    /// Look up a named sprite in the loaded manifest, if any.
    pub fn sprite(&self, name: &str) -> Option<&'a SpriteDescriptor> {
        self.sprites.and_then(|m| m.sprite(name))
    }
}
