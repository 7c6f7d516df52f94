use plat_engine::{ButtonState, EngineContext, Game, GameConfig, GameEvent, RenderContext, SoundEvent};

use crate::level::Level;
use crate::render;
use crate::session::{GameSession, GameState, SessionEvent};
use crate::tuning::{Variant, DEFAULT_RUNNER_SEED};

/// Sound ids handed to the host.
pub mod sounds {
    pub const JUMP: u32 = 1;
    pub const STOMP: u32 = 2;
    pub const COIN: u32 = 3;
    pub const POWER_UP: u32 = 4;
    pub const HURT: u32 = 5;
    pub const LIFE_LOST: u32 = 6;
    pub const EXTRA_LIFE: u32 = 7;
    pub const CLEAR: u32 = 8;
    pub const GAME_OVER: u32 = 9;
}

/// Game event kinds handed to the host. Each is emitted when its value changes.
pub mod events {
    /// a = score, b = coins
    pub const SCORE: u32 = 1;
    /// a = lives
    pub const LIVES: u32 = 2;
    /// a = state index (0 title, 1 playing, 2 game over, 3 clear)
    pub const STATE: u32 = 3;
    /// a = remaining seconds, or -1 without a time limit
    pub const TIME: u32 = 4;
}

/// Custom event kinds accepted from the host.
pub mod commands {
    /// a = variant index (0 hop, 1 classic, 2 runner), b = runner seed when > 0
    pub const SELECT_VARIANT: u32 = 1;
    pub const RESTART: u32 = 2;
}

/// Values the host displays, compared tick to tick.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Hud {
    score: u32,
    coins: u32,
    lives: u32,
    state: GameState,
    time: Option<u32>,
}

/// The tile platformer: a variant, its session and the host plumbing.
pub struct Platformer {
    variant: Variant,
    seed: u64,
    session: GameSession,
    last_hud: Option<Hud>,
}

impl Platformer {
    pub fn new() -> Self {
        let variant = Variant::Classic;
        let seed = DEFAULT_RUNNER_SEED;
        Self {
            session: GameSession::new(variant.level(seed), variant.tuning(), &GameConfig::default()),
            variant,
            seed,
            last_hud: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Swap to another variant's rules and built-in level, back on the title screen.
    pub fn select_variant(&mut self, variant: Variant, config: &GameConfig) {
        self.variant = variant;
        self.session = GameSession::new(variant.level(self.seed), variant.tuning(), config);
        log::info!("variant {} selected", variant.name());
    }

    fn handle_commands(&mut self, ctx: &EngineContext, input: &ButtonState) {
        for event in input.custom_events() {
            match event.kind {
                commands::SELECT_VARIANT => {
                    if event.b > 0.0 {
                        self.seed = event.b as u64;
                    }
                    match Variant::from_index(event.a.max(0.0) as u32) {
                        Some(variant) => self.select_variant(variant, &ctx.config),
                        None => log::warn!("unknown variant index {}", event.a),
                    }
                }
                commands::RESTART => {
                    self.session = GameSession::new(
                        self.session.level().clone(),
                        self.session.tuning().clone(),
                        &ctx.config,
                    );
                }
                other => log::debug!("ignoring custom event {}", other),
            }
        }
    }

    fn emit_sounds(ctx: &mut EngineContext, events: &[SessionEvent]) {
        for event in events {
            let id = match event {
                SessionEvent::Jumped => sounds::JUMP,
                SessionEvent::Stomped => sounds::STOMP,
                SessionEvent::CoinCollected => sounds::COIN,
                SessionEvent::PoweredUp(_) => sounds::POWER_UP,
                SessionEvent::Hurt => sounds::HURT,
                SessionEvent::LifeLost { .. } => sounds::LIFE_LOST,
                SessionEvent::ExtraLife => sounds::EXTRA_LIFE,
                SessionEvent::StateChanged(GameState::Clear) => sounds::CLEAR,
                SessionEvent::StateChanged(GameState::GameOver) => sounds::GAME_OVER,
                SessionEvent::StateChanged(_) => continue,
            };
            ctx.emit_sound(SoundEvent(id));
        }
    }

    fn hud(&self) -> Hud {
        let player = self.session.player();
        Hud {
            score: player.score,
            coins: player.coins,
            lives: player.lives,
            state: self.session.state(),
            time: self.session.remaining_time(),
        }
    }

    fn emit_hud(&mut self, ctx: &mut EngineContext) {
        let hud = self.hud();
        let last = self.last_hud.replace(hud);
        if last.map(|l| (l.score, l.coins)) != Some((hud.score, hud.coins)) {
            ctx.emit_event(GameEvent::new(events::SCORE, hud.score as f32, hud.coins as f32, 0.0));
        }
        if last.map(|l| l.lives) != Some(hud.lives) {
            ctx.emit_event(GameEvent::new(events::LIVES, hud.lives as f32, 0.0, 0.0));
        }
        if last.map(|l| l.state) != Some(hud.state) {
            ctx.emit_event(GameEvent::new(events::STATE, hud.state.index() as f32, 0.0, 0.0));
        }
        if last.map(|l| l.time) != Some(hud.time) {
            let time = hud.time.map(|t| t as f32).unwrap_or(-1.0);
            ctx.emit_event(GameEvent::new(events::TIME, time, 0.0, 0.0));
        }
    }
}

impl Default for Platformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Platformer {
    fn init(&mut self, ctx: &mut EngineContext) {
        self.session = GameSession::new(self.variant.level(self.seed), self.variant.tuning(), &ctx.config);
        self.last_hud = None;
        log::info!(
            "platformer ready: {} variant, {}x{} tiles",
            self.variant.name(),
            self.session.map().width(),
            self.session.map().height()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &ButtonState) {
        self.handle_commands(ctx, input);
        let events = self.session.tick(input);
        Self::emit_sounds(ctx, &events);
        self.emit_hud(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        render::draw_session(&self.session, ctx, "PLATFORMER");
    }

    /// A host level document. Loaded levels play with the classic rules; a
    /// bad document falls back to the built-in level.
    fn load_data(&mut self, ctx: &mut EngineContext, json: &str) {
        let level = Level::from_json_or_default(json);
        self.variant = Variant::Classic;
        self.session = GameSession::new(level, self.variant.tuning(), &ctx.config);
        self.last_hud = None;
        log::info!(
            "level loaded: {}x{} tiles, {} objects",
            self.session.map().width(),
            self.session.map().height(),
            self.session.level().spawns.len()
        );
    }
}
