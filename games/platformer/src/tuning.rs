//! Per-variant rule constants. Speeds are in pixels per tick, durations in ticks.

use crate::level::Level;

/// What a side hit from an enemy does to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SideHitPolicy {
    /// Super/Fire drop back to Small with a grace period; Small loses a life.
    #[default]
    Shrink,
    /// Every side hit costs a life.
    LoseLife,
}

/// When a jump press is honored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpRule {
    /// Only while grounded, once per press.
    #[default]
    Grounded,
    /// On every press, airborne or not.
    Anytime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Vertical velocity set by a jump (negative is up).
    pub jump_impulse: f32,
    pub move_speed: f32,
    pub jump_rule: JumpRule,
    pub patrol_speed: f32,
    /// Vertical velocity after stomping an enemy.
    pub stomp_rebound: f32,
    pub stomp_bonus: u32,
    pub coin_bonus: u32,
    /// Score for a power-up collected at full health.
    pub power_up_bonus: u32,
    pub coins_per_life: u32,
    pub starting_lives: u32,
    /// Seconds on the clock; `None` disables the timer.
    pub time_limit: Option<u32>,
    /// Points per second left on the clock when the goal is reached.
    pub time_bonus: u32,
    /// How close (px) the player's x must get to the goal marker.
    pub goal_tolerance: f32,
    /// Minimum ticks a Game Over / Clear screen stays up before confirm works.
    pub result_min_ticks: u32,
    pub invulnerable_ticks: u32,
    pub side_hit: SideHitPolicy,
    /// Ticks per animation frame while moving.
    pub animation_ticks: u32,
    /// Camera auto-scroll (px/tick); zero means the camera follows the player.
    pub scroll_speed: f32,
    /// Points per tile of auto-scrolled distance.
    pub distance_points: u32,
}

impl Tuning {
    /// Single-screen jump toy: slow gravity, no walking, jump on every press.
    pub fn hop() -> Self {
        Self {
            gravity: 0.05,
            max_fall_speed: 8.0,
            jump_impulse: -2.0,
            move_speed: 0.0,
            jump_rule: JumpRule::Anytime,
            time_limit: None,
            ..Self::classic()
        }
    }

    /// Tile level with enemies, a goal and a clock.
    pub fn classic() -> Self {
        Self {
            gravity: 0.2,
            max_fall_speed: 7.0,
            jump_impulse: -3.5,
            move_speed: 1.5,
            jump_rule: JumpRule::Grounded,
            patrol_speed: 0.5,
            stomp_rebound: -2.5,
            stomp_bonus: 100,
            coin_bonus: 200,
            power_up_bonus: 1000,
            coins_per_life: 100,
            starting_lives: 3,
            time_limit: Some(300),
            time_bonus: 10,
            goal_tolerance: 4.0,
            result_min_ticks: 120,
            invulnerable_ticks: 90,
            side_hit: SideHitPolicy::Shrink,
            animation_ticks: 8,
            scroll_speed: 0.0,
            distance_points: 0,
        }
    }

    /// Endless-style course with a camera that keeps moving.
    pub fn runner() -> Self {
        Self {
            gravity: 0.25,
            jump_impulse: -4.0,
            time_limit: None,
            scroll_speed: 1.0,
            distance_points: 1,
            ..Self::classic()
        }
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::classic()
    }
}

/// A tuning preset paired with where its level comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    Hop,
    #[default]
    Classic,
    Runner,
}

/// Seed used for the runner course unless the host picks one.
pub const DEFAULT_RUNNER_SEED: u64 = 7;
/// Runner course length in tiles.
pub const RUNNER_COLUMNS: u32 = 400;

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Hop, Variant::Classic, Variant::Runner];

    pub fn from_index(index: u32) -> Option<Variant> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Hop => "hop",
            Variant::Classic => "classic",
            Variant::Runner => "runner",
        }
    }

    pub fn tuning(self) -> Tuning {
        match self {
            Variant::Hop => Tuning::hop(),
            Variant::Classic => Tuning::classic(),
            Variant::Runner => Tuning::runner(),
        }
    }

    /// Built-in level for this variant. `seed` only matters for Runner.
    pub fn level(self, seed: u64) -> Level {
        match self {
            Variant::Hop => Level::hop(),
            Variant::Classic => Level::flat_default(),
            Variant::Runner => Level::generate_runner(seed, RUNNER_COLUMNS),
        }
    }
}
