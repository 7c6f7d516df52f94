use glam::Vec2;
use plat_engine::{resolve_tiles, Button, ButtonState, Contacts, KinematicBody, TileMap};

use crate::tuning::{JumpRule, SideHitPolicy, Tuning};

pub const PLAYER_SIZE: Vec2 = Vec2::new(8.0, 8.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Airborne,
}

/// Power level, upgraded by power-ups and lost to side hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthState {
    Small,
    Super,
    Fire,
}

impl HealthState {
    pub fn upgraded(self) -> Option<HealthState> {
        match self {
            HealthState::Small => Some(HealthState::Super),
            HealthState::Super => Some(HealthState::Fire),
            HealthState::Fire => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HealthState::Small => "small",
            HealthState::Super => "super",
            HealthState::Fire => "fire",
        }
    }
}

/// What a side hit did to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Still invulnerable from an earlier hit.
    Ignored,
    /// Dropped to Small and became invulnerable.
    Shrunk,
    /// The session must take a life.
    LifeLost,
}

/// Result of one player tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    pub contacts: Contacts,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub body: KinematicBody,
    /// -1 facing left, +1 facing right.
    pub facing: f32,
    pub jump_state: JumpState,
    pub health: HealthState,
    pub score: u32,
    pub coins: u32,
    pub lives: u32,
    /// Walk animation frame, 0 or 1.
    pub frame: u32,
    anim_ticks: u32,
    invulnerable: u32,
}

impl Player {
    pub fn new(start: Vec2, lives: u32) -> Self {
        Self {
            body: KinematicBody::new(start, PLAYER_SIZE),
            facing: 1.0,
            jump_state: JumpState::Airborne,
            health: HealthState::Small,
            score: 0,
            coins: 0,
            lives,
            frame: 0,
            anim_ticks: 0,
            invulnerable: 0,
        }
    }

    /// Input, gravity, jump, integrate, resolve against the map.
    pub fn tick(&mut self, input: &ButtonState, tuning: &Tuning, map: &TileMap) -> PlayerStep {
        let axis = input.horizontal_axis();
        self.body.vel.x = axis * tuning.move_speed;
        if axis != 0.0 {
            self.facing = axis;
        }

        self.body.apply_gravity(tuning.gravity, tuning.max_fall_speed);

        let can_jump = match tuning.jump_rule {
            JumpRule::Grounded => self.jump_state == JumpState::Grounded,
            JumpRule::Anytime => true,
        };
        let jumped = can_jump && input.pressed(Button::Jump);
        if jumped {
            self.body.vel.y = tuning.jump_impulse;
        }

        self.body.integrate();
        let contacts = resolve_tiles(&mut self.body, map);
        self.jump_state = if contacts.grounded {
            JumpState::Grounded
        } else {
            JumpState::Airborne
        };

        self.animate(tuning.animation_ticks);
        self.invulnerable = self.invulnerable.saturating_sub(1);

        PlayerStep { jumped, contacts }
    }

    fn animate(&mut self, ticks_per_frame: u32) {
        if self.body.vel.x == 0.0 {
            self.anim_ticks = 0;
            self.frame = 0;
            return;
        }
        self.anim_ticks += 1;
        if self.anim_ticks % ticks_per_frame.max(1) == 0 {
            self.frame = (self.frame + 1) % 2;
        }
    }

    /// Back to `start` after losing a life. Score, coins and lives are kept.
    pub fn respawn(&mut self, start: Vec2) {
        self.body.reset(start);
        self.jump_state = JumpState::Airborne;
        self.health = HealthState::Small;
        self.frame = 0;
        self.anim_ticks = 0;
        self.invulnerable = 0;
    }

    /// Returns true when the coin completed an extra life.
    pub fn collect_coin(&mut self, tuning: &Tuning) -> bool {
        self.coins = self.coins.saturating_add(1);
        self.score = self.score.saturating_add(tuning.coin_bonus);
        if tuning.coins_per_life > 0 && self.coins >= tuning.coins_per_life {
            self.coins -= tuning.coins_per_life;
            self.lives = self.lives.saturating_add(1);
            return true;
        }
        false
    }

    /// Upgrade health. At full health the power-up is worth points instead.
    pub fn power_up(&mut self, tuning: &Tuning) -> bool {
        match self.health.upgraded() {
            Some(next) => {
                self.health = next;
                true
            }
            None => {
                self.score = self.score.saturating_add(tuning.power_up_bonus);
                false
            }
        }
    }

    pub fn take_side_hit(&mut self, tuning: &Tuning) -> HitOutcome {
        if self.is_invulnerable() {
            return HitOutcome::Ignored;
        }
        match tuning.side_hit {
            SideHitPolicy::Shrink if self.health > HealthState::Small => {
                self.health = HealthState::Small;
                self.invulnerable = tuning.invulnerable_ticks;
                HitOutcome::Shrunk
            }
            SideHitPolicy::Shrink | SideHitPolicy::LoseLife => HitOutcome::LifeLost,
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Blinks every 4 ticks while invulnerable.
    pub fn is_visible(&self) -> bool {
        self.invulnerable == 0 || (self.invulnerable / 4) % 2 == 0
    }
}
