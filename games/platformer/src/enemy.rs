use glam::Vec2;
use plat_engine::{resolve_tiles, Contacts, KinematicBody, TileMap};

use crate::tuning::Tuning;

pub const ENEMY_SIZE: Vec2 = Vec2::new(8.0, 8.0);

/// Walks at a constant speed and turns around at walls.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: KinematicBody,
    pub alive: bool,
    pub grounded: bool,
    /// -1 walking left, +1 walking right.
    direction: f32,
    speed: f32,
}

impl Enemy {
    /// Starts walking left, toward a player entering from the left edge.
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            body: KinematicBody::new(pos, ENEMY_SIZE),
            alive: true,
            grounded: false,
            direction: -1.0,
            speed,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn tick(&mut self, tuning: &Tuning, map: &TileMap) -> Contacts {
        if !self.alive {
            return Contacts::default();
        }

        self.body.vel.x = self.direction * self.speed;
        self.body.apply_gravity(tuning.gravity, tuning.max_fall_speed);
        self.body.integrate();
        let contacts = resolve_tiles(&mut self.body, map);
        self.grounded = contacts.grounded;

        let blocked = if self.direction < 0.0 {
            contacts.wall_left
        } else {
            contacts.wall_right
        };
        if blocked {
            self.direction = -self.direction;
        }

        if self.body.top() > map.pixel_height() {
            self.alive = false;
        }
        contacts
    }

    pub fn defeat(&mut self) {
        self.alive = false;
        self.body.vel = Vec2::ZERO;
    }
}
