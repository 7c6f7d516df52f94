use glam::Vec2;

/// Axis-aligned moving rectangle shared by the player and enemies.
///
/// `pos` is the top-left corner in pixels (Y grows downward); `vel` is in
/// pixels per tick. `size` never changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    size: Vec2,
}

impl KinematicBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn left(&self) -> f32 {
        self.pos.x
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn top(&self) -> f32 {
        self.pos.y
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }

    /// Add one tick of gravity, clamping the fall speed.
    pub fn apply_gravity(&mut self, gravity: f32, max_fall_speed: f32) {
        self.vel.y = (self.vel.y + gravity).min(max_fall_speed);
    }

    /// Explicit Euler step: position += velocity.
    pub fn integrate(&mut self) {
        self.pos += self.vel;
    }

    /// Half-extent overlap test. Touching edges do not overlap.
    pub fn overlaps(&self, other: &KinematicBody) -> bool {
        overlaps_rect(self.center(), self.half_extents(), other.center(), other.half_extents())
    }

    /// Put the body back at `pos` with zero velocity.
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }
}

/// Overlap of two rectangles given as center + half extents.
pub fn overlaps_rect(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    let d = (a_center - b_center).abs();
    d.x < a_half.x + b_half.x && d.y < a_half.y + b_half.y
}
