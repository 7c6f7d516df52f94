use glam::Vec2;
use plat_engine::core::body::overlaps_rect;
use plat_engine::KinematicBody;

pub const PICKUP_SIZE: Vec2 = Vec2::new(8.0, 8.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Coin,
    PowerUp,
}

/// A static collectible. Removed from play once collected.
#[derive(Debug, Clone, PartialEq)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            collected: false,
        }
    }

    pub fn touches(&self, body: &KinematicBody) -> bool {
        let half = PICKUP_SIZE * 0.5;
        overlaps_rect(self.pos + half, half, body.center(), body.half_extents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_uses_half_extents() {
        let coin = Pickup::new(PickupKind::Coin, Vec2::new(16.0, 100.0));
        let near = KinematicBody::new(Vec2::new(10.0, 96.0), Vec2::new(8.0, 8.0));
        let beside = KinematicBody::new(Vec2::new(8.0, 100.0), Vec2::new(8.0, 8.0));
        assert!(coin.touches(&near));
        assert!(!coin.touches(&beside));
    }
}
