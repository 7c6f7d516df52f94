//! Player versus enemies and pickups, run after every body has been
//! resolved against the tiles.

use plat_engine::KinematicBody;

use crate::enemy::Enemy;
use crate::item::{Pickup, PickupKind};
use crate::player::{HitOutcome, Player};
use crate::session::SessionEvent;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyContact {
    Stomp,
    SideHit,
}

/// A falling player whose top is above the enemy's top stomps it; any other
/// overlap is a side hit. `None` when the two don't overlap.
pub fn classify(player: &KinematicBody, enemy: &KinematicBody) -> Option<EnemyContact> {
    if !player.overlaps(enemy) {
        return None;
    }
    if player.vel.y > 0.0 && player.top() < enemy.top() {
        Some(EnemyContact::Stomp)
    } else {
        Some(EnemyContact::SideHit)
    }
}

/// Apply stomps and side hits against every live enemy.
///
/// All overlaps are judged on the player's motion before any rebound, so
/// landing on two enemies at once stomps both. Returns true when a side hit
/// cost a life; the session decides what that means.
pub fn resolve_enemies(
    player: &mut Player,
    enemies: &mut [Enemy],
    tuning: &Tuning,
    events: &mut Vec<SessionEvent>,
) -> bool {
    let before = player.body.clone();
    let mut life_lost = false;

    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        match classify(&before, &enemy.body) {
            Some(EnemyContact::Stomp) => {
                enemy.defeat();
                player.body.vel.y = tuning.stomp_rebound;
                player.score = player.score.saturating_add(tuning.stomp_bonus);
                events.push(SessionEvent::Stomped);
            }
            Some(EnemyContact::SideHit) if !life_lost => match player.take_side_hit(tuning) {
                HitOutcome::Ignored => {}
                HitOutcome::Shrunk => events.push(SessionEvent::Hurt),
                HitOutcome::LifeLost => life_lost = true,
            },
            Some(EnemyContact::SideHit) | None => {}
        }
    }
    life_lost
}

pub fn collect_pickups(
    player: &mut Player,
    pickups: &mut [Pickup],
    tuning: &Tuning,
    events: &mut Vec<SessionEvent>,
) {
    for pickup in pickups.iter_mut().filter(|p| !p.collected) {
        if !pickup.touches(&player.body) {
            continue;
        }
        pickup.collected = true;
        match pickup.kind {
            PickupKind::Coin => {
                events.push(SessionEvent::CoinCollected);
                if player.collect_coin(tuning) {
                    events.push(SessionEvent::ExtraLife);
                }
            }
            PickupKind::PowerUp => {
                player.power_up(tuning);
                events.push(SessionEvent::PoweredUp(player.health));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::HealthState;
    use crate::tuning::SideHitPolicy;
    use glam::Vec2;

    fn player_at(x: f32, y: f32, vy: f32) -> Player {
        let mut p = Player::new(Vec2::new(x, y), 3);
        p.body.vel.y = vy;
        p
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy::new(Vec2::new(x, y), 0.5)
    }

    #[test]
    fn falling_from_above_stomps() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 106.0, 1.5);
        let mut enemies = vec![enemy_at(42.0, 112.0)];
        let mut events = Vec::new();

        let life_lost = resolve_enemies(&mut player, &mut enemies, &tuning, &mut events);
        assert!(!life_lost);
        assert!(!enemies[0].alive);
        assert_eq!(player.body.vel.y, tuning.stomp_rebound);
        assert_eq!(player.score, tuning.stomp_bonus);
        assert_eq!(events, vec![SessionEvent::Stomped]);
    }

    #[test]
    fn stomp_bonus_saturates() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 106.0, 1.5);
        player.score = u32::MAX - 10;
        let mut enemies = vec![enemy_at(42.0, 112.0)];
        resolve_enemies(&mut player, &mut enemies, &tuning, &mut Vec::new());
        assert!(!enemies[0].alive);
        assert_eq!(player.score, u32::MAX);
    }

    #[test]
    fn no_stomp_unless_falling() {
        let tuning = Tuning::classic();
        for vy in [0.0, -1.0] {
            let mut player = player_at(40.0, 106.0, vy);
            let mut enemies = vec![enemy_at(42.0, 112.0)];
            let mut events = Vec::new();
            let life_lost = resolve_enemies(&mut player, &mut enemies, &tuning, &mut events);
            assert!(enemies[0].alive);
            assert_eq!(player.score, 0);
            assert!(life_lost, "small player side hit costs a life");
        }
    }

    #[test]
    fn side_hit_shrinks_a_super_player() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 112.0, 0.0);
        player.health = HealthState::Super;
        let mut enemies = vec![enemy_at(44.0, 112.0), enemy_at(36.0, 112.0)];
        let mut events = Vec::new();
        let life_lost = resolve_enemies(&mut player, &mut enemies, &tuning, &mut events);
        assert!(!life_lost);
        assert_eq!(player.health, HealthState::Small);
        // Second enemy hits during the grace period and is ignored.
        assert_eq!(events, vec![SessionEvent::Hurt]);
        assert!(enemies.iter().all(|e| e.alive));
    }

    #[test]
    fn lose_life_policy() {
        let tuning = Tuning { side_hit: SideHitPolicy::LoseLife, ..Tuning::classic() };
        let mut player = player_at(40.0, 112.0, 0.0);
        player.health = HealthState::Fire;
        let mut enemies = vec![enemy_at(44.0, 112.0)];
        assert!(resolve_enemies(&mut player, &mut enemies, &tuning, &mut Vec::new()));
    }

    #[test]
    fn landing_on_two_enemies_stomps_both() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 106.0, 2.0);
        let mut enemies = vec![enemy_at(35.0, 112.0), enemy_at(45.0, 112.0)];
        let mut events = Vec::new();
        resolve_enemies(&mut player, &mut enemies, &tuning, &mut events);
        assert!(enemies.iter().all(|e| !e.alive));
        assert_eq!(player.score, 2 * tuning.stomp_bonus);
    }

    #[test]
    fn dead_enemies_are_ignored() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 112.0, 0.0);
        let mut enemies = vec![enemy_at(44.0, 112.0)];
        enemies[0].defeat();
        assert!(!resolve_enemies(&mut player, &mut enemies, &tuning, &mut Vec::new()));
    }

    #[test]
    fn pickups_are_collected_once() {
        let tuning = Tuning::classic();
        let mut player = player_at(40.0, 112.0, 0.0);
        let mut pickups = vec![
            Pickup::new(PickupKind::Coin, Vec2::new(42.0, 112.0)),
            Pickup::new(PickupKind::PowerUp, Vec2::new(38.0, 110.0)),
            Pickup::new(PickupKind::Coin, Vec2::new(90.0, 112.0)),
        ];
        let mut events = Vec::new();
        collect_pickups(&mut player, &mut pickups, &tuning, &mut events);
        collect_pickups(&mut player, &mut pickups, &tuning, &mut events);
        assert_eq!(
            events,
            vec![
                SessionEvent::CoinCollected,
                SessionEvent::PoweredUp(HealthState::Super),
            ]
        );
        assert_eq!(player.coins, 1);
        assert!(!pickups[2].collected);
    }
}
