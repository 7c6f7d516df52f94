//! One run of the game: the level, every entity in it, the camera, the clock
//! and the Title / Playing / GameOver / Clear state machine.
//!
//! A playing tick runs in a fixed order: player input, forces and tile
//! resolution; enemies; player-vs-enemy and pickup contacts; camera and
//! clock; then the state checks (lost life, time up, goal reached).

use glam::Vec2;
use plat_engine::{Button, ButtonState, Camera2D, Countdown, GameConfig, TileMap};

use crate::contact;
use crate::enemy::Enemy;
use crate::item::{Pickup, PickupKind};
use crate::level::{Level, Spawn};
use crate::player::{HealthState, Player};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Title,
    Playing,
    GameOver,
    Clear,
}

impl GameState {
    pub fn index(self) -> u32 {
        match self {
            GameState::Title => 0,
            GameState::Playing => 1,
            GameState::GameOver => 2,
            GameState::Clear => 3,
        }
    }
}

/// Something that happened during a tick, for sound and host notifications.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    Jumped,
    Stomped,
    CoinCollected,
    PoweredUp(HealthState),
    Hurt,
    LifeLost { lives_left: u32 },
    ExtraLife,
    StateChanged(GameState),
}

pub struct GameSession {
    level: Level,
    tuning: Tuning,
    tick_rate: u32,
    player: Player,
    enemies: Vec<Enemy>,
    pickups: Vec<Pickup>,
    camera: Camera2D,
    timer: Option<Countdown>,
    state: GameState,
    /// Ticks spent in the current state.
    state_ticks: u32,
    /// Whole tiles the auto-scrolling camera has paid out points for.
    scored_tiles: u32,
}

impl GameSession {
    /// A fresh session waiting on the title screen.
    pub fn new(level: Level, tuning: Tuning, config: &GameConfig) -> Self {
        let mut session = Self {
            player: Player::new(level.player_start, tuning.starting_lives),
            enemies: Vec::new(),
            pickups: Vec::new(),
            camera: Camera2D::new(config.viewport_width, config.viewport_height),
            timer: None,
            state: GameState::Title,
            state_ticks: 0,
            scored_tiles: 0,
            tick_rate: config.tick_rate(),
            level,
            tuning,
        };
        session.reset();
        session
    }

    /// Rebuild every entity, the camera and the clock from the level.
    /// The state is left as it is.
    fn reset(&mut self) {
        self.player = Player::new(self.level.player_start, self.tuning.starting_lives);
        self.enemies.clear();
        self.pickups.clear();
        for spawn in &self.level.spawns {
            match *spawn {
                Spawn::PatrolEnemy { x, y } => {
                    self.enemies.push(Enemy::new(Vec2::new(x, y), self.tuning.patrol_speed))
                }
                Spawn::Coin { x, y } => {
                    self.pickups.push(Pickup::new(PickupKind::Coin, Vec2::new(x, y)))
                }
                Spawn::PowerUp { x, y } => {
                    self.pickups.push(Pickup::new(PickupKind::PowerUp, Vec2::new(x, y)))
                }
                Spawn::Goal { .. } | Spawn::PlayerStart { .. } => {}
            }
        }
        self.camera.set_bounds(0.0, self.level.map.pixel_width());
        self.camera.anchor_bottom(self.level.map.pixel_height());
        self.camera.reset();
        self.timer = self
            .level
            .time_limit
            .or(self.tuning.time_limit)
            .map(|seconds| Countdown::new(seconds, self.tick_rate));
        self.scored_tiles = 0;
    }

    /// Full reinitialization straight into play.
    pub fn restart(&mut self, events: &mut Vec<SessionEvent>) {
        self.reset();
        log::info!(
            "session started: {} enemies, {} pickups",
            self.enemies.len(),
            self.pickups.len()
        );
        self.set_state(GameState::Playing, events);
    }

    pub fn tick(&mut self, input: &ButtonState) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.state_ticks = self.state_ticks.saturating_add(1);

        match self.state {
            GameState::Title => {
                if input.pressed(Button::Confirm) {
                    self.restart(&mut events);
                }
            }
            GameState::Playing => self.tick_playing(input, &mut events),
            GameState::GameOver | GameState::Clear => {
                if self.can_continue() && input.pressed(Button::Confirm) {
                    self.restart(&mut events);
                }
            }
        }
        events
    }

    fn tick_playing(&mut self, input: &ButtonState, events: &mut Vec<SessionEvent>) {
        let step = self.player.tick(input, &self.tuning, &self.level.map);
        if step.jumped {
            events.push(SessionEvent::Jumped);
        }

        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            enemy.tick(&self.tuning, &self.level.map);
        }

        let mut life_lost =
            contact::resolve_enemies(&mut self.player, &mut self.enemies, &self.tuning, events);
        contact::collect_pickups(&mut self.player, &mut self.pickups, &self.tuning, events);

        self.update_camera();

        // Below the bottom of the screen, not just the map.
        if self.player.body.top() > self.camera.bottom() {
            life_lost = true;
        }
        if self.tuning.scroll_speed > 0.0 && self.player.body.right() <= self.camera.x {
            life_lost = true;
        }
        if life_lost {
            self.lose_life(events);
            return;
        }

        if let Some(timer) = self.timer.as_mut() {
            if timer.tick() && timer.is_expired() {
                log::info!("time up");
                self.set_state(GameState::GameOver, events);
                return;
            }
        }

        if let Some(goal_x) = self.level.goal_x {
            if self.player.body.pos.x + self.tuning.goal_tolerance >= goal_x {
                let bonus = self
                    .remaining_time()
                    .unwrap_or(0)
                    .saturating_mul(self.tuning.time_bonus);
                self.player.score = self.player.score.saturating_add(bonus);
                log::info!("course clear, score {}", self.player.score);
                self.set_state(GameState::Clear, events);
            }
        }
    }

    fn update_camera(&mut self) {
        if self.tuning.scroll_speed > 0.0 {
            self.camera.scroll_by(self.tuning.scroll_speed);
            let tiles = (self.camera.x / self.level.map.tile_size()) as u32;
            if tiles > self.scored_tiles {
                let points = (tiles - self.scored_tiles).saturating_mul(self.tuning.distance_points);
                self.player.score = self.player.score.saturating_add(points);
                self.scored_tiles = tiles;
            }
        } else {
            self.camera.follow_forward(self.player.body.pos.x);
        }
    }

    fn lose_life(&mut self, events: &mut Vec<SessionEvent>) {
        self.player.lives = self.player.lives.saturating_sub(1);
        let lives_left = self.player.lives;
        log::debug!("life lost, {} left", lives_left);
        events.push(SessionEvent::LifeLost { lives_left });

        if lives_left == 0 {
            self.set_state(GameState::GameOver, events);
        } else {
            self.player.respawn(self.level.player_start);
            self.camera.reset();
        }
    }

    fn set_state(&mut self, next: GameState, events: &mut Vec<SessionEvent>) {
        if self.state == next {
            return;
        }
        log::info!("state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.state_ticks = 0;
        events.push(SessionEvent::StateChanged(next));
    }

    /// Whether a result screen has been up long enough to accept confirm.
    pub fn can_continue(&self) -> bool {
        self.state_ticks >= self.tuning.result_min_ticks
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn state_ticks(&self) -> u32 {
        self.state_ticks
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    pub fn map(&self) -> &TileMap {
        &self.level.map
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn remaining_time(&self) -> Option<u32> {
        self.timer.as_ref().map(|t| t.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plat_engine::{keys, InputEvent, KeyMap, TileId};

    const EPS: f32 = 1e-4;

    struct Driver {
        session: GameSession,
        input: ButtonState,
        keymap: KeyMap,
    }

    impl Driver {
        fn new(level: Level, tuning: Tuning) -> Self {
            Self {
                session: GameSession::new(level, tuning, &GameConfig::default()),
                input: ButtonState::new(),
                keymap: KeyMap::default(),
            }
        }

        fn step(&mut self, events: &[InputEvent]) -> Vec<SessionEvent> {
            self.input.advance(events, &self.keymap);
            self.session.tick(&self.input)
        }

        fn idle(&mut self, ticks: u32) -> Vec<SessionEvent> {
            let mut all = Vec::new();
            for _ in 0..ticks {
                all.extend(self.step(&[]));
            }
            all
        }

        fn confirm(&mut self) -> Vec<SessionEvent> {
            let events = self.step(&[InputEvent::KeyDown { key_code: keys::ENTER }]);
            self.step(&[InputEvent::KeyUp { key_code: keys::ENTER }]);
            events
        }

        fn player(&self) -> &Player {
            self.session.player()
        }
    }

    fn playing(level: Level, tuning: Tuning) -> Driver {
        let mut d = Driver::new(level, tuning);
        d.confirm();
        assert_eq!(d.session.state(), GameState::Playing);
        d
    }

    /// 64x16 flat level with nothing in it and the goal out of reach.
    fn empty_level() -> Level {
        Level {
            spawns: Vec::new(),
            goal_x: None,
            ..Level::flat_default()
        }
    }

    #[test]
    fn starts_on_title_and_confirm_starts_play() {
        let mut d = Driver::new(Level::flat_default(), Tuning::classic());
        assert_eq!(d.session.state(), GameState::Title);
        d.idle(30);
        assert_eq!(d.session.state(), GameState::Title);
        assert_eq!(d.player().body.pos, Vec2::new(16.0, 112.0));

        let events = d.confirm();
        assert_eq!(events, vec![SessionEvent::StateChanged(GameState::Playing)]);
        assert_eq!(d.session.remaining_time(), Some(300));
        assert_eq!(d.session.enemies().len(), 1);
    }

    #[test]
    fn first_tick_on_default_level_snaps_to_ground() {
        let mut d = Driver::new(Level::flat_default(), Tuning::classic());
        d.step(&[InputEvent::KeyDown { key_code: keys::ENTER }]);
        d.step(&[InputEvent::KeyUp { key_code: keys::ENTER }]);
        let p = d.player();
        assert_eq!(p.body.pos.y, 112.0);
        assert_eq!(p.body.vel.y, 0.0);
        assert_eq!(p.body.pos.x, 16.0);
    }

    #[test]
    fn free_fall_gains_gravity_each_tick_until_grounded() {
        let mut level = empty_level();
        level.player_start = Vec2::new(16.0, 20.0);
        let tuning = Tuning::classic();
        let mut d = playing(level, tuning.clone());
        // `playing` already spent one tick falling.
        let mut n = 1;
        while d.player().body.vel.y != 0.0 {
            assert!((d.player().body.vel.y - n as f32 * tuning.gravity).abs() < EPS);
            d.step(&[]);
            n += 1;
            assert!(n < 100);
        }
        assert_eq!(d.player().body.pos.y, 112.0);
    }

    #[test]
    fn countdown_reaching_zero_is_game_over() {
        let tuning = Tuning { time_limit: Some(2), ..Tuning::classic() };
        let mut d = playing(empty_level(), tuning);
        // One tick already ran in `playing`; the clock needs 120 in total.
        let events = d.idle(118);
        assert!(events.is_empty());
        assert_eq!(d.session.remaining_time(), Some(1));
        assert_eq!(d.session.state(), GameState::Playing);

        let events = d.idle(1);
        assert_eq!(events, vec![SessionEvent::StateChanged(GameState::GameOver)]);
    }

    #[test]
    fn level_time_limit_overrides_tuning() {
        let level = Level { time_limit: Some(5), ..empty_level() };
        let d = playing(level, Tuning::classic());
        assert_eq!(d.session.remaining_time(), Some(5));
        let d = playing(empty_level(), Tuning::runner());
        assert_eq!(d.session.remaining_time(), None);
    }

    #[test]
    fn game_over_waits_before_accepting_confirm() {
        let tuning = Tuning { time_limit: Some(1), ..Tuning::classic() };
        let mut d = playing(Level::flat_default(), tuning.clone());
        d.idle(60);
        assert_eq!(d.session.state(), GameState::GameOver);

        d.confirm();
        assert_eq!(d.session.state(), GameState::GameOver);

        d.idle(tuning.result_min_ticks);
        assert!(d.session.can_continue());
        let events = d.confirm();
        assert_eq!(events, vec![SessionEvent::StateChanged(GameState::Playing)]);
        let p = d.player();
        assert_eq!(p.lives, tuning.starting_lives);
        assert_eq!(p.score, 0);
        assert_eq!(p.body.pos.x, 16.0);
        assert_eq!(d.session.remaining_time(), Some(1));
        assert!(d.session.enemies()[0].alive);
    }

    fn pit_level() -> Level {
        // Ground everywhere except columns 4..6.
        let map = TileMap::from_fn(64, 16, 8.0, |col, row| {
            if row == 15 && !(4..6).contains(&col) {
                TileId::GROUND
            } else {
                TileId::EMPTY
            }
        });
        Level { map, ..empty_level() }
    }

    fn walk_right(d: &mut Driver, ticks: u32) -> Vec<SessionEvent> {
        let mut events = d.step(&[InputEvent::KeyDown { key_code: keys::RIGHT }]);
        for _ in 1..ticks {
            events.extend(d.step(&[]));
        }
        events.extend(d.step(&[InputEvent::KeyUp { key_code: keys::RIGHT }]));
        events
    }

    #[test]
    fn falling_in_a_pit_costs_a_life_and_respawns() {
        let mut d = playing(pit_level(), Tuning::classic());
        let events = walk_right(&mut d, 40);
        assert!(events.contains(&SessionEvent::LifeLost { lives_left: 2 }));
        assert_eq!(d.session.state(), GameState::Playing);
        assert_eq!(d.player().lives, 2);
        assert_eq!(d.session.camera().x, 0.0);
    }

    #[test]
    fn last_life_lost_is_game_over() {
        let tuning = Tuning { starting_lives: 1, ..Tuning::classic() };
        let mut d = playing(pit_level(), tuning);
        let events = walk_right(&mut d, 40);
        assert!(events.contains(&SessionEvent::LifeLost { lives_left: 0 }));
        assert!(events.contains(&SessionEvent::StateChanged(GameState::GameOver)));
        assert_eq!(d.session.state(), GameState::GameOver);
    }

    #[test]
    fn timer_keeps_running_across_lives() {
        let mut d = playing(pit_level(), Tuning::classic());
        // 1 + 41 + 78 = 120 ticks, two seconds.
        walk_right(&mut d, 40);
        d.idle(78);
        assert_eq!(d.player().lives, 2);
        assert_eq!(d.session.remaining_time(), Some(298));
    }

    #[test]
    fn reaching_the_goal_clears_with_time_bonus() {
        let level = Level { goal_x: Some(40.0), ..empty_level() };
        let tuning = Tuning::classic();
        let mut d = playing(level, tuning.clone());
        let events = walk_right(&mut d, 60);
        assert!(events.contains(&SessionEvent::StateChanged(GameState::Clear)));
        assert_eq!(d.session.state(), GameState::Clear);
        // Cleared within the first second, so all 300 seconds pay out.
        assert_eq!(d.player().score, 300 * tuning.time_bonus);
    }

    #[test]
    fn huge_clear_bonus_saturates() {
        let level = Level {
            goal_x: Some(40.0),
            time_limit: Some(500_000_000),
            ..empty_level()
        };
        let mut d = playing(level, Tuning::classic());
        d.session.player.score = 7;
        walk_right(&mut d, 60);
        assert_eq!(d.session.state(), GameState::Clear);
        assert_eq!(d.player().score, u32::MAX);
    }

    /// 64x20: the ground row sits below a 128px tall viewport's first screen.
    fn tall_level(gap: bool) -> Level {
        let map = TileMap::from_fn(64, 20, 8.0, |col, row| {
            if row == 19 && !(gap && (4..6).contains(&col)) {
                TileId::GROUND
            } else {
                TileId::EMPTY
            }
        });
        Level { map, player_start: Vec2::new(16.0, 144.0), ..empty_level() }
    }

    #[test]
    fn tall_level_keeps_the_ground_on_screen() {
        let mut d = playing(tall_level(false), Tuning::classic());
        assert_eq!(d.session.camera().y, 32.0);
        assert_eq!(d.player().body.pos.y, 144.0);
        let screen = d.session.camera().world_to_screen(d.player().body.pos);
        assert_eq!(screen.y, 112.0);

        walk_right(&mut d, 60);
        assert!(d.session.camera().x > 0.0);
        assert_eq!(d.session.camera().y, 32.0);
    }

    #[test]
    fn tall_level_pit_costs_a_life_and_keeps_the_anchor() {
        let mut d = playing(tall_level(true), Tuning::classic());
        let events = walk_right(&mut d, 40);
        assert!(events.contains(&SessionEvent::LifeLost { lives_left: 2 }));
        assert_eq!(d.session.camera().y, 32.0);
    }

    #[test]
    fn camera_follows_forward_and_clamps_at_level_end() {
        let mut d = playing(empty_level(), Tuning::classic());
        walk_right(&mut d, 60);
        let x = d.player().body.pos.x;
        assert!((d.session.camera().x - (x - 80.0)).abs() < EPS);

        walk_right(&mut d, 400);
        assert_eq!(d.session.camera().x, 512.0 - 160.0);

        d.step(&[InputEvent::KeyDown { key_code: keys::LEFT }]);
        d.idle(30);
        assert_eq!(d.session.camera().x, 352.0);
    }

    #[test]
    fn stomping_the_default_enemy() {
        let mut level = Level::flat_default();
        level.spawns = vec![Spawn::PatrolEnemy { x: 50.0, y: 112.0 }];
        level.player_start = Vec2::new(40.0, 60.0);
        let tuning = Tuning::classic();
        let mut d = playing(level, tuning.clone());
        let events = d.idle(60);
        assert!(events.contains(&SessionEvent::Stomped));
        assert!(!d.session.enemies()[0].alive);
        assert_eq!(d.player().score, tuning.stomp_bonus);
        assert_eq!(d.player().lives, 3);
    }

    #[test]
    fn runner_scrolls_scores_distance_and_kills_laggards() {
        let tuning = Tuning::runner();
        let mut d = playing(empty_level(), tuning);
        let events = d.idle(22);
        assert!(events.is_empty());
        assert!((d.session.camera().x - 23.0).abs() < EPS);
        assert_eq!(d.player().score, 2);

        // The player stands still at x=16..24; the left edge reaches x=24.
        let events = d.idle(1);
        assert!(events.contains(&SessionEvent::LifeLost { lives_left: 2 }));
        assert_eq!(d.session.camera().x, 0.0);
    }

    #[test]
    fn coins_collected_in_play() {
        let mut level = empty_level();
        level.spawns = vec![Spawn::Coin { x: 30.0, y: 112.0 }];
        let tuning = Tuning::classic();
        let mut d = playing(level, tuning.clone());
        let events = walk_right(&mut d, 20);
        assert!(events.contains(&SessionEvent::CoinCollected));
        assert_eq!(d.player().coins, 1);
        assert!(d.session.pickups()[0].collected);
    }
}
