//! Scene and HUD drawing. Reads the session, never mutates it.

use glam::Vec2;
use plat_engine::{palette, Camera2D, RenderContext, TileId};

use crate::enemy::ENEMY_SIZE;
use crate::item::{PickupKind, PICKUP_SIZE};
use crate::level::{BLOCK, BRICK};
use crate::player::{HealthState, PLAYER_SIZE};
use crate::session::{GameSession, GameState};

const FLAG_HEIGHT: f32 = 40.0;
const GLYPH_WIDTH: f32 = 4.0;
const LINE_HEIGHT: f32 = 8.0;

/// Palette colour used for a tile id when no sprite is available.
pub fn tile_color(tile: TileId) -> u8 {
    match tile {
        TileId::GROUND => palette::BROWN,
        BRICK => palette::ORANGE,
        BLOCK => palette::TEAL,
        TileId(id) => palette::wrap(id),
    }
}

fn player_color(health: HealthState) -> u8 {
    match health {
        HealthState::Small => palette::RED,
        HealthState::Super => palette::ORANGE,
        HealthState::Fire => palette::WHITE,
    }
}

/// Blit the named sprite when the manifest has it, otherwise fill a rect.
fn sprite_or_rect(ctx: &mut RenderContext, name: &str, screen: Vec2, size: Vec2, color: u8) {
    match ctx.sprite(name) {
        Some(sprite) => ctx.draw.blit(
            screen,
            sprite.sheet,
            Vec2::new(sprite.u, sprite.v),
            Vec2::new(sprite.w, sprite.h),
            sprite.transparent,
        ),
        None => ctx.draw.fill_rect(screen, size, color),
    }
}

/// Draw one frame of the session: world, then HUD, then any state overlay.
pub fn draw_session(session: &GameSession, ctx: &mut RenderContext, title: &str) {
    let camera = session.camera();
    ctx.draw.clear_screen(session.level().background);

    draw_tiles(session, camera, ctx);
    draw_goal(session, camera, ctx);
    draw_entities(session, camera, ctx);
    draw_hud(session, ctx);

    match session.state() {
        GameState::Playing => {}
        GameState::Title => draw_overlay(session, ctx, title, true),
        GameState::GameOver => draw_overlay(session, ctx, "GAME OVER", session.can_continue()),
        GameState::Clear => draw_overlay(session, ctx, "COURSE CLEAR", session.can_continue()),
    }
}

fn draw_tiles(session: &GameSession, camera: &Camera2D, ctx: &mut RenderContext) {
    let map = session.map();
    let (first_col, last_col) = map.visible_columns(camera);
    let (first_row, last_row) = map.visible_rows(camera);

    for row in first_row..last_row {
        for col in first_col..last_col {
            let tile = map.tile_at(col as i32, row as i32);
            if !tile.is_solid() {
                continue;
            }
            let (origin, size) = map.tile_rect(col as i32, row as i32);
            ctx.draw.fill_rect(camera.world_to_screen(origin), size, tile_color(tile));
        }
    }
}

fn draw_goal(session: &GameSession, camera: &Camera2D, ctx: &mut RenderContext) {
    let Some(goal_x) = session.level().goal_x else {
        return;
    };
    let map = session.map();
    // Stands on top of the ground row.
    let base = map.pixel_height() - map.tile_size();
    let pole = Vec2::new(goal_x, base - FLAG_HEIGHT);
    if !camera.is_rect_visible(pole, Vec2::new(8.0, FLAG_HEIGHT)) {
        return;
    }
    let screen = camera.world_to_screen(pole);
    if ctx.sprite("goal").is_some() {
        sprite_or_rect(ctx, "goal", screen, Vec2::new(8.0, FLAG_HEIGHT), palette::WHITE);
    } else {
        ctx.draw.fill_rect(screen, Vec2::new(1.0, FLAG_HEIGHT), palette::WHITE);
        ctx.draw.fill_rect(screen + Vec2::new(1.0, 0.0), Vec2::new(6.0, 4.0), palette::LIME);
    }
}

fn draw_entities(session: &GameSession, camera: &Camera2D, ctx: &mut RenderContext) {
    for pickup in session.pickups().iter().filter(|p| !p.collected) {
        if !camera.is_rect_visible(pickup.pos, PICKUP_SIZE) {
            continue;
        }
        let (name, color) = match pickup.kind {
            PickupKind::Coin => ("coin", palette::YELLOW),
            PickupKind::PowerUp => ("power_up", palette::PINK),
        };
        sprite_or_rect(ctx, name, camera.world_to_screen(pickup.pos), PICKUP_SIZE, color);
    }

    for enemy in session.enemies().iter().filter(|e| e.alive) {
        if !camera.is_rect_visible(enemy.body.pos, ENEMY_SIZE) {
            continue;
        }
        sprite_or_rect(
            ctx,
            "enemy",
            camera.world_to_screen(enemy.body.pos),
            ENEMY_SIZE,
            palette::PURPLE,
        );
    }

    let player = session.player();
    if !player.is_visible() {
        return;
    }
    let name = format!("player_{}_{}", player.health.name(), player.frame);
    sprite_or_rect(
        ctx,
        &name,
        camera.world_to_screen(player.body.pos),
        PLAYER_SIZE,
        player_color(player.health),
    );
}

fn draw_hud(session: &GameSession, ctx: &mut RenderContext) {
    let player = session.player();
    let width = session.camera().width;

    ctx.draw.text(Vec2::new(2.0, 2.0), format!("SCORE {:06}", player.score), palette::WHITE);
    let coins = format!("COIN {:02}", player.coins);
    ctx.draw.text(Vec2::new(width - 2.0 - text_width(&coins), 2.0), coins, palette::YELLOW);

    ctx.draw.text(Vec2::new(2.0, 2.0 + LINE_HEIGHT), format!("LIFE {}", player.lives), palette::WHITE);
    if let Some(time) = session.remaining_time() {
        let time = format!("TIME {:03}", time);
        let color = if session.state() == GameState::Playing && time_is_short(session) {
            palette::RED
        } else {
            palette::WHITE
        };
        ctx.draw.text(Vec2::new(width - 2.0 - text_width(&time), 2.0 + LINE_HEIGHT), time, color);
    }
}

fn time_is_short(session: &GameSession) -> bool {
    session.remaining_time().is_some_and(|t| t <= 30)
}

fn draw_overlay(session: &GameSession, ctx: &mut RenderContext, heading: &str, prompt: bool) {
    let camera = session.camera();
    let center = Vec2::new(camera.width, camera.height) * 0.5;

    let box_size = Vec2::new(camera.width - 32.0, 28.0);
    let box_pos = center - box_size * 0.5;
    ctx.draw.fill_rect(box_pos, box_size, palette::NAVY);
    ctx.draw.rect_outline(box_pos, box_size, palette::WHITE);

    let y = box_pos.y + 5.0;
    ctx.draw.text(centered(center.x, heading, y), heading, palette::WHITE);
    if prompt {
        let line = "PRESS ENTER";
        ctx.draw.text(centered(center.x, line, y + 10.0), line, palette::YELLOW);
    }
}

fn text_width(text: &str) -> f32 {
    text.chars().count() as f32 * GLYPH_WIDTH
}

fn centered(center_x: f32, text: &str, y: f32) -> Vec2 {
    Vec2::new((center_x - text_width(text) * 0.5).floor(), y)
}
