//! Axis-separated resolution of a moving body against a static tile grid.
//!
//! Runs once per tick after the body's position has been integrated:
//!
//! 1. Level edges: the left and right edges of the map are solid walls.
//! 2. Down: an exposed tile top under either bottom corner lands the body.
//! 3. Up: an exposed tile underside over either top corner bumps its head.
//! 4. Sides: a solid tile in the left (then right) column pushes the body out.
//!
//! Vertical runs before horizontal so a body standing on the floor is never
//! shoved sideways by the floor tiles it rests on. A body only lands on (or
//! bumps into) a tile edge it was on the near side of before this tick's move;
//! anything else is left to the side checks. Scans go top-to-bottom and
//! left-to-right, and the first hit wins.

use crate::components::tilemap::TileMap;
use crate::core::body::KinematicBody;

/// Slack used when turning a far edge into a tile index, so an edge lying
/// exactly on a tile boundary belongs to the tile before it.
const EDGE_EPSILON: f32 = 1e-3;

/// What the body touched while being resolved this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contacts {
    pub grounded: bool,
    pub ceiling: bool,
    pub wall_left: bool,
    pub wall_right: bool,
}

impl Contacts {
    pub fn hit_wall(&self) -> bool {
        self.wall_left || self.wall_right
    }
}

/// Correct `body` against `map`, zeroing blocked velocity components.
pub fn resolve_tiles(body: &mut KinematicBody, map: &TileMap) -> Contacts {
    let mut contacts = Contacts::default();
    let tile = map.tile_size();
    let size = body.size();

    // Level edges
    if body.left() < 0.0 {
        body.pos.x = 0.0;
        body.vel.x = body.vel.x.max(0.0);
        contacts.wall_left = true;
    } else if body.right() > map.pixel_width() {
        body.pos.x = map.pixel_width() - size.x;
        body.vel.x = body.vel.x.min(0.0);
        contacts.wall_right = true;
    }

    let left_col = map.column_at(body.left());
    let right_col = map.column_at(body.right() - EDGE_EPSILON);

    // Down. Only exposed top faces count; a face buried under another solid
    // tile is part of a wall.
    if body.vel.y >= 0.0 {
        let below = map.row_at(body.bottom());
        let floor_at = |col: i32| map.is_solid(col, below) && !map.is_solid(col, below - 1);
        if floor_at(left_col) || floor_at(right_col) {
            let surface = below as f32 * tile;
            let previous_bottom = body.bottom() - body.vel.y;
            if previous_bottom <= surface + EDGE_EPSILON {
                body.pos.y = surface - size.y;
                body.vel.y = 0.0;
                contacts.grounded = true;
            }
        }
    }

    // Up
    if body.vel.y < 0.0 {
        let above = map.row_at(body.top());
        let roof_at = |col: i32| map.is_solid(col, above) && !map.is_solid(col, above + 1);
        if roof_at(left_col) || roof_at(right_col) {
            let underside = (above + 1) as f32 * tile;
            let previous_top = body.top() - body.vel.y;
            if previous_top >= underside - EDGE_EPSILON {
                body.pos.y = underside;
                body.vel.y = 0.0;
                contacts.ceiling = true;
            }
        }
    }

    // Sides, using the rows the body occupies after the vertical fix
    let top_row = map.row_at(body.top());
    let bottom_row = map.row_at(body.bottom() - EDGE_EPSILON);
    let column_blocked = |col: i32| (top_row..=bottom_row).any(|row| map.is_solid(col, row));

    let left_col = map.column_at(body.left());
    if column_blocked(left_col) {
        body.pos.x = (left_col + 1) as f32 * tile;
        body.vel.x = 0.0;
        contacts.wall_left = true;
    } else {
        let right_col = map.column_at(body.right() - EDGE_EPSILON);
        if column_blocked(right_col) {
            body.pos.x = right_col as f32 * tile - size.x;
            body.vel.x = 0.0;
            contacts.wall_right = true;
        }
    }

    contacts
}
