//! Static tile grid that bodies collide against.
//!
//! Tiles are stored in row-major order: index = row * width + col.
//! Id 0 is empty; every other id is solid and picks the tile's colour.

use crate::renderer::camera::Camera2D;
use glam::Vec2;

/// Identifier of a tile kind. `TileId::EMPTY` is the only non-solid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileId(pub u16);

impl TileId {
    pub const EMPTY: TileId = TileId(0);
    pub const GROUND: TileId = TileId(1);

    pub fn is_solid(self) -> bool {
        self.0 != 0
    }
}

/// Grid of tiles, immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    /// Width of the map in tiles.
    width: u32,
    /// Height of the map in tiles.
    height: u32,
    /// Size of each (square) tile in pixels.
    tile_size: f32,
    tiles: Vec<TileId>,
}

impl TileMap {
    /// Create an empty map.
    pub fn new(width: u32, height: u32, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![TileId::EMPTY; (width * height) as usize],
        }
    }

    /// A flat level: one full-width ground row at `height - 1`, the rest empty.
    pub fn flat(width: u32, height: u32, tile_size: f32) -> Self {
        let mut map = Self::new(width, height, tile_size);
        if height > 0 {
            let row = (height - 1) as usize;
            let start = row * width as usize;
            map.tiles[start..start + width as usize].fill(TileId::GROUND);
        }
        map
    }

    /// Build a map from row-major rows of raw ids.
    ///
    /// Every row must be exactly `width` long and there must be `height` rows.
    pub fn from_rows(
        width: u32,
        height: u32,
        tile_size: f32,
        rows: &[Vec<u16>],
    ) -> Result<Self, String> {
        if width == 0 || height == 0 {
            return Err(format!("map must not be empty ({}x{})", width, height));
        }
        if !(tile_size.is_finite() && tile_size >= 1.0) {
            return Err(format!("invalid tile size {}", tile_size));
        }
        if rows.len() != height as usize {
            return Err(format!("expected {} rows, found {}", height, rows.len()));
        }
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width as usize {
                return Err(format!(
                    "row {} has {} tiles, expected {}",
                    i,
                    row.len(),
                    width
                ));
            }
            tiles.extend(row.iter().map(|&id| TileId(id)));
        }
        Ok(Self {
            width,
            height,
            tile_size,
            tiles,
        })
    }

    /// Build a map by asking `f(col, row)` for every cell.
    pub fn from_fn(
        width: u32,
        height: u32,
        tile_size: f32,
        mut f: impl FnMut(u32, u32) -> TileId,
    ) -> Self {
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for row in 0..height {
            for col in 0..width {
                tiles.push(f(col, row));
            }
        }
        Self {
            width,
            height,
            tile_size,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Tile at (col, row). Anything outside the grid is empty.
    pub fn tile_at(&self, col: i32, row: i32) -> TileId {
        if col < 0 || row < 0 || col >= self.width as i32 || row >= self.height as i32 {
            return TileId::EMPTY;
        }
        self.tiles[(row as u32 * self.width + col as u32) as usize]
    }

    pub fn is_solid(&self, col: i32, row: i32) -> bool {
        self.tile_at(col, row).is_solid()
    }

    /// Column containing pixel x (floor division, may be negative).
    pub fn column_at(&self, x: f32) -> i32 {
        (x / self.tile_size).floor() as i32
    }

    /// Row containing pixel y (floor division, may be negative).
    pub fn row_at(&self, y: f32) -> i32 {
        (y / self.tile_size).floor() as i32
    }

    /// Pixel-space top-left corner of a tile.
    pub fn tile_origin(&self, col: i32, row: i32) -> Vec2 {
        Vec2::new(col as f32 * self.tile_size, row as f32 * self.tile_size)
    }

    /// Pixel-space rectangle (top-left, size) covered by a tile.
    pub fn tile_rect(&self, col: i32, row: i32) -> (Vec2, Vec2) {
        (self.tile_origin(col, row), Vec2::splat(self.tile_size))
    }

    /// Column range `[first, last)` intersecting the camera viewport.
    pub fn visible_columns(&self, camera: &Camera2D) -> (u32, u32) {
        let first = (self.column_at(camera.x).max(0) as u32).min(self.width);
        let last = ((self.column_at(camera.x + camera.width) + 1).max(0) as u32).min(self.width);
        (first, last)
    }

    /// Row range `[first, last)` intersecting the camera viewport.
    pub fn visible_rows(&self, camera: &Camera2D) -> (u32, u32) {
        let first = (self.row_at(camera.y).max(0) as u32).min(self.height);
        let last = ((self.row_at(camera.y + camera.height) + 1).max(0) as u32).min(self.height);
        (first, last)
    }

    /// Count of solid tiles.
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_solid()).count()
    }

    /// Total capacity in tiles.
    pub fn capacity(&self) -> usize {
        (self.width * self.height) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let tm = TileMap::new(10, 10, 8.0);
        assert_eq!(tm.solid_count(), 0);
        assert_eq!(tm.capacity(), 100);
    }

    #[test]
    fn flat_map_has_one_ground_row() {
        let tm = TileMap::flat(64, 16, 8.0);
        assert_eq!(tm.solid_count(), 64);
        for col in 0..64 {
            assert!(tm.is_solid(col, 15));
            assert!(!tm.is_solid(col, 14));
        }
        assert_eq!(tm.pixel_width(), 512.0);
        assert_eq!(tm.pixel_height(), 128.0);
    }

    #[test]
    fn out_of_bounds_is_empty() {
        let tm = TileMap::flat(4, 4, 8.0);
        assert_eq!(tm.tile_at(-1, 3), TileId::EMPTY);
        assert_eq!(tm.tile_at(4, 3), TileId::EMPTY);
        assert_eq!(tm.tile_at(0, -1), TileId::EMPTY);
        assert_eq!(tm.tile_at(0, 4), TileId::EMPTY);
    }

    #[test]
    fn from_rows_reads_row_major() {
        let rows = vec![vec![0, 2, 0], vec![1, 1, 1]];
        let tm = TileMap::from_rows(3, 2, 8.0, &rows).unwrap();
        assert_eq!(tm.tile_at(1, 0), TileId(2));
        assert_eq!(tm.tile_at(0, 0), TileId::EMPTY);
        assert_eq!(tm.tile_at(2, 1), TileId(1));
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let rows = vec![vec![0, 0, 0], vec![1, 1]];
        let err = TileMap::from_rows(3, 2, 8.0, &rows).unwrap_err();
        assert!(err.contains("row 1"), "{}", err);
    }

    #[test]
    fn from_rows_rejects_wrong_height_and_empty() {
        assert!(TileMap::from_rows(2, 3, 8.0, &[vec![0, 0]]).is_err());
        assert!(TileMap::from_rows(0, 0, 8.0, &[]).is_err());
        assert!(TileMap::from_rows(1, 1, 0.0, &[vec![0]]).is_err());
    }

    #[test]
    fn floor_division_handles_negatives() {
        let tm = TileMap::new(4, 4, 8.0);
        assert_eq!(tm.column_at(7.9), 0);
        assert_eq!(tm.column_at(8.0), 1);
        assert_eq!(tm.column_at(-0.5), -1);
        assert_eq!(tm.row_at(-8.0), -1);
    }

    #[test]
    fn visible_columns_follow_camera() {
        let tm = TileMap::flat(64, 16, 8.0);
        let mut camera = Camera2D::new(160.0, 128.0);
        assert_eq!(tm.visible_columns(&camera), (0, 21));
        camera.x = 100.0;
        assert_eq!(tm.visible_columns(&camera), (12, 33));
        camera.x = 500.0;
        assert_eq!(tm.visible_columns(&camera), (62, 64));
    }

    #[test]
    fn tile_rect_covers_one_cell() {
        let tm = TileMap::flat(4, 4, 8.0);
        assert_eq!(tm.tile_rect(2, 3), (Vec2::new(16.0, 24.0), Vec2::new(8.0, 8.0)));
    }

    #[test]
    fn from_fn_builds_pattern() {
        let tm = TileMap::from_fn(4, 2, 8.0, |col, row| {
            if row == 1 && col % 2 == 0 { TileId::GROUND } else { TileId::EMPTY }
        });
        assert_eq!(tm.solid_count(), 2);
        assert!(tm.is_solid(2, 1));
    }
}
