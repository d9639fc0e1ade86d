/// Shared grid-collision movement rule.
///
/// An actor proposes `position + direction * speed * dt`; the move is
/// accepted only if the destination's containing tile is not a wall.
/// After any attempt the position is clamped to
/// `[radius, map_pixels - radius]` on both axes, so the boundary ring
/// cannot be escaped even through collision-free tiles next to it.

use crate::sim::map::TileMap;

use super::geom::Vec2;

/// Tile containing a pixel-space point.
pub fn tile_of(pos: Vec2, tile_size: f32) -> (i32, i32) {
    ((pos.x / tile_size).floor() as i32, (pos.y / tile_size).floor() as i32)
}

/// Pixel-space center of a tile.
pub fn tile_center(tx: i32, ty: i32, tile_size: f32) -> Vec2 {
    Vec2::new(
        (tx as f32 + 0.5) * tile_size,
        (ty as f32 + 0.5) * tile_size,
    )
}

/// Candidate next position for one frame of movement.
pub fn propose(pos: Vec2, dir: Vec2, speed: f32, dt: f32) -> Vec2 {
    pos + dir * (speed * dt)
}

/// Clamp a position so the actor's circle stays inside the map.
pub fn clamp_to_map(pos: &mut Vec2, radius: f32, map: &TileMap, tile_size: f32) {
    let max_x = map.width() as f32 * tile_size - radius;
    let max_y = map.height() as f32 * tile_size - radius;
    pos.x = pos.x.clamp(radius, max_x);
    pos.y = pos.y.clamp(radius, max_y);
}

/// Move a player-style actor: single direction, move or stay.
///
/// A zero direction is a guaranteed no-op (no wall test, no clamp),
/// so a stationary actor pinned against a wall never flickers.
pub fn move_actor(
    pos: &mut Vec2,
    dir: Vec2,
    speed: f32,
    radius: f32,
    dt: f32,
    map: &TileMap,
    tile_size: f32,
) {
    if dir.is_zero() {
        return;
    }

    let next = propose(*pos, dir, speed, dt);
    let (tx, ty) = tile_of(next, tile_size);
    if !map.is_wall(tx, ty) {
        *pos = next;
    }

    clamp_to_map(pos, radius, map, tile_size);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::map::TileMap;

    const TILE: f32 = 24.0;

    fn open_map() -> TileMap {
        // 5x5 room, walls only on the outer ring
        TileMap::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap()
    }

    #[test]
    fn zero_direction_is_a_no_op() {
        let map = open_map();
        // Deliberately out of clamp range: a zero move must not touch it.
        let mut pos = Vec2::new(-100.0, -100.0);
        move_actor(&mut pos, Vec2::ZERO, 144.0, 8.4, 1.0, &map, TILE);
        assert_eq!(pos, Vec2::new(-100.0, -100.0));
    }

    #[test]
    fn wall_blocks_the_move() {
        let map = open_map();
        let start = tile_center(1, 1, TILE);
        let mut pos = start;
        // One full second left lands inside the border wall
        move_actor(&mut pos, Vec2::new(-1.0, 0.0), 144.0, 8.4, 1.0, &map, TILE);
        assert_eq!(pos, start);
    }

    #[test]
    fn open_tile_accepts_the_move() {
        let map = open_map();
        let start = tile_center(1, 1, TILE);
        let mut pos = start;
        move_actor(&mut pos, Vec2::new(1.0, 0.0), TILE, 8.4, 0.5, &map, TILE);
        assert_eq!(pos.x, start.x + TILE * 0.5);
        assert_eq!(pos.y, start.y);
    }

    #[test]
    fn position_stays_within_clamp_bounds() {
        let map = open_map();
        let radius = 8.4;
        let mut pos = tile_center(2, 2, TILE);
        let dirs = [
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(1.0, 1.0).normalized(),
        ];
        for _ in 0..200 {
            for dir in dirs {
                move_actor(&mut pos, dir, 500.0, radius, 0.1, &map, TILE);
                let max_x = map.width() as f32 * TILE - radius;
                let max_y = map.height() as f32 * TILE - radius;
                assert!(pos.x >= radius && pos.x <= max_x);
                assert!(pos.y >= radius && pos.y <= max_y);
            }
        }
    }

    #[test]
    fn tile_of_floors_coordinates() {
        assert_eq!(tile_of(Vec2::new(0.0, 0.0), TILE), (0, 0));
        assert_eq!(tile_of(Vec2::new(23.9, 23.9), TILE), (0, 0));
        assert_eq!(tile_of(Vec2::new(24.0, 47.9), TILE), (1, 1));
    }
}
