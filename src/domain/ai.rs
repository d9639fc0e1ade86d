/// Ghost pursuit: greedy, memoryless, one-step lookahead.
///
/// Per ghost, per frame:
///   1. Target the nearer player by squared distance (`<=` favors A).
///   2. Evaluate candidate directions in the fixed order
///      left, up, right, down; drop candidates whose destination tile
///      is a wall; keep the one strictly minimizing squared distance
///      to the target. First direction wins ties, which makes the
///      behavior fully deterministic.
///   3. A boxed-in ghost keeps its position and current direction.
///   4. Clamp, then capture checks against A and B in that order.
///
/// No path planning, no ghost-to-ghost coordination, no randomness.

use crate::sim::map::TileMap;

use super::entity::{Ghost, Player};
use super::geom::Vec2;
use super::motion;

/// Candidate directions, in evaluation order. The order is part of the
/// observable behavior (tie-breaking) and must not change.
const DIRECTIONS: [Vec2; 4] = [
    Vec2 { x: -1.0, y: 0.0 },
    Vec2 { x: 0.0, y: -1.0 },
    Vec2 { x: 1.0, y: 0.0 },
    Vec2 { x: 0.0, y: 1.0 },
];

/// Advance every ghost by one frame and resolve captures.
pub fn update_ghosts(
    ghosts: &mut [Ghost],
    map: &TileMap,
    player_a: &mut Player,
    player_b: &mut Player,
    dt: f32,
    tile_size: f32,
    capture_grace_secs: f32,
) {
    for ghost in ghosts.iter_mut() {
        let target = choose_target(ghost, player_a, player_b);

        let mut best_distance = f32::MAX;
        let mut best_direction = Vec2::ZERO;
        let mut best_next = ghost.position;
        let mut found = false;

        for dir in DIRECTIONS {
            let next = motion::propose(ghost.position, dir, ghost.speed, dt);
            let (tx, ty) = motion::tile_of(next, tile_size);
            if map.is_wall(tx, ty) {
                continue;
            }

            let distance = next.distance_squared(target);
            if distance < best_distance {
                best_distance = distance;
                best_direction = dir;
                best_next = next;
                found = true;
            }
        }

        if found {
            ghost.current_direction = best_direction;
            ghost.position = best_next;
        }

        motion::clamp_to_map(&mut ghost.position, ghost.radius, map, tile_size);

        try_capture(ghost, player_a, capture_grace_secs);
        try_capture(ghost, player_b, capture_grace_secs);
    }
}

/// Position of whichever player is closer in squared distance.
/// Ties go to player A.
fn choose_target(ghost: &Ghost, player_a: &Player, player_b: &Player) -> Vec2 {
    let dist_a = ghost.position.distance_squared(player_a.position);
    let dist_b = ghost.position.distance_squared(player_b.position);
    if dist_a <= dist_b {
        player_a.position
    } else {
        player_b.position
    }
}

/// Capture: circle overlap against a non-invulnerable player sends the
/// player home, grants the grace window, and costs a life (never below
/// zero).
fn try_capture(ghost: &Ghost, player: &mut Player, grace_secs: f32) {
    if player.invulnerable_secs > 0.0 {
        return;
    }

    let capture_distance = ghost.radius + player.radius;
    if ghost.position.distance_squared(player.position) <= capture_distance * capture_distance {
        player.position = player.spawn_position;
        player.invulnerable_secs = grace_secs;
        if player.lives > 0 {
            player.lives -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{GHOST_COLORS, PLAYER_A_COLOR, PLAYER_B_COLOR};
    use crate::domain::motion::tile_center;
    use crate::sim::map::TileMap;

    const TILE: f32 = 24.0;
    const GRACE: f32 = 1.0;

    fn player_at(tx: i32, ty: i32, color: crate::domain::entity::Rgb) -> Player {
        let mut p = Player::new(TILE * 0.35, TILE * 6.0, color);
        p.position = tile_center(tx, ty, TILE);
        p.spawn_position = p.position;
        p
    }

    fn ghost_at(tx: i32, ty: i32) -> Ghost {
        Ghost::new(tile_center(tx, ty, TILE), TILE * 0.33, TILE * 1.5, GHOST_COLORS[0])
    }

    #[test]
    fn equidistant_target_goes_to_player_a() {
        let a = player_at(1, 2, PLAYER_A_COLOR);
        let b = player_at(3, 2, PLAYER_B_COLOR);
        let ghost = ghost_at(2, 2);
        assert_eq!(choose_target(&ghost, &a, &b), a.position);
    }

    #[test]
    fn tie_break_prefers_left_over_up() {
        // Open 5x5 room; target placed up-left so that stepping left or
        // stepping up yields the same squared distance.
        let map = TileMap::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        // Park B far away so A is the target.
        let mut b = player_at(3, 3, PLAYER_B_COLOR);
        b.position = Vec2::new(1000.0, 1000.0);

        let mut ghosts = vec![ghost_at(2, 2)];
        let before = ghosts[0].position;
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.1, TILE, GRACE);

        // By symmetry left and up tie; left is evaluated first and must win.
        assert!(ghosts[0].position.x < before.x);
        assert_eq!(ghosts[0].position.y, before.y);
        assert_eq!(ghosts[0].current_direction, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn boxed_in_ghost_keeps_position_and_direction() {
        // Ghost sealed into a single open cell.
        let map = TileMap::parse("###\n# #\n###").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        a.position = Vec2::new(1000.0, 1000.0);
        let mut b = player_at(1, 1, PLAYER_B_COLOR);
        b.position = Vec2::new(1000.0, 1000.0);

        let mut ghosts = vec![ghost_at(1, 1)];
        ghosts[0].current_direction = Vec2::new(0.0, 1.0);
        let before = ghosts[0].position;
        // Large dt so every candidate lands in a wall tile.
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 1.0, TILE, GRACE);

        assert_eq!(ghosts[0].position, before);
        assert_eq!(ghosts[0].current_direction, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn capture_sends_player_home_and_costs_a_life() {
        let map = TileMap::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        a.position = tile_center(2, 2, TILE); // away from spawn
        let mut b = player_at(3, 3, PLAYER_B_COLOR);
        b.position = Vec2::new(1000.0, 1000.0);

        let mut ghosts = vec![ghost_at(2, 2)];
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);

        assert_eq!(a.position, a.spawn_position);
        assert_eq!(a.lives, 2);
        assert_eq!(a.invulnerable_secs, GRACE);
    }

    #[test]
    fn grace_window_blocks_recapture() {
        let map = TileMap::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        let mut b = player_at(3, 3, PLAYER_B_COLOR);
        b.position = Vec2::new(1000.0, 1000.0);

        // Ghost sitting on A's spawn: would capture every frame without the window.
        let mut ghosts = vec![ghost_at(1, 1)];
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);
        assert_eq!(a.lives, 2);

        // Still within the grace window
        a.invulnerable_secs = 0.5;
        ghosts[0].position = a.position;
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);
        assert_eq!(a.lives, 2);

        // Window elapsed
        a.invulnerable_secs = 0.0;
        ghosts[0].position = a.position;
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);
        assert_eq!(a.lives, 1);
    }

    #[test]
    fn lives_never_go_below_zero() {
        let map = TileMap::parse("###\n# #\n###").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        a.lives = 0;
        let mut b = player_at(1, 1, PLAYER_B_COLOR);
        b.position = Vec2::new(1000.0, 1000.0);

        let mut ghosts = vec![ghost_at(1, 1)];
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);
        assert_eq!(a.lives, 0);
        // The capture itself still happens: home + grace
        assert_eq!(a.position, a.spawn_position);
        assert_eq!(a.invulnerable_secs, GRACE);
    }

    #[test]
    fn one_ghost_can_capture_both_players_in_one_frame() {
        let map = TileMap::parse("#####\n#   #\n#   #\n#   #\n#####").unwrap();
        let mut a = player_at(1, 1, PLAYER_A_COLOR);
        let mut b = player_at(1, 1, PLAYER_B_COLOR);
        a.position = tile_center(2, 2, TILE);
        b.position = tile_center(2, 2, TILE);

        let mut ghosts = vec![ghost_at(2, 2)];
        update_ghosts(&mut ghosts, &map, &mut a, &mut b, 0.0, TILE, GRACE);

        assert_eq!(a.lives, 2);
        assert_eq!(b.lives, 2);
    }
}
