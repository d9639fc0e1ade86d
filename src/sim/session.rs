/// Session: the owned game state plus the per-frame state machine.
///
/// Modes and transitions:
///   Menu     --start-->   Playing   (session re-initialized)
///   Playing  --auto-->    Win       (pellets hit zero; checked BEFORE
///                                    the ghost pass, so a same-frame
///                                    capture is skipped)
///   Playing  --auto-->    GameOver  (both players at zero lives;
///                                    checked AFTER the ghost pass)
///   any      --restart--> Menu      (session re-initialized)
///
/// Win and GameOver are otherwise terminal; nothing updates outside
/// Playing. Processing order inside one Playing frame:
/// invulnerability decay → player A/B movement → pellet pickup A then
/// B → win check → ghost pass (movement + captures) → loss check.

use crate::config::GameConfig;
use crate::domain::ai;
use crate::domain::entity::{
    FrameInput, Ghost, Player, GHOST_COLORS, PLAYER_A_COLOR, PLAYER_B_COLOR,
};
use crate::domain::geom::Vec2;
use crate::domain::motion;

use super::map::TileMap;

/// Hard cap on ghosts per session; the map may mark fewer and the
/// remainder is synthesized near the map center.
pub const MAX_GHOSTS: usize = 6;

/// Points per pellet.
pub const PELLET_SCORE: u32 = 10;

const PLAYER_RADIUS_FACTOR: f32 = 0.35;
const GHOST_RADIUS_FACTOR: f32 = 0.33;

/// How the simulation sees input. The host loop feeds it from the
/// keyboard and mouse; tests feed it scripted values.
pub trait InputSource {
    /// Player movement intents: magnitude <= 1, zero when idle.
    fn player_a_direction(&self) -> Vec2;
    fn player_b_direction(&self) -> Vec2;
    /// Edge-triggered signals.
    fn start_pressed(&self) -> bool;
    fn restart_pressed(&self) -> bool;
}

impl InputSource for FrameInput {
    fn player_a_direction(&self) -> Vec2 {
        self.dir_a
    }
    fn player_b_direction(&self) -> Vec2 {
        self.dir_b
    }
    fn start_pressed(&self) -> bool {
        self.start
    }
    fn restart_pressed(&self) -> bool {
        self.restart
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Menu,
    Playing,
    GameOver,
    Win,
}

pub struct Session {
    pub map: TileMap,
    pub player_a: Player,
    pub player_b: Player,
    pub ghosts: Vec<Ghost>,
    pub mode: Mode,
    pub tile_size: f32,
    ghost_speed_factor: f32,
    capture_grace_secs: f32,
}

impl Session {
    pub fn new(map: TileMap, config: &GameConfig) -> Self {
        let tile = config.tile_size;
        let player_speed = tile * config.player_tiles_per_sec;

        let mut session = Session {
            map,
            player_a: Player::new(tile * PLAYER_RADIUS_FACTOR, player_speed, PLAYER_A_COLOR),
            player_b: Player::new(tile * PLAYER_RADIUS_FACTOR, player_speed, PLAYER_B_COLOR),
            ghosts: Vec::with_capacity(MAX_GHOSTS),
            mode: Mode::Menu,
            tile_size: tile,
            ghost_speed_factor: config.ghost_speed_factor,
            capture_grace_secs: config.capture_grace_secs,
        };
        session.reset_session();
        session
    }

    pub fn map_pixel_width(&self) -> f32 {
        self.map.width() as f32 * self.tile_size
    }

    pub fn map_pixel_height(&self) -> f32 {
        self.map.height() as f32 * self.tile_size
    }

    /// Advance the session by one frame.
    pub fn update(&mut self, input: &dyn InputSource, dt: f32) {
        if input.restart_pressed() {
            self.reset_session();
            self.mode = Mode::Menu;
            return;
        }

        match self.mode {
            Mode::Menu => {
                if input.start_pressed() {
                    self.reset_session();
                    self.mode = Mode::Playing;
                }
                return;
            }
            Mode::GameOver | Mode::Win => return,
            Mode::Playing => {}
        }

        self.player_a.invulnerable_secs = (self.player_a.invulnerable_secs - dt).max(0.0);
        self.player_b.invulnerable_secs = (self.player_b.invulnerable_secs - dt).max(0.0);

        self.move_player_a(input.player_a_direction(), dt);
        self.move_player_b(input.player_b_direction(), dt);

        self.pellet_pickup_a();
        self.pellet_pickup_b();

        if self.map.remaining_pellets() == 0 {
            self.mode = Mode::Win;
            return;
        }

        ai::update_ghosts(
            &mut self.ghosts,
            &self.map,
            &mut self.player_a,
            &mut self.player_b,
            dt,
            self.tile_size,
            self.capture_grace_secs,
        );

        if self.player_a.lives == 0 && self.player_b.lives == 0 {
            self.mode = Mode::GameOver;
        }
    }

    /// Re-initialize the whole session: pellets back, players reset in
    /// place, ghosts recreated (spawn assignment may change).
    pub fn reset_session(&mut self) {
        self.map.reset_tiles();

        let a_spawn = match self.map.player_spawn_a() {
            Some((tx, ty)) => motion::tile_center(tx, ty, self.tile_size),
            None => Vec2::new(self.tile_size * 1.5, self.tile_size * 1.5),
        };
        reset_player(&mut self.player_a, a_spawn);

        let b_spawn = match self.map.player_spawn_b() {
            Some((tx, ty)) => motion::tile_center(tx, ty, self.tile_size),
            None => Vec2::new(
                self.map_pixel_width() - self.tile_size * 1.5,
                self.map_pixel_height() - self.tile_size * 1.5,
            ),
        };
        reset_player(&mut self.player_b, b_spawn);

        self.seed_ghosts();
    }

    fn move_player_a(&mut self, dir: Vec2, dt: f32) {
        motion::move_actor(
            &mut self.player_a.position,
            dir,
            self.player_a.speed,
            self.player_a.radius,
            dt,
            &self.map,
            self.tile_size,
        );
    }

    fn move_player_b(&mut self, dir: Vec2, dt: f32) {
        motion::move_actor(
            &mut self.player_b.position,
            dir,
            self.player_b.speed,
            self.player_b.radius,
            dt,
            &self.map,
            self.tile_size,
        );
    }

    // Pickups run A first: on a shared tile the second consume fails
    // silently, so A gets the pellet.

    fn pellet_pickup_a(&mut self) {
        let (tx, ty) = motion::tile_of(self.player_a.position, self.tile_size);
        if self.map.consume_pellet_at(tx, ty) {
            self.player_a.score += PELLET_SCORE;
        }
    }

    fn pellet_pickup_b(&mut self) {
        let (tx, ty) = motion::tile_of(self.player_b.position, self.tile_size);
        if self.map.consume_pellet_at(tx, ty) {
            self.player_b.score += PELLET_SCORE;
        }
    }

    /// Build the six ghosts: marked spawn tiles first (scan order),
    /// synthesized fallback tiles for the rest.
    fn seed_ghosts(&mut self) {
        let mut spawn_tiles: Vec<(i32, i32)> = self.map.ghost_spawns().to_vec();
        spawn_tiles.truncate(MAX_GHOSTS);

        if spawn_tiles.len() < MAX_GHOSTS {
            let needed = MAX_GHOSTS - spawn_tiles.len();
            let fallback = self.fallback_ghost_spawns(needed, &spawn_tiles);
            spawn_tiles.extend(fallback);
        }

        let ghost_speed = self.player_a.speed * self.ghost_speed_factor;
        let ghost_radius = self.tile_size * GHOST_RADIUS_FACTOR;

        self.ghosts.clear();
        for (i, &(tx, ty)) in spawn_tiles.iter().take(MAX_GHOSTS).enumerate() {
            self.ghosts.push(Ghost::new(
                motion::tile_center(tx, ty, self.tile_size),
                ghost_radius,
                ghost_speed,
                GHOST_COLORS[i],
            ));
        }
    }

    /// Synthesize spawn tiles by scanning squares of growing radius
    /// around the map center, row-major within each square. Skips
    /// walls, out-of-bounds tiles, tiles already taken (marked spawns
    /// and earlier picks), and player spawn tiles. Deterministic for a
    /// given map.
    fn fallback_ghost_spawns(&self, needed: usize, used: &[(i32, i32)]) -> Vec<(i32, i32)> {
        let mut results: Vec<(i32, i32)> = Vec::with_capacity(needed);

        let center_x = self.map.width() / 2;
        let center_y = self.map.height() / 2;
        let max_radius = self.map.width().max(self.map.height());

        for radius in 0..=max_radius {
            for y in (center_y - radius)..=(center_y + radius) {
                for x in (center_x - radius)..=(center_x + radius) {
                    if results.len() >= needed {
                        return results;
                    }
                    if x < 0 || y < 0 || x >= self.map.width() || y >= self.map.height() {
                        continue;
                    }
                    if self.map.is_wall(x, y) {
                        continue;
                    }
                    if used.contains(&(x, y)) || results.contains(&(x, y)) {
                        continue;
                    }
                    if self.map.player_spawn_a() == Some((x, y))
                        || self.map.player_spawn_b() == Some((x, y))
                    {
                        continue;
                    }
                    results.push((x, y));
                }
            }
        }

        results
    }
}

fn reset_player(player: &mut Player, spawn: Vec2) {
    player.position = spawn;
    player.spawn_position = spawn;
    player.lives = 3;
    player.score = 0;
    player.invulnerable_secs = 0.0;
}
