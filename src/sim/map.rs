/// Maze map: owns the tile grid, pellet state, and spawn points.
///
/// ## Map file format
///
/// UTF-8 text, one row per line. Rows may differ in length: grid width
/// is the longest line, shorter lines are space-padded. Legend:
///
///   '#' = wall            '.' = pellet          ' ' = empty floor
///   'P' = player A spawn  'Q' = player B spawn  'G' = ghost spawn
///
/// Spawn markers are recorded and then cleared to empty floor; ghost
/// spawns keep scan order (row-major, top to bottom, left to right).
/// Any other character passes through as inert floor content.
///
/// Two tile layers: `tiles` is live and mutated by pellet consumption;
/// `original` is the parse-time snapshot, never mutated, and restores
/// the live layer wholesale on session reset.

use std::fmt;
use std::io;
use std::path::Path;

use crate::domain::tile::Tile;

#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    /// The source parsed to a zero-width or zero-height grid.
    Empty,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "could not read map file: {e}"),
            MapError::Empty => write!(f, "map is empty (zero width or height)"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
    /// Parse-time snapshot; never mutated after load.
    original: Vec<Vec<Tile>>,
    spawn_a: Option<(i32, i32)>,
    spawn_b: Option<(i32, i32)>,
    ghost_spawns: Vec<(i32, i32)>,
}

impl TileMap {
    /// Load a map from a file. Fails closed: on error no map exists.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse map text. Width = longest line; shorter lines are
    /// space-padded. Trailing '\r' is stripped (CRLF tolerance).
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        if lines.is_empty() || width == 0 {
            return Err(MapError::Empty);
        }

        let height = lines.len();
        let mut tiles = vec![vec![Tile::Empty; width]; height];
        let mut spawn_a = None;
        let mut spawn_b = None;
        let mut ghost_spawns = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                let tile = match c {
                    'P' => {
                        spawn_a = Some((x as i32, y as i32));
                        Tile::Empty
                    }
                    'Q' => {
                        spawn_b = Some((x as i32, y as i32));
                        Tile::Empty
                    }
                    'G' => {
                        ghost_spawns.push((x as i32, y as i32));
                        Tile::Empty
                    }
                    other => Tile::from_char(other),
                };
                tiles[y][x] = tile;
            }
        }

        Ok(TileMap {
            width: width as i32,
            height: height as i32,
            original: tiles.clone(),
            tiles,
            spawn_a,
            spawn_b,
            ghost_spawns,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Tile at (x, y). Anything outside the grid reads as a wall, so
    /// the boundary behaves like an implicit wall ring.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Tile::Wall;
        }
        self.tiles[y as usize][x as usize]
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile_at(x, y).is_wall()
    }

    /// Clear the pellet at (x, y). True iff the cell was in-bounds and
    /// held a pellet; out-of-bounds and non-pellet cells are a no-op.
    pub fn consume_pellet_at(&mut self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        if self.tiles[y as usize][x as usize].is_pellet() {
            self.tiles[y as usize][x as usize] = Tile::Empty;
            return true;
        }
        false
    }

    /// Restore the live grid from the parse-time snapshot. Spawn
    /// markers stay cleared: they were cleared at load, not per session.
    pub fn reset_tiles(&mut self) {
        self.tiles = self.original.clone();
    }

    /// Live pellet count; reaching zero is the win condition.
    pub fn remaining_pellets(&self) -> usize {
        self.tiles
            .iter()
            .map(|row| row.iter().filter(|t| t.is_pellet()).count())
            .sum()
    }

    pub fn player_spawn_a(&self) -> Option<(i32, i32)> {
        self.spawn_a
    }

    pub fn player_spawn_b(&self) -> Option<(i32, i32)> {
        self.spawn_b
    }

    pub fn ghost_spawns(&self) -> &[(i32, i32)] {
        &self.ghost_spawns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_with_one_pellet() {
        let mut map = TileMap::parse("###\n#.#\n###").unwrap();
        assert_eq!(map.width(), 3);
        assert_eq!(map.height(), 3);
        assert_eq!(map.remaining_pellets(), 1);
        assert!(map.player_spawn_a().is_none());
        assert!(map.player_spawn_b().is_none());
        assert!(map.ghost_spawns().is_empty());

        assert!(map.consume_pellet_at(1, 1));
        assert!(!map.consume_pellet_at(1, 1));
        assert_eq!(map.remaining_pellets(), 0);
    }

    #[test]
    fn spawn_markers_are_recorded_and_cleared() {
        let map = TileMap::parse("    \n P  \n  Q \n    ").unwrap();
        assert_eq!(map.player_spawn_a(), Some((1, 1)));
        assert_eq!(map.player_spawn_b(), Some((2, 2)));
        assert_eq!(map.tile_at(1, 1), Tile::Empty);
        assert_eq!(map.tile_at(2, 2), Tile::Empty);
    }

    #[test]
    fn ghost_spawns_keep_scan_order() {
        let map = TileMap::parse("G.G\n...\nG..").unwrap();
        assert_eq!(map.ghost_spawns(), &[(0, 0), (2, 0), (0, 2)]);
    }

    #[test]
    fn short_lines_are_space_padded() {
        let map = TileMap::parse("##\n#.###\n#").unwrap();
        assert_eq!(map.width(), 5);
        assert_eq!(map.height(), 3);
        // Padding is empty floor, not wall
        assert_eq!(map.tile_at(4, 0), Tile::Empty);
        assert_eq!(map.tile_at(1, 2), Tile::Empty);
    }

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let map = TileMap::parse("..\n..").unwrap();
        assert!(map.is_wall(-1, 0));
        assert!(map.is_wall(0, -1));
        assert!(map.is_wall(2, 0));
        assert!(map.is_wall(0, 2));
        assert!(map.is_wall(100, 100));
        assert!(!map.is_wall(1, 1));
    }

    #[test]
    fn unknown_characters_pass_through() {
        let map = TileMap::parse("~x").unwrap();
        assert_eq!(map.tile_at(0, 0), Tile::Other('~'));
        assert_eq!(map.tile_at(1, 0), Tile::Other('x'));
        assert!(!map.is_wall(0, 0));
    }

    #[test]
    fn crlf_line_endings_do_not_widen_the_grid() {
        let map = TileMap::parse("##\r\n##\r\n").unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert!(map.is_wall(1, 1));
    }

    #[test]
    fn empty_sources_fail_to_parse() {
        assert!(matches!(TileMap::parse(""), Err(MapError::Empty)));
        assert!(matches!(TileMap::parse("\n\n"), Err(MapError::Empty)));
    }

    #[test]
    fn consume_out_of_bounds_is_a_silent_no_op() {
        let mut map = TileMap::parse("..").unwrap();
        assert!(!map.consume_pellet_at(-1, 0));
        assert!(!map.consume_pellet_at(5, 5));
        assert_eq!(map.remaining_pellets(), 2);
    }

    #[test]
    fn reset_restores_the_original_pellet_count() {
        let mut map = TileMap::parse("...\n.#.\n...").unwrap();
        let original = map.remaining_pellets();
        assert_eq!(original, 8);

        assert!(map.consume_pellet_at(0, 0));
        assert!(map.consume_pellet_at(2, 2));
        assert_eq!(map.remaining_pellets(), original - 2);

        map.reset_tiles();
        assert_eq!(map.remaining_pellets(), original);
    }
}
