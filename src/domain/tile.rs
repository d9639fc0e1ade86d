/// Tile types and their properties.
/// Only walls and pellets carry gameplay meaning; any other map
/// character is kept verbatim as inert floor content.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    /// Unrecognized map character, preserved as walkable floor.
    Other(char),
}

impl Tile {
    /// Does this tile block movement?
    pub fn is_wall(self) -> bool {
        matches!(self, Tile::Wall)
    }

    /// Is this an uneaten pellet?
    pub fn is_pellet(self) -> bool {
        matches!(self, Tile::Pellet)
    }

    pub fn from_char(c: char) -> Self {
        match c {
            '#' => Tile::Wall,
            '.' => Tile::Pellet,
            ' ' => Tile::Empty,
            other => Tile::Other(other),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Pellet => '.',
            Tile::Empty => ' ',
            Tile::Other(c) => c,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legend_round_trip() {
        for c in ['#', '.', ' ', '~', 'x'] {
            assert_eq!(Tile::from_char(c).to_char(), c);
        }
    }

    #[test]
    fn only_hash_is_wall() {
        assert!(Tile::from_char('#').is_wall());
        assert!(!Tile::from_char('~').is_wall());
        assert!(!Tile::from_char('.').is_wall());
    }
}
