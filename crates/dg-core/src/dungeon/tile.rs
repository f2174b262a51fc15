//! Map tile types

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Tile value stored in every grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    /// Not assigned yet
    #[default]
    Empty = 0,
    /// Walkable floor
    Ground = 1,
    /// Blocking wall
    Wall = 2,
}

impl Tile {
    /// Check if this tile can be walked on
    pub const fn is_walkable(&self) -> bool {
        matches!(self, Tile::Ground)
    }

    /// ASCII glyph used by text renderers and template files
    pub const fn to_ascii(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Ground => '.',
            Tile::Wall => '#',
        }
    }

    /// Parse a template/ASCII glyph
    pub const fn from_ascii(c: char) -> Option<Tile> {
        match c {
            ' ' => Some(Tile::Empty),
            '.' => Some(Tile::Ground),
            '#' => Some(Tile::Wall),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_ascii_roundtrip() {
        for tile in Tile::iter() {
            assert_eq!(Tile::from_ascii(tile.to_ascii()), Some(tile));
        }
        assert_eq!(Tile::from_ascii('x'), None);
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Tile::default(), Tile::Empty);
        assert!(!Tile::Empty.is_walkable());
        assert!(Tile::Ground.is_walkable());
        assert!(!Tile::Wall.is_walkable());
    }
}
