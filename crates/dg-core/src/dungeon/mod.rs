//! Dungeon layout: the tile grid, room templates and the generators

mod area;
mod corridor;
mod director;
mod grid;
mod partition;
mod placement;
mod rect;
mod section;
mod template;
mod tile;

pub use area::{Adjacency, Area, Border, PlacedRoom, find_adjacencies};
pub use corridor::{AreaGraph, ConnectivityTracker, CorridorReport, LinkGraph, build_corridors};
pub use director::{AreaLayout, DungeonGenerator, SectionLayout, generate_areas, generate_sections};
pub use grid::Grid;
pub use partition::{PartitionOutcome, Partitioner, largest_area};
pub use placement::{place_area_room, place_area_rooms, place_section_room, place_section_rooms, stamp};
pub use rect::{Pos, Rect};
pub use section::{Direction, JointKind, Section, SectionGraph, SectionGrid};
pub use template::{RoomTemplate, TemplateCatalog};
pub use tile::Tile;
