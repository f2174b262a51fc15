//! dg-core: headless dungeon layout generation
//!
//! Splits a tile grid into areas (or a uniform grid of sections), stamps
//! pre-authored room templates into them and joins everything with
//! corridors into a single walkable region.
//!
//! The crate has no I/O and no rendering dependency. Every random decision
//! is drawn from an explicit [`GenRng`], so a run is reproducible from its
//! seed.

pub mod config;
pub mod dungeon;

mod consts;
mod error;
mod rng;

pub use config::{AreaConfig, SectionConfig};
pub use consts::*;
pub use dungeon::{
    AreaLayout, DungeonGenerator, Grid, RoomTemplate, SectionLayout, TemplateCatalog, Tile,
    generate_areas, generate_sections,
};
pub use error::{GenError, GenResult, GenerationError, Stage};
pub use rng::{GenRng, WeightedPool};
