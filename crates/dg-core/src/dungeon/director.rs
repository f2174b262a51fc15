//! Generation entry points
//!
//! A [`DungeonGenerator`] owns the template catalog and the random source
//! for one run and drives the stages in order: partition (or section
//! layout), room placement, corridors. Each stage failure is reported as a
//! [`GenerationError`] naming the stage and the area or section involved.

use log::info;
use serde::Serialize;

use crate::config::{AreaConfig, SectionConfig};
use crate::consts::{MAP_BORDER, SECTION_ROOM_SPACE};
use crate::error::{GenError, GenerationError, Stage};
use crate::rng::GenRng;

use super::area::Area;
use super::corridor::{AreaGraph, CorridorReport, build_corridors};
use super::grid::Grid;
use super::partition::{PartitionOutcome, Partitioner};
use super::placement::{place_area_rooms, place_section_rooms};
use super::rect::Rect;
use super::section::{SectionGraph, SectionGrid};
use super::template::{RoomTemplate, TemplateCatalog};
use super::tile::Tile;

/// Result of an area run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaLayout {
    pub seed: u64,
    pub config: AreaConfig,
    pub grid: Grid,
    pub areas: Vec<Area>,
    pub partition: PartitionOutcome,
    pub corridors: CorridorReport,
}

/// Result of a section run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLayout {
    pub seed: u64,
    pub config: SectionConfig,
    pub grid: Grid,
    pub sections: SectionGrid,
    pub rooms_placed: usize,
    pub corridors: CorridorReport,
}

impl AreaLayout {
    pub fn to_ascii(&self) -> String {
        self.grid.to_ascii_lines().join("\n")
    }
}

impl SectionLayout {
    pub fn to_ascii(&self) -> String {
        self.grid.to_ascii_lines().join("\n")
    }
}

/// Runs the generation stages over one catalog and random source
///
/// Every run advances the random source, so two runs on the same generator
/// differ. Build a fresh generator with the same seed to repeat a layout.
#[derive(Debug, Clone)]
pub struct DungeonGenerator {
    catalog: TemplateCatalog,
    rng: GenRng,
}

impl DungeonGenerator {
    pub fn new(catalog: TemplateCatalog, seed: u64) -> Self {
        Self {
            catalog,
            rng: GenRng::new(seed),
        }
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Split the map into areas, place one room per area and connect them
    pub fn generate_areas(&mut self, config: &AreaConfig) -> Result<AreaLayout, GenerationError> {
        let setup = |e| GenerationError::new(Stage::Setup, "map", e);
        config.validate().map_err(setup)?;

        let mut grid = Grid::new(config.width, config.height).map_err(setup)?;
        grid.paint_border(MAP_BORDER, Tile::Wall).map_err(setup)?;

        let root = Rect::new(
            MAP_BORDER,
            MAP_BORDER,
            config.width - MAP_BORDER,
            config.height - MAP_BORDER,
        );
        let mut areas = vec![Area::new(root)];

        let partitioner = Partitioner::new(self.catalog.min_by_size());
        let partition = partitioner
            .partition(&mut grid, &mut areas, config.split_count, &mut self.rng)
            .map_err(|e| GenerationError::new(Stage::Partition, "map", e))?;

        place_area_rooms(&mut areas, &mut grid, &self.catalog, &mut self.rng)?;

        let corridors = {
            let mut graph = AreaGraph::new(&mut areas, &mut grid);
            build_corridors(&mut graph, config.extra_corridors, &mut self.rng)
                .map_err(|e| corridor_error("area", e))?
        };

        grid.seal(Tile::Wall);

        info!(
            "generated {}x{} area map: {} areas, {} corridors (seed {})",
            config.width,
            config.height,
            areas.len(),
            corridors.total(),
            self.rng.seed()
        );

        Ok(AreaLayout {
            seed: self.rng.seed(),
            config: config.clone(),
            grid,
            areas,
            partition,
            corridors,
        })
    }

    /// Lay out a uniform section grid, place rooms and connect everything
    pub fn generate_sections(
        &mut self,
        config: &SectionConfig,
    ) -> Result<SectionLayout, GenerationError> {
        config
            .validate()
            .map_err(|e| GenerationError::new(Stage::Setup, "map", e))?;

        let space = config.section_size - 2 * SECTION_ROOM_SPACE;
        let catalog = self
            .catalog
            .restricted_to(space, space)
            .map_err(|e| GenerationError::new(Stage::Setup, "catalog", e))?;

        let (width, height) = config.map_size();
        let mut grid =
            Grid::new(width, height).map_err(|e| GenerationError::new(Stage::Setup, "map", e))?;
        grid.fill_rect(grid.bounds(), Tile::Wall)
            .map_err(|e| GenerationError::new(Stage::Setup, "map", e))?;

        let mut sections =
            SectionGrid::new(config).map_err(|e| GenerationError::new(Stage::Setup, "map", e))?;

        let rooms_placed = place_section_rooms(
            &mut sections,
            &mut grid,
            &catalog,
            config.min_rooms,
            config.max_rooms,
            &mut self.rng,
        )?;

        let corridors = {
            let mut graph = SectionGraph::new(&mut sections, &mut grid);
            build_corridors(&mut graph, config.extra_corridors, &mut self.rng)
                .map_err(|e| corridor_error("section", e))?
        };
        // templates may carry Empty cells
        grid.seal(Tile::Wall);

        info!(
            "generated {}x{} section map: {rooms_placed} rooms in {} sections, {} corridors (seed {})",
            width,
            height,
            sections.len(),
            corridors.total(),
            self.rng.seed()
        );

        Ok(SectionLayout {
            seed: self.rng.seed(),
            config: config.clone(),
            grid,
            sections,
            rooms_placed,
            corridors,
        })
    }
}

fn corridor_error(kind: &str, e: GenError) -> GenerationError {
    let target = match &e {
        GenError::Disconnected { node } => format!("{kind} {node}"),
        GenError::NotAdjacent { a, b } => format!("{kind}s {a} and {b}"),
        _ => format!("{kind}s"),
    };
    GenerationError::new(Stage::Corridor, target, e)
}

fn catalog_for(templates: Vec<RoomTemplate>) -> Result<TemplateCatalog, GenerationError> {
    TemplateCatalog::new(templates).map_err(|e| GenerationError::new(Stage::Setup, "catalog", e))
}

/// Generate an area map in one call
pub fn generate_areas(
    config: &AreaConfig,
    templates: Vec<RoomTemplate>,
    seed: u64,
) -> Result<AreaLayout, GenerationError> {
    DungeonGenerator::new(catalog_for(templates)?, seed).generate_areas(config)
}

/// Generate a section map in one call
pub fn generate_sections(
    config: &SectionConfig,
    templates: Vec<RoomTemplate>,
    seed: u64,
) -> Result<SectionLayout, GenerationError> {
    DungeonGenerator::new(catalog_for(templates)?, seed).generate_sections(config)
}
