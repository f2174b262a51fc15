//! Room placement
//!
//! Picks a fitting template for each area (or chosen section), stamps it
//! at a random anchor that keeps a margin to the region edge, and records
//! where corridors may attach.

use log::debug;

use crate::consts::{AREA_BORDER_SPACE, ROOM_BLANK_SPACE, SECTION_ROOM_SPACE};
use crate::error::{GenError, GenResult, GenerationError, Stage};
use crate::rng::{GenRng, WeightedPool};

use super::area::{Area, PlacedRoom};
use super::grid::Grid;
use super::rect::{Pos, Rect};
use super::section::{JointKind, SectionGrid};
use super::template::{RoomTemplate, TemplateCatalog};
use super::tile::Tile;

/// Copy a template onto the grid with its top-left cell at `anchor`
///
/// Every template cell overwrites what was there, empty cells included.
pub fn stamp(grid: &mut Grid, template: &RoomTemplate, anchor: Pos) -> GenResult<Rect> {
    grid.blit(anchor, template.width(), template.tiles())?;
    Ok(Rect::with_size(anchor.x, anchor.y, template.width(), template.height()))
}

/// Place one room inside `area` and pick its relay
pub fn place_area_room(
    area: &mut Area,
    grid: &mut Grid,
    catalog: &TemplateCatalog,
    rng: &mut GenRng,
) -> GenResult<PlacedRoom> {
    let r = area.rect;
    let usable_w = r.width() - AREA_BORDER_SPACE;
    let usable_h = r.height() - AREA_BORDER_SPACE;

    let idx = catalog.pick_random_fitting(usable_w, usable_h, rng)?;
    let Some(template) = catalog.get(idx) else {
        return Err(GenError::EmptyCatalog);
    };

    let anchor = Pos::new(
        rng.range_inclusive(r.x0 + ROOM_BLANK_SPACE, r.x1 - template.width() - ROOM_BLANK_SPACE),
        rng.range_inclusive(r.y0 + ROOM_BLANK_SPACE, r.y1 - template.height() - ROOM_BLANK_SPACE),
    );
    let bounds = stamp(grid, template, anchor)?;

    let ground: Vec<Pos> = template
        .ground_cells()
        .map(|p| p.offset(anchor.x, anchor.y))
        .collect();
    let relay = match rng.choose(&ground) {
        Some(&p) => p,
        None => {
            let c = bounds.center();
            grid.set_pos(c, Tile::Ground)?;
            c
        }
    };

    let room = PlacedRoom {
        bounds,
        template: idx,
        template_name: template.name.clone(),
    };
    area.room = Some(room.clone());
    area.relay = Some(relay);
    Ok(room)
}

/// Place a room in every area, in list order
pub fn place_area_rooms(
    areas: &mut [Area],
    grid: &mut Grid,
    catalog: &TemplateCatalog,
    rng: &mut GenRng,
) -> Result<(), GenerationError> {
    for (i, area) in areas.iter_mut().enumerate() {
        let room = place_area_room(area, grid, catalog, rng)
            .map_err(|e| GenerationError::new(Stage::Placement, format!("area {i}"), e))?;
        debug!("area {i}: placed '{}' at {:?}", room.template_name, room.bounds);
    }
    Ok(())
}

/// Place a room in section `idx`
///
/// `catalog` must already be restricted to templates that fit a section.
/// Every ground cell on the room's outer rows and columns becomes a relay.
pub fn place_section_room(
    sections: &mut SectionGrid,
    idx: usize,
    grid: &mut Grid,
    catalog: &TemplateCatalog,
    rng: &mut GenRng,
) -> GenResult<PlacedRoom> {
    let (size, cols, rows) = (sections.section_size(), sections.cols(), sections.rows());
    let space = size - 2 * SECTION_ROOM_SPACE;
    let tidx = catalog.pick_random_fitting(space, space, rng)?;
    let Some(template) = catalog.get(tidx) else {
        return Err(GenError::EmptyCatalog);
    };
    let Some(section) = sections.get_mut(idx) else {
        return Err(GenError::OutOfBounds {
            x: idx as i32,
            y: 0,
            width: cols,
            height: rows,
        });
    };

    let origin = section.rect.top_left();
    let anchor = origin.offset(
        rng.range_inclusive(SECTION_ROOM_SPACE, size - SECTION_ROOM_SPACE - template.width()),
        rng.range_inclusive(SECTION_ROOM_SPACE, size - SECTION_ROOM_SPACE - template.height()),
    );
    let bounds = stamp(grid, template, anchor)?;

    let (w, h) = (template.width(), template.height());
    let mut relays: Vec<Pos> = template
        .ground_cells()
        .filter(|p| p.x == 0 || p.y == 0 || p.x == w - 1 || p.y == h - 1)
        .map(|p| p.offset(anchor.x, anchor.y))
        .collect();
    if relays.is_empty() {
        let c = bounds.center();
        grid.set_pos(c, Tile::Ground)?;
        relays.push(c);
    }
    for relay in relays {
        section.add_joint(JointKind::Relay, relay);
    }

    let room = PlacedRoom {
        bounds,
        template: tidx,
        template_name: template.name.clone(),
    };
    section.room = Some(room.clone());
    Ok(room)
}

/// Choose which sections get rooms and fill them
///
/// The room count is drawn from `min_rooms..=max_rooms` and capped at the
/// number of sections. Sections left without a room get a single relay.
/// Returns the number of rooms placed.
pub fn place_section_rooms(
    sections: &mut SectionGrid,
    grid: &mut Grid,
    catalog: &TemplateCatalog,
    min_rooms: u32,
    max_rooms: u32,
    rng: &mut GenRng,
) -> Result<usize, GenerationError> {
    let lo = i32::try_from(min_rooms).unwrap_or(i32::MAX);
    let hi = i32::try_from(max_rooms).unwrap_or(i32::MAX);
    let wanted = rng.range_inclusive(lo, hi).max(0) as usize;
    let wanted = wanted.min(sections.len());

    let mut pool: WeightedPool<usize> = (0..sections.len()).map(|i| (i, 1.0)).collect();
    let mut chosen = Vec::with_capacity(wanted);
    while chosen.len() < wanted {
        let Some(idx) = pool.take(rng) else {
            break;
        };
        chosen.push(idx);
    }
    chosen.sort_unstable();

    for &idx in &chosen {
        let room = place_section_room(sections, idx, grid, catalog, rng)
            .map_err(|e| GenerationError::new(Stage::Placement, section_target(sections, idx), e))?;
        debug!("section {idx}: placed '{}' at {:?}", room.template_name, room.bounds);
    }

    for idx in 0..sections.len() {
        if chosen.binary_search(&idx).is_ok() {
            continue;
        }
        place_section_relay(sections, idx, grid, rng)
            .map_err(|e| GenerationError::new(Stage::Placement, section_target(sections, idx), e))?;
    }

    Ok(chosen.len())
}

/// Error target naming a section by its grid position
fn section_target(sections: &SectionGrid, idx: usize) -> String {
    match sections.get(idx) {
        Some(s) => format!("section ({}, {})", s.col, s.row),
        None => format!("section {idx}"),
    }
}

/// Give a room-less section one relay at a random interior cell
fn place_section_relay(
    sections: &mut SectionGrid,
    idx: usize,
    grid: &mut Grid,
    rng: &mut GenRng,
) -> GenResult<()> {
    let Some(section) = sections.get_mut(idx) else {
        return Ok(());
    };
    let relay = section.random_relay(rng);
    grid.set_pos(relay, Tile::Ground)?;
    section.add_joint(JointKind::Relay, relay);
    Ok(())
}
