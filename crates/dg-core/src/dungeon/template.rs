//! Room templates and the catalog they are picked from
//!
//! Templates are authored outside the generator (see the assets crate) and
//! handed in as an ordered list. Order matters: size ties are broken by
//! position, so the same list always gives the same layout for a seed.

use serde::Serialize;

use crate::error::{GenError, GenResult};
use crate::rng::GenRng;

use super::rect::Pos;
use super::tile::Tile;

/// A fixed-size room footprint
///
/// Only built through the validating constructors, so it is not
/// deserializable directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomTemplate {
    pub name: String,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl RoomTemplate {
    /// Create a template from a row-major tile buffer
    pub fn new(name: impl Into<String>, width: i32, height: i32, tiles: Vec<Tile>) -> GenResult<Self> {
        let name = name.into();
        if width <= 0 || height <= 0 {
            return Err(GenError::InvalidTemplate {
                name,
                reason: format!("size {width}x{height} is not positive"),
            });
        }
        if tiles.len() != width as usize * height as usize {
            return Err(GenError::InvalidTemplate {
                reason: format!(
                    "expected {} tiles for {width}x{height}, got {}",
                    width * height,
                    tiles.len()
                ),
                name,
            });
        }
        Ok(Self {
            name,
            width,
            height,
            tiles,
        })
    }

    /// Build a template from ASCII rows (`.` ground, `#` wall, space empty)
    pub fn from_rows<S: AsRef<str>>(name: impl Into<String>, rows: &[S]) -> GenResult<Self> {
        let name = name.into();
        let height = rows.len() as i32;
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count()) as i32;

        let mut tiles = Vec::with_capacity((width.max(0) * height) as usize);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() as i32 != width {
                return Err(GenError::InvalidTemplate {
                    name,
                    reason: format!("row {y} is not {width} cells wide"),
                });
            }
            for c in row.chars() {
                let Some(tile) = Tile::from_ascii(c) else {
                    return Err(GenError::InvalidTemplate {
                        name,
                        reason: format!("unknown glyph '{c}' in row {y}"),
                    });
                };
                tiles.push(tile);
            }
        }

        Self::new(name, width, height, tiles)
    }

    /// A template made only of ground tiles
    pub fn solid(name: impl Into<String>, width: i32, height: i32) -> GenResult<Self> {
        let cells = (width.max(0) as usize) * (height.max(0) as usize);
        Self::new(name, width, height, vec![Tile::Ground; cells])
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Footprint size in cells
    pub fn size(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at a local offset, None outside the footprint
    pub fn tile_at(&self, x: i32, y: i32) -> Option<Tile> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.tiles[(x + y * self.width) as usize])
    }

    /// Check if the template fits into a `max_w` by `max_h` space
    ///
    /// A template exactly as large as the space fits.
    pub fn fits(&self, max_w: i32, max_h: i32) -> bool {
        self.width <= max_w && self.height <= max_h
    }

    /// Local offsets of all ground tiles
    pub fn ground_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.tiles.iter().enumerate().filter_map(|(i, t)| {
            t.is_walkable()
                .then(|| Pos::new(i as i32 % self.width, i as i32 / self.width))
        })
    }
}

/// Read-only, non-empty, ordered set of room templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCatalog {
    templates: Vec<RoomTemplate>,
}

impl TemplateCatalog {
    /// Wrap a template list; an empty list is rejected
    pub fn new(templates: Vec<RoomTemplate>) -> GenResult<Self> {
        if templates.is_empty() {
            return Err(GenError::EmptyCatalog);
        }
        Ok(Self { templates })
    }

    pub fn templates(&self) -> &[RoomTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoomTemplate> {
        self.templates.get(index)
    }

    /// The template with the smallest footprint
    ///
    /// Ties keep the first one in catalog order.
    pub fn min_by_size(&self) -> &RoomTemplate {
        let mut min = &self.templates[0];
        for t in &self.templates[1..] {
            if t.size() < min.size() {
                min = t;
            }
        }
        min
    }

    /// Indices of the templates that fit into `max_w` by `max_h`
    pub fn fitting(&self, max_w: i32, max_h: i32) -> Vec<usize> {
        self.templates
            .iter()
            .enumerate()
            .filter(|(_, t)| t.fits(max_w, max_h))
            .map(|(i, _)| i)
            .collect()
    }

    /// Uniformly pick a fitting template, returning its index
    pub fn pick_random_fitting(&self, max_w: i32, max_h: i32, rng: &mut GenRng) -> GenResult<usize> {
        let candidates = self.fitting(max_w, max_h);
        rng.choose(&candidates)
            .copied()
            .ok_or(GenError::NoFittingTemplate {
                width: max_w,
                height: max_h,
            })
    }

    /// A catalog holding only the templates that fit `max_w` by `max_h`
    pub fn restricted_to(&self, max_w: i32, max_h: i32) -> GenResult<Self> {
        let templates: Vec<_> = self
            .templates
            .iter()
            .filter(|t| t.fits(max_w, max_h))
            .cloned()
            .collect();
        if templates.is_empty() {
            return Err(GenError::NoFittingTemplate {
                width: max_w,
                height: max_h,
            });
        }
        Ok(Self { templates })
    }
}
