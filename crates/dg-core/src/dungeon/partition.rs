//! Recursive area partitioning
//!
//! Each step takes the largest area and cuts it in two along a one-cell
//! wall. The longer axis is cut; the cut position is random but leaves both
//! halves at least `min_area_size` wide. If the largest area cannot be cut,
//! partitioning stops for good, even when more splits were requested.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::consts::AREA_BORDER_SPACE;
use crate::error::GenResult;
use crate::rng::GenRng;

use super::area::Area;
use super::grid::Grid;
use super::rect::Rect;
use super::template::RoomTemplate;
use super::tile::Tile;

/// What the partitioner actually did
///
/// `exhausted` means the largest area could not be split before the
/// requested count was reached, so there are fewer areas than asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionOutcome {
    pub requested: u32,
    pub performed: u32,
    pub exhausted: bool,
}

/// Splits areas while keeping room for the smallest template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partitioner {
    min_w: i32,
    min_h: i32,
}

impl Partitioner {
    /// Minimum area extent is the smallest template plus the border space
    pub fn new(smallest: &RoomTemplate) -> Self {
        Self {
            min_w: smallest.width() + AREA_BORDER_SPACE,
            min_h: smallest.height() + AREA_BORDER_SPACE,
        }
    }

    pub fn min_area_size(&self) -> (i32, i32) {
        (self.min_w, self.min_h)
    }

    /// Check if a rectangle can be cut along its longer axis
    ///
    /// The cut axis needs two minimum areas plus the divider; the other
    /// axis needs one minimum area.
    pub fn can_split(&self, rect: &Rect) -> bool {
        let (w, h) = (rect.width(), rect.height());
        if w >= h {
            w >= self.min_w * 2 + 1 && h >= self.min_h
        } else {
            h >= self.min_h * 2 + 1 && w >= self.min_w
        }
    }

    /// Cut `area` in two and paint the divider as wall
    ///
    /// `area` keeps the right (or bottom) half; the left (or top) half is
    /// returned as a new area. Returns None if the area is too small.
    pub fn split(&self, area: &mut Area, grid: &mut Grid, rng: &mut GenRng) -> GenResult<Option<Area>> {
        let r = area.rect;
        if !self.can_split(&r) {
            return Ok(None);
        }

        let new_area = if r.width() >= r.height() {
            let x = rng.range_inclusive(r.x0 + self.min_w, r.x1 - self.min_w - 1);
            grid.carve_vertical(x, r.y0, r.y1 - 1, Tile::Wall)?;
            area.rect = Rect::new(x + 1, r.y0, r.x1, r.y1);
            Area::new(Rect::new(r.x0, r.y0, x, r.y1))
        } else {
            let y = rng.range_inclusive(r.y0 + self.min_h, r.y1 - self.min_h - 1);
            grid.carve_horizontal(r.x0, r.x1 - 1, y, Tile::Wall)?;
            area.rect = Rect::new(r.x0, y + 1, r.x1, r.y1);
            Area::new(Rect::new(r.x0, r.y0, r.x1, y))
        };

        Ok(Some(new_area))
    }

    /// Perform up to `count` splits, always on the current largest area
    pub fn partition(
        &self,
        grid: &mut Grid,
        areas: &mut Vec<Area>,
        count: u32,
        rng: &mut GenRng,
    ) -> GenResult<PartitionOutcome> {
        let mut performed = 0;
        while performed < count {
            let Some(idx) = largest_area(areas) else {
                break;
            };
            match self.split(&mut areas[idx], grid, rng)? {
                Some(new_area) => {
                    debug!(
                        "split area {idx} into {:?} and {:?}",
                        areas[idx].rect, new_area.rect
                    );
                    areas.push(new_area);
                    performed += 1;
                }
                None => break,
            }
        }

        let outcome = PartitionOutcome {
            requested: count,
            performed,
            exhausted: performed < count,
        };
        if outcome.exhausted {
            warn!(
                "partition exhausted after {performed} of {count} splits ({} areas)",
                areas.len()
            );
        }
        Ok(outcome)
    }
}

/// Index of the area with the largest footprint; ties keep the first
pub fn largest_area(areas: &[Area]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, area) in areas.iter().enumerate() {
        match best {
            Some(b) if area.rect.area() <= areas[b].rect.area() => {}
            _ => best = Some(i),
        }
    }
    best
}
