//! Areas produced by the partitioner and the rooms placed inside them

use serde::{Deserialize, Serialize};

use super::rect::{Pos, Rect};

/// A room stamped into the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedRoom {
    /// Cells covered by the template
    pub bounds: Rect,
    /// Index of the template in the catalog
    pub template: usize,
    pub template_name: String,
}

/// One rectangular region of the partitioned map
///
/// Created by the partitioner, given a room by the placer, linked to its
/// neighbours by the corridor builder. Areas are never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub rect: Rect,
    pub room: Option<PlacedRoom>,
    /// Ground cell inside the room where this area's corridors meet
    pub relay: Option<Pos>,
    /// Indices of the areas this one has a corridor to
    pub links: Vec<usize>,
}

impl Area {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            room: None,
            relay: None,
            links: Vec::new(),
        }
    }

    pub fn has_room(&self) -> bool {
        self.room.is_some()
    }

    pub fn is_linked_to(&self, other: usize) -> bool {
        self.links.contains(&other)
    }
}

/// How two neighbouring areas touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Border {
    /// `a` is left of `b`, divider column `x`, shared rows `y0..y1`
    Vertical { x: i32, y0: i32, y1: i32 },
    /// `a` is above `b`, divider row `y`, shared columns `x0..x1`
    Horizontal { y: i32, x0: i32, x1: i32 },
}

/// A pair of areas separated by a single divider line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    /// The left/top area
    pub a: usize,
    /// The right/bottom area
    pub b: usize,
    pub border: Border,
}

/// Find every pair of areas that face each other across a divider
///
/// Two areas are neighbours when one ends one cell before the other starts
/// on an axis (the divider sits in between) and they share at least one
/// row or column along it.
pub fn find_adjacencies(areas: &[Area]) -> Vec<Adjacency> {
    let mut result = Vec::new();
    for (i, ai) in areas.iter().enumerate() {
        for (j, aj) in areas.iter().enumerate() {
            if i == j {
                continue;
            }
            let (ri, rj) = (ai.rect, aj.rect);
            if ri.x1 + 1 == rj.x0
                && let Some((y0, y1)) = super::rect::overlap(ri.y0, ri.y1, rj.y0, rj.y1)
            {
                result.push(Adjacency {
                    a: i,
                    b: j,
                    border: Border::Vertical { x: ri.x1, y0, y1 },
                });
            }
            if ri.y1 + 1 == rj.y0
                && let Some((x0, x1)) = super::rect::overlap(ri.x0, ri.x1, rj.x0, rj.x1)
            {
                result.push(Adjacency {
                    a: i,
                    b: j,
                    border: Border::Horizontal { y: ri.y1, x0, x1 },
                });
            }
        }
    }
    result
}
