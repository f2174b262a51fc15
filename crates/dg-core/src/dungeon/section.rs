//! Uniform section layout
//!
//! The map is cut into a `cols` by `rows` grid of square sections. Some get
//! a room, the rest only a relay point. Neighbouring sections are joined
//! through at most one exit per side: a straight corridor from the
//! outermost relay to the section edge, then a short run along the
//! neighbour's edge to meet its exit.

use log::trace;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::config::SectionConfig;
use crate::consts::SECTION_ROOM_SPACE;
use crate::error::{GenError, GenResult};
use crate::rng::GenRng;

use super::area::PlacedRoom;
use super::corridor::LinkGraph;
use super::grid::Grid;
use super::rect::{Pos, Rect};
use super::tile::Tile;

/// Side of a section; `Top` is towards smaller y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum Direction {
    Top = 0,
    Left = 1,
    Right = 2,
    Bottom = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Left,
        Direction::Right,
        Direction::Bottom,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }

    /// Column/row step towards this side
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Top => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, 1),
        }
    }

    /// Direction from one section coordinate to a 4-adjacent one
    pub fn between(from: (i32, i32), to: (i32, i32)) -> Option<Self> {
        let delta = (to.0 - from.0, to.1 - from.1);
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }
}

/// What a joint is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[repr(u8)]
pub enum JointKind {
    /// Interior point corridors start from
    Relay = 0,
    /// Point on the section edge where a corridor leaves
    Exit = 1,
}

/// One cell of the section grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub col: i32,
    pub row: i32,
    /// Cells covered by the section on the map
    pub rect: Rect,
    pub room: Option<PlacedRoom>,
    pub connected: bool,
    exits: [Option<Pos>; 4],
    joints: [Vec<Pos>; 2],
}

impl Section {
    fn new(col: i32, row: i32, size: i32) -> Self {
        Self {
            col,
            row,
            rect: Rect::with_size(col * size, row * size, size, size),
            room: None,
            connected: false,
            exits: [None; 4],
            joints: [Vec::new(), Vec::new()],
        }
    }

    pub fn has_room(&self) -> bool {
        self.room.is_some()
    }

    /// Exit cell on one side, if that side has been opened
    pub fn exit(&self, dir: Direction) -> Option<Pos> {
        self.exits[dir.index()]
    }

    pub fn has_exit(&self, dir: Direction) -> bool {
        self.exits[dir.index()].is_some()
    }

    pub fn exit_count(&self) -> usize {
        self.exits.iter().filter(|e| e.is_some()).count()
    }

    pub fn joints(&self, kind: JointKind) -> &[Pos] {
        &self.joints[kind as usize]
    }

    pub fn add_joint(&mut self, kind: JointKind, pos: Pos) {
        self.joints[kind as usize].push(pos);
    }

    /// Relay furthest towards `dir`; ties are broken at random
    fn extreme_relay(&self, dir: Direction, rng: &mut GenRng) -> Option<Pos> {
        let relays = self.joints(JointKind::Relay);
        let key = |p: &Pos| match dir {
            Direction::Top => -p.y,
            Direction::Left => -p.x,
            Direction::Right => p.x,
            Direction::Bottom => p.y,
        };
        let best = relays.iter().map(key).max()?;
        let ties: Vec<Pos> = relays.iter().copied().filter(|p| key(p) == best).collect();
        rng.choose(&ties).copied()
    }

    /// Cell on the section edge straight out from `from`
    fn edge_cell(&self, dir: Direction, from: Pos) -> Pos {
        match dir {
            Direction::Top => Pos::new(from.x, self.rect.y0),
            Direction::Left => Pos::new(self.rect.x0, from.y),
            Direction::Right => Pos::new(self.rect.x1 - 1, from.y),
            Direction::Bottom => Pos::new(from.x, self.rect.y1 - 1),
        }
    }

    /// Random interior point for a section without room
    pub(crate) fn random_relay(&self, rng: &mut GenRng) -> Pos {
        let size = self.rect.width();
        let lo = SECTION_ROOM_SPACE;
        let hi = size - SECTION_ROOM_SPACE - 1;
        Pos::new(
            self.rect.x0 + rng.range_inclusive(lo, hi),
            self.rect.y0 + rng.range_inclusive(lo, hi),
        )
    }
}

/// All sections of a map, row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionGrid {
    size: i32,
    cols: i32,
    rows: i32,
    sections: Vec<Section>,
}

impl SectionGrid {
    pub fn new(config: &SectionConfig) -> GenResult<Self> {
        config.validate()?;
        let (size, cols, rows) = (config.section_size, config.sections_x, config.sections_y);
        let sections = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Section::new(col, row, size)))
            .collect();
        Ok(Self {
            size,
            cols,
            rows,
            sections,
        })
    }

    pub fn section_size(&self) -> i32 {
        self.size
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn get(&self, idx: usize) -> Option<&Section> {
        self.sections.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Section> {
        self.sections.get_mut(idx)
    }

    /// Index of the section at a column/row
    pub fn index(&self, col: i32, row: i32) -> Option<usize> {
        (col >= 0 && row >= 0 && col < self.cols && row < self.rows)
            .then(|| (col + row * self.cols) as usize)
    }

    pub fn neighbor(&self, idx: usize, dir: Direction) -> Option<usize> {
        let s = self.sections.get(idx)?;
        let (dx, dy) = dir.delta();
        self.index(s.col + dx, s.row + dy)
    }

    fn section_mut(&mut self, idx: usize) -> GenResult<&mut Section> {
        let (cols, rows) = (self.cols, self.rows);
        self.sections.get_mut(idx).ok_or(GenError::OutOfBounds {
            x: idx as i32 % cols.max(1),
            y: idx as i32 / cols.max(1),
            width: cols,
            height: rows,
        })
    }

    /// Open the exit of section `idx` on side `dir`
    ///
    /// Carves from the outermost relay to the section edge and records the
    /// exit. An already open side is reused and nothing is carved.
    pub fn make_exit(
        &mut self,
        idx: usize,
        dir: Direction,
        grid: &mut Grid,
        rng: &mut GenRng,
    ) -> GenResult<Pos> {
        let section = self.section_mut(idx)?;
        if let Some(exit) = section.exit(dir) {
            return Ok(exit);
        }

        if section.joints(JointKind::Relay).is_empty() {
            let relay = section.random_relay(rng);
            grid.set_pos(relay, Tile::Ground)?;
            section.add_joint(JointKind::Relay, relay);
        }
        let relay = match section.extreme_relay(dir, rng) {
            Some(relay) => relay,
            None => section.rect.center(),
        };
        let exit = section.edge_cell(dir, relay);

        match dir {
            Direction::Top | Direction::Bottom => {
                grid.carve_vertical(relay.x, relay.y, exit.y, Tile::Ground)?
            }
            Direction::Left | Direction::Right => {
                grid.carve_horizontal(relay.x, exit.x, relay.y, Tile::Ground)?
            }
        }

        section.exits[dir.index()] = Some(exit);
        section.add_joint(JointKind::Exit, exit);
        Ok(exit)
    }

    /// Join two 4-adjacent sections
    pub fn connect(&mut self, a: usize, b: usize, grid: &mut Grid, rng: &mut GenRng) -> GenResult<()> {
        let (Some(sa), Some(sb)) = (self.sections.get(a), self.sections.get(b)) else {
            return Err(GenError::NotAdjacent { a, b });
        };
        let Some(dir) = Direction::between((sa.col, sa.row), (sb.col, sb.row)) else {
            return Err(GenError::NotAdjacent { a, b });
        };

        let ea = self.make_exit(a, dir, grid, rng)?;
        let eb = self.make_exit(b, dir.opposite(), grid, rng)?;

        // the two exits sit on facing edges; run along b's edge to line them up
        match dir {
            Direction::Left | Direction::Right => grid.carve_vertical(eb.x, ea.y, eb.y, Tile::Ground)?,
            Direction::Top | Direction::Bottom => grid.carve_horizontal(ea.x, eb.x, eb.y, Tile::Ground)?,
        }
        trace!("connected section {a} {dir} to section {b}");
        Ok(())
    }
}

/// Sections as a link graph
///
/// A side that already has an exit is closed, so each side is opened once.
pub struct SectionGraph<'a> {
    sections: &'a mut SectionGrid,
    grid: &'a mut Grid,
}

impl<'a> SectionGraph<'a> {
    pub fn new(sections: &'a mut SectionGrid, grid: &'a mut Grid) -> Self {
        Self { sections, grid }
    }
}

impl LinkGraph for SectionGraph<'_> {
    fn node_count(&self) -> usize {
        self.sections.len()
    }

    fn open_neighbors(&self, node: usize) -> Vec<usize> {
        let Some(section) = self.sections.get(node) else {
            return Vec::new();
        };
        Direction::ALL
            .into_iter()
            .filter(|d| !section.has_exit(*d))
            .filter_map(|d| self.sections.neighbor(node, d))
            .collect()
    }

    fn link(&mut self, a: usize, b: usize, rng: &mut GenRng) -> GenResult<()> {
        self.sections.connect(a, b, self.grid, rng)
    }

    fn wants_more_links(&self, node: usize) -> bool {
        self.sections
            .get(node)
            .is_some_and(|s| !s.has_room() && s.exit_count() < 2)
    }

    fn mark_connected(&mut self, node: usize) {
        if let Some(s) = self.sections.get_mut(node) {
            s.connected = true;
        }
    }
}
