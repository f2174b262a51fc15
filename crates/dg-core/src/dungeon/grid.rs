//! Flat 2D tile buffer
//!
//! Cells are stored row-major and addressed as `x + width * y`. The grid is
//! sized once at construction and never resized.

use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};

use super::rect::{Pos, Rect};
use super::tile::Tile;

/// The generated map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Allocate a grid with every tile `Empty`
    pub fn new(width: i32, height: i32) -> GenResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(GenError::InvalidSize { width, height });
        }
        Ok(Self {
            width,
            height,
            tiles: vec![Tile::Empty; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Raw tile buffer, indexed `x + width * y`
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The rectangle covering the whole grid
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> GenResult<usize> {
        if !self.in_bounds(x, y) {
            return Err(GenError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(x as usize + self.width as usize * y as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> GenResult<Tile> {
        let idx = self.index(x, y)?;
        Ok(self.tiles[idx])
    }

    pub fn set(&mut self, x: i32, y: i32, tile: Tile) -> GenResult<()> {
        let idx = self.index(x, y)?;
        self.tiles[idx] = tile;
        Ok(())
    }

    pub fn get_pos(&self, p: Pos) -> GenResult<Tile> {
        self.get(p.x, p.y)
    }

    pub fn set_pos(&mut self, p: Pos, tile: Tile) -> GenResult<()> {
        self.set(p.x, p.y, tile)
    }

    /// Fill every cell of `rect` with `tile`
    ///
    /// Fails without writing anything if the rectangle leaves the grid.
    pub fn fill_rect(&mut self, rect: Rect, tile: Tile) -> GenResult<()> {
        if rect.is_empty() {
            return Ok(());
        }
        if !self.bounds().contains_rect(&rect) {
            let corner = if self.in_bounds(rect.x0, rect.y0) {
                Pos::new(rect.x1 - 1, rect.y1 - 1)
            } else {
                rect.top_left()
            };
            return Err(GenError::OutOfBounds {
                x: corner.x,
                y: corner.y,
                width: self.width,
                height: self.height,
            });
        }
        for p in rect.cells() {
            let idx = p.x as usize + self.width as usize * p.y as usize;
            self.tiles[idx] = tile;
        }
        Ok(())
    }

    /// Set `x_a..=x_b` on row `y` to `tile`, endpoints in either order
    pub fn carve_horizontal(&mut self, x_a: i32, x_b: i32, y: i32, tile: Tile) -> GenResult<()> {
        let (lo, hi) = (x_a.min(x_b), x_a.max(x_b));
        self.fill_rect(Rect::new(lo, y, hi + 1, y + 1), tile)
    }

    /// Set `y_a..=y_b` on column `x` to `tile`, endpoints in either order
    pub fn carve_vertical(&mut self, x: i32, y_a: i32, y_b: i32, tile: Tile) -> GenResult<()> {
        let (lo, hi) = (y_a.min(y_b), y_a.max(y_b));
        self.fill_rect(Rect::new(x, lo, x + 1, hi + 1), tile)
    }

    /// Paint a frame `margin` cells thick around the edge of the grid
    pub fn paint_border(&mut self, margin: i32, tile: Tile) -> GenResult<()> {
        let m = margin.min(self.width).min(self.height).max(0);
        let (w, h) = (self.width, self.height);
        self.fill_rect(Rect::new(0, 0, w, m), tile)?;
        self.fill_rect(Rect::new(0, h - m, w, h), tile)?;
        self.fill_rect(Rect::new(0, m, m, h - m), tile)?;
        self.fill_rect(Rect::new(w - m, m, w, h - m), tile)
    }

    /// Replace every remaining `Empty` tile with `tile`
    ///
    /// Returns how many tiles were replaced.
    pub fn seal(&mut self, tile: Tile) -> usize {
        let mut count = 0;
        for t in self.tiles.iter_mut().filter(|t| **t == Tile::Empty) {
            *t = tile;
            count += 1;
        }
        count
    }

    /// Count tiles of one kind
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Copy `tiles` (row-major, `width` wide) onto the grid at `origin`
    pub fn blit(&mut self, origin: Pos, width: i32, tiles: &[Tile]) -> GenResult<()> {
        if width <= 0 {
            return Ok(());
        }
        let height = tiles.len() as i32 / width;
        let target = Rect::with_size(origin.x, origin.y, width, height);
        if !self.bounds().contains_rect(&target) {
            return Err(GenError::OutOfBounds {
                x: target.x1 - 1,
                y: target.y1 - 1,
                width: self.width,
                height: self.height,
            });
        }
        for (i, &tile) in tiles.iter().take((width * height) as usize).enumerate() {
            let (lx, ly) = (i as i32 % width, i as i32 / width);
            self.set(origin.x + lx, origin.y + ly, tile)?;
        }
        Ok(())
    }

    /// 4-neighbour flood fill over walkable tiles
    ///
    /// Returns a mask (same indexing as the tile buffer) of reachable cells.
    /// The mask is all false if `start` is not walkable.
    pub fn flood_fill(&self, start: Pos) -> Vec<bool> {
        let mut visited = vec![false; self.tiles.len()];
        let Ok(start_idx) = self.index(start.x, start.y) else {
            return visited;
        };
        if !self.tiles[start_idx].is_walkable() {
            return visited;
        }

        let mut stack = vec![start];
        visited[start_idx] = true;
        while let Some(p) = stack.pop() {
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let n = p.offset(dx, dy);
                if let Ok(idx) = self.index(n.x, n.y)
                    && !visited[idx]
                    && self.tiles[idx].is_walkable()
                {
                    visited[idx] = true;
                    stack.push(n);
                }
            }
        }
        visited
    }

    /// Render as one string per row
    pub fn to_ascii_lines(&self) -> Vec<String> {
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(Tile::to_ascii).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(8, 5).unwrap();
        assert_eq!(grid.tiles().len(), 40);
        assert_eq!(grid.count(Tile::Empty), 40);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GenError::InvalidSize {
                width: 0,
                height: 5
            })
        );
        assert!(Grid::new(5, -1).is_err());
    }

    #[test]
    fn test_get_set_and_indexing() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(3, 2, Tile::Ground).unwrap();
        assert_eq!(grid.get(3, 2), Ok(Tile::Ground));
        assert_eq!(grid.tiles()[3 + 4 * 2], Tile::Ground);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut grid = Grid::new(4, 3).unwrap();
        assert_eq!(
            grid.get(4, 0),
            Err(GenError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(grid.set(-1, 0, Tile::Wall).is_err());
        assert!(grid.get(0, 3).is_err());
    }

    #[test]
    fn test_fill_rect_out_of_bounds_writes_nothing() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert!(grid.fill_rect(Rect::new(3, 3, 7, 7), Tile::Wall).is_err());
        assert_eq!(grid.count(Tile::Wall), 0);
    }

    #[test]
    fn test_carve_either_direction() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.carve_horizontal(7, 2, 4, Tile::Ground).unwrap();
        grid.carve_vertical(1, 8, 6, Tile::Ground).unwrap();
        assert_eq!(grid.count(Tile::Ground), 6 + 3);
        assert_eq!(grid.get(2, 4), Ok(Tile::Ground));
        assert_eq!(grid.get(7, 4), Ok(Tile::Ground));
        assert_eq!(grid.get(1, 6), Ok(Tile::Ground));
    }

    #[test]
    fn test_paint_border() {
        let mut grid = Grid::new(10, 8).unwrap();
        grid.paint_border(2, Tile::Wall).unwrap();
        // 10*8 minus the 6*4 interior
        assert_eq!(grid.count(Tile::Wall), 80 - 24);
        assert_eq!(grid.get(2, 2), Ok(Tile::Empty));
        assert_eq!(grid.get(1, 5), Ok(Tile::Wall));
        assert_eq!(grid.get(8, 5), Ok(Tile::Wall));
    }

    #[test]
    fn test_seal() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Tile::Ground).unwrap();
        assert_eq!(grid.seal(Tile::Wall), 8);
        assert_eq!(grid.count(Tile::Empty), 0);
        assert_eq!(grid.get(1, 1), Ok(Tile::Ground));
    }

    #[test]
    fn test_flood_fill_stops_at_walls() {
        let mut grid = Grid::new(7, 3).unwrap();
        grid.fill_rect(grid.bounds(), Tile::Ground).unwrap();
        grid.carve_vertical(3, 0, 2, Tile::Wall).unwrap();

        let reached = grid.flood_fill(Pos::new(0, 0));
        assert!(reached[0]);
        assert!(!reached[4]);
        assert_eq!(reached.iter().filter(|r| **r).count(), 9);

        assert!(grid.flood_fill(Pos::new(3, 1)).iter().all(|r| !r));
    }

    #[test]
    fn test_blit_and_ascii() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.blit(Pos::new(1, 0), 2, &[Tile::Wall, Tile::Ground, Tile::Ground, Tile::Wall])
            .unwrap();
        assert_eq!(grid.to_ascii_lines(), vec![" #. ", " .# "]);
    }
}
