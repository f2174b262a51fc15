//! Corridor generation
//!
//! Joins rooms into one walkable region with a 4-phase algorithm that runs
//! over any [`LinkGraph`]:
//! 1. Random walk from node 0, linking to unconnected neighbours
//! 2. Sweep for nodes the walk missed and repair them into the component
//! 3. Give nodes that ask for it one more link
//! 4. Add random extra links for loops

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};
use crate::rng::GenRng;

use super::area::{Adjacency, Area, Border, find_adjacencies};
use super::grid::Grid;
use super::rect::Pos;
use super::tile::Tile;

/// A set of nodes that can be joined by corridors
///
/// Linking is what carves; the passes only decide which pairs to link.
pub trait LinkGraph {
    fn node_count(&self) -> usize;

    /// Neighbours `node` can still build a new link to
    fn open_neighbors(&self, node: usize) -> Vec<usize>;

    /// Carve a corridor between two neighbouring nodes
    fn link(&mut self, a: usize, b: usize, rng: &mut GenRng) -> GenResult<()>;

    /// Check if `node` should get one more link after the component is built
    fn wants_more_links(&self, node: usize) -> bool;

    /// Called once `node` is part of the connected component
    fn mark_connected(&mut self, _node: usize) {}
}

/// Number of links each pass added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorReport {
    pub walk_links: u32,
    pub repair_links: u32,
    pub degree_links: u32,
    pub extra_links: u32,
}

impl CorridorReport {
    pub fn total(&self) -> u32 {
        self.walk_links + self.repair_links + self.degree_links + self.extra_links
    }
}

/// Tracks which nodes belong to the component grown from node 0
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    connected: Vec<bool>,
}

impl ConnectivityTracker {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            connected: vec![false; num_nodes],
        }
    }

    pub fn is_connected(&self, node: usize) -> bool {
        self.connected.get(node).copied().unwrap_or(false)
    }

    pub fn mark<G: LinkGraph + ?Sized>(&mut self, graph: &mut G, node: usize) {
        if let Some(c) = self.connected.get_mut(node)
            && !*c
        {
            *c = true;
            graph.mark_connected(node);
        }
    }

    pub fn all_connected(&self) -> bool {
        self.connected.iter().all(|c| *c)
    }
}

/// Run all four passes over `graph`
///
/// Fails with [`GenError::Disconnected`] if some node cannot be joined to
/// the component at all.
pub fn build_corridors<G: LinkGraph + ?Sized>(
    graph: &mut G,
    extra: u32,
    rng: &mut GenRng,
) -> GenResult<CorridorReport> {
    let count = graph.node_count();
    let mut report = CorridorReport::default();
    if count == 0 {
        return Ok(report);
    }
    let mut tracker = ConnectivityTracker::new(count);

    // Phase 1: random walk from node 0
    tracker.mark(graph, 0);
    let mut current = 0;
    loop {
        let candidates: Vec<usize> = graph
            .open_neighbors(current)
            .into_iter()
            .filter(|n| !tracker.is_connected(*n))
            .collect();
        let Some(&next) = rng.choose(&candidates) else {
            break;
        };
        graph.link(current, next, rng)?;
        tracker.mark(graph, next);
        report.walk_links += 1;
        current = next;
    }
    debug!("corridor walk linked {} of {count} nodes", report.walk_links + 1);

    // Phase 2: sweep for anything the walk missed
    for node in 0..count {
        if !tracker.is_connected(node) {
            report.repair_links += repair(graph, &mut tracker, node, rng)?;
        }
    }

    // Phase 3: minimum degree
    for node in 0..count {
        if graph.wants_more_links(node) {
            let open = graph.open_neighbors(node);
            if let Some(&other) = rng.choose(&open) {
                graph.link(node, other, rng)?;
                report.degree_links += 1;
            }
        }
    }

    // Phase 4: extra random links
    for _ in 0..extra {
        let Some(node) = rng.choose_index(count) else {
            break;
        };
        let open = graph.open_neighbors(node);
        if let Some(&other) = rng.choose(&open) {
            graph.link(node, other, rng)?;
            report.extra_links += 1;
        }
    }

    debug!("corridors built: {report:?}");
    Ok(report)
}

/// Grow a chain from an unconnected node until it touches the component
///
/// Depth-first with backtracking. Each step links the new node to its
/// parent, so everything visited hangs off the chain and becomes connected
/// together once the chain reaches the component.
fn repair<G: LinkGraph + ?Sized>(
    graph: &mut G,
    tracker: &mut ConnectivityTracker,
    start: usize,
    rng: &mut GenRng,
) -> GenResult<u32> {
    let mut links = 0;
    let mut visited = vec![start];
    let mut stack = vec![start];

    while let Some(&top) = stack.last() {
        let open = graph.open_neighbors(top);

        let joined: Vec<usize> = open
            .iter()
            .copied()
            .filter(|n| tracker.is_connected(*n))
            .collect();
        if let Some(&target) = rng.choose(&joined) {
            graph.link(top, target, rng)?;
            links += 1;
            for &n in &visited {
                tracker.mark(graph, n);
            }
            trace!("repaired node {start} via {top} -> {target}");
            return Ok(links);
        }

        let fresh: Vec<usize> = open
            .into_iter()
            .filter(|n| !visited.contains(n))
            .collect();
        match rng.choose(&fresh) {
            Some(&next) => {
                graph.link(top, next, rng)?;
                links += 1;
                visited.push(next);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }

    Err(GenError::Disconnected { node: start })
}

/// Areas as a link graph
///
/// Two areas are neighbours when they face each other across a divider.
/// A link carves an L-shaped ground path from one area's relay to the
/// other's, crossing the divider at a random shared cell.
pub struct AreaGraph<'a> {
    areas: &'a mut [Area],
    grid: &'a mut Grid,
    adjacency: Vec<Adjacency>,
}

impl<'a> AreaGraph<'a> {
    pub fn new(areas: &'a mut [Area], grid: &'a mut Grid) -> Self {
        let adjacency = find_adjacencies(areas);
        Self {
            areas,
            grid,
            adjacency,
        }
    }

    pub fn adjacency(&self) -> &[Adjacency] {
        &self.adjacency
    }

    fn relay(&self, idx: usize) -> Pos {
        let area = &self.areas[idx];
        area.relay.unwrap_or_else(|| area.rect.center())
    }

    fn carve(&mut self, adj: Adjacency, rng: &mut GenRng) -> GenResult<()> {
        let ra = self.relay(adj.a);
        let rb = self.relay(adj.b);

        match adj.border {
            Border::Vertical { y0, y1, .. } => {
                let cy = rng.range_inclusive(y0, y1 - 1);
                self.grid.carve_vertical(ra.x, ra.y, cy, Tile::Ground)?;
                self.grid.carve_horizontal(ra.x, rb.x, cy, Tile::Ground)?;
                self.grid.carve_vertical(rb.x, cy, rb.y, Tile::Ground)
            }
            Border::Horizontal { x0, x1, .. } => {
                let cx = rng.range_inclusive(x0, x1 - 1);
                self.grid.carve_horizontal(ra.x, cx, ra.y, Tile::Ground)?;
                self.grid.carve_vertical(cx, ra.y, rb.y, Tile::Ground)?;
                self.grid.carve_horizontal(cx, rb.x, rb.y, Tile::Ground)
            }
        }
    }
}

impl LinkGraph for AreaGraph<'_> {
    fn node_count(&self) -> usize {
        self.areas.len()
    }

    fn open_neighbors(&self, node: usize) -> Vec<usize> {
        self.adjacency
            .iter()
            .filter_map(|adj| {
                if adj.a == node {
                    Some(adj.b)
                } else if adj.b == node {
                    Some(adj.a)
                } else {
                    None
                }
            })
            .filter(|other| !self.areas[node].is_linked_to(*other))
            .collect()
    }

    fn link(&mut self, a: usize, b: usize, rng: &mut GenRng) -> GenResult<()> {
        let Some(adj) = self
            .adjacency
            .iter()
            .copied()
            .find(|adj| (adj.a == a && adj.b == b) || (adj.a == b && adj.b == a))
        else {
            return Err(GenError::NotAdjacent { a, b });
        };

        self.carve(adj, rng)?;
        self.areas[a].links.push(b);
        self.areas[b].links.push(a);
        trace!("linked area {a} with area {b}");
        Ok(())
    }

    fn wants_more_links(&self, _node: usize) -> bool {
        false
    }
}
