//! Best-first search over the grid.
//!
//! Every step costs 1 and moves are 4-directional, so the Manhattan distance
//! to the goal is an admissible and consistent heuristic. A cell is never
//! re-added once discovered: with uniform step cost the first discovery is
//! already optimal.
//!
//! Line of sight is a separate, much cheaper walk along the four axes.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use crate::geometry::{CardinalDirection, Point};
use crate::map::Map;

/// Distance reported when no path exists. Sum with `saturating_add`.
pub const UNREACHABLE: u32 = u32::MAX;

/// A discovered cell. `parent` indexes into the search arena.
#[derive(Clone, Copy, Debug)]
struct Node {
    position: Point,
    cost: u32,
    heuristic: u32,
    parent: Option<usize>,
}

/// Stateless search facade borrowing an immutable [`Map`].
#[derive(Clone, Copy, Debug)]
pub struct PathFinder<'a> {
    map: &'a Map,
}

impl<'a> PathFinder<'a> {
    pub fn new(map: &'a Map) -> Self {
        Self { map }
    }

    /// Cells from `start` (excluded) to `end` (included) in traversal order.
    ///
    /// Returns an empty path when `start == end` and `None` when `end` cannot
    /// be reached. When several optimal paths exist, the one found first in
    /// discovery order wins.
    pub fn find_path(&self, start: Point, end: Point) -> Option<Vec<Point>> {
        if start == end {
            return Some(Vec::new());
        }

        let (arena, goal) = self.search(start, end)?;
        let mut path = Vec::with_capacity(arena[goal].cost as usize);
        let mut cursor = Some(goal);
        while let Some(index) = cursor {
            let node = arena[index];
            if node.parent.is_none() {
                break;
            }
            path.push(node.position);
            cursor = node.parent;
        }
        path.reverse();
        Some(path)
    }

    /// Number of steps on a shortest path, or [`UNREACHABLE`].
    pub fn real_distance(&self, start: Point, end: Point) -> u32 {
        if start == end {
            return 0;
        }

        match self.search(start, end) {
            Some((arena, goal)) => arena[goal].cost,
            None => UNREACHABLE,
        }
    }

    /// Whether a straight axis-aligned strike from `b` reaches `a`.
    ///
    /// Walks from `b` one cell at a time along each cardinal direction until
    /// the next cell is a wall or leaves the grid. Points sharing neither row
    /// nor column never see each other, regardless of what lies between.
    pub fn has_line_of_sight(&self, a: Point, b: Point) -> bool {
        if a == b {
            return true;
        }
        if a.x != b.x && a.y != b.y {
            return false;
        }

        CardinalDirection::ALL.iter().any(|&direction| {
            let mut cursor = b;
            loop {
                let next = cursor.step(direction);
                if !self.map.contains(next) || self.map.is_wall(next) {
                    return false;
                }
                if next == a {
                    return true;
                }
                cursor = next;
            }
        })
    }

    /// Runs the search and returns the node arena plus the goal index.
    fn search(&self, start: Point, end: Point) -> Option<(Vec<Node>, usize)> {
        let mut arena = vec![Node {
            position: start,
            cost: 0,
            heuristic: start.distance_to(end),
            parent: None,
        }];
        let mut discovered: HashSet<Point> = HashSet::from([start]);
        // Keyed by (cost + heuristic, arena index). Arena indices grow in
        // discovery order, so ties go to the earliest-discovered node.
        let mut frontier: BinaryHeap<Reverse<(u32, usize)>> = BinaryHeap::new();

        self.expand(0, end, &mut arena, &mut discovered, &mut frontier);

        while let Some(Reverse((_, index))) = frontier.pop() {
            if arena[index].heuristic == 0 {
                return Some((arena, index));
            }
            self.expand(index, end, &mut arena, &mut discovered, &mut frontier);
        }

        None
    }

    fn expand(
        &self,
        index: usize,
        end: Point,
        arena: &mut Vec<Node>,
        discovered: &mut HashSet<Point>,
        frontier: &mut BinaryHeap<Reverse<(u32, usize)>>,
    ) {
        let current = arena[index];
        for neighbor in current.position.neighbors() {
            if !self.map.contains(neighbor) || self.map.is_wall(neighbor) {
                continue;
            }
            if !discovered.insert(neighbor) {
                continue;
            }

            let node = Node {
                position: neighbor,
                cost: current.cost + 1,
                heuristic: neighbor.distance_to(end),
                parent: Some(index),
            };
            let slot = arena.len();
            arena.push(node);
            frontier.push(Reverse((node.cost + node.heuristic, slot)));
        }
    }
}
