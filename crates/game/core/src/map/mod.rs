//! Immutable grid layout.
//!
//! The map is loaded once at startup and never mutated. Lookups clamp into
//! the grid instead of failing, so callers probing one step past the border
//! silently read the border cell.
mod pathfinder;

pub use pathfinder::{PathFinder, UNREACHABLE};

use crate::error::CoreError;
use crate::geometry::Point;

/// Canonical terrain classes for grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CellKind {
    Wall,
    Portal,
    Empty,
}

impl CellKind {
    /// `#` is a wall, `w` a spawn portal, anything else walkable floor.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '#' => CellKind::Wall,
            'w' => CellKind::Portal,
            _ => CellKind::Empty,
        }
    }

    /// Walls block both traversal and line of sight.
    pub fn is_wall(self) -> bool {
        matches!(self, CellKind::Wall)
    }
}

/// A cell at a fixed position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapCase {
    pub position: Point,
    pub kind: CellKind,
}

impl MapCase {
    pub const fn new(position: Point, kind: CellKind) -> Self {
        Self { position, kind }
    }

    pub fn is_wall(&self) -> bool {
        self.kind.is_wall()
    }
}

/// Rectangular grid of cells, `width × height`, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    width: i32,
    height: i32,
    cases: Vec<MapCase>,
}

impl Map {
    /// Builds the grid from `height` rows of at least `width` symbols.
    ///
    /// Extra trailing characters on a row are ignored.
    pub fn from_rows<S: AsRef<str>>(
        width: usize,
        height: usize,
        rows: &[S],
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::MalformedGrid {
                reason: "grid must have at least one cell",
            });
        }
        let (Ok(grid_width), Ok(grid_height)) = (i32::try_from(width), i32::try_from(height))
        else {
            return Err(CoreError::MalformedGrid {
                reason: "grid dimensions exceed the coordinate range",
            });
        };
        if rows.len() < height {
            return Err(CoreError::MalformedGrid {
                reason: "fewer rows than the announced height",
            });
        }

        let mut cases = Vec::new();
        for (y, row) in (0..grid_height).zip(rows) {
            let symbols: Vec<char> = row.as_ref().chars().take(width).collect();
            if symbols.len() < width {
                return Err(CoreError::MalformedGrid {
                    reason: "row shorter than the announced width",
                });
            }
            cases.extend((0..grid_width).zip(symbols).map(|(x, symbol)| {
                MapCase::new(Point::new(x, y), CellKind::from_symbol(symbol))
            }));
        }

        Ok(Self {
            width: grid_width,
            height: grid_height,
            cases,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, position: Point) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    /// Returns the cell at `(x, y)`, clamping each coordinate into the grid.
    pub fn get(&self, x: i32, y: i32) -> &MapCase {
        let x = x.clamp(0, self.width - 1);
        let y = y.clamp(0, self.height - 1);
        &self.cases[(y * self.width + x) as usize]
    }

    pub fn case(&self, position: Point) -> &MapCase {
        self.get(position.x, position.y)
    }

    pub fn is_wall(&self, position: Point) -> bool {
        self.case(position).is_wall()
    }

    pub fn path_finder(&self) -> PathFinder<'_> {
        PathFinder::new(self)
    }

    /// Walkable cells whose real path cost from `center` is at most `radius`.
    ///
    /// Candidates come from the `(2r+1)²` bounding box (x-major, ascending),
    /// which caps the number of searches; each survivor then pays for one
    /// real-distance search. Off-grid candidates are skipped.
    pub fn cases_within_path_cost(&self, center: Point, radius: u32) -> Vec<MapCase> {
        let r = radius as i32;
        let finder = self.path_finder();

        let mut found = Vec::new();
        for x in (center.x - r)..=(center.x + r) {
            for y in (center.y - r)..=(center.y + r) {
                let position = Point::new(x, y);
                if !self.contains(position) {
                    continue;
                }
                let case = *self.case(position);
                if case.is_wall() {
                    continue;
                }
                if finder.real_distance(center, position) <= radius {
                    found.push(case);
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&str]) -> Map {
        Map::from_rows(rows[0].len(), rows.len(), rows).expect("valid grid")
    }

    #[test]
    fn parses_cell_symbols() {
        let map = grid(&["#w.", "U #"]);
        assert_eq!(map.get(0, 0).kind, CellKind::Wall);
        assert_eq!(map.get(1, 0).kind, CellKind::Portal);
        assert_eq!(map.get(2, 0).kind, CellKind::Empty);
        assert_eq!(map.get(0, 1).kind, CellKind::Empty);
        assert_eq!(map.get(1, 1).kind, CellKind::Empty);
        assert_eq!(map.get(2, 1).kind, CellKind::Wall);
    }

    #[test]
    fn get_clamps_each_axis_independently() {
        let map = grid(&["...", "..#"]);
        assert_eq!(map.get(-5, 0).position, Point::new(0, 0));
        assert_eq!(map.get(10, 10).position, Point::new(2, 1));
        assert_eq!(map.get(1, -1).position, Point::new(1, 0));
        assert!(map.get(99, 1).is_wall());
        assert!(!map.contains(Point::new(3, 0)));
    }

    #[test]
    fn rejects_short_rows_and_empty_grids() {
        assert!(matches!(
            Map::from_rows(4, 2, &["....", ".."]),
            Err(CoreError::MalformedGrid { .. })
        ));
        assert!(Map::from_rows(3, 3, &["...", "..."]).is_err());
        assert!(Map::from_rows(0, 0, &[] as &[&str]).is_err());
    }

    #[test]
    fn rejects_dimensions_outside_coordinate_range() {
        let oversized = i32::MAX as usize + 1;
        assert_eq!(
            Map::from_rows(oversized, 1, &["..."]),
            Err(CoreError::MalformedGrid {
                reason: "grid dimensions exceed the coordinate range",
            })
        );
        assert!(Map::from_rows(1, oversized, &["."]).is_err());
    }

    #[test]
    fn within_path_cost_excludes_walls_and_detours() {
        // (3,1) is two steps away by Manhattan distance but the wall column
        // forces a six-step detour through the bottom row.
        let map = grid(&[
            "..#..", //
            "..#..",
            "..#..",
            ".....",
        ]);
        let center = Point::new(1, 1);
        let cases = map.cases_within_path_cost(center, 2);

        assert!(cases.iter().all(|case| !case.is_wall()));
        assert!(!cases.iter().any(|case| case.position == Point::new(3, 1)));
        assert!(cases.iter().any(|case| case.position == Point::new(1, 3)));
        assert!(cases.iter().any(|case| case.position == center));

        let finder = map.path_finder();
        for case in &cases {
            assert!(finder.real_distance(center, case.position) <= 2);
        }
    }

    #[test]
    fn within_path_cost_skips_off_grid_candidates() {
        let map = grid(&["...", "...", "..."]);
        let cases = map.cases_within_path_cost(Point::new(0, 0), 1);
        let positions: Vec<Point> = cases.iter().map(|case| case.position).collect();
        assert_eq!(
            positions,
            vec![Point::new(0, 0), Point::new(0, 1), Point::new(1, 0)]
        );
    }
}
