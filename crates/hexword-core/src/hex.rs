//! Hex coordinate system using axial coordinates (q, r).
//!
//! Every tile on the letter grid is addressed by a [`HexCoord`]. The third cube
//! coordinate `s` is never stored; it is derived so that `q + r + s = 0` always holds.
//!
//! Two tiles are adjacent when their hex distance is exactly 1, which is the same as
//! the sum of the absolute component differences being exactly 2.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axial direction vectors `(dq, dr)` in the order the seed walk tries them.
pub const DIRECTIONS: [(i32, i32); 6] = [
    (1, 0),  // East
    (0, 1),  // SouthEast
    (-1, 1), // SouthWest
    (-1, 0), // West
    (0, -1), // NorthWest
    (1, -1), // NorthEast
];

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// The center of the board
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The coordinate one step away along `(dq, dr)`
    pub const fn offset(&self, (dq, dr): (i32, i32)) -> HexCoord {
        HexCoord::new(self.q + dq, self.r + dr)
    }

    /// The six neighboring hexes, in [`DIRECTIONS`] order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        DIRECTIONS.map(|dir| self.offset(dir))
    }

    /// Sum of absolute differences of all three cube components
    fn manhattan(&self, other: &HexCoord) -> i32 {
        (self.q - other.q).abs() + (self.r - other.r).abs() + (self.s() - other.s()).abs()
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        (self.manhattan(other) / 2) as u32
    }

    /// Distance from the origin
    pub fn distance_to_center(&self) -> u32 {
        self.distance_to(&HexCoord::ORIGIN)
    }

    /// Whether `other` shares an edge with this hex.
    ///
    /// Identical coordinates are not neighbors.
    pub fn is_neighbor(&self, other: &HexCoord) -> bool {
        self.manhattan(other) == 2
    }

    /// Whether this hex lies inside the hexagonal region of the given radius
    pub fn is_within(&self, radius: u32) -> bool {
        let radius = radius as i32;
        self.q.abs() <= radius && self.r.abs() <= radius && self.s().abs() <= radius
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Adjacency test between two coordinates. Symmetric; false for identical inputs.
pub fn are_neighbors(a: &HexCoord, b: &HexCoord) -> bool {
    a.is_neighbor(b)
}

/// Number of cells in a hexagonal region: 1 + 3R(R+1)
pub const fn cell_count(radius: u32) -> usize {
    let r = radius as usize;
    1 + 3 * r * (r + 1)
}

/// Every coordinate with max(|q|, |r|, |s|) <= radius, ordered by q then r.
pub fn hexes_within(radius: u32) -> Vec<HexCoord> {
    let bound = radius as i32;
    let mut coords = Vec::with_capacity(cell_count(radius));
    for q in -bound..=bound {
        for r in -bound..=bound {
            let coord = HexCoord::new(q, r);
            if coord.is_within(radius) {
                coords.push(coord);
            }
        }
    }
    coords
}
