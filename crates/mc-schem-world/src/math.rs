//! Integer block positions, cuboid regions and entity locations.

use std::fmt;
use std::ops::{Add, Sub};

/// A block position (or block-sized offset).
///
/// `+` and `-` wrap on overflow in each component, matching Java `int`
/// arithmetic, so any stored origin and offset combine without panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockVector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector3 {
    pub const ZERO: Self = Self::at(0, 0, 0);
    pub const ONE: Self = Self::at(1, 1, 1);

    pub const fn at(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl Add for BlockVector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::at(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl Sub for BlockVector3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::at(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}

impl fmt::Display for BlockVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// An axis-aligned box of blocks, stored as its minimum corner and size.
/// A zero size on any axis makes the region empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuboidRegion {
    min: BlockVector3,
    size: BlockVector3,
}

impl CuboidRegion {
    /// `size` components below zero are clamped to zero.
    pub fn new(min: BlockVector3, size: BlockVector3) -> Self {
        Self {
            min,
            size: BlockVector3::at(size.x.max(0), size.y.max(0), size.z.max(0)),
        }
    }

    pub fn minimum_point(&self) -> BlockVector3 {
        self.min
    }

    /// Inclusive maximum corner. For an empty region this lies below `min`.
    pub fn maximum_point(&self) -> BlockVector3 {
        self.min + self.size - BlockVector3::ONE
    }

    pub fn dimensions(&self) -> BlockVector3 {
        self.size
    }

    pub fn volume(&self) -> usize {
        self.size.x as usize * self.size.y as usize * self.size.z as usize
    }

    pub fn contains(&self, pos: BlockVector3) -> bool {
        let rel = pos - self.min;
        (0..self.size.x).contains(&rel.x)
            && (0..self.size.y).contains(&rel.y)
            && (0..self.size.z).contains(&rel.z)
    }

    /// Flat index of `pos` in y-major, then z, then x order.
    pub fn index_of(&self, pos: BlockVector3) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let rel = pos - self.min;
        let (w, l) = (self.size.x as usize, self.size.z as usize);
        Some(rel.y as usize * w * l + rel.z as usize * w + rel.x as usize)
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn position_of(&self, index: usize) -> BlockVector3 {
        let (w, l) = (self.size.x as usize, self.size.z as usize);
        let y = index / (w * l);
        let z = (index / w) % l;
        let x = index % w;
        self.min + BlockVector3::at(x as i32, y as i32, z as i32)
    }
}

/// Position and facing of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f32,
    pub pitch: f32,
}

impl Location {
    pub fn new(x: f64, y: f64, z: f64, yaw: f32, pitch: f32) -> Self {
        Self {
            x,
            y,
            z,
            yaw,
            pitch,
        }
    }
}
