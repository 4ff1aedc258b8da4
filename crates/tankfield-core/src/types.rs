//! Fundamental grid geometry and simulation types.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Facing and travel direction. North points toward negative y.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step in this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::North => IVec2::new(0, -1),
            Direction::South => IVec2::new(0, 1),
            Direction::East => IVec2::new(1, 0),
            Direction::West => IVec2::new(-1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// Axis-aligned integer rectangle in board cells.
///
/// `origin` is the top-left cell; `size` is the extent in cells. A rect with a
/// non-positive width or height is empty and covers no cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub origin: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn from_origin_size(origin: IVec2, size: IVec2) -> Self {
        Self { origin, size }
    }

    /// Rect of `size` whose integer center lands on `center`.
    pub fn centered_at(center: IVec2, size: IVec2) -> Self {
        Self {
            origin: center - (size - IVec2::ONE) / 2,
            size,
        }
    }

    pub fn left(&self) -> i32 {
        self.origin.x
    }

    pub fn top(&self) -> i32 {
        self.origin.y
    }

    pub fn width(&self) -> i32 {
        self.size.x
    }

    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.origin.x.saturating_add(self.size.x)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.origin.y.saturating_add(self.size.y)
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0 || self.size.y <= 0
    }

    /// Integer center, biased toward the top-left for even sizes.
    pub fn center(&self) -> IVec2 {
        self.origin + (self.size - IVec2::ONE) / 2
    }

    pub fn translated(&self, delta: IVec2) -> Self {
        Self {
            origin: self.origin + delta,
            size: self.size,
        }
    }

    /// Scale both origin and size by a whole factor, saturating at the
    /// `i32` limits.
    pub fn scaled(&self, factor: i32) -> Self {
        Self {
            origin: scale_point(self.origin, factor),
            size: scale_point(self.size, factor),
        }
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping part of two rects; empty when they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let origin = self.origin.max(other.origin);
        let end = IVec2::new(self.right(), self.bottom()).min(IVec2::new(other.right(), other.bottom()));
        let size = IVec2::new(end.x.saturating_sub(origin.x), end.y.saturating_sub(origin.y));
        Rect {
            origin,
            size: size.max(IVec2::ZERO),
        }
    }

    /// True iff `other` is non-empty and lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        !other.is_empty()
            && other.left() >= self.left()
            && other.top() >= self.top()
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn contains_point(&self, p: IVec2) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// The strip `distance` cells deep directly ahead of this rect.
    pub fn forward_area(&self, direction: Direction, distance: i32) -> Rect {
        match direction {
            Direction::North => Rect::new(self.left(), self.top() - distance, self.width(), distance),
            Direction::South => Rect::new(self.left(), self.bottom(), self.width(), distance),
            Direction::West => Rect::new(self.left() - distance, self.top(), distance, self.height()),
            Direction::East => Rect::new(self.right(), self.top(), distance, self.height()),
        }
    }

    /// Every cell covered, row-major.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> {
        let (left, top) = (self.left(), self.top());
        let (width, height) = (self.width().max(0), self.height().max(0));
        (0..height).flat_map(move |dy| (0..width).map(move |dx| IVec2::new(left + dx, top + dy)))
    }
}

/// Multiply both components by `factor`, saturating at the `i32` limits.
pub fn scale_point(p: IVec2, factor: i32) -> IVec2 {
    IVec2::new(p.x.saturating_mul(factor), p.y.saturating_mul(factor))
}

/// Opaque identity for tanks and bullets, unique within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Hands out monotonically increasing entity ids.
#[derive(Debug, Clone, Default)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each active tick).
    pub tick: u64,
}

impl SimTime {
    pub fn advance(&mut self) {
        self.tick += 1;
    }

    /// Nominal elapsed time at the reference tick period.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * crate::constants::TICK_PERIOD_MS as f64 / 1000.0
    }
}
