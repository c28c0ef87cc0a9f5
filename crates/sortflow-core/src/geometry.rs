//! Rectangles and axes in absolute (viewport) coordinates.

use serde::Deserialize;

use crate::math::Vec2;

/// Principal axis along which a container lays out its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Items stack top to bottom.
    #[default]
    Vertical,
    /// Items flow left to right.
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Orientation::Horizontal)
    }

    /// The other axis.
    pub fn cross(&self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// Coordinate of `point` along this axis.
    #[inline]
    pub fn along(&self, point: Vec2) -> f32 {
        match self {
            Orientation::Vertical => point.y,
            Orientation::Horizontal => point.x,
        }
    }
}

/// Axis-aligned rectangle, `left`/`top` being the minimum corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Build a rect from its minimum corner and a size.
    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Leading edge on `axis` (left or top).
    #[inline]
    pub fn start(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Vertical => self.top,
            Orientation::Horizontal => self.left,
        }
    }

    /// Trailing edge on `axis` (right or bottom).
    #[inline]
    pub fn end(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Vertical => self.bottom(),
            Orientation::Horizontal => self.right(),
        }
    }

    /// Extent along `axis`.
    #[inline]
    pub fn span(&self, axis: Orientation) -> f32 {
        match axis {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }

    /// Midpoint along `axis`.
    #[inline]
    pub fn mid(&self, axis: Orientation) -> f32 {
        self.start(axis) + self.span(axis) / 2.0
    }

    /// Same rect moved by `offset`.
    pub fn translate(&self, offset: Vec2) -> Self {
        Self::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }

    /// Inclusive point containment.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right() && point.y >= self.top && point.y <= self.bottom()
    }

    /// Euclidean distance between the minimum corners of two rects.
    pub fn origin_distance(&self, other: &Rect) -> f32 {
        self.origin().distance(other.origin())
    }

    /// Shortest distance from `point` to this rect, zero when inside.
    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        let dx = (self.left - point.x).max(point.x - self.right()).max(0.0);
        let dy = (self.top - point.y).max(point.y - self.bottom()).max(0.0);
        Vec2::new(dx, dy).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Size { width, height }
    }
}
