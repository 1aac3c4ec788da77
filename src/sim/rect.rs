//! Axis-aligned float rectangle
//!
//! All collision math works on these. Width and height are not guarded
//! against zero or negative values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with float coordinates (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub const EMPTY: RectF = RectF::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_location_size(location: Vec2, size: Vec2) -> Self {
        Self::new(location.x, location.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn location(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True only for the all-zero rectangle
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Point containment (left/top edges inclusive, right/bottom exclusive)
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.x <= point.x && point.x < self.right() && self.y <= point.y && point.y < self.bottom()
    }

    /// Whether `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &RectF) -> bool {
        self.x <= other.x
            && other.right() <= self.right()
            && self.y <= other.y
            && other.bottom() <= self.bottom()
    }

    /// Whether the two rectangles overlap (touching edges don't count)
    pub fn intersects(&self, other: &RectF) -> bool {
        other.left() < self.right()
            && self.left() < other.right()
            && other.top() < self.bottom()
            && self.top() < other.bottom()
    }

    /// The overlapping area, or [`RectF::EMPTY`] when there is none
    pub fn intersect(&self, other: &RectF) -> RectF {
        if !self.intersects(other) {
            return Self::EMPTY;
        }

        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        RectF::new(left, top, right - left, bottom - top)
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &RectF) -> RectF {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        RectF::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow outward on both sides of each axis
    pub fn inflate(&mut self, horizontal: f32, vertical: f32) {
        self.x -= horizontal;
        self.y -= vertical;
        self.width += horizontal * 2.0;
        self.height += vertical * 2.0;
    }

    /// Translate in place
    #[inline]
    pub fn offset(&mut self, amount: Vec2) {
        self.x += amount.x;
        self.y += amount.y;
    }
}
