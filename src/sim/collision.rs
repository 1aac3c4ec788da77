//! Box collision detection
//!
//! Two pure checks drive everything: how far a collider has left the padded
//! world bounds, and by how much two colliders overlap. Neither check reacts
//! to anything; the sweep decides who gets told.

use glam::Vec2;

use super::rect::RectF;

/// Something with a hitbox that can react to collisions.
///
/// Reactions receive a caller-supplied context so an implementor can record
/// side effects (scores, sounds) without owning them.
pub trait BoxCollider {
    type Context: ?Sized;

    /// Rectangle used for all collision math
    fn hitbox(&self) -> RectF;

    /// Per-axis inset applied to the world bounds for this collider
    fn bounds_padding(&self) -> Vec2;

    /// Called when this collider overlaps `other`
    fn on_collider_collision(&mut self, other: &Self, intersection: Vec2, ctx: &mut Self::Context);

    /// Called when this collider is outside the padded world bounds
    fn on_bounds_collision(&mut self, out_of_bounds: Vec2, ctx: &mut Self::Context);
}

/// Check how far a collider is outside `bounds` shrunk by its padding.
///
/// Each axis is signed: negative past the min edge, positive past the max
/// edge, zero when inside. Returns `None` when both axes are zero.
pub fn check_bounds_collision<C>(collider: &C, bounds: RectF) -> Option<Vec2>
where
    C: BoxCollider + ?Sized,
{
    out_of_bounds(collider.hitbox(), collider.bounds_padding(), bounds)
}

/// Rectangle form of [`check_bounds_collision`]
pub fn out_of_bounds(hitbox: RectF, padding: Vec2, bounds: RectF) -> Option<Vec2> {
    let bounds_left = bounds.left() + padding.x;
    let bounds_right = bounds.right() - padding.x;
    let bounds_top = bounds.top() + padding.y;
    let bounds_bottom = bounds.bottom() - padding.y;

    let x = if hitbox.left() < bounds_left {
        -(bounds_left - hitbox.left()).abs()
    } else if hitbox.right() > bounds_right {
        hitbox.right() - bounds_right
    } else {
        0.0
    };

    let y = if hitbox.top() < bounds_top {
        -(bounds_top - hitbox.top()).abs()
    } else if hitbox.bottom() > bounds_bottom {
        hitbox.bottom() - bounds_bottom
    } else {
        0.0
    };

    let distance = Vec2::new(x, y);
    (distance != Vec2::ZERO).then_some(distance)
}

/// Check whether `first` overlaps `second`, seen from `first`.
///
/// The sign of each axis follows where `first`'s center sits relative to
/// `second`'s: left of it gives `first.right - second.left` (positive), right
/// of it or level gives `first.left - second.right` (negative). Same for Y
/// with top/bottom. Swapping the arguments can pick a different edge pair, so
/// callers that need both perspectives must check twice.
pub fn check_collider_collision<A, B>(first: &A, second: &B) -> Option<Vec2>
where
    A: BoxCollider + ?Sized,
    B: BoxCollider + ?Sized,
{
    intersection(first.hitbox(), second.hitbox())
}

/// Rectangle form of [`check_collider_collision`]
pub fn intersection(first: RectF, second: RectF) -> Option<Vec2> {
    let first_center = first.center();
    let second_center = second.center();

    let x = if first_center.x < second_center.x {
        (first.right() > second.left()).then(|| first.right() - second.left())
    } else {
        (first.left() < second.right()).then(|| first.left() - second.right())
    }?;

    let y = if first_center.y < second_center.y {
        (first.bottom() > second.top()).then(|| first.bottom() - second.top())
    } else {
        (first.top() < second.bottom()).then(|| first.top() - second.bottom())
    }?;

    Some(Vec2::new(x, y))
}
