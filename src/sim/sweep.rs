//! Per-tick collision sweep
//!
//! Every actor is checked against the world bounds, then against each actor
//! visited before it, so each unordered pair is checked exactly once.

use glam::Vec2;

use super::collision::{BoxCollider, check_bounds_collision, check_collider_collision};
use super::rect::RectF;

/// Run one sweep over `actors` in slice order.
///
/// For actor `i`: the bounds reaction fires first. Then for every `j < i`,
/// if `i` overlaps `j`, `i` is told with its own intersection, and `j` is told
/// with an intersection recomputed afterwards, so it sees wherever `i` ended
/// up after reacting.
pub fn run_collision_sweep<A>(actors: &mut [A], bounds: RectF, ctx: &mut A::Context)
where
    A: BoxCollider,
{
    for i in 0..actors.len() {
        let (visited, rest) = actors.split_at_mut(i);
        let current = &mut rest[0];

        if let Some(out_of_bounds) = check_bounds_collision(&*current, bounds) {
            current.on_bounds_collision(out_of_bounds, ctx);
        }

        for other in visited.iter_mut() {
            let Some(intersection) = check_collider_collision(&*current, &*other) else {
                continue;
            };
            current.on_collider_collision(other, intersection, ctx);

            // The first reaction may have moved `current`
            let intersection = check_collider_collision(&*other, &*current).unwrap_or(Vec2::ZERO);
            other.on_collider_collision(current, intersection, ctx);
        }
    }
}
