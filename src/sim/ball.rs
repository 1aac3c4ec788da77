//! The ball
//!
//! Direction is stored as an angle in degrees (0 = right, 90 = down, since
//! screen y grows downward). The per-tick movement vector is derived from the
//! angle every time it is set, never separately.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::RectF;
use super::state::{GameInfo, PaddleSide, TickContext};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::{is_between, normalize_degrees};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub hitbox: RectF,
    pub bounds_padding: Vec2,
    /// Waiting to be served after a reset
    pub is_resetting: bool,
    speed: f32,
    angle: f32,
    movement: Vec2,
    reset_elapsed: f32,
}

impl Ball {
    /// Create a ball served toward a random side
    pub fn new<R: Rng>(
        size: Vec2,
        bounds_padding: Vec2,
        speed: f32,
        bounds: RectF,
        rng: &mut R,
    ) -> Self {
        let mut ball = Self {
            hitbox: RectF::new(0.0, 0.0, size.x, size.y),
            bounds_padding,
            is_resetting: false,
            speed,
            angle: 0.0,
            movement: Vec2::ZERO,
            reset_elapsed: 0.0,
        };
        ball.reset(None, bounds, rng);
        ball
    }

    /// Direction in degrees, always in [0, 360)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        self.angle = normalize_degrees(angle);
        let radians = self.angle.to_radians();
        self.movement = Vec2::new(radians.cos(), radians.sin()) * self.speed;
    }

    /// Displacement per tick at game speed 1.0
    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Travelling toward the right half of the circle (angle in [270, 360] or [0, 90])
    fn is_facing_right(&self) -> bool {
        is_between(self.angle, 270.0, 360.0, true) || is_between(self.angle, 0.0, 90.0, true)
    }

    /// Put the ball back in play for `side` to receive, picking a side at random
    /// when none is given.
    pub fn reset<R: Rng>(&mut self, side: Option<PaddleSide>, bounds: RectF, rng: &mut R) {
        let side = side.unwrap_or_else(|| {
            if rng.random_bool(0.5) {
                PaddleSide::Left
            } else {
                PaddleSide::Right
            }
        });

        let (x, min_angle) = match side {
            PaddleSide::Left => (bounds.width * 0.25, BALL_RIGHT_DIRECTION_ANGLE_START),
            PaddleSide::Right => (
                bounds.width * 0.75 - self.hitbox.width,
                BALL_LEFT_DIRECTION_ANGLE_START,
            ),
        };

        self.hitbox.x = x;
        self.hitbox.y = bounds.height / 2.0 - self.hitbox.height / 2.0;

        let random_degrees = rng.random_range(0..BALL_ANGLE_RANGE as u32) as f32;
        self.set_angle(min_angle + random_degrees);

        self.is_resetting = true;
        self.reset_elapsed = 0.0;
    }

    /// Advance one tick. Does nothing unless a match is in progress.
    pub fn update(&mut self, dt: f32, info: &GameInfo) {
        if !info.is_in_progress() {
            return;
        }

        if self.is_resetting {
            self.reset_elapsed += dt;
            if self.reset_elapsed < BALL_RESET_DELAY {
                return;
            }
            self.is_resetting = false;
            self.reset_elapsed = 0.0;
        }

        self.hitbox.offset(self.movement * info.speed);
    }

    /// Bounce off a paddle. The further the ball's center is from the paddle's
    /// center, the steeper the return angle.
    pub fn on_paddle_collision(&mut self, side: PaddleSide, paddle: RectF, ctx: &mut TickContext) {
        // Already heading away: this hit was handled on an earlier tick
        match side {
            PaddleSide::Left if self.is_facing_right() => return,
            PaddleSide::Right if is_between(self.angle, 90.0, 270.0, true) => return,
            _ => {}
        }

        let degrees_per_pixel = BALL_ANGLE_RANGE / paddle.height;
        let offset = self.hitbox.center().y - paddle.center().y;

        let angle = match side {
            PaddleSide::Left => {
                BALL_RIGHT_DIRECTION_ANGLE_START
                    + BALL_ANGLE_RANGE / 2.0
                    + offset * degrees_per_pixel
            }
            PaddleSide::Right => {
                BALL_LEFT_DIRECTION_ANGLE_START + BALL_ANGLE_RANGE / 2.0
                    - offset * degrees_per_pixel
            }
        };
        self.set_angle(angle);

        ctx.play(SoundEffect::BallPaddleHit);
    }

    /// Score when the ball has fully left through a side, bounce off the
    /// top and bottom edges otherwise.
    pub fn on_bounds_collision(&mut self, out_of_bounds: Vec2, ctx: &mut TickContext) {
        if out_of_bounds.y == 0.0 {
            if out_of_bounds.x.abs() < self.hitbox.width {
                return;
            }

            ctx.play(SoundEffect::BallReset);

            let scorer = if out_of_bounds.x < 0.0 {
                PaddleSide::Right
            } else {
                PaddleSide::Left
            };
            ctx.award_point(scorer);

            let bounds = ctx.info.bounds;
            self.reset(Some(scorer), bounds, &mut ctx.rng);
            return;
        }

        let bounce_top = out_of_bounds.y < 0.0 && is_between(self.angle, 180.0, 360.0, false);
        let bounce_bottom = out_of_bounds.y > 0.0 && is_between(self.angle, 0.0, 180.0, false);

        if bounce_top || bounce_bottom {
            let reflected = (-self.movement.y).atan2(self.movement.x);
            self.set_angle(reflected.to_degrees());
            ctx.play(SoundEffect::BallEdgeHit);
        }
    }
}
