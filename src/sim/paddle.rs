//! Paddles
//!
//! A paddle only ever moves vertically. Player paddles follow their control
//! scheme, AI paddles chase the most urgent ball heading their way.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::rect::RectF;
use super::state::{GameInfo, PaddleSide};
use crate::consts::*;
use crate::input::KeyInput;
use crate::is_between;
use crate::settings::ControlScheme;

/// What drives a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleKind {
    #[default]
    Player,
    BasicAi,
}

impl PaddleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaddleKind::Player => "Player",
            PaddleKind::BasicAi => "BasicAi",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub hitbox: RectF,
    pub bounds_padding: Vec2,
    pub side: PaddleSide,
    pub kind: PaddleKind,
    /// Pixels per tick at game speed 1.0
    pub speed: f32,
}

impl Paddle {
    /// Create a paddle on `side`, vertically centered in `bounds`.
    ///
    /// Panics if `size.y` is not positive: balls divide by paddle height.
    pub fn new(
        kind: PaddleKind,
        side: PaddleSide,
        size: Vec2,
        bounds_padding: Vec2,
        speed: f32,
        bounds: RectF,
    ) -> Self {
        assert!(size.y > 0.0, "paddle height must be positive, got {}", size.y);

        let x = match side {
            PaddleSide::Left => bounds_padding.x,
            PaddleSide::Right => bounds.right() - bounds_padding.x - size.x,
        };
        let y = bounds.height / 2.0 - size.y / 2.0;

        Self {
            hitbox: RectF::new(x, y, size.x, size.y),
            bounds_padding,
            side,
            kind,
            speed,
        }
    }

    /// Move according to held keys. Up wins if both are held.
    pub fn update_player<I: KeyInput + ?Sized>(
        &mut self,
        input: &I,
        controls: ControlScheme,
        info: &GameInfo,
    ) {
        let move_up = input.is_key_down(controls.move_up);
        let move_down = input.is_key_down(controls.move_down);
        if !move_up && !move_down {
            return;
        }

        let distance = self.speed * info.speed;
        self.hitbox.y += if move_up { -distance } else { distance };
    }

    /// Pick the ball this paddle should go after, if any
    pub fn ai_target<'a, B>(&self, balls: B) -> Option<&'a Ball>
    where
        B: IntoIterator<Item = &'a Ball>,
    {
        let incoming = balls.into_iter().filter(|b| !b.is_resetting);

        // Ties go to the earliest ball in iteration order
        match self.side {
            PaddleSide::Left => incoming
                .filter(|b| {
                    b.hitbox.right() > self.hitbox.left()
                        && is_between(b.angle(), 90.0, 270.0, false)
                })
                .reduce(|best, b| if b.hitbox.left() < best.hitbox.left() { b } else { best }),
            PaddleSide::Right => incoming
                .filter(|b| {
                    b.hitbox.left() < self.hitbox.right()
                        && (is_between(b.angle(), 270.0, 360.0, false)
                            || is_between(b.angle(), 0.0, 90.0, false))
                })
                .reduce(|best, b| if b.hitbox.right() > best.hitbox.right() { b } else { best }),
        }
    }

    /// Move toward the most urgent incoming ball, slower than a player could
    pub fn update_ai<'a, B>(&mut self, balls: B, info: &GameInfo)
    where
        B: IntoIterator<Item = &'a Ball>,
    {
        let Some(ball) = self.ai_target(balls) else {
            return;
        };

        let step = AI_DIFFICULTY_SPEED_FACTOR * self.speed * info.speed;
        let ball = ball.hitbox;

        let distance = if ball.top() < self.hitbox.top() {
            -(self.hitbox.top() - ball.top()).min(step)
        } else if ball.bottom() > self.hitbox.bottom() {
            (ball.bottom() - self.hitbox.bottom()).min(step)
        } else {
            0.0
        };

        self.hitbox.y += distance;
    }

    /// Push back inside the padded bounds
    pub fn on_bounds_collision(&mut self, out_of_bounds: Vec2) {
        self.hitbox.offset(-out_of_bounds);
    }
}
