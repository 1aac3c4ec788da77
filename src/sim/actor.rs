//! Everything that lives in the registry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::collision::BoxCollider;
use super::paddle::{Paddle, PaddleKind};
use super::rect::RectF;
use super::state::{GameInfo, PaddleSide, TickContext};
use crate::consts::*;
use crate::input::KeyInput;
use crate::settings::ControlSettings;

/// Read-only inputs for one round of actor updates
pub struct UpdateFrame<'a> {
    pub dt: f32,
    pub info: &'a GameInfo,
    pub input: &'a dyn KeyInput,
    pub controls: &'a ControlSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Actor {
    Ball(Ball),
    Paddle(Paddle),
}

impl Actor {
    /// A ball with default size and speed, served toward a random side
    pub fn new_ball(ctx: &mut TickContext) -> Self {
        let bounds = ctx.info.bounds;
        Actor::Ball(Ball::new(
            BALL_SIZE,
            BALL_BOUNDS_PADDING,
            BALL_SPEED,
            bounds,
            &mut ctx.rng,
        ))
    }

    /// A paddle with default size and speed
    pub fn new_paddle(kind: PaddleKind, side: PaddleSide, bounds: RectF) -> Self {
        Actor::Paddle(Paddle::new(
            kind,
            side,
            PADDLE_SIZE,
            PADDLE_BOUNDS_PADDING,
            PADDLE_SPEED,
            bounds,
        ))
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match self {
            Actor::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match self {
            Actor::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    /// Advance one tick. `others` is every other actor in the registry.
    pub fn update<'a, I>(&mut self, frame: &UpdateFrame<'_>, others: I)
    where
        I: IntoIterator<Item = &'a Actor>,
    {
        match self {
            Actor::Ball(ball) => ball.update(frame.dt, frame.info),
            Actor::Paddle(paddle) => match paddle.kind {
                PaddleKind::Player => {
                    let controls = frame.controls.for_side(paddle.side);
                    paddle.update_player(frame.input, controls, frame.info);
                }
                PaddleKind::BasicAi => {
                    let balls = others.into_iter().filter_map(Actor::as_ball);
                    paddle.update_ai(balls, frame.info);
                }
            },
        }
    }
}

impl BoxCollider for Actor {
    type Context = TickContext;

    fn hitbox(&self) -> RectF {
        match self {
            Actor::Ball(ball) => ball.hitbox,
            Actor::Paddle(paddle) => paddle.hitbox,
        }
    }

    fn bounds_padding(&self) -> Vec2 {
        match self {
            Actor::Ball(ball) => ball.bounds_padding,
            Actor::Paddle(paddle) => paddle.bounds_padding,
        }
    }

    fn on_collider_collision(&mut self, other: &Actor, _intersection: Vec2, ctx: &mut TickContext) {
        // Balls only react to paddles; paddles don't react at all
        if let (Actor::Ball(ball), Actor::Paddle(paddle)) = (self, other) {
            ball.on_paddle_collision(paddle.side, paddle.hitbox, ctx);
        }
    }

    fn on_bounds_collision(&mut self, out_of_bounds: Vec2, ctx: &mut TickContext) {
        match self {
            Actor::Ball(ball) => ball.on_bounds_collision(out_of_bounds, ctx),
            Actor::Paddle(paddle) => paddle.on_bounds_collision(out_of_bounds),
        }
    }
}
