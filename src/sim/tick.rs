//! Fixed timestep simulation tick
//!
//! `GameSession` owns the registry and the match status and advances them one
//! tick at a time: actor updates, the collision sweep, then the end-of-match
//! checks and the speed ramp. Hotkeys are read once per frame through
//! `handle_input`, since a frame may run any number of ticks.

use super::actor::{Actor, UpdateFrame};
use super::registry::{ActorRegistry, RegistryCommand};
use super::state::{GameEvent, GameInfo, GamePhase, PaddleSide, TickContext};
use super::sweep::run_collision_sweep;
use crate::consts::*;
use crate::input::{InputManager, Key};
use crate::settings::{GameSettings, SettingsChanges};

pub struct GameSession {
    settings: GameSettings,
    ctx: TickContext,
    registry: ActorRegistry<Actor>,
    seed: u64,
    /// Seconds of in-progress play this match
    match_elapsed: f32,
    /// Seconds since the game speed last went up
    speed_elapsed: f32,
}

impl GameSession {
    pub fn new(settings: GameSettings, seed: u64) -> Self {
        let mut session = Self {
            settings: GameSettings::default(),
            ctx: TickContext::new(GameInfo::default(), seed),
            registry: ActorRegistry::new(),
            seed,
            match_elapsed: 0.0,
            speed_elapsed: 0.0,
        };
        session.apply_settings(settings, SettingsChanges::ALL);
        session
    }

    pub fn info(&self) -> &GameInfo {
        &self.ctx.info
    }

    pub fn phase(&self) -> GamePhase {
        self.ctx.info.phase
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn actors(&self) -> &ActorRegistry<Actor> {
        &self.registry
    }

    pub fn match_elapsed(&self) -> f32 {
        self.match_elapsed
    }

    /// Take the events queued since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.ctx.events.drain(..)
    }

    /// Take over freshly applied settings. The world is rescaled to the new
    /// aspect ratio when the video settings changed; height stays fixed.
    ///
    /// Out-of-range values are clamped first, so a match never starts without
    /// a ball or with a NaN speed.
    pub fn apply_settings(&mut self, mut settings: GameSettings, changes: SettingsChanges) {
        settings.sanitize(&[]);

        let resolution = settings.video.resolution;
        if changes.video_changed && resolution.x > 0.0 && resolution.y > 0.0 {
            let info = &mut self.ctx.info;
            info.bounds.width = (resolution.x / resolution.y) * info.bounds.height;
            info.scale = resolution.y / info.bounds.height;
            log::debug!(
                "World bounds {}x{} at scale {}",
                info.bounds.width,
                info.bounds.height,
                info.scale
            );
        }
        self.settings = settings;
    }

    /// Switch phase. Entering `InProgress` from the menu (or earlier) starts a
    /// new match; resuming from `Paused` does not.
    pub fn set_phase(&mut self, phase: GamePhase) {
        let Some(previous) = self.ctx.set_phase(phase) else {
            return;
        };

        if phase == GamePhase::InProgress && previous < GamePhase::InProgress {
            self.start_match();
        }
    }

    fn start_match(&mut self) {
        let gameplay = &self.settings.gameplay;
        let bounds = self.ctx.info.bounds;

        log::info!(
            "Starting match: {} vs {}, {} ball(s), seed {}",
            gameplay.left_paddle.as_str(),
            gameplay.right_paddle.as_str(),
            gameplay.ball_count,
            self.seed
        );

        let lineup = [
            Actor::new_paddle(gameplay.left_paddle, PaddleSide::Left, bounds),
            Actor::new_paddle(gameplay.right_paddle, PaddleSide::Right, bounds),
        ];
        self.ctx.deferred.push(RegistryCommand::Clear);
        self.ctx
            .deferred
            .extend(lineup.into_iter().map(RegistryCommand::Add));
        for _ in 0..gameplay.ball_count {
            let ball = Actor::new_ball(&mut self.ctx);
            self.ctx.deferred.push(RegistryCommand::Add(ball));
        }
        self.apply_deferred();

        self.ctx.reset_scores();
        self.ctx.info.speed = self.settings.gameplay.game_speed;
        self.match_elapsed = 0.0;
        self.speed_elapsed = 0.0;
    }

    fn apply_deferred(&mut self) {
        let commands = std::mem::take(&mut self.ctx.deferred);
        self.registry.apply(commands);
    }

    /// Advance the game by one fixed timestep. `input` is only read for held
    /// keys; call `handle_input` once per frame for the hotkeys.
    pub fn tick(&mut self, input: &InputManager, dt: f32) {
        if !self.ctx.info.is_in_progress() {
            return;
        }

        self.update_actors(input, dt);

        run_collision_sweep(self.registry.all_mut(), self.ctx.info.bounds, &mut self.ctx);
        self.apply_deferred();

        if self.check_score_limit() || self.check_time_limit(dt) {
            return;
        }

        self.ramp_speed(dt);
    }

    /// Pause, resume and leave the match on newly pressed keys. Call once per
    /// frame, after `InputManager::update`.
    pub fn handle_input(&mut self, input: &InputManager) {
        let escape = input.is_new_key_down(Key::Escape);
        let (key, next) = match self.ctx.info.phase {
            GamePhase::InProgress if escape => (Key::Escape, GamePhase::Paused),
            GamePhase::Paused if escape => (Key::Escape, GamePhase::InProgress),
            GamePhase::Paused if input.is_new_key_down(Key::E) => (Key::E, GamePhase::InMenu),
            GamePhase::Ended if escape => (Key::Escape, GamePhase::InMenu),
            _ => return,
        };
        log::debug!("{} pressed, switching to {:?}", key.as_str(), next);
        self.set_phase(next);
    }

    /// Update every actor in registry order. Each one sees the others as
    /// they are at that moment, including updates made earlier this tick.
    fn update_actors(&mut self, input: &InputManager, dt: f32) {
        let frame = UpdateFrame {
            dt,
            info: &self.ctx.info,
            input,
            controls: &self.settings.controls,
        };

        let actors = self.registry.all_mut();
        for i in 0..actors.len() {
            let (before, rest) = actors.split_at_mut(i);
            let Some((current, after)) = rest.split_first_mut() else {
                continue;
            };
            current.update(&frame, before.iter().chain(after.iter()));
        }
    }

    fn check_score_limit(&mut self) -> bool {
        let Ok(limit) = u32::try_from(self.settings.gameplay.score_limit) else {
            return false;
        };
        let info = &self.ctx.info;
        if limit == 0 || (info.left_score < limit && info.right_score < limit) {
            return false;
        }

        log::info!(
            "Score limit reached ({} - {})",
            info.left_score,
            info.right_score
        );
        self.set_phase(GamePhase::Ended);
        true
    }

    fn check_time_limit(&mut self, dt: f32) -> bool {
        self.match_elapsed += dt;

        let limit = self.settings.gameplay.time_limit_secs;
        if limit <= 0.0 || self.match_elapsed < limit {
            return false;
        }

        log::info!("Time limit of {limit}s reached");
        self.set_phase(GamePhase::Ended);
        true
    }

    fn ramp_speed(&mut self, dt: f32) {
        if !self.settings.gameplay.auto_increase_speed || self.ctx.info.speed >= GAME_SPEED_MAX {
            return;
        }

        self.speed_elapsed += dt;
        if self.speed_elapsed >= GAME_SPEED_INCREASE_INTERVAL {
            self.speed_elapsed = 0.0;
            self.ctx.info.speed = (self.ctx.info.speed + GAME_SPEED_INCREASE_FACTOR).min(GAME_SPEED_MAX);
            log::debug!("Game speed increased to {}", self.ctx.info.speed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyboardState;
    use crate::sim::PaddleKind;
    use crate::sim::collision::BoxCollider;
    use crate::sim::rect::RectF;
    use glam::Vec2;

    fn ai_settings() -> GameSettings {
        let mut settings = GameSettings::default();
        settings.gameplay.left_paddle = PaddleKind::BasicAi;
        settings.gameplay.right_paddle = PaddleKind::BasicAi;
        settings
    }

    fn press(input: &mut InputManager, keys: &[Key]) {
        input.update(keys.iter().copied().collect());
    }

    fn hitboxes(session: &GameSession) -> Vec<RectF> {
        session.actors().iter().map(BoxCollider::hitbox).collect()
    }

    #[test]
    fn test_new_match_lineup() {
        let mut settings = ai_settings();
        settings.gameplay.ball_count = 2;
        settings.gameplay.game_speed = 1.5;
        let mut session = GameSession::new(settings, 1);
        assert!(session.actors().is_empty());

        session.set_phase(GamePhase::InMenu);
        session.set_phase(GamePhase::InProgress);

        let actors = session.actors().all();
        assert_eq!(actors.len(), 4);
        assert_eq!(actors[0].as_paddle().unwrap().side, PaddleSide::Left);
        assert_eq!(actors[1].as_paddle().unwrap().side, PaddleSide::Right);
        assert_eq!(actors[1].as_paddle().unwrap().kind, PaddleKind::BasicAi);
        assert!(actors[2].as_ball().unwrap().is_resetting);
        assert!(actors[3].as_ball().is_some());
        assert_eq!(session.info().speed, 1.5);

        let events: Vec<_> = session.drain_events().collect();
        assert!(events.contains(&GameEvent::PhaseChanged {
            previous: GamePhase::InMenu,
            current: GamePhase::InProgress,
        }));
        assert!(matches!(events.last(), Some(GameEvent::ScoreChanged { left: 0, right: 0, .. })));
    }

    #[test]
    fn test_pause_and_resume_keep_the_match() {
        let mut session = GameSession::new(ai_settings(), 2);
        let mut input = InputManager::new();
        session.set_phase(GamePhase::InProgress);
        for _ in 0..200 {
            session.tick(&input, SIM_DT);
        }
        let before = hitboxes(&session);

        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        session.tick(&input, SIM_DT);
        assert_eq!(session.phase(), GamePhase::Paused);

        // Escape still held next frame is not a new press
        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        session.tick(&input, SIM_DT);
        assert_eq!(session.phase(), GamePhase::Paused);
        assert_eq!(hitboxes(&session), before);

        press(&mut input, &[]);
        session.handle_input(&input);
        session.tick(&input, SIM_DT);
        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        assert_eq!(session.phase(), GamePhase::InProgress);
        assert_eq!(session.actors().len(), before.len());
        assert_eq!(hitboxes(&session), before);
    }

    #[test]
    fn test_one_press_pauses_across_many_ticks() {
        let mut session = GameSession::new(ai_settings(), 2);
        let mut input = InputManager::new();
        session.set_phase(GamePhase::InProgress);
        for _ in 0..50 {
            session.tick(&input, SIM_DT);
        }
        let before = hitboxes(&session);

        // One frame with a single press, running several fixed steps
        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        let phases: Vec<_> = (0..4)
            .map(|_| {
                session.tick(&input, SIM_DT);
                session.phase()
            })
            .collect();

        assert_eq!(phases, vec![GamePhase::Paused; 4]);
        assert_eq!(hitboxes(&session), before);
    }

    #[test]
    fn test_tick_ignores_hotkeys() {
        let mut session = GameSession::new(ai_settings(), 2);
        let mut input = InputManager::new();
        session.set_phase(GamePhase::InProgress);

        press(&mut input, &[Key::Escape]);
        for _ in 0..3 {
            session.tick(&input, SIM_DT);
        }
        assert_eq!(session.phase(), GamePhase::InProgress);
    }

    #[test]
    fn test_menu_hotkeys() {
        let mut session = GameSession::new(ai_settings(), 3);
        let mut input = InputManager::new();
        session.set_phase(GamePhase::Paused);

        press(&mut input, &[Key::E]);
        session.handle_input(&input);
        assert_eq!(session.phase(), GamePhase::InMenu);

        session.set_phase(GamePhase::Ended);
        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        assert_eq!(session.phase(), GamePhase::InMenu);

        // Escape in the menu is left to the host
        press(&mut input, &[]);
        session.handle_input(&input);
        press(&mut input, &[Key::Escape]);
        session.handle_input(&input);
        assert_eq!(session.phase(), GamePhase::InMenu);
    }

    #[test]
    fn test_score_limit_ends_match() {
        let mut settings = GameSettings::default();
        settings.gameplay.score_limit = 1;
        let mut session = GameSession::new(settings, 4);
        session.set_phase(GamePhase::InProgress);

        if let Actor::Ball(ball) = &mut session.registry.all_mut()[2] {
            ball.is_resetting = false;
            ball.set_angle(0.0);
            ball.hitbox.x = 1100.0;
        }
        session.tick(&InputManager::new(), SIM_DT);

        assert_eq!(session.info().left_score, 1);
        assert_eq!(session.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_time_limit_ends_match() {
        let mut settings = GameSettings::default();
        settings.gameplay.time_limit_secs = 1.0;
        let mut session = GameSession::new(settings, 5);
        let input = InputManager::new();
        session.set_phase(GamePhase::InProgress);

        session.tick(&input, 0.5);
        assert_eq!(session.phase(), GamePhase::InProgress);
        session.tick(&input, 0.5);
        assert_eq!(session.phase(), GamePhase::Ended);

        // Nothing moves once ended
        let before = hitboxes(&session);
        session.tick(&input, 0.5);
        assert_eq!(hitboxes(&session), before);
    }

    #[test]
    fn test_speed_ramp() {
        let mut settings = GameSettings::default();
        settings.gameplay.auto_increase_speed = true;
        settings.gameplay.score_limit = 0;
        let mut session = GameSession::new(settings, 6);
        let input = InputManager::new();
        session.set_phase(GamePhase::InProgress);

        session.tick(&input, 29.0);
        assert_eq!(session.info().speed, GAME_SPEED_MIN);
        session.tick(&input, 1.0);
        assert!((session.info().speed - 1.1).abs() < 1e-5);

        for _ in 0..20 {
            session.tick(&input, GAME_SPEED_INCREASE_INTERVAL);
        }
        assert_eq!(session.info().speed, GAME_SPEED_MAX);
    }

    #[test]
    fn test_speed_ramp_off_by_default() {
        let mut session = GameSession::new(GameSettings::default(), 7);
        session.set_phase(GamePhase::InProgress);
        session.tick(&InputManager::new(), 100.0);
        assert_eq!(session.info().speed, GAME_SPEED_MIN);
    }

    #[test]
    fn test_settings_are_clamped_on_entry() {
        let mut settings = ai_settings();
        settings.gameplay.ball_count = 0;
        settings.gameplay.game_speed = f32::NAN;
        let mut session = GameSession::new(settings, 11);
        assert_eq!(session.settings().gameplay.ball_count, BALL_MIN_COUNT);

        session.set_phase(GamePhase::InProgress);
        let balls = session.actors().iter().filter_map(Actor::as_ball).count();
        assert_eq!(balls, 1);
        assert_eq!(session.actors().len(), 3);
        assert_eq!(session.info().speed, GAME_SPEED_MIN);

        let mut settings = ai_settings();
        settings.gameplay.ball_count = 9;
        settings.gameplay.game_speed = 7.0;
        session.apply_settings(settings, SettingsChanges::default());
        assert_eq!(session.settings().gameplay.ball_count, BALL_MAX_COUNT);
        assert_eq!(session.settings().gameplay.game_speed, GAME_SPEED_MAX);
    }

    #[test]
    fn test_commands_queued_mid_tick_apply_after_the_sweep() {
        let mut session = GameSession::new(ai_settings(), 12);
        let input = InputManager::new();
        session.set_phase(GamePhase::InProgress);
        session.tick(&input, SIM_DT);
        let before = hitboxes(&session);

        // Same queue a collision reaction pushes onto during the sweep
        let mut extra = Actor::new_ball(&mut session.ctx);
        if let Actor::Ball(ball) = &mut extra {
            ball.is_resetting = false;
            ball.set_angle(0.0);
            // Far outside the bounds: a sweep would score it and reset it
            ball.hitbox.x = 5000.0;
        }
        let spawned_at = extra.hitbox();
        session.ctx.deferred.push(RegistryCommand::Add(extra));
        assert_eq!(session.actors().len(), before.len());

        session.tick(&input, SIM_DT);

        let actors = session.actors().all();
        assert_eq!(actors.len(), before.len() + 1);
        let added = actors[before.len()].as_ball().unwrap();
        assert_eq!(added.hitbox, spawned_at);
        assert!(!added.is_resetting);
        assert_eq!(session.info().left_score, 0);
        assert!(session.ctx.deferred.is_empty());

        // From the next tick on it takes part like any other actor
        session.tick(&input, SIM_DT);
        assert_eq!(session.info().left_score, 1);
    }

    #[test]
    fn test_video_change_rescales_world() {
        let mut session = GameSession::new(GameSettings::default(), 8);
        assert_eq!(session.info().bounds, DEFAULT_BOUNDS);
        assert_eq!(session.info().scale, 1.0);

        let mut settings = GameSettings::default();
        settings.video.resolution = Vec2::new(1920.0, 1080.0);
        let changes = SettingsChanges {
            video_changed: true,
            ..Default::default()
        };
        session.apply_settings(settings, changes);

        let info = session.info();
        assert_eq!(info.bounds.height, 768.0);
        assert!((info.bounds.width - 1920.0 / 1080.0 * 768.0).abs() < 1e-3);
        assert_eq!(info.scale, 1080.0 / 768.0);
    }

    #[test]
    fn test_player_paddle_follows_keys() {
        let mut session = GameSession::new(GameSettings::default(), 9);
        let mut input = InputManager::new();
        session.set_phase(GamePhase::InProgress);

        input.update(KeyboardState::from_iter([Key::S, Key::Up]));
        session.tick(&input, SIM_DT);

        let actors = session.actors().all();
        assert_eq!(actors[0].hitbox().y, 336.0 + PADDLE_SPEED);
        assert_eq!(actors[1].hitbox().y, 336.0 - PADDLE_SPEED);
    }

    #[test]
    fn test_ai_match_scores_and_stays_in_bounds() {
        let mut settings = ai_settings();
        settings.gameplay.ball_count = 2;
        settings.gameplay.score_limit = 0;
        let mut session = GameSession::new(settings, 10);
        let input = InputManager::new();
        session.set_phase(GamePhase::InProgress);

        for _ in 0..60 * 60 * 3 {
            session.tick(&input, SIM_DT);
            for actor in session.actors() {
                if let Some(paddle) = actor.as_paddle() {
                    assert!(paddle.hitbox.top() >= 24.0 - PADDLE_SPEED);
                    assert!(paddle.hitbox.bottom() <= 768.0 - 24.0 + PADDLE_SPEED);
                }
            }
        }

        let info = session.info();
        assert!(info.left_score + info.right_score > 0);
        assert_eq!(session.actors().len(), 4);
    }

    #[test]
    fn test_determinism() {
        // Same seed, same inputs, same match
        let mut settings = ai_settings();
        settings.gameplay.ball_count = 2;
        let mut session1 = GameSession::new(settings.clone(), 99999);
        let mut session2 = GameSession::new(settings, 99999);
        let input = InputManager::new();

        session1.set_phase(GamePhase::InProgress);
        session2.set_phase(GamePhase::InProgress);
        for _ in 0..5000 {
            session1.tick(&input, SIM_DT);
            session2.tick(&input, SIM_DT);
        }

        assert_eq!(hitboxes(&session1), hitboxes(&session2));
        assert_eq!(session1.info().left_score, session2.info().left_score);
        assert_eq!(session1.info().right_score, session2.info().right_score);
        assert_eq!(session1.phase(), session2.phase());
    }
}
