//! Donker Pong entry point
//!
//! Headless runner: loads the player's settings, plays one AI-vs-AI match at
//! the fixed timestep and logs what happens. Drawing and menus are left to a
//! frontend.
//!
//! Usage: `donker-pong [settings.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use donker_pong::audio::{AudioManager, LogSfxPlayer};
    use donker_pong::consts::*;
    use donker_pong::input::InputManager;
    use donker_pong::persistence::JsonFileStorage;
    use donker_pong::sim::{GameEvent, GamePhase, GameSession, PaddleKind};
    use donker_pong::{GameSettings, SettingsManager};

    /// Upper bound on match length when no limit is configured
    const FALLBACK_TIME_LIMIT_SECS: f32 = 120.0;
    /// Hard stop so a misconfigured match can't run forever
    const MAX_TICKS: u64 = 60 * 60 * 60;

    fn default_settings_path() -> PathBuf {
        match std::env::var_os("HOME") {
            Some(home) => PathBuf::from(home)
                .join(".config")
                .join("donker-pong")
                .join("settings.json"),
            None => PathBuf::from("settings.json"),
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        log::info!("Donker Pong (headless) starting...");

        let mut args = std::env::args().skip(1);
        let path = args
            .next()
            .map(PathBuf::from)
            .unwrap_or_else(default_settings_path);
        let seed = match args.next().map(|s| s.parse::<u64>()) {
            Some(Ok(seed)) => seed,
            Some(Err(e)) => {
                log::error!("Invalid seed: {e}");
                return ExitCode::FAILURE;
            }
            None => 12345,
        };

        let storage = match JsonFileStorage::new(&path) {
            Ok(storage) => storage,
            Err(e) => {
                log::error!("Cannot use settings file {}: {e}", path.display());
                return ExitCode::FAILURE;
            }
        };

        let mut settings_manager = SettingsManager::new(storage, Vec::new());
        let changes = settings_manager.initialize();
        let settings = settings_manager.settings();

        let mut audio = AudioManager::new(LogSfxPlayer);
        audio.apply_settings(&settings.audio, changes);

        let mut session = GameSession::new(match_settings(&settings), seed);
        let input = InputManager::new();

        session.set_phase(GamePhase::InMenu);
        session.set_phase(GamePhase::InProgress);

        let mut ticks = 0u64;
        while session.phase() == GamePhase::InProgress && ticks < MAX_TICKS {
            // One fixed step per frame
            session.handle_input(&input);
            session.tick(&input, SIM_DT);
            ticks += 1;

            let events: Vec<GameEvent> = session.drain_events().collect();
            for event in &events {
                audio.handle_event(event);
                if let GameEvent::ScoreChanged { left, right, .. } = event {
                    log::debug!("[{:>6.1}s] score {left} - {right}", session.match_elapsed());
                }
            }
        }

        let info = session.info();
        log::info!(
            "Match over after {ticks} ticks ({:.1}s): {} - {}",
            session.match_elapsed(),
            info.left_score,
            info.right_score
        );
        println!("{} - {}", info.left_score, info.right_score);
        ExitCode::SUCCESS
    }

    /// The stored settings with both paddles handed to the AI and a limit
    /// that guarantees the match ends.
    fn match_settings(settings: &GameSettings) -> GameSettings {
        let mut settings = settings.clone();
        settings.gameplay.left_paddle = PaddleKind::BasicAi;
        settings.gameplay.right_paddle = PaddleKind::BasicAi;
        if settings.gameplay.score_limit == 0 && settings.gameplay.time_limit_secs == 0.0 {
            settings.gameplay.time_limit_secs = FALLBACK_TIME_LIMIT_SECS;
        }
        settings
    }
}
