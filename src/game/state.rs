use color_eyre::eyre::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::{debug, info};

use crate::game::{
    bird::Bird,
    input::{route, GameInput, Transition},
    obstacle::ObstacleStream,
    render::{Renderer, Scene},
    settings::GameSettings,
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    Playing,
    GameOver,
}

/// Everything one game session owns. Only [`GameState::tick`] advances time.
#[derive(Debug, Clone)]
pub struct GameState {
    settings: GameSettings,
    phase: Phase,
    bird: Bird,
    obstacles: ObstacleStream,
    frame_count: u64,
    score: u64,
    rng: StdRng,
}

impl GameState {
    pub fn new(settings: GameSettings) -> Result<Self> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Same as [`GameState::new`] but with reproducible obstacle placement.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, rng: StdRng) -> Result<Self> {
        settings.validate()?;
        Ok(GameState {
            bird: Bird::new(&settings),
            obstacles: ObstacleStream::new(&settings),
            settings,
            phase: Phase::NotStarted,
            frame_count: 0,
            score: 0,
            rng,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[cfg(test)]
    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    #[cfg(test)]
    pub fn obstacles(&self) -> &ObstacleStream {
        &self.obstacles
    }

    #[cfg(test)]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn handle_input(&mut self, input: GameInput) {
        match route(input, self.phase) {
            Transition::Ignore => {},
            Transition::Start => self.start(),
            Transition::Restart => self.restart(),
            Transition::Flap => self.bird.flap(),
        }
    }

    fn start(&mut self) {
        info!("Game started");
        self.phase = Phase::Playing;
    }

    /// Puts every entity and counter back to its initial value and resumes play.
    pub fn restart(&mut self) {
        info!(score = self.score, "Restarting game");
        self.bird.reset();
        self.obstacles.reset();
        self.frame_count = 0;
        self.score = 0;
        self.phase = Phase::Playing;
    }

    /// Runs one frame of simulation. Outside [`Phase::Playing`] nothing moves.
    pub fn tick(&mut self) -> Phase {
        if self.phase != Phase::Playing {
            return self.phase;
        }

        let grounded = self.bird.update();

        self.obstacles.try_spawn(self.frame_count, self.settings.spawn_interval, &mut self.rng);
        let retired = self.obstacles.advance_and_cull(self.settings.scroll_speed);
        if retired > 0 {
            self.score += retired;
            debug!(score = self.score, "Obstacle cleared");
        }
        let hit = self.obstacles.collides_with(&self.bird);

        self.frame_count += 1;

        if grounded || hit {
            self.end(if hit { "obstacle" } else { "ground" });
        }
        self.phase
    }

    fn end(&mut self, cause: &str) {
        if self.phase == Phase::Playing {
            info!(score = self.score, frames = self.frame_count, cause, "Game over");
            self.phase = Phase::GameOver;
        }
    }

    pub fn scene(&self) -> Scene<'_> {
        Scene {
            phase: self.phase,
            bird: &self.bird,
            obstacles: &self.obstacles,
            score: self.score,
            settings: &self.settings,
        }
    }

    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<()> {
        renderer.draw(&self.scene())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::game::{object::Object, settings::GameSettingsBuilder};

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<(Phase, u64, usize)>,
    }

    impl Renderer for RecordingRenderer {
        fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
            self.frames.push((scene.phase, scene.score, scene.obstacles.len()));
            Ok(())
        }
    }

    fn weightless() -> GameSettings {
        GameSettingsBuilder::default().gravity(0.0).build().unwrap()
    }

    fn assert_fresh(state: &GameState) {
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.frame_count(), 0);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.bird(), &Bird::new(state.settings()));
    }

    #[test]
    fn test_invalid_settings_fail_fast() {
        let settings = GameSettingsBuilder::default().gap(500.0).build().unwrap();
        assert!(GameState::new(settings).is_err());
    }

    #[test]
    fn test_unplayable_settings_never_reach_a_tick() {
        let infinite: GameSettings = serde_yaml::from_str("height: .inf").unwrap();
        assert!(GameState::with_seed(infinite, 0).is_err());

        let too_fast = GameSettingsBuilder::default().scroll_speed(400.0).build().unwrap();
        assert!(GameState::with_seed(too_fast, 0).is_err());
    }

    #[test]
    fn test_fastest_scroll_keeps_new_obstacle_for_a_frame() {
        let settings = GameSettingsBuilder::default().gravity(0.0).scroll_speed(359.0).build().unwrap();
        let mut state = GameState::with_seed(settings, 2).unwrap();
        state.handle_input(GameInput::Click);

        state.tick();
        assert_eq!(state.score(), 0);
        assert_eq!(state.obstacles().len(), 1);
        state.tick();
        assert_eq!(state.score(), 1);
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let mut state = GameState::with_seed(GameSettings::default(), 0).unwrap();
        for _ in 0..10 {
            assert_eq!(state.tick(), Phase::NotStarted);
        }
        assert_eq!(state.frame_count(), 0);
        assert!(state.obstacles().is_empty());
        assert_eq!(state.bird().top(), 240.0);
    }

    #[test]
    fn test_flap_key_does_not_start() {
        let mut state = GameState::with_seed(GameSettings::default(), 0).unwrap();
        state.handle_input(GameInput::Flap);
        assert_eq!(state.phase(), Phase::NotStarted);
        assert_eq!(state.bird().velocity(), 0.0);

        state.handle_input(GameInput::Click);
        assert_eq!(state.phase(), Phase::Playing);
        state.handle_input(GameInput::Click);
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_falls_to_game_over_then_restarts() {
        let mut state = GameState::with_seed(GameSettings::default(), 3).unwrap();
        state.handle_input(GameInput::Click);
        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.score(), 0);

        for _ in 0..120 {
            state.tick();
        }
        assert_eq!(state.phase(), Phase::GameOver);
        assert_eq!(state.bird().bottom(), state.settings().ground_y());

        // Frozen once over.
        let frames = state.frame_count();
        state.tick();
        assert_eq!(state.frame_count(), frames);

        state.handle_input(GameInput::Click);
        assert_fresh(&state);
    }

    #[test]
    fn test_flap_key_restarts_after_game_over() {
        let mut state = GameState::with_seed(GameSettings::default(), 3).unwrap();
        state.handle_input(GameInput::Click);
        while state.tick() == Phase::Playing {}

        state.handle_input(GameInput::Flap);
        assert_fresh(&state);
    }

    #[test]
    fn test_flap_while_playing() {
        let mut state = GameState::with_seed(GameSettings::default(), 0).unwrap();
        state.handle_input(GameInput::Click);
        state.tick();
        state.handle_input(GameInput::Flap);
        assert_eq!(state.bird().velocity(), state.settings().lift);
    }

    #[test]
    fn test_first_obstacle_position_after_interval() {
        let mut state = GameState::with_seed(weightless(), 11).unwrap();
        state.handle_input(GameInput::Click);

        for _ in 0..120 {
            assert_eq!(state.tick(), Phase::Playing);
        }
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.obstacles().front().map(|o| o.left()), Some(320.0 - 240.0));

        state.tick();
        assert_eq!(state.obstacles().len(), 2);
    }

    #[test]
    fn test_score_counts_retired_obstacles() {
        // The gap always covers the hovering bird, so nothing can hit it.
        let settings = GameSettingsBuilder::default().gravity(0.0).gap(300.0).build().unwrap();
        let mut state = GameState::with_seed(settings, 5).unwrap();
        state.handle_input(GameInput::Click);

        for _ in 0..180 {
            state.tick();
        }
        assert_eq!(state.score(), 0);

        assert_eq!(state.tick(), Phase::Playing);
        assert_eq!(state.score(), 1);
        assert_eq!(state.obstacles().len(), 1);
        assert_eq!(state.obstacles().front().map(|o| o.left()), Some(320.0 - 2.0 * 61.0));

        let mut last = state.score();
        for _ in 0..1000 {
            state.tick();
            assert!(state.score() >= last);
            assert!(state.score() - last <= 1);
            last = state.score();
        }
        assert_eq!(state.phase(), Phase::Playing);
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut state = GameState::with_seed(weightless(), 9).unwrap();
        state.handle_input(GameInput::Click);
        for _ in 0..50 {
            state.tick();
        }
        state.restart();
        assert_fresh(&state);
        state.restart();
        assert_fresh(&state);
    }

    #[test]
    fn test_renderer_sees_each_phase() {
        let mut state = GameState::with_seed(GameSettings::default(), 1).unwrap();
        let mut renderer = RecordingRenderer::default();

        state.render(&mut renderer).unwrap();
        state.handle_input(GameInput::Click);
        state.tick();
        state.render(&mut renderer).unwrap();
        while state.tick() == Phase::Playing {}
        state.render(&mut renderer).unwrap();

        assert_eq!(
            renderer.frames,
            vec![(Phase::NotStarted, 0, 0), (Phase::Playing, 0, 1), (Phase::GameOver, 0, 1)]
        );
    }
}
