use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::info;

use super::{Frame, Page};
use crate::{
    action::{Action, GameInput},
    components::playfield::FrameRenderer,
    game::{GameSettings, GameState},
};

/// Hosts one game session for the lifetime of the app.
pub struct GamePage {
    state: GameState,
}

impl GamePage {
    pub fn new(settings: GameSettings, seed: Option<u64>) -> Result<Self> {
        let state = match seed {
            Some(seed) => GameState::with_seed(settings, seed)?,
            None => GameState::new(settings)?,
        };
        Ok(GamePage { state })
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }
}

impl Page for GamePage {
    fn init(&mut self) -> Result<()> {
        info!(phase = %self.state.phase(), "Game page ready");
        Ok(())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Ok(Some(Action::Game(GameInput::Click))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::Tick => {
                self.state.tick();
            },
            Action::Game(input) => {
                let before = self.state.phase();
                self.state.handle_input(input);
                if before != self.state.phase() {
                    info!(%input, from = %before, to = %self.state.phase(), "Phase changed");
                }
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let mut renderer = FrameRenderer::new(f, area);
        self.state.render(&mut renderer)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{game::Phase, tui::Event};

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent { kind, column: 3, row: 4, modifiers: KeyModifiers::empty() }
    }

    #[test]
    fn test_left_click_is_a_click() -> Result<()> {
        let mut page = GamePage::new(GameSettings::default(), Some(0))?;
        let action = page.handle_events(Some(Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Left)))))?;
        assert_eq!(action, Some(Action::Game(GameInput::Click)));

        let action = page.handle_events(Some(Event::Mouse(mouse(MouseEventKind::Down(MouseButton::Right)))))?;
        assert_eq!(action, None);
        let action = page.handle_events(Some(Event::Mouse(mouse(MouseEventKind::Up(MouseButton::Left)))))?;
        assert_eq!(action, None);
        Ok(())
    }

    #[test]
    fn test_actions_drive_the_game() -> Result<()> {
        let mut page = GamePage::new(GameSettings::default(), Some(0))?;
        page.update(Action::Tick)?;
        assert_eq!(page.state().frame_count(), 0);

        page.update(Action::Game(GameInput::Click))?;
        assert_eq!(page.state().phase(), Phase::Playing);

        page.update(Action::Tick)?;
        page.update(Action::Render)?;
        assert_eq!(page.state().frame_count(), 1);
        Ok(())
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let settings = GameSettings { spawn_interval: 0, ..GameSettings::default() };
        assert!(GamePage::new(settings, None).is_err());
    }
}
