use color_eyre::eyre::{ensure, Result};
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::Action,
    components::help::Help,
    config::Config,
    constants::{HEIGHT, TITLE_TEXT, WIDTH},
    pages::{game::GamePage, Page},
    tui,
};

pub struct App {
    config: Config,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    game: GamePage,
}

impl App {
    pub fn new(frame_rate: f64, seed: Option<u64>) -> Result<Self> {
        ensure!(frame_rate.is_finite() && frame_rate > 0.0, "frame rate must be positive, got {frame_rate}");
        let config = Config::new()?;
        let game = GamePage::new(config.game, seed)?;

        Ok(Self { config, frame_rate, should_quit: false, should_suspend: false, show_help: false, game })
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?.mouse(true);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        self.game.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    // One tick per displayed frame.
                    tui::Event::Frame => {
                        action_tx.send(Action::Tick)?;
                        action_tx.send(Action::Render)?;
                    },
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = self.config.keybindings.action_for(&key) {
                            log::info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
                if let Some(action) = self.game.handle_events(Some(e))? {
                    action_tx.send(action)?;
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    log::debug!("{action:?}");
                }
                match action {
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::ToggleShowHelp => self.show_help = !self.show_help,
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Render => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    Action::Error(ref msg) => {
                        log::error!("{msg}");
                    },
                    _ => {},
                }
                // The help overlay pauses the game.
                if !self.show_help {
                    if let Some(action) = self.game.update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?.mouse(true);
                tui.frame_rate(self.frame_rate);
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

            let border = Block::default()
                .title(format!(" {TITLE_TEXT} "))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().bg(Color::Black));
            f.render_widget(border, area);

            let area = area.inner(Margin { horizontal: 1, vertical: 1 });

            if let Err(e) = self.game.draw(f, area) {
                let _ = action_tx.send(Action::Error(format!("Failed to draw: {:?}", e)));
            }

            if self.show_help {
                let help = Help::new(vec![
                    ("System".to_string(), &self.config.keybindings.global),
                    ("Game".to_string(), &self.config.keybindings.game),
                ]);
                f.render_widget(help, f.area());
            }
        })?;

        Ok(())
    }
}
