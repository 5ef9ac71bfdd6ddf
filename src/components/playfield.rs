use color_eyre::eyre::Result;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Rectangle},
        Block, BorderType, Clear, Paragraph, Widget,
    },
};

use crate::{
    constants::{game, GAME_OVER_TEXT, RESTART_TEXT, START_TEXT, TITLE_TEXT},
    game::{Object, Phase, Renderer, Scene},
    tui::Frame,
};

/// Draws a [`Scene`] scaled onto a terminal area. World y grows downwards, canvas y upwards.
pub struct Playfield<'a> {
    scene: Scene<'a>,
}

impl<'a> Playfield<'a> {
    pub fn new(scene: Scene<'a>) -> Self {
        Self { scene }
    }

    fn flip(&self, y: f32, height: f32) -> f64 {
        (self.scene.settings.height - y - height) as f64
    }

    fn paint_world(&self, ctx: &mut Context<'_>) {
        let settings = self.scene.settings;

        for obstacle in self.scene.obstacles.iter() {
            let (x, width) = (obstacle.left() as f64, settings.pipe_width as f64);
            ctx.draw(&Rectangle {
                x,
                y: self.flip(0.0, obstacle.top_height()),
                width,
                height: obstacle.top_height() as f64,
                color: game::PIPE_COLOR,
            });
            let bottom_y = settings.ground_y() - obstacle.bottom_height();
            ctx.draw(&Rectangle {
                x,
                y: self.flip(bottom_y, obstacle.bottom_height()),
                width,
                height: obstacle.bottom_height() as f64,
                color: game::PIPE_COLOR,
            });
        }

        ctx.draw(&Rectangle {
            x: 0.0,
            y: 0.0,
            width: settings.width as f64,
            height: settings.ground_height as f64,
            color: game::GROUND_COLOR,
        });

        let bird = self.scene.bird;
        let (width, height) = bird.get_size();
        let center_x = (bird.left() + width / 2.0) as f64;
        let center_y = self.flip(bird.top() + height / 2.0, 0.0);
        ctx.draw(&Circle { x: center_x, y: center_y, radius: (width / 2.0) as f64, color: game::BIRD_COLOR });
        let beak_x = bird.right() as f64;
        let beak_tip = beak_x + game::BEAK_LENGTH as f64;
        let quarter = (height / 4.0) as f64;
        ctx.draw(&CanvasLine::new(beak_x, center_y, beak_tip, center_y + quarter, game::BEAK_COLOR));
        ctx.draw(&CanvasLine::new(beak_x, center_y, beak_tip, center_y - quarter, game::BEAK_COLOR));
    }

    fn render_world(&self, area: Rect, buf: &mut Buffer) {
        let settings = self.scene.settings;
        let score = self.scene.score;
        Canvas::default()
            .marker(Marker::Braille)
            .background_color(game::SKY_COLOR)
            .x_bounds([0.0, settings.width as f64])
            .y_bounds([0.0, settings.height as f64])
            .paint(|ctx| {
                self.paint_world(ctx);
                ctx.layer();
                let label = Span::styled(format!("Score: {score}"), Style::default().fg(game::SCORE_COLOR).bold());
                ctx.print(10.0, (settings.height - 30.0) as f64, label);
            })
            .render(area, buf);
    }

    fn render_banner(&self, area: Rect, buf: &mut Buffer, lines: Vec<Line<'static>>) {
        let height = lines.len() as u16 + 2;
        let width = lines.iter().map(|line| line.width()).max().unwrap_or(0) as u16 + 4;

        let [banner] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
        let [banner] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(banner);

        Clear.render(banner, buf);
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::White))
            .block(Block::bordered().border_type(BorderType::Thick))
            .render(banner, buf);
    }
}

impl Widget for Playfield<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.scene.phase {
            Phase::NotStarted => {
                Block::default().style(Style::default().bg(game::SKY_COLOR)).render(area, buf);
                self.render_banner(area, buf, vec![Line::from(TITLE_TEXT).bold(), Line::from(START_TEXT)]);
            },
            Phase::Playing => self.render_world(area, buf),
            Phase::GameOver => {
                Block::default().style(Style::default().bg(game::SKY_COLOR)).render(area, buf);
                self.render_banner(area, buf, vec![
                    Line::from(GAME_OVER_TEXT).bold(),
                    Line::from(format!("Score: {}", self.scene.score)),
                    Line::from(RESTART_TEXT),
                ]);
            },
        }
    }
}

/// [`Renderer`] backed by a ratatui frame.
pub struct FrameRenderer<'f, 'a> {
    frame: &'f mut Frame<'a>,
    area: Rect,
}

impl<'f, 'a> FrameRenderer<'f, 'a> {
    pub fn new(frame: &'f mut Frame<'a>, area: Rect) -> Self {
        Self { frame, area }
    }
}

impl Renderer for FrameRenderer<'_, '_> {
    fn draw(&mut self, scene: &Scene<'_>) -> Result<()> {
        self.frame.render_widget(Playfield::new(*scene), self.area);
        Ok(())
    }
}
