use std::collections::VecDeque;

use rand::Rng;

use crate::game::{bird::Bird, object::Object, settings::GameSettings};

/// A pipe pair: a blocking rectangle hanging from the top and one standing on the ground, with
/// the gap in between.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    x: f32,
    width: f32,
    top_height: f32,
    gap: f32,
    bottom_height: f32,
}

impl Obstacle {
    pub fn new(x: f32, width: f32, top_height: f32, gap: f32, bottom_height: f32) -> Self {
        Obstacle { x, width, top_height, gap, bottom_height }
    }

    pub fn top_height(&self) -> f32 {
        self.top_height
    }

    pub fn bottom_height(&self) -> f32 {
        self.bottom_height
    }

    fn move_left(&mut self, step: f32) {
        self.x -= step;
    }
}

impl Object for Obstacle {
    fn get_size(&self) -> (f32, f32) {
        (self.width, self.top_height + self.gap + self.bottom_height)
    }

    fn get_pos(&self) -> (f32, f32) {
        (self.x, 0.0)
    }
}

/// Live obstacles, oldest (leftmost) first.
#[derive(Debug, Clone)]
pub struct ObstacleStream {
    obstacles: VecDeque<Obstacle>,
    spawn_x: f32,
    pipe_width: f32,
    gap: f32,
    min_margin: f32,
    height: f32,
    ground_height: f32,
}

impl ObstacleStream {
    pub fn new(settings: &GameSettings) -> Self {
        ObstacleStream {
            obstacles: VecDeque::new(),
            spawn_x: settings.width,
            pipe_width: settings.pipe_width,
            gap: settings.gap,
            min_margin: settings.min_margin,
            height: settings.height,
            ground_height: settings.ground_height,
        }
    }

    fn play_height(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Appends a new obstacle at the right edge when `frame_count` lands on the spawn interval.
    pub fn try_spawn<R: Rng>(&mut self, frame_count: u64, spawn_interval: u64, rng: &mut R) -> bool {
        if frame_count.checked_rem(spawn_interval) != Some(0) {
            return false;
        }

        let lowest = self.min_margin;
        let highest = self.play_height() - self.gap - self.min_margin;
        let top_height = rng.gen_range(lowest..=highest);
        let bottom_height = self.play_height() - top_height - self.gap;

        tracing::trace!(frame_count, top_height, "spawning obstacle");
        self.obstacles.push_back(Obstacle::new(self.spawn_x, self.pipe_width, top_height, self.gap, bottom_height));
        true
    }

    /// Scrolls every obstacle left and retires the ones that left the play area.
    ///
    /// Returns the number of retired obstacles; each one is worth a point.
    pub fn advance_and_cull(&mut self, scroll_speed: f32) -> u64 {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.move_left(scroll_speed);
        }

        let mut retired = 0;
        while self.obstacles.front().is_some_and(|obstacle| obstacle.right() < 0.0) {
            self.obstacles.pop_front();
            retired += 1;
        }
        retired
    }

    pub fn collides_with(&self, bird: &Bird) -> bool {
        let lower_edge = self.play_height();
        self.obstacles.iter().any(|obstacle| {
            bird.overlaps_horizontally(obstacle)
                && (bird.top() < obstacle.top_height || bird.bottom() > lower_edge - obstacle.bottom_height)
        })
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    #[cfg(test)]
    pub fn front(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }
}
