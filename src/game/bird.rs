use crate::game::{object::Object, settings::GameSettings};

/// The player sprite. Only `y` and `velocity` change during play.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    velocity: f32,
    gravity: f32,
    lift: f32,
    start_y: f32,
    ground_y: f32,
}

impl Bird {
    pub fn new(settings: &GameSettings) -> Self {
        Bird {
            x: settings.bird_x,
            y: settings.bird_start_y(),
            width: settings.bird_width,
            height: settings.bird_height,
            velocity: 0.0,
            gravity: settings.gravity,
            lift: settings.lift,
            start_y: settings.bird_start_y(),
            ground_y: settings.ground_y(),
        }
    }

    /// Advances one frame of constant-acceleration motion.
    ///
    /// Returns `true` when the bird landed on the ground during this frame. Hitting the ceiling only
    /// stops the bird.
    pub fn update(&mut self) -> bool {
        self.velocity += self.gravity;
        self.y += self.velocity;

        if self.y + self.height > self.ground_y {
            self.y = self.ground_y - self.height;
            self.velocity = 0.0;
            true
        } else {
            if self.y < 0.0 {
                self.y = 0.0;
                self.velocity = 0.0;
            }
            false
        }
    }

    pub fn flap(&mut self) {
        self.velocity = self.lift;
    }

    pub fn reset(&mut self) {
        self.y = self.start_y;
        self.velocity = 0.0;
    }

    #[cfg(test)]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: f32) {
        self.y = y;
    }
}

impl Object for Bird {
    fn get_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn get_pos(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}
