/// Anything occupying an axis-aligned box in world space. Positions are top-left corners with y
/// growing downwards.
pub trait Object {
    fn get_size(&self) -> (f32, f32);
    fn get_pos(&self) -> (f32, f32);

    fn left(&self) -> f32 {
        self.get_pos().0
    }

    fn right(&self) -> f32 {
        self.get_pos().0 + self.get_size().0
    }

    fn top(&self) -> f32 {
        self.get_pos().1
    }

    fn bottom(&self) -> f32 {
        self.get_pos().1 + self.get_size().1
    }

    /// Strict overlap of the horizontal spans. Touching edges do not overlap.
    fn overlaps_horizontally<T: Object>(&self, other: &T) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }
}
