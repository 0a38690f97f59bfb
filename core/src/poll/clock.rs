use crate::prelude::{Surface, TimeSource};
use crate::view::Handle;

/// Writes the time of day into `current-time` on every tick.
pub struct ClockTicker<T> {
    source: T,
}

impl<T: TimeSource> ClockTicker<T> {
    pub fn new(source: T) -> Self {
        Self { source }
    }

    pub fn tick<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_text(Handle::CurrentTime, &self.source.time_of_day());
    }
}
