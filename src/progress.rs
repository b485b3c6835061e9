// src/progress.rs
/// Progress reporting for the long sequential sweeps (search, sources, playlists, media).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of items.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit is done: a letter searched, an id fetched, a playlist read.
    fn item_done(&mut self, _item: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Routes progress into the log: a line every `every` items plus begin/end.
pub struct LogProgress {
    label: &'static str,
    every: usize,
    total: usize,
    done: usize,
}

impl LogProgress {
    pub fn new(label: &'static str, every: usize) -> Self {
        Self { label, every: every.max(1), total: 0, done: 0 }
    }
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        logf!("{}: starting, {} item(s)", self.label, total);
    }

    fn log(&mut self, msg: &str) {
        logf!("{}: {}", self.label, msg);
    }

    fn item_done(&mut self, item: &str) {
        self.done += 1;
        if self.done % self.every == 0 || self.done == self.total {
            logf!("{}: {}/{} (last: {})", self.label, self.done, self.total, item);
        }
    }

    fn finish(&mut self) {
        logd!("{}: finished", self.label);
    }
}
