/// Status lines shown under the loading bar, from empty to full.
pub const LOADING_MESSAGES: [&str; 6] = [
    "Initializing Space Tracking Systems...",
    "Connecting to Satellite Networks...",
    "Loading Orbital Data...",
    "Syncing with NASA APIs...",
    "Establishing ISS Link...",
    "Ready for Launch!",
];

/// Completion counter for the initial load sequence.
///
/// `completed` only ever grows and never passes `total`, so the derived
/// percentage is non-decreasing for the lifetime of a counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    completed: usize,
    total: usize,
}

impl LoadProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Count one more settled task. Returns `false` once already complete.
    pub fn advance(&mut self) -> bool {
        if self.completed >= self.total {
            return false;
        }
        self.completed += 1;
        true
    }

    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }

    /// `round(100 * completed / total)`, half rounding up. An empty sequence is 100%.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 200 + self.total) / (self.total * 2)) as u8
    }

    pub fn message(&self) -> &'static str {
        let last = LOADING_MESSAGES.len() - 1;
        let index = usize::from(self.percent()) * last / 100;
        LOADING_MESSAGES[index.min(last)]
    }
}
