/// Crawl phase definitions for tracking a run's lifecycle
///
/// A run moves strictly forward: `Idle -> Running -> Draining -> Done`.
use std::fmt;

/// Represents the lifecycle phase of one crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Coordinator built, nothing fetched yet
    Idle,

    /// Dequeuing and fetching URLs
    Running,

    /// Loop finished; network session being closed
    Draining,

    /// Session closed, results ready for export
    Done,
}

impl CrawlPhase {
    /// Returns true if `next` is the only legal successor of this phase
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Running)
                | (Self::Running, Self::Draining)
                | (Self::Draining, Self::Done)
        )
    }

    /// Lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
