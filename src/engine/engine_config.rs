//! Settings for launching and driving the external UCI engine.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub const DEFAULT_ENGINE_PATH: &str = "./stockfish";
pub const DEFAULT_THINK_TIME: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub path: PathBuf,
    /// Wall-clock thinking time between `go` and `stop`.
    pub think_time: Duration,
    pub threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_ENGINE_PATH),
            think_time: DEFAULT_THINK_TIME,
            threads: default_threads(),
        }
    }
}

impl EngineConfig {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }
}

/// Half the logical cores, never less than one.
pub fn default_threads() -> usize {
    let cores = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    (cores / 2).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_builders() {
        let config = EngineConfig::default();
        assert_eq!(config.path, PathBuf::from("./stockfish"));
        assert_eq!(config.think_time, Duration::from_secs(3));
        assert!(config.threads >= 1);

        let config = EngineConfig::default()
            .with_path("/usr/bin/stockfish")
            .with_think_time(Duration::from_millis(50))
            .with_threads(0);
        assert_eq!(config.path, PathBuf::from("/usr/bin/stockfish"));
        assert_eq!(config.think_time, Duration::from_millis(50));
        assert_eq!(config.threads, 1);
    }
}
