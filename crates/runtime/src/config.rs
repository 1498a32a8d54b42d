//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration shared by the match service, its store, and change feeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Directory for the file-backed store. `None` keeps matches in memory.
    pub data_dir: Option<PathBuf>,
    pub feed: FeedConfig,
    pub event_buffer_size: usize,
    /// Length of generated match codes.
    pub code_length: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            feed: FeedConfig::default(),
            event_buffer_size: 100,
            code_length: 6,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WEREWOLF_DATA_DIR` - Directory for match records (default: in-memory)
    /// - `WEREWOLF_POLL_INTERVAL_MS` - Change feed polling cadence (default: 1000)
    /// - `WEREWOLF_KEEPALIVE_CYCLES` - Unchanged polls between keep-alives (default: 10)
    /// - `WEREWOLF_FEED_BUFFER` - Per-viewer channel capacity (default: 16)
    /// - `WEREWOLF_EVENT_BUFFER` - Match event bus capacity (default: 100)
    /// - `WEREWOLF_CODE_LENGTH` - Generated match code length (default: 6)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("WEREWOLF_DATA_DIR").ok().map(PathBuf::from);

        if let Some(millis) = read_env::<u64>("WEREWOLF_POLL_INTERVAL_MS") {
            config.feed.poll_interval = Duration::from_millis(millis.max(1));
        }
        if let Some(cycles) = read_env::<u32>("WEREWOLF_KEEPALIVE_CYCLES") {
            config.feed.keepalive_cycles = cycles.max(1);
        }
        if let Some(capacity) = read_env::<usize>("WEREWOLF_FEED_BUFFER") {
            config.feed.buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("WEREWOLF_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(length) = read_env::<usize>("WEREWOLF_CODE_LENGTH") {
            config.code_length = length.max(1);
        }

        config
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

/// Change feed cadence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedConfig {
    pub poll_interval: Duration,
    /// Unchanged polls before a keep-alive is sent.
    pub keepalive_cycles: u32,
    pub buffer_size: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            keepalive_cycles: 10,
            buffer_size: 16,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
