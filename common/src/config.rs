use std::time::Duration;

pub const DEFAULT_DESCRIBE_CONCURRENCY: usize = 16;
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Upper bound on concurrent describe calls issued by a single collector.
    ///
    /// Values below one are treated as one.
    pub describe_concurrency: usize,

    /// Number of results buffered between the collectors and the consumer.
    pub channel_capacity: usize,

    /// Deadline applied to each collector individually.
    ///
    /// Does not bound the run as a whole, and rows emitted before the
    /// deadline are kept.
    pub collector_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            describe_concurrency: DEFAULT_DESCRIBE_CONCURRENCY,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            collector_timeout: None,
        }
    }
}
