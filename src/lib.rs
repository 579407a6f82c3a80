pub mod config;
pub mod error;
pub mod runtime;

// Re-export the pieces hosts touch directly
pub use config::TelemetryConfig;
pub use error::TelemetryError;
pub use runtime::context::{ScriptRunContext, MAX_TRACKED_COMMANDS, MAX_TRACKED_PER_COMMAND};
pub use runtime::stats::{group_stats, CacheStat, CacheStatsProvider, StatsManager};
