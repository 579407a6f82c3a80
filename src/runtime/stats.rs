use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::warn;

/// Memory used by one named cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheStat {
    pub category_name: String,
    pub cache_name: String,
    pub byte_length: u64,
}

impl CacheStat {
    pub fn new(category_name: impl Into<String>, cache_name: impl Into<String>, byte_length: u64) -> Self {
        Self {
            category_name: category_name.into(),
            cache_name: cache_name.into(),
            byte_length,
        }
    }

    /// One OpenMetrics sample line.
    pub fn to_metric_str(&self) -> String {
        format!(
            "cache_memory_bytes{{cache_type=\"{}\",cache=\"{}\"}} {}",
            self.category_name, self.cache_name, self.byte_length
        )
    }
}

/// Anything that can report its current memory footprint.
pub trait CacheStatsProvider: Send + Sync {
    fn get_stats(&self) -> Vec<CacheStat>;
}

impl<F> CacheStatsProvider for F
where
    F: Fn() -> Vec<CacheStat> + Send + Sync,
{
    fn get_stats(&self) -> Vec<CacheStat> {
        self()
    }
}

/// Merges stats sharing `(category_name, cache_name)` by summing their bytes.
/// Output is sorted by that key, whatever the input order.
pub fn group_stats(stats: &[CacheStat]) -> Vec<CacheStat> {
    let mut groups: BTreeMap<(&str, &str), u64> = BTreeMap::new();

    for stat in stats {
        let total = groups
            .entry((stat.category_name.as_str(), stat.cache_name.as_str()))
            .or_insert(0);
        *total = match total.checked_add(stat.byte_length) {
            Some(sum) => sum,
            None => {
                warn!(
                    "byte_length overflow for {}/{}, saturating",
                    stat.category_name, stat.cache_name
                );
                u64::MAX
            }
        };
    }

    groups
        .into_iter()
        .map(|((category, cache), bytes)| CacheStat::new(category, cache, bytes))
        .collect()
}

#[derive(Default)]
pub struct StatsManager {
    providers: Vec<Arc<dyn CacheStatsProvider>>,
}

impl StatsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// No de-duplication: a provider registered twice reports twice.
    pub fn register_provider(&mut self, provider: Arc<dyn CacheStatsProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Every provider's stats, concatenated in registration order.
    pub fn get_stats(&self) -> Vec<CacheStat> {
        self.providers
            .iter()
            .flat_map(|provider| provider.get_stats())
            .collect()
    }

    pub fn get_grouped_stats(&self) -> Vec<CacheStat> {
        group_stats(&self.get_stats())
    }

    /// OpenMetrics text exposition of the grouped stats.
    pub fn render_openmetrics(&self) -> String {
        let mut out = String::new();
        out.push_str("# TYPE cache_memory_bytes gauge\n");
        out.push_str("# UNIT cache_memory_bytes bytes\n");
        out.push_str("# HELP cache_memory_bytes Total memory consumed by a cache.\n");
        for stat in self.get_grouped_stats() {
            let _ = writeln!(out, "{}", stat.to_metric_str());
        }
        out.push_str("# EOF\n");
        out
    }
}

impl std::fmt::Debug for StatsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsManager")
            .field("providers", &self.providers.len())
            .finish()
    }
}
