//! src/domain/system_stat.rs

use crate::domain::lenient;
use chrono::DateTime;

/// Number of samples the system monitor shows.
pub const MONITOR_POINTS: usize = 20;

/// A host usage sample of the `admin_sys_stats` collection.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SystemStat {
    #[serde(default, deserialize_with = "lenient::string")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub cpu_usage: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub ram_usage: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub storage_usage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorPoint {
    /// Unix seconds of the sample, `None` if the timestamp does not parse.
    pub time: Option<i64>,
    pub cpu: f64,
    pub ram: f64,
    pub storage: f64,
}

impl MonitorPoint {
    pub fn time_label(&self) -> String {
        self.time.map(|t| t.to_string()).unwrap_or_else(|| "-".into())
    }
}

fn unix_seconds(timestamp: &str) -> Option<i64> {
    let timestamp = timestamp.trim();
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.timestamp())
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| {
                    chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S%.f")
                })
                .map(|t| t.and_utc().timestamp())
        })
        .ok()
}

/// The last [`MONITOR_POINTS`] samples, oldest first.
pub fn monitor_points(stats: &[SystemStat]) -> Vec<MonitorPoint> {
    let skip = stats.len().saturating_sub(MONITOR_POINTS);
    stats[skip..]
        .iter()
        .map(|s| MonitorPoint {
            time: unix_seconds(&s.timestamp),
            cpu: s.cpu_usage,
            ram: s.ram_usage,
            storage: s.storage_usage,
        })
        .collect()
}
