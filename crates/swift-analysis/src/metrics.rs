use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Metrics collected during analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseMetrics {
    /// Total files attempted to parse
    pub files_attempted: usize,

    /// Files successfully parsed
    pub files_succeeded: usize,

    /// Files that failed parsing
    pub files_failed: usize,

    /// Total time spent parsing (serialized as nanoseconds)
    #[serde(with = "duration_nanos")]
    pub total_parse_time: Duration,

    /// Total syntax nodes produced
    pub total_nodes: usize,

    /// Total diagnostics reported
    pub total_diagnostics: usize,
}

// Helper module for serializing Duration without losing sub-second precision
pub(crate) mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_nanos())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}

impl ParseMetrics {
    /// Success rate (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.files_attempted == 0 {
            0.0
        } else {
            self.files_succeeded as f64 / self.files_attempted as f64
        }
    }

    /// Average parse time per file
    pub fn avg_parse_time(&self) -> Duration {
        if self.files_succeeded == 0 {
            Duration::ZERO
        } else {
            self.total_parse_time / self.files_succeeded as u32
        }
    }

    /// Merge another metrics object into this one
    pub fn merge(&mut self, other: &ParseMetrics) {
        self.files_attempted += other.files_attempted;
        self.files_succeeded += other.files_succeeded;
        self.files_failed += other.files_failed;
        self.total_parse_time += other.total_parse_time;
        self.total_nodes += other.total_nodes;
        self.total_diagnostics += other.total_diagnostics;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let metrics = ParseMetrics::default();
        assert_eq!(metrics.success_rate(), 0.0);
        assert_eq!(metrics.avg_parse_time(), Duration::ZERO);
    }

    #[test]
    fn test_parse_time_keeps_precision() {
        let metrics = ParseMetrics {
            files_attempted: 1,
            files_succeeded: 1,
            total_parse_time: Duration::from_nanos(126_444_017),
            ..Default::default()
        };

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["total_parse_time"], 126_444_017);

        let back: ParseMetrics = serde_json::from_value(json).unwrap();
        assert_eq!(back, metrics);
    }

    #[test]
    fn test_merge() {
        let mut a = ParseMetrics {
            files_attempted: 3,
            files_succeeded: 2,
            files_failed: 1,
            total_parse_time: Duration::from_millis(40),
            total_nodes: 100,
            total_diagnostics: 1,
        };
        let b = ParseMetrics {
            files_attempted: 1,
            files_succeeded: 1,
            files_failed: 0,
            total_parse_time: Duration::from_millis(20),
            total_nodes: 50,
            total_diagnostics: 0,
        };

        a.merge(&b);
        assert_eq!(a.files_attempted, 4);
        assert_eq!(a.files_succeeded, 3);
        assert_eq!(a.total_nodes, 150);
        assert_eq!(a.success_rate(), 0.75);
        assert_eq!(a.avg_parse_time(), Duration::from_millis(20));
    }
}
