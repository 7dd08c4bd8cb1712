//! Long-term student performance history.
//!
//! Three independent append-only numeric series. Entries are never
//! reordered or pruned; each series grows only when a sample carries a
//! value for it.

use serde::{Deserialize, Serialize};

/// Append-only record of the student's performance over time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    /// Knowledge assessment scores.
    pub knowledge_scores: Vec<f64>,
    /// Concentration level readings.
    pub concentration_levels: Vec<f64>,
    /// Memory retention rates.
    pub memory_retention: Vec<f64>,
}

/// One performance sample. Every field is independently optional; only
/// present fields append to their series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration_level: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_retention_rate: Option<f64>,
}

impl PerformanceHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every present value in `sample` to its series.
    pub fn record(&mut self, sample: &PerformanceSample) {
        if let Some(score) = sample.knowledge_score {
            self.knowledge_scores.push(score);
        }
        if let Some(level) = sample.concentration_level {
            self.concentration_levels.push(level);
        }
        if let Some(rate) = sample.memory_retention_rate {
            self.memory_retention.push(rate);
        }
    }

    /// Total number of recorded values across all series.
    pub fn sample_count(&self) -> usize {
        self.knowledge_scores.len() + self.concentration_levels.len() + self.memory_retention.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.sample_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_appends_only_present_fields() {
        let mut history = PerformanceHistory::new();
        history.record(&PerformanceSample {
            knowledge_score: Some(0.7),
            concentration_level: None,
            memory_retention_rate: Some(0.5),
        });

        assert_eq!(history.knowledge_scores, vec![0.7]);
        assert!(history.concentration_levels.is_empty());
        assert_eq!(history.memory_retention, vec![0.5]);
    }

    #[test]
    fn series_preserve_insertion_order() {
        let mut history = PerformanceHistory::new();
        for score in [0.3, 0.9, 0.6] {
            history.record(&PerformanceSample {
                knowledge_score: Some(score),
                ..Default::default()
            });
        }
        assert_eq!(history.knowledge_scores, vec![0.3, 0.9, 0.6]);
    }

    #[test]
    fn sample_deserializes_with_missing_fields() {
        let sample: PerformanceSample =
            serde_json::from_str(r#"{"concentration_level": 62}"#).unwrap();
        assert_eq!(sample.concentration_level, Some(62.0));
        assert!(sample.knowledge_score.is_none());
        assert!(sample.memory_retention_rate.is_none());
    }

    #[test]
    fn empty_history_reports_empty() {
        let history = PerformanceHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.sample_count(), 0);
    }
}
