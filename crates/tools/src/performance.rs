//! Long-term performance tools.
//!
//! `update_long_term_performance` takes a JSON sample written by the
//! model; each present field appends to its history series. Parse
//! failures are recoverable observations, matching the rest of the
//! structured-input tools.

use sensai_core::observation::Observation;
use sensai_core::performance::{PerformanceHistory, PerformanceSample};

pub(crate) fn update_long_term_performance(
    input: Option<&str>,
    history: &mut PerformanceHistory,
) -> Observation {
    let Some(raw) = input else {
        return Observation::text(
            "update_long_term_performance requires a JSON Action Input; nothing was recorded.",
        );
    };

    let sample: PerformanceSample = match serde_json::from_str(raw) {
        Ok(sample) => sample,
        Err(_) => {
            return Observation::text("Failed to parse long-term performance data.");
        }
    };

    history.record(&sample);
    tracing::debug!(total = history.sample_count(), "Performance history updated");
    Observation::text("Long-term performance records updated.")
}

pub(crate) fn retrieve_long_term_performance(history: &PerformanceHistory) -> Observation {
    match serde_json::to_value(history) {
        Ok(value) => Observation::Record(value),
        Err(_) => Observation::text("Historical performance data is unavailable."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_present_fields() {
        let mut history = PerformanceHistory::new();
        let obs = update_long_term_performance(
            Some(r#"{"knowledge_score": 0.8, "concentration_level": 64}"#),
            &mut history,
        );

        assert_eq!(obs.render(), "Long-term performance records updated.");
        assert_eq!(history.knowledge_scores, vec![0.8]);
        assert_eq!(history.concentration_levels, vec![64.0]);
        assert!(history.memory_retention.is_empty());
    }

    #[test]
    fn malformed_sample_is_recoverable() {
        let mut history = PerformanceHistory::new();
        let obs = update_long_term_performance(Some("{{broken"), &mut history);

        assert!(obs.render().contains("Failed to parse"));
        assert!(history.is_empty());
    }

    #[test]
    fn missing_input_is_recoverable() {
        let mut history = PerformanceHistory::new();
        let obs = update_long_term_performance(None, &mut history);
        assert!(obs.render().contains("nothing was recorded"));
    }

    #[test]
    fn retrieval_returns_full_history() {
        let mut history = PerformanceHistory::new();
        history.record(&PerformanceSample {
            memory_retention_rate: Some(0.45),
            ..Default::default()
        });

        let obs = retrieve_long_term_performance(&history);
        let rendered = obs.render();
        assert!(rendered.contains("memory_retention"));
        assert!(rendered.contains("0.45"));
    }
}
