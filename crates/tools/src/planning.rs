//! Plan adjustment tools.
//!
//! Short- and long-term plan updates are acknowledgement-style in this
//! prototype: the adjustment text is echoed back as the observation so it
//! lands in the transcript and shapes later reasoning.

use sensai_core::observation::Observation;

pub(crate) fn update_short_term(input: Option<&str>) -> Observation {
    adjust_plan("Short-term", input)
}

pub(crate) fn update_long_term(input: Option<&str>) -> Observation {
    adjust_plan("Long-term", input)
}

fn adjust_plan(horizon: &str, input: Option<&str>) -> Observation {
    match input {
        Some(adjustment) if !adjustment.is_empty() => {
            Observation::text(format!("{horizon} plan adjusted: '{adjustment}'."))
        }
        // Recoverable: the model forgot the input, tell it so.
        _ => Observation::text(format!(
            "{} requires an adjustment as Action Input; no change was made.",
            if horizon == "Short-term" {
                "update_short_term"
            } else {
                "update_long_term"
            }
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_the_adjustment() {
        let obs = update_short_term(Some("slow down and add worked examples"));
        assert_eq!(
            obs.render(),
            "Short-term plan adjusted: 'slow down and add worked examples'."
        );
    }

    #[test]
    fn long_term_uses_its_own_horizon() {
        let obs = update_long_term(Some("revisit eigenvalues next week"));
        assert!(obs.render().starts_with("Long-term plan adjusted"));
    }

    #[test]
    fn missing_input_is_reported_not_fatal() {
        let obs = update_short_term(None);
        assert!(obs.render().contains("no change was made"));

        let obs = update_long_term(Some(""));
        assert!(obs.render().contains("update_long_term requires"));
    }
}
