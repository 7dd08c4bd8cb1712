//! Sensor analysis tools — read the latest per-modality observation.
//!
//! These tools never pull from capture devices themselves; they read
//! whatever the owning session has most recently written. A modality
//! that has not reported yet yields an empty record, so the model can
//! see the sensor is silent.

use sensai_core::observation::Observation;
use sensai_core::session::LatestObservations;

use crate::TutorTool;

pub(crate) fn read_modality(tool: TutorTool, latest: &LatestObservations) -> Observation {
    let value = match tool {
        TutorTool::AnalyzeVideo => latest
            .video
            .as_ref()
            .and_then(|v| serde_json::to_value(v).ok()),
        TutorTool::AnalyzeAudio => latest
            .audio
            .as_ref()
            .and_then(|a| serde_json::to_value(a).ok()),
        TutorTool::AnalyzeScreen => latest
            .screen
            .as_ref()
            .and_then(|s| serde_json::to_value(s).ok()),
        _ => unreachable!("read_modality called with a non-sensor tool"),
    };

    Observation::Record(value.unwrap_or_else(|| serde_json::json!({})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensai_core::observation::{AudioObservation, VideoObservation};

    #[test]
    fn reads_latest_video_record() {
        let mut latest = LatestObservations::default();
        latest.set_video(VideoObservation {
            mood: "frustrated".into(),
            concentration_level: 40,
        });

        let obs = read_modality(TutorTool::AnalyzeVideo, &latest);
        let rendered = obs.render();
        assert!(rendered.contains("frustrated"));
        assert!(rendered.contains("40"));
    }

    #[test]
    fn silent_modality_yields_empty_record() {
        let latest = LatestObservations::default();
        let obs = read_modality(TutorTool::AnalyzeScreen, &latest);
        assert_eq!(obs, Observation::Record(serde_json::json!({})));
    }

    #[test]
    fn modalities_are_independent() {
        let mut latest = LatestObservations::default();
        latest.set_audio(AudioObservation {
            transcript: "what is a determinant?".into(),
        });

        let audio = read_modality(TutorTool::AnalyzeAudio, &latest);
        assert!(audio.render().contains("determinant"));

        let video = read_modality(TutorTool::AnalyzeVideo, &latest);
        assert_eq!(video, Observation::Record(serde_json::json!({})));
    }
}
