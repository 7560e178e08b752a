//! Face identification flow state.

#[cfg(test)]
#[path = "identify_test.rs"]
mod identify_test;

use registry::api::RecognitionResult;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    Upload,
    Camera,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum IdentifyStatus {
    #[default]
    Idle,
    CameraActive,
    Recognizing,
    Done(RecognitionResult),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IdentifyState {
    pub mode: CaptureMode,
    pub status: IdentifyStatus,
    /// Object URL or data URL of the image being identified.
    pub preview: Option<String>,
}

impl IdentifyState {
    pub fn switch_mode(&mut self, mode: CaptureMode) {
        if self.mode != mode {
            *self = Self { mode, ..Self::default() };
        }
    }

    /// Start recognition unless one is already running.
    pub fn begin(&mut self, preview: Option<String>) -> bool {
        if self.is_busy() {
            return false;
        }
        if preview.is_some() {
            self.preview = preview;
        }
        self.status = IdentifyStatus::Recognizing;
        true
    }

    pub fn finish(&mut self, result: Result<RecognitionResult, String>) {
        self.status = match result {
            Ok(result) => IdentifyStatus::Done(result),
            Err(message) => IdentifyStatus::Failed(message),
        };
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.status, IdentifyStatus::Recognizing)
    }

    pub fn reset(&mut self) {
        *self = Self { mode: self.mode, ..Self::default() };
    }
}

/// Headline for a finished recognition.
pub fn result_headline(result: &RecognitionResult) -> String {
    if !result.matched {
        return result.message.clone().unwrap_or_else(|| "No match found".to_owned());
    }
    let name = result.record.as_ref().map_or(registry::record::NOT_AVAILABLE, |r| r.display_name());
    match result.confidence {
        Some(confidence) => format!("Match: {name} ({})", format_confidence(confidence)),
        None => format!("Match: {name}"),
    }
}

/// Confidence as a percentage. Values above 1 are assumed to already be percentages.
pub fn format_confidence(confidence: f64) -> String {
    let percent = if confidence <= 1.0 { confidence * 100.0 } else { confidence };
    format!("{percent:.1}%")
}
