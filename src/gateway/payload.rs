use serde::Deserialize;

/// Body of `POST /api/v1/screenings`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScreenRequest {
    /// Free-form text to screen. Leading/trailing whitespace is ignored.
    pub input: String,
}
