use thiserror::Error;

/// Prompt handed to the vision model for every shelf-camera frame.
///
/// The model contract is one JSON object per frame, possibly wrapped in a
/// markdown fence; [`crate::parse_frames`] tolerates both.
pub const SHELF_PROMPT: &str = r#"
Analyze the provided image from a retail store shelf camera.
Identify the primary customer interaction with a product.
Describe the customer and the action taken.
Your response MUST be a single, valid JSON object with the following structure:
{
  "customer_gender": "male | female | unknown",
  "customer_age_range": "child | teenager | young adult | adult | senior",
  "action": "picked up | put back | examined",
  "product_name": "string",
  "quantity": "integer"
}
Example: A woman takes two boxes of cereal.
{
  "customer_gender": "female",
  "customer_age_range": "adult",
  "action": "picked up",
  "product_name": "cereal",
  "quantity": 2
}
If no clear interaction is visible, return a JSON object with null values.
"#;

/// Failure raised by a frame analyzer implementation.
///
/// These propagate to the caller unchanged; the reconciliation core never
/// retries or translates them.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("analyzer unavailable: {0}")]
    Unavailable(String),

    #[error("frame analysis failed: {0}")]
    Failed(String),
}

/// Boundary to the external vision model.
///
/// Implementations live outside this workspace (an API client, a local
/// model, a test stub); the core only ever sees the raw text blob returned
/// per frame.
pub trait FrameAnalyzer {
    /// Describe a single frame, returning the model's raw text output.
    fn analyze(&self, frame: &[u8]) -> Result<String, AnalyzerError>;

    /// The prompt an implementation should send with every frame.
    ///
    /// Defaults to [`SHELF_PROMPT`]; override for model-specific phrasing.
    fn prompt(&self) -> &str {
        SHELF_PROMPT
    }
}
