use serde_json::Value as JsonValue;

/// Truncation bound for malformed-blob previews in warnings.
const PREVIEW_LEN: usize = 50;

/// Outcome of parsing one batch of raw frame outputs.
///
/// `values` keeps input order with failed blobs simply absent; `warnings`
/// carries one line per dropped blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub values: Vec<JsonValue>,
    pub warnings: Vec<String>,
}

/// Parse a batch of raw model outputs into JSON values.
///
/// Each blob may be wrapped in a ```` ```json ```` markdown fence; the fence
/// is stripped when present, otherwise the blob is used verbatim. A blob that
/// fails to decode is dropped with a warning; the batch never aborts.
pub fn parse_frames(blobs: &[String]) -> ParsedBatch {
    let mut batch = ParsedBatch::default();

    for blob in blobs {
        let content = strip_code_fence(blob);
        match serde_json::from_str::<JsonValue>(content) {
            Ok(value) => batch.values.push(value),
            Err(e) => {
                let preview: String = blob.chars().take(PREVIEW_LEN).collect();
                let warning =
                    format!("could not parse JSON from frame output: {preview}... ({e})");
                tracing::warn!(error = %e, "dropping malformed frame output");
                batch.warnings.push(warning);
            }
        }
    }

    batch
}

/// Strip a leading ```` ```json ```` fence and its closing fence, if present.
fn strip_code_fence(blob: &str) -> &str {
    let Some(rest) = blob.strip_prefix("```json\n") else {
        return blob;
    };
    let rest = rest.trim_end();
    match rest.strip_suffix("```") {
        Some(inner) => inner.trim(),
        None => rest,
    }
}
