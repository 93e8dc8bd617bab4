//! Pull the generated image out of a synthesis response

use crate::{
    model::SynthesisResponse,
    types::GeneratedImage,
};

/// Reason reported when the provider gave none
pub const UNKNOWN_REASON: &str = "Unknown";

/// Result of inspecting a synthesis response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisOutcome {
    Image(GeneratedImage),
    Blocked { reason: String },
}

/// Return the first inline-data part as the generated image
///
/// Later parts are ignored even when they also carry image data. A first
/// inline part with an empty payload counts as no image, even if a later
/// part holds one; only the first inline part is ever considered.
pub fn extract(response: SynthesisResponse) -> SynthesisOutcome {
    let first = response.parts.into_iter().find_map(|part| part.inline_data);

    match first {
        Some(inline) if !inline.data.is_empty() => SynthesisOutcome::Image(GeneratedImage::png(inline.data)),
        _ => {
            let reason = response
                .block_reason
                .filter(|reason| !reason.is_empty())
                .unwrap_or_else(|| UNKNOWN_REASON.to_string());

            tracing::warn!(
                reason = %reason,
                finish_reason = response.finish_reason.as_deref().unwrap_or_default(),
                "synthesis response carried no image"
            );

            SynthesisOutcome::Blocked { reason }
        }
    }
}
