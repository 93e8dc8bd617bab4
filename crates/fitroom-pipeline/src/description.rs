//! First stage: turn the meta-prompt and images into a shot execution brief

use std::sync::Arc;

use crate::model::{DescriptionModel, ModelInput, SamplingConfig};

/// Brief used whenever the description model fails
pub const FALLBACK_BRIEF: &str =
    "## GOAL\nCreate an image of the avatar wearing the new clothing. Preserve the avatar's identity and the background.";

/// Instructions handed to the synthesis stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationBrief {
    /// Trimmed description model output
    Generated(String),
    /// [`FALLBACK_BRIEF`]
    Fallback,
}

impl GenerationBrief {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Generated(brief) => brief,
            Self::Fallback => FALLBACK_BRIEF,
        }
    }

    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }
}

/// Invokes the description model and never fails
#[derive(Clone)]
pub struct DescriptionStage {
    model: Arc<dyn DescriptionModel>,
}

impl DescriptionStage {
    pub fn new(model: Arc<dyn DescriptionModel>) -> Self {
        Self { model }
    }

    /// Produce a brief for `input`
    ///
    /// Any model failure, and any output that is blank after trimming, yields
    /// [`GenerationBrief::Fallback`].
    pub async fn invoke(&self, input: ModelInput<'_>, sampling: SamplingConfig) -> GenerationBrief {
        let brief = match self.model.describe(input, sampling).await {
            Ok(text) if !text.trim().is_empty() => GenerationBrief::Generated(text.trim().to_string()),
            Ok(_) => {
                tracing::warn!(model = self.model.name(), "description model returned blank text, using fallback brief");
                GenerationBrief::Fallback
            }
            Err(e) => {
                tracing::warn!(model = self.model.name(), error = %e, "description stage failed, using fallback brief");
                GenerationBrief::Fallback
            }
        };

        tracing::info!(fallback = brief.is_fallback(), brief = brief.as_str(), "generation brief ready");

        brief
    }
}
