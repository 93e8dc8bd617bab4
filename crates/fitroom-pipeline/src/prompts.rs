//! Meta-prompt templates for the description stage

use std::borrow::Cow;

use strum::{Display, EnumIter};

/// Placeholder replaced with the product description
const DESCRIPTION_SLOT: &str = "{description}";

/// Which meta-prompt drives the description stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum PromptMode {
    /// Single product photo, description as supporting detail (`## GOAL` briefs)
    SingleImageBasic,
    /// Single product photo, description as ground truth (`## RENDER INTENT` briefs)
    SingleImageDataGrounded,
    /// Several views of one garment, no description
    MultiImage,
}

impl PromptMode {
    fn builtin_body(self) -> &'static str {
        match self {
            Self::SingleImageBasic => include_str!("prompts/single_image_basic.md"),
            Self::SingleImageDataGrounded => include_str!("prompts/single_image_data_grounded.md"),
            Self::MultiImage => include_str!("prompts/multi_image.md"),
        }
    }
}

/// Immutable template body with at most one kind of substitution point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaPromptTemplate {
    body: Cow<'static, str>,
}

impl MetaPromptTemplate {
    pub fn new(body: impl Into<Cow<'static, str>>) -> Self {
        Self { body: body.into() }
    }

    /// Whether the body interpolates the product description
    pub fn takes_description(&self) -> bool {
        self.body.contains(DESCRIPTION_SLOT)
    }

    /// Substitute the description verbatim; no escaping is applied
    pub fn render(&self, description: &str) -> String {
        self.body.replace(DESCRIPTION_SLOT, description)
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Templates for every [`PromptMode`], built once at start-up
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    single_image_basic: MetaPromptTemplate,
    single_image_data_grounded: MetaPromptTemplate,
    multi_image: MetaPromptTemplate,
}

impl PromptLibrary {
    /// The production templates
    pub fn builtin() -> Self {
        let load = |mode: PromptMode| MetaPromptTemplate::new(mode.builtin_body());

        Self {
            single_image_basic: load(PromptMode::SingleImageBasic),
            single_image_data_grounded: load(PromptMode::SingleImageDataGrounded),
            multi_image: load(PromptMode::MultiImage),
        }
    }

    /// Replace the template for one mode
    #[must_use]
    pub fn with_template(mut self, mode: PromptMode, body: impl Into<Cow<'static, str>>) -> Self {
        *self.slot_mut(mode) = MetaPromptTemplate::new(body);
        self
    }

    pub const fn template(&self, mode: PromptMode) -> &MetaPromptTemplate {
        match mode {
            PromptMode::SingleImageBasic => &self.single_image_basic,
            PromptMode::SingleImageDataGrounded => &self.single_image_data_grounded,
            PromptMode::MultiImage => &self.multi_image,
        }
    }

    const fn slot_mut(&mut self, mode: PromptMode) -> &mut MetaPromptTemplate {
        match mode {
            PromptMode::SingleImageBasic => &mut self.single_image_basic,
            PromptMode::SingleImageDataGrounded => &mut self.single_image_data_grounded,
            PromptMode::MultiImage => &mut self.multi_image,
        }
    }

    /// Render the meta-prompt for `mode`
    ///
    /// Templates without a description slot ignore `description`.
    pub fn render(&self, mode: PromptMode, description: &str) -> String {
        self.template(mode).render(description)
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}
