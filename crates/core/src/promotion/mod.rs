//! Promotion of QA-validated templates to the next pipeline stage.
//!
//! - [`report`]: the promotion decision document for `qa-gates report`
//! - [`promoter`]: copies templates with metadata for `qa-gates promote`

pub mod error;
pub mod promoter;
pub mod report;

pub use error::{PromotionError, PromotionResult};
pub use promoter::{PromotionOutcome, TemplatePromoter};
pub use report::{create_promotion_report, save_promotion_report};

/// Capitalises the first letter of a stage name for display.
pub(crate) fn stage_title(stage: &str) -> String {
    let mut chars = stage.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
