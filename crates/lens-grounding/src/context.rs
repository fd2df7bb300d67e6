//! Builds the id-tagged context handed to the generator.

use std::collections::BTreeSet;

use lens_core::text::truncate_chars;
use lens_core::{ContextBlock, EvidenceItem, SourceId};

/// Tag that opens every context block.
pub const SOURCE_TAG: &str = "[Source ID:";

const NEUTRALIZED_TAG: &str = "(Source ID:";

/// Turns registered evidence into bounded, unambiguously tagged blocks.
#[derive(Debug, Clone, Copy)]
pub struct ContextAssembler {
    char_budget: usize,
}

impl ContextAssembler {
    /// `char_budget` caps the text of each block, in characters.
    #[must_use]
    pub const fn new(char_budget: usize) -> Self {
        Self { char_budget }
    }

    /// One block per item that has usable text, in the order given.
    ///
    /// Callers pass items in ascending id order (as [`crate::SourceRegistry::all`]
    /// returns them), so the output is ordered too.
    #[must_use]
    pub fn assemble(&self, items: &[EvidenceItem]) -> Vec<ContextBlock> {
        items
            .iter()
            .filter_map(|item| {
                let text = item.usable_text()?;
                let text = neutralize_tags(text.trim());
                let text = truncate_chars(&text, self.char_budget).trim_end();
                (!text.is_empty()).then(|| ContextBlock {
                    source_id: item.id,
                    text: text.to_string(),
                })
            })
            .collect()
    }

    /// Ids the generator is shown. Only these can be grounded.
    #[must_use]
    pub fn source_ids(blocks: &[ContextBlock]) -> BTreeSet<SourceId> {
        blocks.iter().map(|block| block.source_id).collect()
    }

    /// Render blocks as the generator payload.
    #[must_use]
    pub fn render(blocks: &[ContextBlock]) -> String {
        blocks
            .iter()
            .map(|block| format!("{SOURCE_TAG} {}] {}", block.source_id, block.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Evidence text must not forge another block's tag.
fn neutralize_tags(text: &str) -> String {
    text.replace(SOURCE_TAG, NEUTRALIZED_TAG)
}
