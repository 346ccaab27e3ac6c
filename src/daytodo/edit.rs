//! Reconciles an in-place content edit with the stored task.
//!
//! Empty text is never persisted: a blank edit is discarded and the original
//! content stays. An edit that matches the original after trimming makes no
//! storage call at all.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Blank after trimming. Show `original` again.
    Discard,
    /// Same text as before. Nothing to write.
    Unchanged,
    /// Write this trimmed content.
    Update(String),
}

pub fn reconcile_edit(original: &str, edited: &str) -> EditOutcome {
    let trimmed = edited.trim();
    if trimmed.is_empty() {
        EditOutcome::Discard
    } else if trimmed == original {
        EditOutcome::Unchanged
    } else {
        EditOutcome::Update(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_discarded() {
        assert_eq!(reconcile_edit("buy milk", "   "), EditOutcome::Discard);
        assert_eq!(reconcile_edit("buy milk", ""), EditOutcome::Discard);
        assert_eq!(reconcile_edit("buy milk", "\n\t"), EditOutcome::Discard);
    }

    #[test]
    fn identical_text_is_unchanged() {
        assert_eq!(reconcile_edit("buy milk", "buy milk"), EditOutcome::Unchanged);
        assert_eq!(reconcile_edit("buy milk", "  buy milk "), EditOutcome::Unchanged);
    }

    #[test]
    fn new_text_is_trimmed() {
        assert_eq!(
            reconcile_edit("buy milk", "  buy oat milk  "),
            EditOutcome::Update("buy oat milk".to_string())
        );
    }
}
