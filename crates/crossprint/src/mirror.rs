//! Outcomes of mirroring host content into a print surface

use crate::error::{HostError, Unreachable};

/// Result of copying one item (a stylesheet, a font face, a content node)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorItem {
    /// Element id, tag name or font family of the item
    pub item: String,
    pub result: Result<(), HostError>,
}

impl MirrorItem {
    pub fn copied(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            result: Ok(()),
        }
    }

    pub fn failed(item: impl Into<String>, error: HostError) -> Self {
        Self {
            item: item.into(),
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&HostError> {
        self.result.as_ref().err()
    }
}

/// Outcome of mirroring one category of content.
///
/// Failures are data, never panics or early returns: every item is attempted
/// and the caller decides how much a partial copy matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Every item was copied
    Complete,
    /// There was nothing to copy; not an error
    NothingToCopy,
    /// At least one item failed. Holds every attempted item in order.
    Partial(Vec<MirrorItem>),
}

impl MirrorOutcome {
    pub fn from_items(items: Vec<MirrorItem>) -> Self {
        if items.is_empty() {
            MirrorOutcome::NothingToCopy
        } else if items.iter().all(MirrorItem::is_success) {
            MirrorOutcome::Complete
        } else {
            MirrorOutcome::Partial(items)
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, MirrorOutcome::Complete)
    }

    pub fn failures(&self) -> impl Iterator<Item = &MirrorItem> {
        let items: &[MirrorItem] = match self {
            MirrorOutcome::Partial(items) => items,
            _ => &[],
        };
        items.iter().filter(|item| !item.is_success())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}

/// Mirroring either reaches the surface or reports it unreachable
pub type MirrorResult = Result<MirrorOutcome, Unreachable>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_items_classification() {
        assert_eq!(MirrorOutcome::from_items(Vec::new()), MirrorOutcome::NothingToCopy);
        assert!(MirrorOutcome::from_items(vec![MirrorItem::copied("a")]).is_complete());

        let outcome = MirrorOutcome::from_items(vec![
            MirrorItem::copied("theme"),
            MirrorItem::failed("print", HostError::Rejected("blocked".to_string())),
        ]);
        assert_eq!(outcome.failure_count(), 1);
        let failed: Vec<_> = outcome.failures().map(|item| item.item.as_str()).collect();
        assert_eq!(failed, vec!["print"]);
        assert!(matches!(outcome, MirrorOutcome::Partial(ref items) if items.len() == 2));
    }

    #[test]
    fn test_complete_has_no_failures() {
        assert_eq!(MirrorOutcome::Complete.failure_count(), 0);
        assert_eq!(MirrorOutcome::NothingToCopy.failures().count(), 0);
    }
}
