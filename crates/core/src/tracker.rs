//! Per-page cursor over the most recent primary row.

/// Identity fields of the primary row that subordinate rows inherit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parent {
    pub unit_id: String,
    pub unit_name: String,
    pub graduates_total: i64,
}

/// Holds the currently active parent for one page.
///
/// The scanner resets it before the first band of every page, so a parent
/// never leaks across a page boundary.
#[derive(Debug, Default)]
pub struct PageState {
    current: Option<Parent>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Parent> {
        self.current.as_ref()
    }

    pub(crate) fn set(&mut self, parent: Parent) {
        self.current = Some(parent);
    }
}
