//! Column selection UI contract

use scatterview_core::ColumnSelection;

/// The host's column picker.
///
/// The widget forwards the dataset's labels whenever the dataset changes and
/// reads back the four selected labels.
pub trait ComponentPicker {
    /// Replace the labels the user can choose from
    fn set_valid_components(&mut self, labels: &[String]);

    /// Currently selected x, y, z and size labels
    fn current_selection(&self) -> Option<ColumnSelection>;

    /// Programmatically change the selection
    fn select(&mut self, selection: ColumnSelection);
}

/// In-memory picker that defaults to the first four labels
#[derive(Debug, Clone, Default)]
pub struct ColumnPicker {
    labels: Vec<String>,
    selection: Option<ColumnSelection>,
}

impl ColumnPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    fn default_selection(labels: &[String]) -> Option<ColumnSelection> {
        let last = labels.len().checked_sub(1)?;
        let pick = |i: usize| labels[i.min(last)].clone();
        Some(ColumnSelection::new(pick(0), pick(1), pick(2), pick(3)))
    }
}

impl ComponentPicker for ColumnPicker {
    fn set_valid_components(&mut self, labels: &[String]) {
        self.labels = labels.to_vec();
        let still_valid = self
            .selection
            .as_ref()
            .is_some_and(|s| s.is_valid_for(&self.labels));
        if !still_valid {
            self.selection = Self::default_selection(&self.labels);
        }
    }

    fn current_selection(&self) -> Option<ColumnSelection> {
        self.selection.clone()
    }

    fn select(&mut self, selection: ColumnSelection) {
        self.selection = Some(selection);
    }
}
