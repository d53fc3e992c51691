use std::collections::BTreeMap;

/// Expanded/collapsed state of the exercise panels, keyed by row index.
/// Rows without an entry are collapsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PanelState {
    expanded: BTreeMap<usize, bool>,
}

impl PanelState {
    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(&index).copied().unwrap_or(false)
    }

    pub fn set_expanded(&mut self, index: usize, expanded: bool) {
        self.expanded.insert(index, expanded);
    }

    pub fn toggle(&mut self, index: usize) {
        let expanded = self.is_expanded(index);
        self.set_expanded(index, !expanded);
    }

    /// Forgets `index` and moves every later panel up by one.
    pub fn remove(&mut self, index: usize) {
        self.expanded = std::mem::take(&mut self.expanded)
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, open)| if i > index { (i - 1, open) } else { (i, open) })
            .collect();
    }

    /// Drops entries for rows that no longer exist.
    pub fn truncate(&mut self, len: usize) {
        self.expanded.retain(|index, _| *index < len);
    }

    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn expanded_indices(&self) -> Vec<usize> {
        self.expanded
            .iter()
            .filter(|(_, open)| **open)
            .map(|(index, _)| *index)
            .collect()
    }
}
