use shared_types::Contact;
use std::collections::BTreeSet;

/// Bulk-select state for the contact list.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    active: bool,
    selected: BTreeSet<i64>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Enters or leaves select mode; either way starts from an empty set.
    pub fn toggle_mode(&mut self) {
        self.active = !self.active;
        self.selected.clear();
    }

    /// `checked` selects every visible contact, otherwise clears the selection.
    pub fn select_all(&mut self, checked: bool, visible: &[Contact]) {
        if checked {
            self.selected.extend(visible.iter().map(|c| c.id));
        } else {
            self.selected.clear();
        }
    }

    pub fn toggle(&mut self, contact_id: i64) {
        if !self.selected.remove(&contact_id) {
            self.selected.insert(contact_id);
        }
    }

    pub fn is_selected(&self, contact_id: i64) -> bool {
        self.selected.contains(&contact_id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// State of the header checkbox.
    pub fn all_selected(&self, visible: &[Contact]) -> bool {
        !visible.is_empty() && self.selected.len() == visible.len()
    }

    /// Drops ids that are no longer in the visible list.
    pub fn retain_visible(&mut self, visible: &[Contact]) {
        let ids: BTreeSet<i64> = visible.iter().map(|c| c.id).collect();
        self.selected.retain(|id| ids.contains(id));
    }

    pub fn ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    pub fn label(&self) -> String {
        format!("{} selected", self.selected.len())
    }
}
