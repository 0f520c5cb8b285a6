//! A ventilation plan: the vents installed (or proposed) on one roof

use crate::types::{SystemKind, VentCategory, VentEntry};

/// Ordered list of vent entries with at most one entry per
/// (category, vent type) pair.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VentilationSystem {
    kind: SystemKind,
    entries: Vec<VentEntry>,
}

impl VentilationSystem {
    pub fn new(kind: SystemKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
        }
    }

    /// Build a system from raw entries. A repeated (category, vent type)
    /// pair overwrites the earlier quantity and keeps the earlier position.
    pub fn from_entries(kind: SystemKind, entries: impl IntoIterator<Item = VentEntry>) -> Self {
        let mut system = Self::new(kind);
        for entry in entries {
            system.set_quantity(entry.category, entry.vent_type, entry.quantity);
        }
        system
    }

    pub fn kind(&self) -> SystemKind {
        self.kind
    }

    pub fn entries(&self) -> &[VentEntry] {
        &self.entries
    }

    pub fn entries_in(&self, category: VentCategory) -> impl Iterator<Item = &VentEntry> {
        self.entries.iter().filter(move |e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite the quantity for a vent
    pub fn set_quantity(
        &mut self,
        category: VentCategory,
        vent_type: impl Into<String>,
        quantity: u32,
    ) {
        let vent_type = vent_type.into();
        match self
            .entries
            .iter_mut()
            .find(|e| e.same_slot(category, &vent_type))
        {
            Some(existing) => existing.quantity = quantity,
            None => self
                .entries
                .push(VentEntry::new(category, vent_type, quantity)),
        }
    }

    pub fn quantity_of(&self, category: VentCategory, vent_type: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.same_slot(category, vent_type))
            .map(|e| e.quantity)
    }

    /// Remove a vent; returns the quantity it had
    pub fn remove(&mut self, category: VentCategory, vent_type: &str) -> Option<u32> {
        let index = self
            .entries
            .iter()
            .position(|e| e.same_slot(category, vent_type))?;
        Some(self.entries.remove(index).quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_quantity_overwrites_existing_slot() {
        let mut system = VentilationSystem::new(SystemKind::Current);
        system.set_quantity(VentCategory::Exhaust, "Ridge Vent", 10);
        system.set_quantity(VentCategory::Intake, "Gable Vent", 2);
        system.set_quantity(VentCategory::Exhaust, "Ridge Vent", 40);

        assert_eq!(system.len(), 2);
        assert_eq!(
            system.quantity_of(VentCategory::Exhaust, "Ridge Vent"),
            Some(40)
        );
        assert_eq!(system.entries()[0].vent_type, "Ridge Vent");
    }

    #[test]
    fn test_same_name_in_other_category_is_a_separate_slot() {
        let mut system = VentilationSystem::new(SystemKind::Proposed);
        system.set_quantity(VentCategory::Exhaust, "Gable Vent", 1);
        system.set_quantity(VentCategory::Intake, "Gable Vent", 3);

        assert_eq!(system.len(), 2);
        assert_eq!(system.entries_in(VentCategory::Intake).count(), 1);
    }

    #[test]
    fn test_from_entries_collapses_duplicates_last_wins() {
        let system = VentilationSystem::from_entries(
            SystemKind::Current,
            vec![
                VentEntry::new(VentCategory::Intake, "Full Vent Soffit", 4),
                VentEntry::new(VentCategory::Exhaust, "Box Vent", 2),
                VentEntry::new(VentCategory::Intake, "Full Vent Soffit", 8),
            ],
        );

        assert_eq!(
            system.entries(),
            &[
                VentEntry::new(VentCategory::Intake, "Full Vent Soffit", 8),
                VentEntry::new(VentCategory::Exhaust, "Box Vent", 2),
            ]
        );
    }

    #[test]
    fn test_remove() {
        let mut system = VentilationSystem::new(SystemKind::Current);
        system.set_quantity(VentCategory::Exhaust, "Turbine Vent", 3);

        assert_eq!(system.remove(VentCategory::Exhaust, "Turbine Vent"), Some(3));
        assert_eq!(system.remove(VentCategory::Exhaust, "Turbine Vent"), None);
        assert!(system.is_empty());
    }
}
