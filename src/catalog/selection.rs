use crate::catalog::MenuItem;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Set of catalog items the customer has ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<u64>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Flip the selection state of `id`. Returns true if it is now selected.
    pub fn toggle(&mut self, id: u64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn select(&mut self, id: u64) {
        self.ids.insert(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected items in catalog order. Ids missing from the catalog are skipped.
    pub fn selected_items<'a>(&self, catalog: &'a [MenuItem]) -> Vec<&'a MenuItem> {
        catalog
            .iter()
            .filter(|item| self.ids.contains(&item.id))
            .collect()
    }

    /// Sum of selected prices; unparsable prices count as zero.
    pub fn subtotal(&self, catalog: &[MenuItem]) -> Decimal {
        self.selected_items(catalog)
            .iter()
            .map(|item| item.price_value())
            .sum()
    }
}
