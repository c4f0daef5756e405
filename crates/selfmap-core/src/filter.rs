use std::collections::{BTreeSet, HashSet};

use crate::category::Category;
use crate::model::{Dataset, Entry};

/// Search box plus category toggles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EntryFilter {
    /// Case-insensitive substring matched against label or category name.
    pub query: Option<String>,
    /// Enabled categories; `None` enables all.
    pub categories: Option<BTreeSet<Category>>,
}

impl EntryFilter {
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().is_none_or(|q| q.trim().is_empty()) && self.categories.is_none()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if let Some(enabled) = &self.categories
            && !enabled.contains(&entry.category)
        {
            return false;
        }
        match self.query.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                entry.label.to_lowercase().contains(&q)
                    || entry.category.as_str().to_lowercase().contains(&q)
            }
        }
    }

    /// Keep matching entries and the associations whose endpoints both
    /// survive.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        if self.is_empty() {
            return dataset.clone();
        }
        let entries: Vec<Entry> = dataset
            .entries
            .iter()
            .filter(|e| self.matches(e))
            .cloned()
            .collect();
        let kept: HashSet<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        let associations = dataset
            .associations
            .iter()
            .filter(|a| kept.contains(a.src.as_str()) && kept.contains(a.dst.as_str()))
            .cloned()
            .collect();
        Dataset::new(entries, associations)
    }
}
