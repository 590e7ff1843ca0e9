//! Case-insensitive tag deduplication for bulk tag creation.

use std::collections::{HashMap, HashSet};

use crate::types::DbId;

/// Normalize a tag name for comparison: trim whitespace and lowercase.
///
/// The stored name keeps the caller's casing; only comparisons use this form.
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Outcome of matching requested names against the existing tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCreationPlan {
    /// Ids of existing tags matched by at least one requested name, once each.
    pub existing_ids: Vec<DbId>,
    /// Names that must be inserted, first submitted spelling, once each.
    pub names_to_create: Vec<String>,
}

impl TagCreationPlan {
    /// Number of ids the creation will return.
    pub fn len(&self) -> usize {
        self.existing_ids.len() + self.names_to_create.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `requested` into names already covered by `existing` and names to
/// insert. Inputs that normalize to the same value collapse to one entry.
pub fn plan_tag_creation<'a, I>(existing: I, requested: &[String]) -> TagCreationPlan
where
    I: IntoIterator<Item = (DbId, &'a str)>,
{
    let mut by_name: HashMap<String, DbId> = HashMap::new();
    for (id, name) in existing {
        by_name.entry(normalize_tag_name(name)).or_insert(id);
    }

    let mut plan = TagCreationPlan::default();
    let mut seen = HashSet::new();

    for name in requested {
        let normalized = normalize_tag_name(name);
        if !seen.insert(normalized.clone()) {
            continue;
        }
        match by_name.get(&normalized) {
            Some(id) => plan.existing_ids.push(*id),
            None => plan.names_to_create.push(name.trim().to_string()),
        }
    }

    plan
}
