//! Membership diffs between a toy's current child collections and the state
//! a client asks for.
//!
//! Tags are diffed by id. Attachments are diffed by link for additions and
//! by attachment id for removals. Output order is deterministic: additions
//! follow the desired order, removals follow the current order, and no value
//! appears twice.

use std::collections::HashSet;
use std::hash::Hash;

use crate::types::DbId;

/// Ids to add and ids to remove so that `current` becomes `desired`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDiff<T> {
    /// `desired \ current`.
    pub to_add: Vec<T>,
    /// `current \ desired`.
    pub to_delete: Vec<T>,
}

impl<T> SetDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_delete.is_empty()
    }
}

/// Compute `desired \ current` and `current \ desired`.
pub fn set_diff<T>(current: &[T], desired: &[T]) -> SetDiff<T>
where
    T: Eq + Hash + Clone,
{
    let current_set: HashSet<&T> = current.iter().collect();
    let desired_set: HashSet<&T> = desired.iter().collect();

    let mut seen = HashSet::new();
    let to_add = desired
        .iter()
        .filter(|v| !current_set.contains(v) && seen.insert(*v))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let to_delete = current
        .iter()
        .filter(|v| !desired_set.contains(v) && seen.insert(*v))
        .cloned()
        .collect();

    SetDiff { to_add, to_delete }
}

/// Attachment changes keyed on link equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentDiff {
    /// Desired links not present among the current attachments.
    pub links_to_add: Vec<String>,
    /// Current attachments whose link is not desired.
    pub ids_to_delete: Vec<DbId>,
}

impl AttachmentDiff {
    pub fn is_empty(&self) -> bool {
        self.links_to_add.is_empty() && self.ids_to_delete.is_empty()
    }
}

/// Drop repeated links, keeping the first occurrence of each.
pub fn dedup_links(links: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| seen.insert(link.as_str()))
        .cloned()
        .collect()
}

/// Diff the current `(attachment_id, link)` pairs against the desired links.
///
/// Applying the result leaves exactly one attachment per distinct desired
/// link.
pub fn attachment_diff<'a, I>(current: I, desired: &[String]) -> AttachmentDiff
where
    I: IntoIterator<Item = (DbId, &'a str)>,
{
    let current: Vec<(DbId, &str)> = current.into_iter().collect();
    let current_links: HashSet<&str> = current.iter().map(|(_, link)| *link).collect();
    let desired_links: HashSet<&str> = desired.iter().map(String::as_str).collect();

    let mut links_to_add = Vec::new();
    let mut seen = HashSet::new();
    for link in desired {
        if !current_links.contains(link.as_str()) && seen.insert(link.as_str()) {
            links_to_add.push(link.clone());
        }
    }

    // The first row per wanted link survives; later rows sharing it go.
    let mut kept = HashSet::new();
    let ids_to_delete = current
        .iter()
        .filter(|(_, link)| !desired_links.contains(link) || !kept.insert(*link))
        .map(|(id, _)| *id)
        .collect();

    AttachmentDiff {
        links_to_add,
        ids_to_delete,
    }
}
