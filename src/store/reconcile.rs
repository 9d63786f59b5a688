//! Tag-set reconciliation.
//!
//! Computes the smallest set of row mutations that makes a note's persisted
//! tags equal to the desired set supplied with an update. Planning is pure;
//! the store applies the plan inside the update transaction.

use crate::domain::{Tag, TagDraft, TagId};
use std::collections::{HashMap, HashSet};

/// Mutations needed to bring a note's tags to the desired state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPlan {
    /// Persisted tags no desired entry refers to.
    pub delete: Vec<TagId>,
    /// Persisted tags kept under a different name.
    pub rename: Vec<(TagId, String)>,
    /// Names of tags to create.
    pub insert: Vec<String>,
    /// Persisted tags kept as they are.
    pub unchanged: usize,
}

impl TagPlan {
    /// Returns true if applying the plan would not touch any row.
    pub fn is_noop(&self) -> bool {
        self.delete.is_empty() && self.rename.is_empty() && self.insert.is_empty()
    }
}

/// Plans the reconciliation of `persisted` against `desired`.
///
/// - a desired entry whose id matches a persisted tag keeps that tag, renaming
///   it when the name differs;
/// - a desired entry without an id, with an id the note does not own, or
///   repeating an id already claimed, becomes a new tag;
/// - a persisted tag no desired entry claims is deleted.
///
/// Deletions and renames follow the order of `persisted` and `desired`
/// respectively, so plans are deterministic.
pub fn plan_tags(persisted: &[Tag], desired: &[TagDraft]) -> TagPlan {
    let current: HashMap<TagId, &str> = persisted.iter().map(|t| (t.id(), t.name())).collect();
    let mut claimed: HashSet<TagId> = HashSet::with_capacity(desired.len());
    let mut plan = TagPlan::default();

    for draft in desired {
        match draft.id {
            Some(id) if current.contains_key(&id) && claimed.insert(id) => {
                if current[&id] == draft.name {
                    plan.unchanged += 1;
                } else {
                    plan.rename.push((id, draft.name.clone()));
                }
            }
            _ => plan.insert.push(draft.name.clone()),
        }
    }

    plan.delete = persisted
        .iter()
        .map(Tag::id)
        .filter(|id| !claimed.contains(id))
        .collect();

    plan
}
