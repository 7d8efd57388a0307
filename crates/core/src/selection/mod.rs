//! Bounded selection of catalog entry ids.
//!
//! The set trusts its caller to pass ids that exist in the current catalog;
//! the only reconciliation it performs is the explicit [`SelectionSet::reconcile`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Selection mode and cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPolicy {
    /// Maximum number of ids when multiple selection is allowed.
    pub max_selection: usize,
    pub allow_multiple: bool,
}

impl SelectionPolicy {
    pub fn multiple(max_selection: usize) -> Self {
        Self {
            max_selection,
            allow_multiple: true,
        }
    }

    pub fn single() -> Self {
        Self {
            max_selection: 1,
            allow_multiple: false,
        }
    }

    /// Effective cap, accounting for single-select mode.
    pub fn capacity(&self) -> usize {
        if self.allow_multiple {
            self.max_selection
        } else {
            1
        }
    }
}

/// Result of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Selected,
    Deselected,
}

impl ToggleOutcome {
    pub fn is_selected(&self) -> bool {
        matches!(self, ToggleOutcome::Selected)
    }
}

/// Why a toggle was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Maximum {max} selections reached")]
    MaxReached { max: usize },
}

/// A set of selected ids under a [`SelectionPolicy`].
#[derive(Debug, Clone)]
pub struct SelectionSet {
    policy: SelectionPolicy,
    selected: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self {
            policy,
            selected: BTreeSet::new(),
        }
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    /// Select an unselected id or deselect a selected one.
    ///
    /// Deselecting always succeeds. In single-select mode selecting replaces
    /// whatever was selected. In multi-select mode selecting fails with
    /// [`SelectionError::MaxReached`] at the cap and leaves the set unchanged.
    pub fn toggle(&mut self, id: &str) -> Result<ToggleOutcome, SelectionError> {
        if self.selected.remove(id) {
            return Ok(ToggleOutcome::Deselected);
        }

        if !self.policy.allow_multiple {
            self.selected.clear();
        } else if self.selected.len() >= self.policy.max_selection {
            return Err(SelectionError::MaxReached {
                max: self.policy.max_selection,
            });
        }

        self.selected.insert(id.to_string());
        Ok(ToggleOutcome::Selected)
    }

    /// Empty the set unconditionally.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Replace the membership in one step. Does not check the cap.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = ids.into_iter().map(Into::into).collect();
    }

    /// Drop every id not in `valid_ids`. Returns how many were dropped.
    pub fn reconcile<'a>(&mut self, valid_ids: impl IntoIterator<Item = &'a str>) -> usize {
        let valid: BTreeSet<&str> = valid_ids.into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| valid.contains(id.as_str()));
        before - self.selected.len()
    }

    pub fn members(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether another id can be added without a rejection.
    pub fn has_room(&self) -> bool {
        !self.policy.allow_multiple || self.selected.len() < self.policy.max_selection
    }
}
