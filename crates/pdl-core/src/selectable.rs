use indexmap::IndexMap;

use crate::{ParameterSet, Selection, TreeError};

/// Tagged union of parameter sets: exactly one alternative is active.
///
/// The default tree of every alternative is kept so that switching back to an
/// alternative starts over from its defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableSubset {
    selection: Selection,
    alternatives: IndexMap<String, ParameterSet>,
    active: ParameterSet,
}

impl SelectableSubset {
    /// Panics if `index` does not name an alternative.
    pub fn new<I, S>(alternatives: I, index: usize) -> Self
    where
        I: IntoIterator<Item = (S, ParameterSet)>,
        S: Into<String>,
    {
        let alternatives: IndexMap<String, ParameterSet> = alternatives
            .into_iter()
            .map(|(key, set)| (key.into(), set))
            .collect();
        let selection = Selection::new(alternatives.keys().cloned(), index);
        let active = alternatives
            .get_index(index)
            .map(|(_, set)| set.clone())
            .unwrap_or_default();
        Self {
            selection,
            alternatives,
            active,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> &str {
        self.selection.selected()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.alternatives.keys().map(String::as_str)
    }

    /// Default tree of alternative `key`.
    pub fn alternative(&self, key: &str) -> Option<&ParameterSet> {
        self.alternatives.get(key)
    }

    pub fn active(&self) -> &ParameterSet {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ParameterSet {
        &mut self.active
    }

    /// Switches to alternative `key`, replacing the active tree with that
    /// alternative's defaults. On error nothing changes.
    pub fn set_selection(&mut self, key: &str) -> Result<(), TreeError> {
        let Some(defaults) = self.alternatives.get(key) else {
            return Err(TreeError::unknown_selection(key, self.selection.items()));
        };
        let fresh = defaults.clone();
        self.selection.select(key)?;
        self.active = fresh;
        Ok(())
    }
}
