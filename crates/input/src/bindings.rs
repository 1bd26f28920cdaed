//! Physical code to semantic action lookup table.

use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Action, PhysicalCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    #[error("unknown input name `{0}`")]
    UnknownInput(String),
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}

/// Which action each physical code triggers.
///
/// A code maps to at most one action; several codes may share an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    map: HashMap<PhysicalCode, Action>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `code`, replacing any previous action for it.
    pub fn bind(&mut self, code: PhysicalCode, action: Action) -> &mut Self {
        self.map.insert(code, action);
        self
    }

    pub fn unbind(&mut self, code: PhysicalCode) {
        self.map.remove(&code);
    }

    pub fn get(&self, code: PhysicalCode) -> Option<Action> {
        self.map.get(&code).copied()
    }

    /// Codes bound to `action`, in ascending order.
    pub fn codes_for(&self, action: Action) -> Vec<PhysicalCode> {
        let mut codes: Vec<_> = self
            .map
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(c, _)| *c)
            .collect();
        codes.sort();
        codes
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Build from `(input name, action)` pairs using a source's name lookup.
    pub fn from_named<'a>(
        pairs: impl IntoIterator<Item = (&'a str, Action)>,
        lookup: impl Fn(&str) -> Option<PhysicalCode>,
    ) -> Result<Self, BindingError> {
        let mut bindings = Self::new();
        for (name, action) in pairs {
            let code = lookup(name).ok_or_else(|| BindingError::UnknownInput(name.to_string()))?;
            bindings.bind(code, action);
        }
        Ok(bindings)
    }

    /// Like [`Bindings::from_named`] with action names parsed from strings.
    pub fn from_strings<'a>(
        pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
        lookup: impl Fn(&str) -> Option<PhysicalCode>,
    ) -> Result<Self, BindingError> {
        let mut bindings = Self::new();
        for (name, action) in pairs {
            let action = Action::from_str(action)
                .ok_or_else(|| BindingError::UnknownAction(action.to_string()))?;
            let code = lookup(name).ok_or_else(|| BindingError::UnknownInput(name.to_string()))?;
            bindings.bind(code, action);
        }
        Ok(bindings)
    }
}
