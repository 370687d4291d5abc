//! Binding registry for console commands and variables.
//!
//! Three identifier to handler tables. The registry stores and looks up
//! handlers; it never owns the storage a handler refers to.

use std::collections::BTreeMap;

use super::Handler;

/// Identifier tables for one console.
///
/// Variables live in two tables, a setter and a getter, which are always
/// inserted and removed together. Tables are ordered so enumeration is
/// sorted by identifier.
#[derive(Default)]
pub struct Bindings {
    commands: BTreeMap<Box<str>, Handler>,
    setters: BTreeMap<Box<str>, Handler>,
    getters: BTreeMap<Box<str>, Handler>,
}

impl Bindings {
    /// Create empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a command handler.
    ///
    /// Returns `true` if newly inserted, `false` if it replaced an existing entry.
    pub fn insert_command(&mut self, id: &str, handler: Handler) -> bool {
        self.commands.insert(id.into(), handler).is_none()
    }

    /// Install the setter/getter pair for a variable.
    ///
    /// Returns `true` if newly inserted, `false` if it replaced an existing entry.
    pub fn insert_cvar(&mut self, id: &str, setter: Handler, getter: Handler) -> bool {
        let replaced_setter = self.setters.insert(id.into(), setter).is_some();
        let replaced_getter = self.getters.insert(id.into(), getter).is_some();
        !(replaced_setter || replaced_getter)
    }

    /// Remove a command. Returns `true` if one was bound.
    pub fn remove_command(&mut self, id: &str) -> bool {
        self.commands.remove(id).is_some()
    }

    /// Remove both accessors of a variable. Returns `true` if one was bound.
    pub fn remove_cvar(&mut self, id: &str) -> bool {
        let setter = self.setters.remove(id).is_some();
        let getter = self.getters.remove(id).is_some();
        setter || getter
    }

    /// Look up a command handler.
    #[inline]
    pub fn command(&self, id: &str) -> Option<&Handler> {
        self.commands.get(id)
    }

    /// Look up a variable's setter.
    #[inline]
    pub fn setter(&self, id: &str) -> Option<&Handler> {
        self.setters.get(id)
    }

    /// Look up a variable's getter.
    #[inline]
    pub fn getter(&self, id: &str) -> Option<&Handler> {
        self.getters.get(id)
    }

    /// Check if a command is bound.
    #[inline]
    pub fn contains_command(&self, id: &str) -> bool {
        self.commands.contains_key(id)
    }

    /// Check if a variable is bound.
    #[inline]
    pub fn contains_cvar(&self, id: &str) -> bool {
        self.getters.contains_key(id)
    }

    /// Iterate over command identifiers in sorted order.
    pub fn command_names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(|k| k.as_ref())
    }

    /// Iterate over variable identifiers in sorted order.
    pub fn cvar_names(&self) -> impl Iterator<Item = &str> {
        self.getters.keys().map(|k| k.as_ref())
    }
}

impl std::fmt::Debug for Bindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bindings")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .field("cvars", &self.getters.keys().collect::<Vec<_>>())
            .finish()
    }
}
