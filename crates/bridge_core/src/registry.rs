//! Explicit scope registry for `Refreshable` registrations.
//!
//! # Responsibility
//! - Track a tree of lookup scopes passed explicitly down the construction chain.
//! - Hold at most one provider registration per scope.
//! - Resolve the nearest enclosing registration for a scope.
//!
//! # Invariants
//! - The registry never owns a provider: entries hold weak references.
//! - A registration lives exactly as long as its `Registration` guard.
//! - Single-threaded: handles are `Rc`-based and not `Send`.

use crate::capability::{Refreshable, REFRESH_TOKEN};
use log::debug;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Stable identifier for one lookup scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(Uuid);

impl ScopeId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scope registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    UnknownScope(ScopeId),
    ScopeOccupied(ScopeId),
    ScopeHasChildren(ScopeId),
    ScopeHasRegistration(ScopeId),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownScope(scope) => write!(f, "scope is unknown: {scope}"),
            Self::ScopeOccupied(scope) => {
                write!(f, "scope already holds a `{REFRESH_TOKEN}` registration: {scope}")
            }
            Self::ScopeHasChildren(scope) => write!(f, "scope still has child scopes: {scope}"),
            Self::ScopeHasRegistration(scope) => {
                write!(f, "scope still holds a live registration: {scope}")
            }
        }
    }
}

impl Error for RegistryError {}

struct RegistrationEntry {
    id: Uuid,
    instance: Weak<dyn Refreshable>,
}

struct ScopeNode {
    parent: Option<ScopeId>,
    entry: Option<RegistrationEntry>,
}

#[derive(Default)]
struct RegistryState {
    scopes: BTreeMap<ScopeId, ScopeNode>,
}

impl RegistryState {
    fn is_live(&self, scope: &ScopeId) -> bool {
        self.scopes
            .get(scope)
            .and_then(|node| node.entry.as_ref())
            .is_some_and(|entry| entry.instance.strong_count() > 0)
    }
}

/// Shared handle to one registry. Clones point at the same state.
#[derive(Clone, Default)]
pub struct ScopeRegistry {
    state: Rc<RefCell<RegistryState>>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope nested under `parent`, or a root scope for `None`.
    pub fn create_scope(&self, parent: Option<ScopeId>) -> Result<ScopeId, RegistryError> {
        let mut state = self.state.borrow_mut();
        if let Some(parent) = parent {
            if !state.scopes.contains_key(&parent) {
                return Err(RegistryError::UnknownScope(parent));
            }
        }

        let scope = ScopeId::generate();
        state.scopes.insert(
            scope,
            ScopeNode {
                parent,
                entry: None,
            },
        );
        debug!(
            "event=scope_created module=registry scope={} parent={}",
            scope,
            parent.map_or_else(|| "none".to_string(), |id| id.to_string())
        );
        Ok(scope)
    }

    /// Removes a leaf scope. Dead entries go with it; a live registration
    /// must be torn down by its provider first.
    pub fn close_scope(&self, scope: ScopeId) -> Result<(), RegistryError> {
        let mut state = self.state.borrow_mut();
        if !state.scopes.contains_key(&scope) {
            return Err(RegistryError::UnknownScope(scope));
        }
        if state
            .scopes
            .values()
            .any(|node| node.parent == Some(scope))
        {
            return Err(RegistryError::ScopeHasChildren(scope));
        }
        if state.is_live(&scope) {
            return Err(RegistryError::ScopeHasRegistration(scope));
        }

        state.scopes.remove(&scope);
        debug!("event=scope_closed module=registry scope={scope}");
        Ok(())
    }

    pub fn contains(&self, scope: ScopeId) -> bool {
        self.state.borrow().scopes.contains_key(&scope)
    }

    pub fn parent_of(&self, scope: ScopeId) -> Option<ScopeId> {
        self.state
            .borrow()
            .scopes
            .get(&scope)
            .and_then(|node| node.parent)
    }

    pub fn len(&self) -> usize {
        self.state.borrow().scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().scopes.is_empty()
    }

    /// Registers `instance` as the `Refreshable` for `scope`.
    ///
    /// Dead entries left by dropped instances do not block a new registration.
    pub fn register(
        &self,
        scope: ScopeId,
        instance: Weak<dyn Refreshable>,
    ) -> Result<Registration, RegistryError> {
        let mut state = self.state.borrow_mut();
        if state.is_live(&scope) {
            return Err(RegistryError::ScopeOccupied(scope));
        }
        let Some(node) = state.scopes.get_mut(&scope) else {
            return Err(RegistryError::UnknownScope(scope));
        };

        let id = Uuid::new_v4();
        node.entry = Some(RegistrationEntry { id, instance });
        debug!(
            "event=registered module=registry token={} scope={} registration={}",
            REFRESH_TOKEN, scope, id
        );

        Ok(Registration {
            registry: self.clone(),
            scope,
            id,
        })
    }

    /// Whether `scope` itself holds a live registration.
    pub fn registered_in(&self, scope: ScopeId) -> bool {
        self.state.borrow().is_live(&scope)
    }

    /// Resolves the nearest enclosing live registration, starting at `scope`.
    pub fn resolve(&self, scope: ScopeId) -> Option<Rc<dyn Refreshable>> {
        let state = self.state.borrow();
        let mut cursor = Some(scope);
        while let Some(current) = cursor {
            let node = state.scopes.get(&current)?;
            if let Some(instance) = node.entry.as_ref().and_then(|entry| entry.instance.upgrade()) {
                return Some(instance);
            }
            cursor = node.parent;
        }
        None
    }

    fn unregister(&self, scope: ScopeId, id: Uuid) {
        let mut state = self.state.borrow_mut();
        let Some(node) = state.scopes.get_mut(&scope) else {
            return;
        };
        if node.entry.as_ref().is_some_and(|entry| entry.id == id) {
            node.entry = None;
            debug!(
                "event=unregistered module=registry token={} scope={} registration={}",
                REFRESH_TOKEN, scope, id
            );
        }
    }
}

/// Guard for one live registration. Dropping it removes the entry.
pub struct Registration {
    registry: ScopeRegistry,
    scope: ScopeId,
    id: Uuid,
}

impl Registration {
    pub fn scope(&self) -> ScopeId {
        self.scope
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.unregister(self.scope, self.id);
    }
}
