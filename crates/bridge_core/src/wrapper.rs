//! Capability consumer that drives whichever provider it embeds.
//!
//! # Responsibility
//! - Hold an ordered list of embedded content handles and one lookup scope.
//! - Resolve the active bridge: explicit registration first, then position.
//! - Forward `load` / `refresh` triggers, or report absence.
//!
//! # Invariants
//! - Resolution is recomputed on every call; nothing is cached.
//! - The wrapper never owns a provider's lifetime, only locates it.
//! - A missing bridge is a normal condition: warn, never fail.

use crate::capability::Refreshable;
use crate::content::{find_refreshable, Content};
use crate::registry::{RegistryError, ScopeId, ScopeRegistry};
use crate::status::StatusCell;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::rc::Rc;

pub const WRAPPER_READY: &str = "Wrapper ready";
pub const LOAD_TRIGGERED: &str = "Load triggered";
pub const REFRESH_TRIGGERED: &str = "Refresh triggered";
pub const NO_CHILD_AVAILABLE: &str = "No child available";
pub const ACTIVE_BRIDGE_READY: &str = "Active bridge ready";

/// Which discovery mechanism produced the active bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeSource {
    /// Found through the scope registry (nearest enclosing registration).
    Registered,
    /// Found by searching embedded content.
    Projected,
}

impl BridgeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Projected => "projected",
        }
    }
}

/// The single capability instance one wrapper currently drives.
#[derive(Clone)]
pub struct ResolvedBridge {
    source: BridgeSource,
    bridge: Rc<dyn Refreshable>,
}

impl ResolvedBridge {
    pub fn source(&self) -> BridgeSource {
        self.source
    }

    pub fn bridge(&self) -> &Rc<dyn Refreshable> {
        &self.bridge
    }

    /// Whether this bridge points at `instance`.
    pub fn is<T: Refreshable + 'static>(&self, instance: &Rc<T>) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.bridge), Rc::as_ptr(instance))
    }
}

/// Result of one wrapper trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Forwarded(BridgeSource),
    Missing,
}

/// Behavior switches for one wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperOptions {
    /// When set, `refresh()` without a bridge also sets `No child available`.
    /// Off by default: only `load()` reports absence in the status.
    #[serde(default)]
    pub report_missing_on_refresh: bool,
}

pub struct Wrapper {
    registry: ScopeRegistry,
    scope: ScopeId,
    content: Vec<Rc<dyn Content>>,
    status: StatusCell,
    options: WrapperOptions,
}

impl Wrapper {
    /// Creates a wrapper over `content`, resolving registrations from `scope`.
    ///
    /// # Errors
    /// - `UnknownScope` when `scope` is not part of `registry`.
    pub fn new(
        registry: &ScopeRegistry,
        scope: ScopeId,
        content: Vec<Rc<dyn Content>>,
    ) -> Result<Self, RegistryError> {
        if !registry.contains(scope) {
            return Err(RegistryError::UnknownScope(scope));
        }
        debug!(
            "event=wrapper_created module=wrapper scope={} content_len={}",
            scope,
            content.len()
        );
        Ok(Self {
            registry: registry.clone(),
            scope,
            content,
            status: StatusCell::new(&format!("wrapper:{scope}"), WRAPPER_READY),
            options: WrapperOptions::default(),
        })
    }

    pub fn with_options(mut self, options: WrapperOptions) -> Self {
        self.options = options;
        self
    }

    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    pub fn content(&self) -> &[Rc<dyn Content>] {
        &self.content
    }

    pub fn status(&self) -> String {
        self.status.get()
    }

    /// Resolves the bridge from the current registry and content state.
    pub fn resolve(&self) -> Option<ResolvedBridge> {
        if let Some(bridge) = self.registry.resolve(self.scope) {
            return Some(ResolvedBridge {
                source: BridgeSource::Registered,
                bridge,
            });
        }
        find_refreshable(&self.content).map(|bridge| ResolvedBridge {
            source: BridgeSource::Projected,
            bridge,
        })
    }

    pub fn has_bridge(&self) -> bool {
        self.resolve().is_some()
    }

    /// Indicator label shown next to the controls while a bridge is available.
    pub fn bridge_indicator(&self) -> Option<&'static str> {
        self.has_bridge().then_some(ACTIVE_BRIDGE_READY)
    }

    pub fn load(&self) -> TriggerOutcome {
        let Some(resolved) = self.resolve() else {
            self.warn_missing("load");
            self.status.set(NO_CHILD_AVAILABLE);
            return TriggerOutcome::Missing;
        };

        resolved.bridge.load();
        self.status.set(LOAD_TRIGGERED);
        self.forwarded("load", resolved.source)
    }

    pub fn refresh(&self) -> TriggerOutcome {
        let Some(resolved) = self.resolve() else {
            self.warn_missing("refresh");
            if self.options.report_missing_on_refresh {
                self.status.set(NO_CHILD_AVAILABLE);
            }
            return TriggerOutcome::Missing;
        };

        resolved.bridge.refresh();
        self.status.set(REFRESH_TRIGGERED);
        self.forwarded("refresh", resolved.source)
    }

    fn forwarded(&self, op: &str, source: BridgeSource) -> TriggerOutcome {
        debug!(
            "event=trigger_forwarded module=wrapper scope={} op={} source={}",
            self.scope,
            op,
            source.as_str()
        );
        TriggerOutcome::Forwarded(source)
    }

    fn warn_missing(&self, op: &str) {
        warn!(
            "event=bridge_missing module=wrapper scope={} op={} detail=no_refreshable_child",
            self.scope, op
        );
    }
}
