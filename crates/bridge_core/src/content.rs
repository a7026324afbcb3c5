//! Embedded content handles and positional capability discovery.
//!
//! # Responsibility
//! - Model what a wrapper embeds as an explicit, ordered list of handles.
//! - Locate the first embedded unit that satisfies `Refreshable`.
//!
//! # Invariants
//! - Discovery order is depth-first, pre-order, left to right.
//! - Non-capable units are skipped, never rejected.

use crate::capability::Refreshable;
use std::rc::Rc;

/// Any unit that can be embedded inside a wrapper.
pub trait Content {
    /// Human-readable label used in diagnostics.
    fn label(&self) -> &str;

    /// Ordered nested content; empty for leaf units.
    fn children(&self) -> Vec<Rc<dyn Content>> {
        Vec::new()
    }

    /// Runtime capability check.
    ///
    /// Capable units return themselves as a `Refreshable` handle.
    fn as_refreshable(self: Rc<Self>) -> Option<Rc<dyn Refreshable>> {
        None
    }
}

/// Plain markup placeholder. Never capable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContent {
    label: String,
}

impl StaticContent {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Content for StaticContent {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Labelled container holding ordered nested content.
pub struct ContentGroup {
    label: String,
    children: Vec<Rc<dyn Content>>,
}

impl ContentGroup {
    pub fn new(label: impl Into<String>, children: Vec<Rc<dyn Content>>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

impl Content for ContentGroup {
    fn label(&self) -> &str {
        &self.label
    }

    fn children(&self) -> Vec<Rc<dyn Content>> {
        self.children.clone()
    }
}

/// Returns the first capable unit among `content`, searching descendants.
pub fn find_refreshable(content: &[Rc<dyn Content>]) -> Option<Rc<dyn Refreshable>> {
    for unit in content {
        if let Some(bridge) = Rc::clone(unit).as_refreshable() {
            return Some(bridge);
        }
        if let Some(bridge) = find_refreshable(&unit.children()) {
            return Some(bridge);
        }
    }
    None
}
