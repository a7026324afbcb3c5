//! Display-only status labels.

use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared status label. Clones observe and write the same value.
///
/// Labels carry no behavioral meaning; last write wins.
#[derive(Debug, Clone)]
pub struct StatusCell {
    owner: Rc<str>,
    value: Rc<RefCell<String>>,
}

impl StatusCell {
    pub fn new(owner: &str, initial: impl Into<String>) -> Self {
        Self {
            owner: Rc::from(owner),
            value: Rc::new(RefCell::new(initial.into())),
        }
    }

    pub fn get(&self) -> String {
        self.value.borrow().clone()
    }

    pub fn set(&self, label: impl Into<String>) {
        let label = label.into();
        debug!(
            "event=status_changed module=status owner={} status={:?}",
            self.owner, label
        );
        *self.value.borrow_mut() = label;
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }
}
