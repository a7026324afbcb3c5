//! Capability providers that a wrapper can discover and drive.
//!
//! # Responsibility
//! - Share the status/timer/registration plumbing between provider variants.
//! - Register each provider in the scope it is created in.
//!
//! # Invariants
//! - `load`/`refresh` set the working label synchronously and the done label
//!   only when the scheduled completion fires.
//! - A provider's registration is removed on `destroy()` or drop, whichever
//!   comes first.
//! - Variants share behavior by composition; there is no base type.

pub mod com_one;
pub mod com_two;

use crate::capability::Refreshable;
use crate::profile::{OverlapPolicy, ProfileError, ProviderProfile};
use crate::registry::{Registration, RegistryError, ScopeId, ScopeRegistry};
use crate::status::StatusCell;
use crate::timer::{TimerId, TimerQueue};
use log::{debug, info};
use std::cell::{Cell, RefCell};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Weak;

/// Construction inputs handed down to providers.
#[derive(Clone)]
pub struct ProviderContext {
    registry: ScopeRegistry,
    timers: TimerQueue,
    scope: Option<ScopeId>,
}

impl ProviderContext {
    /// Context without a registration scope: providers built from it are
    /// discoverable only by position.
    pub fn new(registry: &ScopeRegistry, timers: &TimerQueue) -> Self {
        Self {
            registry: registry.clone(),
            timers: timers.clone(),
            scope: None,
        }
    }

    /// Providers built from the returned context register into `scope`.
    pub fn in_scope(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn scope(&self) -> Option<ScopeId> {
        self.scope
    }
}

/// Provider construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    InvalidProfile(ProfileError),
    Registration(RegistryError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidProfile(err) => write!(f, "invalid provider profile: {err}"),
            Self::Registration(err) => write!(f, "provider registration failed: {err}"),
        }
    }
}

impl Error for ProviderError {}

impl From<ProfileError> for ProviderError {
    fn from(value: ProfileError) -> Self {
        Self::InvalidProfile(value)
    }
}

impl From<RegistryError> for ProviderError {
    fn from(value: RegistryError) -> Self {
        Self::Registration(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Load,
    Refresh,
}

impl Operation {
    fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Refresh => "refresh",
        }
    }
}

pub(crate) struct ProviderCore {
    profile: ProviderProfile,
    status: StatusCell,
    timers: TimerQueue,
    pending: Cell<Option<TimerId>>,
    registration: RefCell<Option<Registration>>,
}

impl ProviderCore {
    fn new(ctx: &ProviderContext, profile: ProviderProfile) -> Result<Self, ProviderError> {
        profile.validate()?;
        Ok(Self {
            status: StatusCell::new(&profile.name, profile.idle_label.clone()),
            timers: ctx.timers.clone(),
            pending: Cell::new(None),
            registration: RefCell::new(None),
            profile,
        })
    }

    /// Registers `instance` into the context scope, if any.
    fn attach(
        &self,
        ctx: &ProviderContext,
        instance: Weak<dyn Refreshable>,
    ) -> Result<(), ProviderError> {
        let Some(scope) = ctx.scope else {
            debug!(
                "event=provider_created module=provider provider={} registered=false",
                self.profile.name
            );
            return Ok(());
        };

        let registration = ctx.registry.register(scope, instance)?;
        *self.registration.borrow_mut() = Some(registration);
        debug!(
            "event=provider_created module=provider provider={} registered=true scope={}",
            self.profile.name, scope
        );
        Ok(())
    }

    fn start(&self, operation: Operation) {
        let (working, done, delay) = match operation {
            Operation::Load => (
                &self.profile.loading_label,
                self.profile.loaded_label.clone(),
                self.profile.load_delay(),
            ),
            Operation::Refresh => (
                &self.profile.refreshing_label,
                self.profile.refreshed_label.clone(),
                self.profile.refresh_delay(),
            ),
        };

        if self.profile.overlap == OverlapPolicy::Restart {
            if let Some(previous) = self.pending.take() {
                if self.timers.cancel(previous) {
                    debug!(
                        "event=completion_cancelled module=provider provider={} timer={}",
                        self.profile.name, previous
                    );
                }
            }
        }

        self.status.set(working.as_str());

        let status = self.status.clone();
        let name = self.profile.name.clone();
        let timer = self.timers.schedule(delay, move || {
            status.set(done);
            info!(
                "event=operation_completed module=provider provider={} op={}",
                name,
                operation.as_str()
            );
        });
        self.pending.set(Some(timer));
    }

    fn status(&self) -> String {
        self.status.get()
    }

    fn is_registered(&self) -> bool {
        self.registration.borrow().is_some()
    }

    fn registered_scope(&self) -> Option<ScopeId> {
        self.registration.borrow().as_ref().map(Registration::scope)
    }

    fn detach(&self) {
        if let Some(registration) = self.registration.borrow_mut().take() {
            debug!(
                "event=provider_destroyed module=provider provider={} scope={}",
                self.profile.name,
                registration.scope()
            );
        }
    }
}
