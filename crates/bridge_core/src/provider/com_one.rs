//! Provider variant A.

use crate::capability::Refreshable;
use crate::content::Content;
use crate::profile::ProviderProfile;
use crate::provider::{Operation, ProviderContext, ProviderCore, ProviderError};
use crate::registry::ScopeId;
use std::rc::{Rc, Weak};

const LABEL: &str = "Component One Content";

/// First example provider. Starts `Idle`, completes with `Com1 ...` labels.
pub struct ComOne {
    core: ProviderCore,
}

impl ComOne {
    /// Creates a provider with the built-in `com1` profile.
    pub fn new(ctx: &ProviderContext) -> Result<Rc<Self>, ProviderError> {
        Self::with_profile(ctx, ProviderProfile::com_one())
    }

    /// Creates a provider with a caller-supplied profile.
    ///
    /// # Errors
    /// - `InvalidProfile` when `profile` fails validation.
    /// - `Registration` when the context scope is unknown or occupied.
    pub fn with_profile(
        ctx: &ProviderContext,
        profile: ProviderProfile,
    ) -> Result<Rc<Self>, ProviderError> {
        let provider = Rc::new(Self {
            core: ProviderCore::new(ctx, profile)?,
        });
        let instance: Weak<Self> = Rc::downgrade(&provider);
        provider.core.attach(ctx, instance)?;
        Ok(provider)
    }

    pub fn status(&self) -> String {
        self.core.status()
    }

    pub fn profile(&self) -> &ProviderProfile {
        &self.core.profile
    }

    pub fn is_registered(&self) -> bool {
        self.core.is_registered()
    }

    pub fn registered_scope(&self) -> Option<ScopeId> {
        self.core.registered_scope()
    }

    /// Tears down the explicit registration. Pending completions still fire.
    pub fn destroy(&self) {
        self.core.detach();
    }
}

impl Refreshable for ComOne {
    fn load(&self) {
        self.core.start(Operation::Load);
    }

    fn refresh(&self) {
        self.core.start(Operation::Refresh);
    }
}

impl Content for ComOne {
    fn label(&self) -> &str {
        LABEL
    }

    fn as_refreshable(self: Rc<Self>) -> Option<Rc<dyn Refreshable>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::ComOne;
    use crate::capability::Refreshable;
    use crate::profile::{OverlapPolicy, ProviderProfile};
    use crate::provider::{ProviderContext, ProviderError};
    use crate::registry::{RegistryError, ScopeRegistry};
    use crate::timer::TimerQueue;
    use std::time::Duration;

    fn setup() -> (ScopeRegistry, TimerQueue) {
        (ScopeRegistry::new(), TimerQueue::new())
    }

    #[test]
    fn starts_idle_and_unregistered_without_scope() {
        let (registry, timers) = setup();
        let provider = ComOne::new(&ProviderContext::new(&registry, &timers)).expect("provider");

        assert_eq!(provider.status(), "Idle");
        assert!(!provider.is_registered());
        assert_eq!(provider.registered_scope(), None);
    }

    #[test]
    fn load_is_observable_before_and_after_delay() {
        let (registry, timers) = setup();
        let provider = ComOne::new(&ProviderContext::new(&registry, &timers)).expect("provider");

        provider.load();
        assert_eq!(provider.status(), "Loading...");

        timers.advance(Duration::from_millis(1499));
        assert_eq!(provider.status(), "Loading...");

        timers.advance(Duration::from_millis(1));
        assert_eq!(provider.status(), "Com1 Loaded");
    }

    #[test]
    fn registers_into_context_scope_and_unregisters_on_destroy() {
        let (registry, timers) = setup();
        let scope = registry.create_scope(None).expect("scope");
        let ctx = ProviderContext::new(&registry, &timers).in_scope(scope);
        let provider = ComOne::new(&ctx).expect("provider");

        assert!(provider.is_registered());
        assert_eq!(provider.registered_scope(), Some(scope));
        assert!(registry.registered_in(scope));

        provider.destroy();
        assert!(!provider.is_registered());
        assert!(registry.resolve(scope).is_none());
    }

    #[test]
    fn scope_cannot_close_under_a_live_provider() {
        let (registry, timers) = setup();
        let scope = registry.create_scope(None).expect("scope");
        let provider = ComOne::new(&ProviderContext::new(&registry, &timers).in_scope(scope))
            .expect("provider");

        let err = registry.close_scope(scope).expect_err("close must be refused");
        assert_eq!(err, RegistryError::ScopeHasRegistration(scope));
        assert_eq!(provider.registered_scope(), Some(scope));
        assert!(registry.registered_in(scope));

        provider.destroy();
        registry.close_scope(scope).expect("close after destroy");
    }

    #[test]
    fn drop_removes_registration() {
        let (registry, timers) = setup();
        let scope = registry.create_scope(None).expect("scope");
        let provider = ComOne::new(&ProviderContext::new(&registry, &timers).in_scope(scope))
            .expect("provider");

        drop(provider);
        assert!(!registry.registered_in(scope));
    }

    #[test]
    fn rejects_occupied_scope() {
        let (registry, timers) = setup();
        let scope = registry.create_scope(None).expect("scope");
        let ctx = ProviderContext::new(&registry, &timers).in_scope(scope);
        let _first = ComOne::new(&ctx).expect("first provider");

        let err = ComOne::new(&ctx).err().expect("second provider must fail");
        assert_eq!(
            err,
            ProviderError::Registration(RegistryError::ScopeOccupied(scope))
        );
    }

    #[test]
    fn restart_policy_cancels_pending_completion() {
        let (registry, timers) = setup();
        let profile = ProviderProfile::com_one().with_overlap(OverlapPolicy::Restart);
        let provider = ComOne::with_profile(&ProviderContext::new(&registry, &timers), profile)
            .expect("provider");

        provider.load();
        timers.advance(Duration::from_millis(1000));
        provider.load();
        assert_eq!(timers.pending(), 1);

        timers.advance(Duration::from_millis(500));
        assert_eq!(provider.status(), "Loading...");

        timers.advance(Duration::from_millis(1000));
        assert_eq!(provider.status(), "Com1 Loaded");
        assert_eq!(timers.pending(), 0);
    }
}
