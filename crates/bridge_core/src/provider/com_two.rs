//! Provider variant B.

use crate::capability::Refreshable;
use crate::content::Content;
use crate::profile::ProviderProfile;
use crate::provider::{Operation, ProviderContext, ProviderCore, ProviderError};
use crate::registry::ScopeId;
use std::rc::{Rc, Weak};

const LABEL: &str = "Component Two Content";

/// Second example provider. Starts `Ready`, completes with `Com2 ...` labels.
pub struct ComTwo {
    core: ProviderCore,
}

impl ComTwo {
    pub fn new(ctx: &ProviderContext) -> Result<Rc<Self>, ProviderError> {
        Self::with_profile(ctx, ProviderProfile::com_two())
    }

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

    pub fn destroy(&self) {
        self.core.detach();
    }
}

impl Refreshable for ComTwo {
    fn load(&self) {
        self.core.start(Operation::Load);
    }

    fn refresh(&self) {
        self.core.start(Operation::Refresh);
    }
}

impl Content for ComTwo {
    fn label(&self) -> &str {
        LABEL
    }

    fn as_refreshable(self: Rc<Self>) -> Option<Rc<dyn Refreshable>> {
        Some(self)
    }
}
