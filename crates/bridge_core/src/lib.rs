//! Core capability-bridge logic.
//! Wrappers discover and drive embedded providers through the `Refreshable`
//! contract without knowing their concrete types.

pub mod capability;
pub mod content;
pub mod logging;
pub mod profile;
pub mod provider;
pub mod registry;
pub mod status;
pub mod timer;
pub mod wrapper;

pub use capability::{Refreshable, REFRESH_TOKEN};
pub use content::{find_refreshable, Content, ContentGroup, StaticContent};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use profile::{OverlapPolicy, ProfileError, ProviderProfile};
pub use provider::com_one::ComOne;
pub use provider::com_two::ComTwo;
pub use provider::{ProviderContext, ProviderError};
pub use registry::{Registration, RegistryError, ScopeId, ScopeRegistry};
pub use status::StatusCell;
pub use timer::{TimerId, TimerQueue};
pub use wrapper::{
    BridgeSource, ResolvedBridge, TriggerOutcome, Wrapper, WrapperOptions, ACTIVE_BRIDGE_READY,
    LOAD_TRIGGERED, NO_CHILD_AVAILABLE, REFRESH_TRIGGERED, WRAPPER_READY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
