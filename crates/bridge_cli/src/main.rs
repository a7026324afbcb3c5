//! CLI smoke entry point.
//!
//! # Responsibility
//! - Compose the demo page (com1 wrapper, com2 wrapper, empty wrapper).
//! - Drive it on the virtual clock and print deterministic status lines.
//!
//! Set `BRIDGE_LOG_DIR` to an absolute path to also write core logs there.

use bridge_core::{
    default_log_level, init_logging, ComOne, ComTwo, Content, LoggingConfig, ProviderContext,
    ScopeRegistry, TimerQueue, Wrapper,
};
use log::info;
use std::error::Error;
use std::rc::Rc;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = std::env::var_os("BRIDGE_LOG_DIR") {
        init_logging(&LoggingConfig::new(default_log_level(), log_dir))?;
    }
    println!("bridge_core version={}", bridge_core::core_version());

    let registry = ScopeRegistry::new();
    let timers = TimerQueue::new();
    let page = registry.create_scope(None)?;
    let ctx = ProviderContext::new(&registry, &timers);

    let com_one_scope = registry.create_scope(Some(page))?;
    let com_one = ComOne::new(&ctx.clone().in_scope(com_one_scope))?;
    let com_two_scope = registry.create_scope(Some(page))?;
    let com_two = ComTwo::new(&ctx.in_scope(com_two_scope))?;
    let empty_scope = registry.create_scope(Some(page))?;

    let wrappers = [
        (
            "com1",
            Wrapper::new(&registry, com_one_scope, vec![com_one.clone() as Rc<dyn Content>])?,
        ),
        (
            "com2",
            Wrapper::new(&registry, com_two_scope, vec![com_two.clone() as Rc<dyn Content>])?,
        ),
        ("empty", Wrapper::new(&registry, empty_scope, Vec::new())?),
    ];
    info!("event=page_ready module=cli wrappers={}", wrappers.len());

    let report = |step: &str| {
        println!(
            "[{:>5}ms] {step}: com1={:?} com2={:?}",
            timers.now().as_millis(),
            com_one.status(),
            com_two.status()
        );
        for (name, wrapper) in &wrappers {
            println!(
                "          wrapper={name} status={:?} indicator={:?}",
                wrapper.status(),
                wrapper.bridge_indicator()
            );
        }
    };

    report("initial");
    for (_, wrapper) in &wrappers {
        wrapper.load();
    }
    report("load clicked");
    timers.run_until_idle();
    report("load settled");

    for (_, wrapper) in &wrappers {
        wrapper.refresh();
    }
    report("refresh clicked");
    timers.advance(Duration::from_millis(1000));
    report("refresh settled");
    Ok(())
}
