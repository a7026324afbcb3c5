use bridge_core::{
    ComOne, ComTwo, Content, ProviderContext, ScopeRegistry, TimerQueue, Wrapper,
    LOAD_TRIGGERED, NO_CHILD_AVAILABLE, REFRESH_TRIGGERED, WRAPPER_READY,
};
use std::rc::Rc;
use std::time::Duration;

struct Page {
    timers: TimerQueue,
    com_one: Rc<ComOne>,
    com_two: Rc<ComTwo>,
    first: Wrapper,
    second: Wrapper,
    empty: Wrapper,
}

fn build_page() -> Page {
    let registry = ScopeRegistry::new();
    let timers = TimerQueue::new();
    let root = registry.create_scope(None).expect("root scope");
    let first_scope = registry.create_scope(Some(root)).expect("first scope");
    let second_scope = registry.create_scope(Some(root)).expect("second scope");
    let empty_scope = registry.create_scope(Some(root)).expect("empty scope");

    let ctx = ProviderContext::new(&registry, &timers);
    let com_one = ComOne::new(&ctx.clone().in_scope(first_scope)).expect("com1");
    let com_two = ComTwo::new(&ctx.in_scope(second_scope)).expect("com2");

    let first = Wrapper::new(&registry, first_scope, vec![com_one.clone() as Rc<dyn Content>])
        .expect("first wrapper");
    let second = Wrapper::new(&registry, second_scope, vec![com_two.clone() as Rc<dyn Content>])
        .expect("second wrapper");
    let empty = Wrapper::new(&registry, empty_scope, Vec::new()).expect("empty wrapper");

    Page {
        timers,
        com_one,
        com_two,
        first,
        second,
        empty,
    }
}

#[test]
fn com_one_wrapper_walks_load_then_refresh() {
    let page = build_page();
    assert_eq!(page.com_one.status(), "Idle");
    assert!(page.first.has_bridge());

    page.first.load();
    assert_eq!(page.first.status(), LOAD_TRIGGERED);
    assert_eq!(page.com_one.status(), "Loading...");

    page.timers.advance(Duration::from_millis(1499));
    assert_eq!(page.com_one.status(), "Loading...");
    page.timers.advance(Duration::from_millis(1));
    assert_eq!(page.com_one.status(), "Com1 Loaded");

    page.first.refresh();
    assert_eq!(page.first.status(), REFRESH_TRIGGERED);
    assert_eq!(page.com_one.status(), "Refreshing...");

    page.timers.advance(Duration::from_millis(999));
    assert_eq!(page.com_one.status(), "Refreshing...");
    page.timers.advance(Duration::from_millis(1));
    assert_eq!(page.com_one.status(), "Com1 Refreshed");
}

#[test]
fn wrappers_only_drive_their_own_provider() {
    let page = build_page();

    page.first.load();
    assert_eq!(page.com_one.status(), "Loading...");
    assert_eq!(page.com_two.status(), "Ready");
    assert_eq!(page.second.status(), WRAPPER_READY);

    page.timers.run_until_idle();
    assert_eq!(page.com_one.status(), "Com1 Loaded");
    assert_eq!(page.com_two.status(), "Ready");

    page.second.refresh();
    page.timers.run_until_idle();
    assert_eq!(page.com_two.status(), "Com2 Refreshed");
    assert_eq!(page.com_one.status(), "Com1 Loaded");
}

#[test]
fn empty_wrapper_reports_absence_without_touching_providers() {
    let page = build_page();
    assert!(!page.empty.has_bridge());

    page.empty.refresh();
    assert_eq!(page.empty.status(), WRAPPER_READY);

    page.empty.load();
    assert_eq!(page.empty.status(), NO_CHILD_AVAILABLE);
    assert_eq!(page.timers.pending(), 0);
    assert_eq!(page.com_one.status(), "Idle");
    assert_eq!(page.com_two.status(), "Ready");
}
