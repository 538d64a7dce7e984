//! Session context and the access gate together.

mod common;

use blogdash::gate::{self, GateDecision};
use blogdash::nav::Route;
use blogdash::session::{
    ContextProvider, HeroClass, Session, Theme, CURRENCY_RANGE, EXPERIENCE_RANGE, LEVEL_RANGE,
};
use common::RecordingSink;
use std::sync::Arc;

#[test]
fn test_login_scenario() {
    let provider = ContextProvider::new(Theme::Dark, Arc::new(RecordingSink::default()));
    let ctx = provider.handle();

    ctx.login("Aria");

    let session = ctx.session();
    assert!(session.is_authenticated());
    let hero = session.identity().expect("identity present");
    assert_eq!(hero.name, "Aria");
    assert!(LEVEL_RANGE.contains(&hero.level));
    assert!(EXPERIENCE_RANGE.contains(&hero.experience));
    assert!(CURRENCY_RANGE.contains(&hero.currency));
    assert!(HeroClass::ALL.contains(&hero.class));
}

#[test]
fn test_stats_stay_in_range_over_many_logins() {
    let provider = ContextProvider::new(Theme::Dark, Arc::new(RecordingSink::default()));
    let ctx = provider.handle();

    for _ in 0..200 {
        ctx.login("Aria");
        let session = ctx.session();
        let hero = session.identity().unwrap();
        assert!((1..=50).contains(&hero.level));
        assert!(hero.experience < 1000);
        assert!((100..600).contains(&hero.currency));
    }
}

#[test]
fn test_gate_follows_session() {
    let provider = ContextProvider::new(Theme::Dark, Arc::new(RecordingSink::default()));
    let ctx = provider.handle();

    assert!(!gate::can_enter(&ctx.session()));
    ctx.login("Aria");
    assert!(gate::can_enter(&ctx.session()));
    ctx.logout();
    assert!(!gate::can_enter(&ctx.session()));
}

#[test]
fn test_gate_is_idempotent() {
    let anonymous = Session::Anonymous;
    let target = Route::PostDetail {
        post_id: "4".to_string(),
    };

    let first = gate::decide(&anonymous, &target);
    let second = gate::decide(&anonymous, &target);
    assert_eq!(first, second);
    assert_eq!(first, GateDecision::Denied { redirect: Route::Login });

    let provider = ContextProvider::new(Theme::Dark, Arc::new(RecordingSink::default()));
    provider.handle().login("Aria");
    let session = provider.handle().session();
    for _ in 0..3 {
        assert_eq!(gate::decide(&session, &target), GateDecision::Granted);
    }
}

#[test]
fn test_initial_theme_is_emitted_on_mount() {
    let sink = Arc::new(RecordingSink::default());
    let provider = ContextProvider::new(Theme::Light, sink.clone());
    assert_eq!(*sink.applied.lock(), vec![Theme::Light]);

    provider.handle().toggle_theme();
    assert_eq!(*sink.applied.lock(), vec![Theme::Light, Theme::Dark]);
}
