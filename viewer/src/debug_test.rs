use super::*;
use crate::engine::{EngineFactory, EngineInstance, InstanceId};
use crate::fake::{EngineLog, FakeFactory, FakeInstance};
use crate::scene::{SceneConfig, SurfaceSize};

fn build(is_debug: Option<bool>, width: Option<&str>, forced_marker: Option<bool>) -> FakeInstance {
    build_with(is_debug, width, |log| log.forced_marker = forced_marker)
}

fn build_unreadable(is_debug: Option<bool>) -> FakeInstance {
    build_with(is_debug, None, |log| log.unreadable_marker = true)
}

fn build_with(is_debug: Option<bool>, width: Option<&str>, configure: impl FnOnce(&mut EngineLog)) -> FakeInstance {
    let (mut factory, log) = FakeFactory::new();
    configure(&mut log.borrow_mut());
    let scene = SceneConfig {
        id: "a".into(),
        is_debug,
        width: width.map(str::to_string),
        height: width.map(|_| "480".to_string()),
        ..Default::default()
    };
    factory.construct(InstanceId(1), "vrview", &scene).unwrap()
}

// =============================================================
// DebugMode
// =============================================================

#[test]
fn toggled_is_involution() {
    for mode in [DebugMode::Off, DebugMode::On] {
        assert_ne!(mode.toggled(), mode);
        assert_eq!(mode.toggled().toggled(), mode);
    }
}

#[test]
fn absent_flag_means_off() {
    assert_eq!(DebugMode::from_flag(None), DebugMode::Off);
    assert_eq!(DebugMode::from_flag(Some(true)), DebugMode::On);
    assert!(!DebugMode::default().is_on());
}

// =============================================================
// detect / reconcile
// =============================================================

#[test]
fn detect_reads_marker() {
    assert_eq!(detect(build(Some(true), None, None).surface()), Some(DebugMode::On));
    assert_eq!(detect(build(None, None, None).surface()), Some(DebugMode::Off));
}

#[test]
fn hidden_document_detects_unknown() {
    assert_eq!(detect(build_unreadable(Some(true)).surface()), None);
    assert_eq!(detect(build_unreadable(None).surface()), None);
}

#[test]
fn reconcile_agrees_with_declared_state_for_honest_engine() {
    for flag in [None, Some(false), Some(true)] {
        let instance = build(flag, None, None);
        let declared = DebugMode::from_flag(flag);
        assert_eq!(reconcile(declared, instance.surface()), declared);
    }
}

#[test]
fn reconcile_keeps_declared_state_on_mismatch() {
    let instance = build(Some(false), None, Some(true));
    assert_eq!(reconcile(DebugMode::Off, instance.surface()), DebugMode::Off);

    let instance = build(Some(true), None, Some(false));
    assert_eq!(reconcile(DebugMode::On, instance.surface()), DebugMode::On);
}

#[test]
fn reconcile_keeps_declared_state_when_output_hidden() {
    for declared in [DebugMode::Off, DebugMode::On] {
        let instance = build_unreadable(Some(declared.is_on()));
        assert_eq!(reconcile(declared, instance.surface()), declared);
    }
}

#[test]
fn detached_surface_detects_off() {
    let instance = build(Some(true), None, None);
    instance.surface().detach().unwrap();
    assert_eq!(detect(instance.surface()), Some(DebugMode::Off));
}

// =============================================================
// plan_toggle
// =============================================================

#[test]
fn plan_flips_mode_and_snapshots_size() {
    let instance = build(None, Some("800"), None);

    let plan = plan_toggle(DebugMode::Off, instance.surface(), &SceneOverrides::default());

    assert_eq!(plan.from, DebugMode::Off);
    assert_eq!(plan.to, DebugMode::On);
    assert_eq!(plan.overrides.debug, Some(true));
    assert_eq!(plan.overrides.size, Some(SurfaceSize { width: "800".into(), height: "480".into() }));
}

#[test]
fn plan_keeps_previous_size_when_surface_detached() {
    let instance = build(Some(true), Some("800"), None);
    instance.surface().detach().unwrap();
    let previous = SceneOverrides {
        debug: Some(true),
        size: Some(SurfaceSize { width: "1024".into(), height: "768".into() }),
    };

    let plan = plan_toggle(DebugMode::On, instance.surface(), &previous);

    assert_eq!(plan.to, DebugMode::Off);
    assert_eq!(plan.overrides.debug, Some(false));
    assert_eq!(plan.overrides.size, previous.size);
}
