use super::*;
use crate::engine::{EngineFactory, InstanceId};
use crate::fake::{Call, FakeFactory, FakeInstance, SharedLog};
use crate::scene::{HotspotRegion, SceneConfig};

// =============================================================
// Helpers
// =============================================================

fn instance() -> (FakeInstance, SharedLog) {
    let (mut factory, log) = FakeFactory::new();
    let instance = factory
        .construct(InstanceId(1), "vrview", &SceneConfig::default())
        .unwrap();
    (instance, log)
}

fn to_scene(name: &str, target: &str) -> Hotspot {
    Hotspot { target_scene_id: Some(target.into()), ..Hotspot::new(name, 0.0, 0.0) }
}

fn with_action(name: &str, action: HotspotAction) -> Hotspot {
    Hotspot { action: Some(action), ..Hotspot::new(name, 0.0, 0.0) }
}

/// Hotspot lists of every length up to 8, cycling through the three
/// resolution paths.
fn hotspot_lists() -> Vec<Vec<Hotspot>> {
    (0..=8)
        .map(|len| {
            (0..len)
                .map(|i| match i % 3 {
                    0 => to_scene(&format!("h{i}"), &format!("s{i}")),
                    1 => with_action(&format!("h{i}"), HotspotAction::Callback { handler: format!("cb{i}") }),
                    _ => Hotspot::new(format!("h{i}"), f64::from(i), 0.0),
                })
                .collect()
        })
        .collect()
}

// =============================================================
// resolve
// =============================================================

#[test]
fn resolve_target_scene_activates() {
    assert_eq!(resolve(&to_scene("door", "hall")), Action::HotspotActivated { scene_id: "hall".into() });
}

#[test]
fn resolve_typed_action_wins_over_target() {
    let hotspot = Hotspot {
        action: Some(HotspotAction::Callback { handler: "open".into() }),
        ..to_scene("door", "hall")
    };
    assert_eq!(resolve(&hotspot), Action::InvokeHandler { handler: "open".into(), hotspot: "door".into() });
}

#[test]
fn resolve_navigate_action_activates_its_target() {
    let hotspot = Hotspot {
        action: Some(HotspotAction::Navigate { target: "attic".into() }),
        ..to_scene("stairs", "hall")
    };
    assert_eq!(resolve(&hotspot), Action::HotspotActivated { scene_id: "attic".into() });
}

#[test]
fn resolve_unconfigured_is_notice() {
    assert_eq!(resolve(&Hotspot::new("window", 0.0, 0.0)), Action::Notice { hotspot: "window".into() });
}

#[test]
fn notice_only_for_hotspots_without_action_or_target() {
    for list in hotspot_lists() {
        for hotspot in &list {
            let is_notice = matches!(resolve(hotspot), Action::Notice { .. });
            assert_eq!(is_notice, hotspot.action.is_none() && hotspot.target_scene_id.is_none());
        }
    }
}

// =============================================================
// ClickDispatcher
// =============================================================

#[test]
fn dispatch_matches_by_name() {
    let mut dispatcher = ClickDispatcher::new();
    dispatcher.register(&to_scene("door", "hall"));
    dispatcher.register(&to_scene("stairs", "attic"));

    assert_eq!(dispatcher.dispatch("stairs"), vec![Action::HotspotActivated { scene_id: "attic".into() }]);
}

#[test]
fn dispatch_unknown_id_yields_nothing() {
    for list in hotspot_lists() {
        let mut dispatcher = ClickDispatcher::new();
        for hotspot in &list {
            dispatcher.register(hotspot);
        }
        assert!(dispatcher.dispatch("not-a-hotspot").is_empty());
    }
}

#[test]
fn uncleared_rebinds_fire_once_per_pass() {
    let hotspot = to_scene("door", "hall");
    let mut dispatcher = ClickDispatcher::new();
    for _ in 0..3 {
        dispatcher.register(&hotspot);
    }
    assert_eq!(dispatcher.len(), 3);
    assert_eq!(dispatcher.dispatch("door").len(), 3);
}

#[test]
fn clear_reports_removed_count_and_is_idempotent() {
    let mut dispatcher = ClickDispatcher::new();
    dispatcher.register(&to_scene("a", "b"));
    dispatcher.register(&to_scene("c", "d"));

    assert_eq!(dispatcher.clear(), 2);
    assert_eq!(dispatcher.clear(), 0);
    assert!(dispatcher.is_empty());
}

#[test]
fn clear_without_dispatcher_is_noop() {
    assert_eq!(clear_click_handlers(None), 0);
}

// =============================================================
// load_hotspots
// =============================================================

#[test]
fn load_registers_regions_in_order() {
    let (mut engine, log) = instance();
    let mut dispatcher = ClickDispatcher::new();
    let hotspots = vec![
        Hotspot { radius: 100.0, distance: 300.0, ..to_scene("door", "hall") },
        to_scene("stairs", "attic"),
    ];

    let bound = load_hotspots(&mut engine, &mut dispatcher, Some(hotspots.as_slice())).unwrap();

    assert_eq!(bound, 2);
    assert_eq!(dispatcher.len(), 2);
    assert_eq!(log.borrow().hotspots_added(InstanceId(1)), vec!["door", "stairs"]);
    assert!(log.borrow().calls.contains(&Call::AddHotspot {
        instance: InstanceId(1),
        name: "door".into(),
        region: HotspotRegion { pitch: 0.0, yaw: 0.0, radius: 100.0, distance: 300.0 },
    }));
}

#[test]
fn load_absent_list_is_noop() {
    let (mut engine, log) = instance();
    let mut dispatcher = ClickDispatcher::new();

    assert_eq!(load_hotspots(&mut engine, &mut dispatcher, None).unwrap(), 0);
    assert!(dispatcher.is_empty());
    assert!(log.borrow().hotspots_added(InstanceId(1)).is_empty());
}

#[test]
fn load_then_clear_leaves_zero_handlers() {
    for list in hotspot_lists() {
        let (mut engine, _log) = instance();
        let mut dispatcher = ClickDispatcher::new();
        load_hotspots(&mut engine, &mut dispatcher, Some(list.as_slice())).unwrap();
        assert_eq!(dispatcher.len(), list.len());

        clear_click_handlers(Some(&mut dispatcher));

        assert_eq!(dispatcher.len(), 0);
    }
}

#[test]
fn load_stops_at_rejected_region() {
    let (mut engine, log) = instance();
    log.borrow_mut().fail_region = Some("b".into());
    let mut dispatcher = ClickDispatcher::new();
    let hotspots = vec![to_scene("a", "x"), to_scene("b", "y"), to_scene("c", "z")];

    let err = load_hotspots(&mut engine, &mut dispatcher, Some(hotspots.as_slice())).unwrap_err();

    assert!(matches!(err, EngineError::Region { ref name, .. } if name == "b"));
    assert_eq!(dispatcher.len(), 1);
}

#[test]
fn duplicate_names_bind_twice() {
    let (mut engine, log) = instance();
    let mut dispatcher = ClickDispatcher::new();
    let hotspots = vec![to_scene("x", "one"), to_scene("x", "two")];

    load_hotspots(&mut engine, &mut dispatcher, Some(hotspots.as_slice())).unwrap();

    assert_eq!(log.borrow().hotspots_added(InstanceId(1)).len(), 2);
    assert_eq!(
        dispatcher.dispatch("x"),
        vec![
            Action::HotspotActivated { scene_id: "one".into() },
            Action::HotspotActivated { scene_id: "two".into() },
        ]
    );
}
