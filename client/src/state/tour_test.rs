use super::*;
use viewer::scene::Hotspot;

// =============================================================
// Helpers
// =============================================================

fn scene(id: &str, links: &[&str]) -> SceneConfig {
    SceneConfig {
        id: id.into(),
        hotspots: links
            .iter()
            .map(|target| Hotspot { target_scene_id: Some((*target).to_string()), ..Hotspot::new(*target, 0.0, 0.0) })
            .collect(),
        ..Default::default()
    }
}

fn house() -> Tour {
    Tour {
        start: Some("lobby".into()),
        scenes: vec![scene("lobby", &["hall"]), scene("hall", &["lobby", "attic"]), scene("attic", &[])],
    }
}

fn loaded() -> TourState {
    let mut state = TourState::default();
    state.load(house()).unwrap();
    state
}

fn current_id(state: &TourState) -> Option<&str> {
    state.current().map(|scene| scene.id.as_str())
}

// =============================================================
// load
// =============================================================

#[test]
fn default_state_has_no_scene() {
    let state = TourState::default();
    assert!(state.current().is_none());
    assert!(!state.can_go_back());
}

#[test]
fn load_opens_start_scene() {
    let state = loaded();
    assert_eq!(current_id(&state), Some("lobby"));
    assert!(state.last_error.is_none());
}

#[test]
fn load_rejects_unknown_start_and_keeps_previous_tour() {
    let mut state = loaded();
    let broken = Tour { start: Some("cellar".into()), ..house() };

    assert_eq!(state.load(broken), Err(TourError::UnknownScene("cellar".into())));
    assert_eq!(current_id(&state), Some("lobby"));
    assert!(state.last_error.is_some());
}

#[test]
fn reload_clears_history() {
    let mut state = loaded();
    state.navigate("hall").unwrap();

    state.load(house()).unwrap();

    assert!(state.history().is_empty());
    assert_eq!(current_id(&state), Some("lobby"));
}

#[test]
fn fail_records_error_and_stops_loading() {
    let mut state = TourState { loading: true, ..TourState::default() };
    state.fail(TourError::Status(404));
    assert!(!state.loading);
    assert_eq!(state.last_error.as_deref(), Some("tour request failed with status 404"));
}

// =============================================================
// navigate / back
// =============================================================

#[test]
fn door_to_hall() {
    let mut state = loaded();
    state.navigate("hall").unwrap();
    assert_eq!(current_id(&state), Some("hall"));
    assert_eq!(state.history(), ["lobby".to_string()]);
}

#[test]
fn navigate_before_load_is_reported() {
    let mut state = TourState::default();
    assert_eq!(state.navigate("hall"), Err(TourError::NotLoaded));
    assert!(state.current().is_none());
}

#[test]
fn unknown_target_is_reported_without_moving() {
    let mut state = loaded();
    assert_eq!(state.navigate("cellar"), Err(TourError::UnknownScene("cellar".into())));
    assert_eq!(current_id(&state), Some("lobby"));
    assert!(state.history().is_empty());
    assert!(state.last_error.is_some());
}

#[test]
fn navigating_to_current_scene_keeps_history() {
    let mut state = loaded();
    state.navigate("lobby").unwrap();
    assert!(state.history().is_empty());
}

#[test]
fn back_walks_history_in_reverse() {
    let mut state = loaded();
    state.navigate("hall").unwrap();
    state.navigate("attic").unwrap();

    state.back().unwrap();
    assert_eq!(current_id(&state), Some("hall"));
    state.back().unwrap();
    assert_eq!(current_id(&state), Some("lobby"));
    assert_eq!(state.back(), Err(TourError::NoHistory));
}

#[test]
fn successful_move_clears_last_error() {
    let mut state = loaded();
    assert!(state.navigate("cellar").is_err());
    state.navigate("hall").unwrap();
    assert!(state.last_error.is_none());
}
