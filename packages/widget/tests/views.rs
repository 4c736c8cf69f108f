//! The view dispatch is a pure function of the two state axes, so the
//! whole mapping is pinned down here as a table.

use geofix_platform::{LocationError, Position};
use geofix_widget::{FetchState, PanelView, PermissionState};
use pretty_assertions::assert_eq;

fn fix() -> Position {
    Position {
        latitude: 48.8584,
        longitude: 2.2945,
        accuracy: 12.3,
    }
}

fn every_fetch_state() -> Vec<FetchState> {
    vec![
        FetchState::Idle,
        FetchState::Locating,
        FetchState::Settled(Ok(fix())),
        FetchState::Settled(Err(LocationError::Timeout)),
    ]
}

#[test]
fn unsupported_outranks_any_fetch_state() {
    for fetch in every_fetch_state() {
        assert_eq!(
            PanelView::classify(PermissionState::Unsupported, &fetch),
            PanelView::Unsupported,
            "fetch state was {fetch:?}"
        );
    }
}

#[test]
fn prompt_always_asks_for_consent() {
    for fetch in every_fetch_state() {
        assert_eq!(
            PanelView::classify(PermissionState::Prompt, &fetch),
            PanelView::Consent,
            "fetch state was {fetch:?}"
        );
    }
}

#[test]
fn denied_always_shows_the_instructions() {
    for fetch in every_fetch_state() {
        assert_eq!(
            PanelView::classify(PermissionState::Denied, &fetch),
            PanelView::Denied,
            "fetch state was {fetch:?}"
        );
    }
}

#[test]
fn granted_follows_the_fetch() {
    assert_eq!(
        PanelView::classify(PermissionState::Granted, &FetchState::Idle),
        PanelView::Settled(None)
    );
    assert_eq!(
        PanelView::classify(PermissionState::Granted, &FetchState::Locating),
        PanelView::Locating
    );
    assert_eq!(
        PanelView::classify(PermissionState::Granted, &FetchState::Settled(Ok(fix()))),
        PanelView::Settled(Some(Ok(fix())))
    );
    assert_eq!(
        PanelView::classify(
            PermissionState::Granted,
            &FetchState::Settled(Err(LocationError::PositionUnavailable))
        ),
        PanelView::Settled(Some(Err(LocationError::PositionUnavailable)))
    );
}
