use dioxus::prelude::*;
use geofix_platform::{LocationError, Position};

use crate::access::{use_geolocation, FetchState, PermissionState};
use crate::advice;

/// The five ways the panel can present itself.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    /// The platform has no position API.
    Unsupported,
    /// Ask the user for access.
    Consent,
    /// Access is denied; explain how to undo that.
    Denied,
    /// Access is granted and a request is in flight.
    Locating,
    /// Access is granted; show the latest outcome, if there is one.
    Settled(Option<Result<Position, LocationError>>),
}

impl PanelView {
    /// Derives the view from the two state axes. Pure and total, so the
    /// whole dispatch pins down in one table test.
    pub fn classify(permission: PermissionState, fetch: &FetchState) -> Self {
        match permission {
            PermissionState::Unsupported => Self::Unsupported,
            PermissionState::Prompt => Self::Consent,
            PermissionState::Denied => Self::Denied,
            PermissionState::Granted => match fetch {
                FetchState::Locating => Self::Locating,
                FetchState::Idle => Self::Settled(None),
                FetchState::Settled(outcome) => Self::Settled(Some(outcome.clone())),
            },
        }
    }
}

/// The permission-gated location panel.
///
/// Self-contained: mount it anywhere and it asks for access, follows
/// the platform permission, fetches a position once allowed and renders
/// the outcome. State comes from [`use_geolocation`], so a host can
/// also read the same machine from outside the panel.
#[component]
pub fn GeolocationPanel() -> Element {
    let mut access = use_geolocation();

    // The granted panel keeps its actions in every sub-state, a fetch
    // in flight included.
    let actions = rsx! {
        div { class: "geofix-actions",
            button {
                class: "geofix-locate",
                onclick: move |_| access.request_position(true),
                "Locate precisely"
            }
            button {
                class: "geofix-locate",
                onclick: move |_| access.request_position(false),
                "Locate roughly"
            }
            button {
                class: "geofix-revoke",
                onclick: move |_| access.revoke(),
                "Revoke access"
            }
        }
    };

    let body = match access.view() {
        PanelView::Unsupported => rsx! {
            p { class: "geofix-unsupported", {advice::UNSUPPORTED} }
        },
        PanelView::Consent => rsx! {
            ConsentPrompt {
                onallow: move |_| access.respond(true),
                ondeny: move |_| access.respond(false),
            }
        },
        PanelView::Denied => rsx! {
            DeniedNotice { onsettings: move |_| access.open_settings() }
        },
        PanelView::Locating => rsx! {
            div { class: "geofix-granted",
                p { class: "geofix-locating", {advice::LOCATING} }
                {actions}
            }
        },
        PanelView::Settled(outcome) => {
            let latest = match outcome {
                None => rsx! {},
                Some(Ok(fix)) => rsx! {
                    PositionReadout { fix }
                },
                Some(Err(error)) => rsx! {
                    p { class: "geofix-failure", role: "alert", {advice::for_failure(&error)} }
                },
            };
            rsx! {
                div { class: "geofix-granted",
                    {latest}
                    {actions}
                }
            }
        }
    };

    rsx! {
        section { class: "geofix-panel",
            h2 { class: "geofix-title", "Your location" }
            {body}
        }
    }
}

#[component]
fn ConsentPrompt(onallow: EventHandler<MouseEvent>, ondeny: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "geofix-consent",
            p { {advice::CONSENT} }
            div { class: "geofix-actions",
                button {
                    class: "geofix-allow",
                    onclick: move |event| onallow.call(event),
                    "Allow"
                }
                button {
                    class: "geofix-deny",
                    onclick: move |event| ondeny.call(event),
                    "Deny"
                }
            }
        }
    }
}

#[component]
fn DeniedNotice(onsettings: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div { class: "geofix-denied",
            p { {advice::DENIED} }
            button {
                class: "geofix-settings",
                onclick: move |event| onsettings.call(event),
                "Open browser settings"
            }
        }
    }
}

/// Coordinates to six decimal places, accuracy to the whole meter.
#[component]
fn PositionReadout(fix: Position) -> Element {
    let latitude = format!("{:.6}", fix.latitude);
    let longitude = format!("{:.6}", fix.longitude);
    let accuracy = fix.accuracy.round();

    rsx! {
        dl { class: "geofix-readout",
            div {
                dt { "Latitude" }
                dd { "{latitude}" }
            }
            div {
                dt { "Longitude" }
                dd { "{longitude}" }
            }
            div {
                dt { "Accuracy" }
                dd { "±{accuracy} m" }
            }
        }
    }
}
