//! A permission-gated geolocation panel for Dioxus.
//!
//! [`GeolocationPanel`] asks the user for location access, mirrors the
//! platform permission state, fetches coordinates once access is
//! granted and renders the outcome or an explanation of what went
//! wrong. [`use_geolocation`] exposes the same state machine to hosts
//! that want their own chrome around it.
//!
//! The platform behind the panel is injected: the real browser by
//! default on wasm, or any [`geofix_platform::LocationServices`] passed
//! to [`provide_location_services`], which is how the tests drive every
//! flow without a browser.
//!
//! Two affordances are deliberately local to the panel. "Deny" answers
//! the panel's own consent prompt without consulting the platform, and
//! "Revoke access" only flips what the panel shows, because the web
//! platform has no API to give a permission back. The real permission
//! can therefore diverge from the displayed one until the next platform
//! permission event.

mod access;
pub mod advice;
mod view;

pub use access::{
    provide_location_services, use_geolocation, FetchState, GeolocationAccess, PermissionState,
};
pub use view::{GeolocationPanel, PanelView};

pub use geofix_platform as platform;
