//! The words the panel puts in front of the user.
//!
//! Kept in one place, as plain constants, so copy edits never touch the
//! state machine and tests can assert on the exact text.

use geofix_platform::LocationError;

/// Shown on the consent prompt, above the Allow and Deny buttons.
pub const CONSENT: &str =
    "This page can show where you are. Your position is requested once and never stored.";

/// Shown when access has been denied on the panel.
pub const DENIED: &str =
    "Location access is turned off. Allow it again to see your position.";

/// Shown when the platform has no position API at all.
pub const UNSUPPORTED: &str = "This browser cannot look up your location.";

/// Shown while a position request is in flight.
pub const LOCATING: &str = "Finding your position…";

/// Passed to the advisory dialog when the permission stays denied after
/// the user asked for help.
pub const OPEN_SETTINGS: &str =
    "Location access is blocked for this site. Enable it in your browser settings, then try again.";

const INSECURE_CONTEXT: &str =
    "Location only works over a secure connection. Reload this page over HTTPS and try again.";

const PERMISSION_DENIED: &str =
    "Permission to read your location was refused. Allow location access for this site and try again.";

const POSITION_UNAVAILABLE: &str =
    "Your position could not be determined right now. Check your connection and try again.";

const TIMEOUT: &str = "Finding your position took too long. Try again.";

const UNKNOWN: &str = "Something went wrong while finding your position. Try again.";

/// The guidance to show for a failed position request. Total, so a new
/// error variant cannot ship without words for it.
pub fn for_failure(error: &LocationError) -> &'static str {
    match error {
        LocationError::Unsupported => UNSUPPORTED,
        LocationError::InsecureContext => INSECURE_CONTEXT,
        LocationError::PermissionDenied => PERMISSION_DENIED,
        LocationError::PositionUnavailable => POSITION_UNAVAILABLE,
        LocationError::Timeout => TIMEOUT,
        LocationError::Unknown(_) => UNKNOWN,
    }
}
