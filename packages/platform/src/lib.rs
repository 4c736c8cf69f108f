//! Platform location services for the geofix widget.
//!
//! The widget never talks to the browser directly. Everything it needs
//! from the platform goes through the [`LocationServices`] trait: whether
//! geolocation exists at all, how the page was served, what the current
//! permission disposition is, and the one-shot position fetch itself.
//!
//! Two implementations ship with the crate:
//!
//! - [`WebLocationServices`] wraps the real browser APIs (wasm only).
//! - [`ScriptedLocationServices`] replays scripted outcomes and records
//!   every call, for tests and for targets without a browser.

mod error;
mod scripted;
mod types;
#[cfg(target_arch = "wasm32")]
mod web;

pub use error::LocationError;
pub use scripted::{FetchScript, ScriptedLocationServices};
pub use types::{PermissionGrant, Position, PositionOptions, Transport};
#[cfg(target_arch = "wasm32")]
pub use web::WebLocationServices;

use std::rc::Rc;

/// Listener invoked when the platform reports a permission change.
pub type PermissionCallback = Rc<dyn Fn(PermissionGrant)>;

/// A provider for platform location functionality.
///
/// Implementations are single-threaded and consumed behind `Rc`, so the
/// trait is object safe and its futures do not need to be `Send`.
#[async_trait::async_trait(?Send)]
pub trait LocationServices {
    /// Whether the platform exposes a position API at all.
    fn geolocation_supported(&self) -> bool;

    /// Security facts about the page, used to refuse insecure transports
    /// before the platform gets involved.
    fn transport(&self) -> Transport;

    /// Read the current permission disposition without registering for
    /// updates. `Err(Unsupported)` means the platform offers no
    /// permission introspection.
    async fn query_permission(&self) -> Result<PermissionGrant, LocationError>;

    /// Read the current permission disposition and install `on_change`,
    /// which fires whenever the platform later edits the permission.
    ///
    /// The services value keeps the registration alive; installing a
    /// second listener replaces the first.
    async fn subscribe_permission(
        &self,
        on_change: PermissionCallback,
    ) -> Result<PermissionGrant, LocationError>;

    /// Request a single coordinate fix with `options` applied verbatim.
    /// Resolves once the platform produces a fix or gives up.
    async fn fetch_position(&self, options: PositionOptions) -> Result<Position, LocationError>;

    /// Show a blocking advisory dialog.
    fn alert(&self, message: &str);
}
