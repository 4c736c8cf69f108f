use std::rc::Rc;

use dioxus::core::provide_root_context;
use dioxus::prelude::*;
use geofix_platform::{
    LocationError, LocationServices, PermissionCallback, PermissionGrant, Position,
    PositionOptions,
};

use crate::view::PanelView;

/// Where the user stands with the location permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The platform has no position API.
    Unsupported,
    /// Waiting on a decision from the user.
    Prompt,
    Granted,
    Denied,
}

/// The lifecycle of the most recent position request.
///
/// One value rather than a loading flag next to a result: while a
/// request is in flight there is structurally nothing stale to show,
/// and an outcome replaces the in-flight marker in the same write.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    /// Nothing has been requested yet.
    Idle,
    /// A request is in flight.
    Locating,
    /// The most recent request finished.
    Settled(Result<Position, LocationError>),
}

/// A copyable handle to the location flow.
///
/// Returned by [`use_geolocation`]. Every affordance on the panel is a
/// method here, so a host can put its own chrome around the same state
/// machine. Copies share state; the first caller in a tree creates the
/// machine and descendants pick it up through context.
#[derive(Clone, Copy, PartialEq)]
pub struct GeolocationAccess {
    permission: Signal<PermissionState>,
    fetch: Signal<FetchState>,
    services: CopyValue<Rc<dyn LocationServices>>,
}

impl GeolocationAccess {
    /// The current permission state.
    pub fn permission(&self) -> PermissionState {
        *self.permission.read()
    }

    /// The state of the most recent position request.
    pub fn fetch_state(&self) -> FetchState {
        self.fetch.read().clone()
    }

    /// The view the panel should render right now.
    pub fn view(&self) -> PanelView {
        PanelView::classify(self.permission(), &self.fetch_state())
    }

    fn services(&self) -> Rc<dyn LocationServices> {
        self.services.read().clone()
    }

    /// Issues a one-shot position request at the given precision.
    ///
    /// Insecure transports are refused on the spot: the request settles
    /// with the secure-connection failure and the platform is never
    /// consulted, whatever it would have said.
    pub fn request_position(&mut self, high_accuracy: bool) {
        let services = self.services();
        if services.transport().insecure() {
            self.fetch
                .set(FetchState::Settled(Err(LocationError::InsecureContext)));
            return;
        }

        self.fetch.set(FetchState::Locating);
        let mut fetch = self.fetch;
        spawn(async move {
            let outcome = services
                .fetch_position(PositionOptions::with_accuracy(high_accuracy))
                .await;
            match &outcome {
                Ok(fix) => tracing::debug!(accuracy = fix.accuracy, "position resolved"),
                Err(error) => tracing::debug!(%error, "position request failed"),
            }
            fetch.set(FetchState::Settled(outcome));
        });
    }

    /// Answers the consent prompt. Granting immediately requests a
    /// low-accuracy fix; denying only flips the state.
    ///
    /// This is the widget's own decision gate. The platform keeps its
    /// authority: its prompt, if any, still appears once a fetch goes
    /// out, and refusing there settles the fetch with a denial.
    pub fn respond(&mut self, granted: bool) {
        let grant = if granted {
            PermissionGrant::Granted
        } else {
            PermissionGrant::Denied
        };
        tracing::info!(?grant, "consent prompt answered");
        self.apply_grant(grant);
    }

    /// Withdraws access on the panel. Purely local: no web API can
    /// revoke a browser permission, so the platform may still consider
    /// access granted underneath.
    pub fn revoke(&mut self) {
        tracing::info!("location access revoked on the panel");
        self.permission.set(PermissionState::Denied);
    }

    /// Best-effort help from the denied view: re-checks the permission
    /// and, when it is still denied or cannot be read at all, tells the
    /// user where the browser keeps the setting.
    ///
    /// Never mutates widget state. If the permission really changed,
    /// the platform subscription delivers that on its own.
    pub fn open_settings(&self) {
        let services = self.services();
        spawn(async move {
            match services.query_permission().await {
                Ok(PermissionGrant::Denied) | Err(_) => {
                    tracing::warn!("permission still unavailable, advising browser settings");
                    services.alert(crate::advice::OPEN_SETTINGS);
                }
                Ok(_) => {}
            }
        });
    }

    /// Routes a platform permission disposition into widget state,
    /// fetching immediately when access is granted.
    fn apply_grant(&mut self, grant: PermissionGrant) {
        match grant {
            PermissionGrant::Granted => {
                self.permission.set(PermissionState::Granted);
                self.request_position(false);
            }
            PermissionGrant::Denied => self.permission.set(PermissionState::Denied),
            PermissionGrant::Prompt => self.permission.set(PermissionState::Prompt),
        }
    }

    /// The mount task: resolve platform support, transport security and
    /// the current permission, then keep listening for permission edits.
    async fn initialize(mut self, on_change: Callback<PermissionGrant>) {
        let services = self.services();

        if !services.geolocation_supported() {
            self.permission.set(PermissionState::Unsupported);
            return;
        }

        if services.transport().insecure() {
            // Keep prompting, but pre-settle the fetch: any request from
            // here on refuses with the same error before the platform.
            self.fetch
                .set(FetchState::Settled(Err(LocationError::InsecureContext)));
            return;
        }

        let listener: PermissionCallback = Rc::new(move |grant| on_change(grant));
        match services.subscribe_permission(listener).await {
            Ok(grant) => {
                tracing::info!(?grant, "platform permission resolved");
                self.apply_grant(grant);
            }
            Err(error) => {
                // No introspection on this platform: ask the user directly.
                tracing::warn!(%error, "permission introspection unavailable");
                self.permission.set(PermissionState::Prompt);
            }
        }
    }
}

/// Drives the permission-gated location flow and hands back its state.
///
/// The first call in a tree creates the machine and spawns its mount
/// task; calls in descendant scopes return the same machine. The mount
/// task mirrors the platform permission into [`PermissionState`],
/// subscribes to permission changes, and starts an automatic fetch when
/// access is already granted.
#[must_use]
pub fn use_geolocation() -> GeolocationAccess {
    use_hook(|| {
        if let Some(shared) = try_consume_context::<GeolocationAccess>() {
            return shared;
        }

        let access = provide_context(GeolocationAccess {
            permission: Signal::new(PermissionState::Prompt),
            fetch: Signal::new(FetchState::Idle),
            services: CopyValue::new(ambient_services()),
        });

        // Permission edits arrive on a platform closure; the callback
        // hops them back into the runtime before touching any signal.
        let on_change = Callback::new(move |grant| {
            let mut access = access;
            access.apply_grant(grant);
        });
        spawn(async move { access.initialize(on_change).await });

        access
    })
}

/// Replaces the platform every [`use_geolocation`] machine talks to,
/// e.g. with a [`geofix_platform::ScriptedLocationServices`] in tests
/// and previews. Call it before the first `use_geolocation` in the
/// tree runs; the services land in root context either way.
pub fn provide_location_services(services: Rc<dyn LocationServices>) {
    provide_root_context(services);
}

fn ambient_services() -> Rc<dyn LocationServices> {
    match try_consume_context::<Rc<dyn LocationServices>>() {
        Some(services) => services,
        None => provide_root_context(default_services()),
    }
}

#[cfg(target_arch = "wasm32")]
fn default_services() -> Rc<dyn LocationServices> {
    Rc::new(geofix_platform::WebLocationServices::new())
}

/// Off the web there is no ambient platform to ask, so the panel
/// degrades to its unsupported notice. Server-side renders hit this.
#[cfg(not(target_arch = "wasm32"))]
fn default_services() -> Rc<dyn LocationServices> {
    tracing::warn!("no location services provided, treating geolocation as unsupported");
    Rc::new(geofix_platform::ScriptedLocationServices::unsupported())
}
