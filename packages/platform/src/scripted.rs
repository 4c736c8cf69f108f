use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::{
    LocationError, LocationServices, PermissionCallback, PermissionGrant, Position,
    PositionOptions, Transport,
};

/// One scripted outcome for a position fetch.
#[derive(Clone)]
pub enum FetchScript {
    /// Resolve immediately with this outcome.
    Respond(Result<Position, LocationError>),
    /// Never resolve, leaving the request in flight.
    Pending,
}

/// A deterministic [`LocationServices`] for tests and browserless targets.
///
/// Outcomes are scripted up front and every interaction is recorded, so a
/// test can steer the widget and then assert on exactly what it asked the
/// platform for. Clones share the same script and records.
#[derive(Clone)]
pub struct ScriptedLocationServices {
    inner: Rc<RefCell<Inner>>,
}

struct Inner {
    supported: bool,
    transport: Transport,
    permission: Result<PermissionGrant, LocationError>,
    fetches: VecDeque<FetchScript>,
    listener: Option<PermissionCallback>,
    permission_queries: usize,
    fetch_log: Vec<PositionOptions>,
    alerts: Vec<String>,
}

impl ScriptedLocationServices {
    /// A supported platform on a secure page, permission still undecided,
    /// nothing scripted.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                supported: true,
                transport: Transport::new(true, "https"),
                permission: Ok(PermissionGrant::Prompt),
                fetches: VecDeque::new(),
                listener: None,
                permission_queries: 0,
                fetch_log: Vec::new(),
                alerts: Vec::new(),
            })),
        }
    }

    /// A platform with no position API at all.
    pub fn unsupported() -> Self {
        Self::new().with_support(false)
    }

    pub fn with_support(self, supported: bool) -> Self {
        self.inner.borrow_mut().supported = supported;
        self
    }

    pub fn with_transport(self, transport: Transport) -> Self {
        self.inner.borrow_mut().transport = transport;
        self
    }

    /// Scripts the outcome of every permission introspection.
    pub fn with_permission(self, permission: Result<PermissionGrant, LocationError>) -> Self {
        self.inner.borrow_mut().permission = permission;
        self
    }

    /// Scripts the outcome of the next position fetch. Fetches consume
    /// scripts in the order they were added.
    pub fn with_fetch(self, script: FetchScript) -> Self {
        self.inner.borrow_mut().fetches.push_back(script);
        self
    }

    /// Number of permission introspections so far, subscriptions included.
    pub fn permission_queries(&self) -> usize {
        self.inner.borrow().permission_queries
    }

    /// The options of every fetch issued so far, oldest first.
    pub fn fetch_log(&self) -> Vec<PositionOptions> {
        self.inner.borrow().fetch_log.clone()
    }

    /// Every advisory dialog shown so far, oldest first.
    pub fn alerts(&self) -> Vec<String> {
        self.inner.borrow().alerts.clone()
    }

    /// Whether a permission change listener is currently installed.
    pub fn has_listener(&self) -> bool {
        self.inner.borrow().listener.is_some()
    }

    /// Fires the installed permission change listener, as the platform
    /// would after the user edits the permission in browser chrome.
    /// Does nothing if no listener was installed.
    pub fn emit_permission_change(&self, grant: PermissionGrant) {
        let listener = self.inner.borrow().listener.clone();
        if let Some(listener) = listener {
            listener(grant);
        }
    }
}

impl Default for ScriptedLocationServices {
    fn default() -> Self {
        Self::new()
    }
}

/// Equality by identity, so values holding one of these can be compared
/// cheaply in component props.
impl PartialEq for ScriptedLocationServices {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

#[async_trait::async_trait(?Send)]
impl LocationServices for ScriptedLocationServices {
    fn geolocation_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    fn transport(&self) -> Transport {
        self.inner.borrow().transport.clone()
    }

    async fn query_permission(&self) -> Result<PermissionGrant, LocationError> {
        let mut inner = self.inner.borrow_mut();
        inner.permission_queries += 1;
        inner.permission.clone()
    }

    async fn subscribe_permission(
        &self,
        on_change: PermissionCallback,
    ) -> Result<PermissionGrant, LocationError> {
        let mut inner = self.inner.borrow_mut();
        inner.permission_queries += 1;
        // A failed introspection installs nothing, as on the real platform.
        if inner.permission.is_ok() {
            inner.listener = Some(on_change);
        }
        inner.permission.clone()
    }

    async fn fetch_position(&self, options: PositionOptions) -> Result<Position, LocationError> {
        let script = {
            let mut inner = self.inner.borrow_mut();
            inner.fetch_log.push(options);
            inner.fetches.pop_front()
        };
        match script {
            Some(FetchScript::Respond(outcome)) => outcome,
            Some(FetchScript::Pending) => std::future::pending().await,
            None => {
                tracing::warn!("position fetch requested with nothing scripted");
                Err(LocationError::PositionUnavailable)
            }
        }
    }

    fn alert(&self, message: &str) {
        self.inner.borrow_mut().alerts.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fix(latitude: f64, longitude: f64) -> Position {
        Position {
            latitude,
            longitude,
            accuracy: 10.0,
        }
    }

    #[tokio::test]
    async fn scripted_fetches_resolve_in_order() {
        let services = ScriptedLocationServices::new()
            .with_fetch(FetchScript::Respond(Ok(fix(1.0, 2.0))))
            .with_fetch(FetchScript::Respond(Err(LocationError::Timeout)));

        let first = services.fetch_position(PositionOptions::default()).await;
        let second = services.fetch_position(PositionOptions::default()).await;

        assert_eq!(first, Ok(fix(1.0, 2.0)));
        assert_eq!(second, Err(LocationError::Timeout));
    }

    #[tokio::test]
    async fn records_fetch_options_and_permission_queries() {
        let services = ScriptedLocationServices::new()
            .with_permission(Ok(PermissionGrant::Granted))
            .with_fetch(FetchScript::Respond(Ok(fix(0.0, 0.0))));

        let _ = services.query_permission().await;
        let _ = services
            .fetch_position(PositionOptions::with_accuracy(true))
            .await;

        assert_eq!(services.permission_queries(), 1);
        assert_eq!(
            services.fetch_log(),
            vec![PositionOptions::with_accuracy(true)]
        );
    }

    #[tokio::test]
    async fn subscription_installs_the_listener() {
        let services = ScriptedLocationServices::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let disposition = services
            .subscribe_permission(Rc::new(move |grant| sink.borrow_mut().push(grant)))
            .await;

        assert_eq!(disposition, Ok(PermissionGrant::Prompt));
        assert!(services.has_listener());

        services.emit_permission_change(PermissionGrant::Denied);
        services.emit_permission_change(PermissionGrant::Granted);
        assert_eq!(
            *seen.borrow(),
            vec![PermissionGrant::Denied, PermissionGrant::Granted]
        );
    }

    #[tokio::test]
    async fn alerts_are_recorded_verbatim() {
        let services = ScriptedLocationServices::new();
        services.alert("enable location access in your browser settings");
        assert_eq!(
            services.alerts(),
            vec!["enable location access in your browser settings".to_string()]
        );
    }
}
