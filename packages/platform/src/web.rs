use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_channel::oneshot;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Geolocation, GeolocationPosition, GeolocationPositionError, PermissionStatus};

use crate::{
    LocationError, LocationServices, PermissionCallback, PermissionGrant, Position,
    PositionOptions, Transport,
};

/// [`LocationServices`] over the real browser APIs.
pub struct WebLocationServices {
    window: web_sys::Window,
    watch: RefCell<Option<PermissionWatch>>,
}

/// Keeps a permission subscription alive: the status object we registered
/// on and the closure the browser calls back into.
struct PermissionWatch {
    status: PermissionStatus,
    _onchange: Closure<dyn FnMut()>,
}

impl Drop for PermissionWatch {
    fn drop(&mut self) {
        self.status.set_onchange(None);
    }
}

impl WebLocationServices {
    pub fn new() -> Self {
        Self {
            window: web_sys::window().unwrap(),
            watch: RefCell::new(None),
        }
    }

    fn geolocation(&self) -> Result<Geolocation, LocationError> {
        self.window
            .navigator()
            .geolocation()
            .map_err(|_| LocationError::Unsupported)
    }

    /// Resolves the permission status object for geolocation, if the
    /// browser exposes permission introspection at all.
    async fn query_status(&self) -> Result<PermissionStatus, LocationError> {
        let permissions = self
            .window
            .navigator()
            .permissions()
            .map_err(|_| LocationError::Unsupported)?;

        let descriptor = js_sys::Object::new();
        js_sys::Reflect::set(&descriptor, &"name".into(), &"geolocation".into())
            .map_err(|_| LocationError::Unsupported)?;

        let promise = permissions
            .query(&descriptor)
            .map_err(|_| LocationError::Unsupported)?;
        let status = JsFuture::from(promise)
            .await
            .map_err(|_| LocationError::Unsupported)?;
        Ok(status.unchecked_into::<PermissionStatus>())
    }
}

impl Default for WebLocationServices {
    fn default() -> Self {
        Self::new()
    }
}

fn grant_of(status: &PermissionStatus) -> PermissionGrant {
    let state = js_sys::Reflect::get(status.as_ref(), &"state".into())
        .ok()
        .and_then(|state| state.as_string())
        .unwrap_or_default();
    PermissionGrant::from_platform(&state)
}

#[async_trait::async_trait(?Send)]
impl LocationServices for WebLocationServices {
    fn geolocation_supported(&self) -> bool {
        self.window.navigator().geolocation().is_ok()
    }

    fn transport(&self) -> Transport {
        let scheme = self
            .window
            .location()
            .protocol()
            .map(|protocol| protocol.trim_end_matches(':').to_string())
            .unwrap_or_default();
        Transport::new(self.window.is_secure_context(), scheme)
    }

    async fn query_permission(&self) -> Result<PermissionGrant, LocationError> {
        Ok(grant_of(&self.query_status().await?))
    }

    async fn subscribe_permission(
        &self,
        on_change: PermissionCallback,
    ) -> Result<PermissionGrant, LocationError> {
        let status = self.query_status().await?;
        let grant = grant_of(&status);

        let onchange: Closure<dyn FnMut()> = Closure::new({
            let status = status.clone();
            move || on_change(grant_of(&status))
        });
        status.set_onchange(Some(onchange.as_ref().unchecked_ref()));

        // Dropping the previous watch clears its onchange first
        *self.watch.borrow_mut() = None;
        *self.watch.borrow_mut() = Some(PermissionWatch {
            status,
            _onchange: onchange,
        });

        tracing::debug!(?grant, "subscribed to permission changes");
        Ok(grant)
    }

    async fn fetch_position(&self, options: PositionOptions) -> Result<Position, LocationError> {
        let geolocation = self.geolocation()?;

        let platform_options = web_sys::PositionOptions::new();
        platform_options.set_enable_high_accuracy(options.enable_high_accuracy);
        platform_options.set_timeout(options.timeout);
        platform_options.set_maximum_age(options.maximum_age);

        let (tx, rx) = oneshot::channel();
        let tx = Rc::new(Cell::new(Some(tx)));

        let on_success: Closure<dyn FnMut(GeolocationPosition)> = Closure::new({
            let tx = tx.clone();
            move |position: GeolocationPosition| {
                let coords = position.coords();
                let fix = Position {
                    latitude: coords.latitude(),
                    longitude: coords.longitude(),
                    accuracy: coords.accuracy(),
                };
                if let Some(tx) = tx.take() {
                    let _ = tx.send(Ok(fix));
                }
            }
        });
        let on_error: Closure<dyn FnMut(GeolocationPositionError)> = Closure::new({
            let tx = tx.clone();
            move |error: GeolocationPositionError| {
                if let Some(tx) = tx.take() {
                    let _ = tx.send(Err(LocationError::from_code(error.code())));
                }
            }
        });

        geolocation
            .get_current_position_with_error_callback_and_options(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
                &platform_options,
            )
            .map_err(|_| LocationError::Unsupported)?;
        on_success.forget();
        on_error.forget();

        tracing::debug!(
            high_accuracy = options.enable_high_accuracy,
            timeout = options.timeout,
            "requested position fix"
        );

        rx.await
            .unwrap_or(Err(LocationError::PositionUnavailable))
    }

    fn alert(&self, message: &str) {
        gloo_dialogs::alert(message);
    }
}
