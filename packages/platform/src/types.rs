use serde::{Deserialize, Serialize};

/// A single coordinate fix.
///
/// Produced only by a successful fetch and never mutated afterwards. A
/// later fetch replaces the whole value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Error radius of the fix, in meters.
    pub accuracy: f64,
}

/// Options passed through to the platform position request, mirroring the
/// geolocation API dictionary of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    /// How long the platform may spend resolving a fix, in milliseconds.
    pub timeout: u32,
    /// Maximum acceptable age of a cached fix, in milliseconds.
    pub maximum_age: u32,
}

impl Default for PositionOptions {
    /// A fresh low-accuracy fix within ten seconds, never a cached one.
    fn default() -> Self {
        Self {
            enable_high_accuracy: false,
            timeout: 10_000,
            maximum_age: 0,
        }
    }
}

impl PositionOptions {
    /// Options for a one-shot fetch at the requested precision, with the
    /// default timeout and cache policy.
    pub fn with_accuracy(enable_high_accuracy: bool) -> Self {
        Self {
            enable_high_accuracy,
            ..Self::default()
        }
    }
}

/// The permission disposition reported by platform introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionGrant {
    Granted,
    Denied,
    /// The user has not decided yet, or the platform reported a
    /// disposition we do not recognize.
    Prompt,
}

impl PermissionGrant {
    /// Classifies the state string from platform permission
    /// introspection. Anything outside the known set normalizes to
    /// [`Prompt`](Self::Prompt).
    pub fn from_platform(state: &str) -> Self {
        match state {
            "granted" => Self::Granted,
            "denied" => Self::Denied,
            _ => Self::Prompt,
        }
    }
}

/// Security facts about the page the widget is running on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transport {
    /// Whether the platform considers this a secure context.
    pub secure: bool,
    /// The page scheme without the trailing colon, e.g. `https`.
    pub scheme: String,
}

impl Transport {
    pub fn new(secure: bool, scheme: impl Into<String>) -> Self {
        Self {
            secure,
            scheme: scheme.into(),
        }
    }

    /// Whether geolocation must be refused before reaching the platform.
    ///
    /// Insecure pages cannot use geolocation, except plain `http` which is
    /// allowed through for local development hosts.
    pub fn insecure(&self) -> bool {
        !self.secure && self.scheme != "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_ask_for_a_fresh_fix() {
        let options = PositionOptions::default();
        assert!(!options.enable_high_accuracy);
        assert_eq!(options.timeout, 10_000);
        assert_eq!(options.maximum_age, 0);
    }

    #[test]
    fn accuracy_override_keeps_the_rest() {
        let options = PositionOptions::with_accuracy(true);
        assert!(options.enable_high_accuracy);
        assert_eq!(options.timeout, 10_000);
        assert_eq!(options.maximum_age, 0);
    }

    #[test]
    fn platform_states_map_to_grants() {
        assert_eq!(
            PermissionGrant::from_platform("granted"),
            PermissionGrant::Granted
        );
        assert_eq!(
            PermissionGrant::from_platform("denied"),
            PermissionGrant::Denied
        );
        assert_eq!(
            PermissionGrant::from_platform("prompt"),
            PermissionGrant::Prompt
        );
    }

    #[test]
    fn unrecognized_platform_states_normalize_to_prompt() {
        assert_eq!(
            PermissionGrant::from_platform("limited"),
            PermissionGrant::Prompt
        );
        assert_eq!(PermissionGrant::from_platform(""), PermissionGrant::Prompt);
    }

    #[test]
    fn secure_contexts_are_never_insecure() {
        assert!(!Transport::new(true, "https").insecure());
        assert!(!Transport::new(true, "http").insecure());
    }

    #[test]
    fn plain_http_is_the_local_development_exception() {
        assert!(!Transport::new(false, "http").insecure());
        assert!(Transport::new(false, "ftp").insecure());
        assert!(Transport::new(false, "file").insecure());
    }
}
