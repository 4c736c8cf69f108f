/// Everything that can go wrong while resolving the user's position.
///
/// Every variant is terminal for the request that produced it and
/// non-fatal for the widget, which stays interactive and can retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The platform exposes no geolocation capability.
    #[error("geolocation is not supported on this platform")]
    Unsupported,

    /// The page is served over a transport geolocation refuses to work on.
    #[error("geolocation requires a secure connection")]
    InsecureContext,

    /// The user or platform refused access to the location.
    #[error("permission to read the location was denied")]
    PermissionDenied,

    /// The platform accepted the request but could not produce a fix.
    #[error("the position could not be determined")]
    PositionUnavailable,

    /// The platform gave up before producing a fix.
    #[error("the position request timed out")]
    Timeout,

    /// A failure code outside the documented set.
    #[error("the position request failed with code {0}")]
    Unknown(u16),
}

impl LocationError {
    /// Classifies a numeric failure code from the platform position API.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_codes_map_to_their_variants() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(
            LocationError::from_code(2),
            LocationError::PositionUnavailable
        );
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
    }

    #[test]
    fn everything_else_is_unknown() {
        assert_eq!(LocationError::from_code(0), LocationError::Unknown(0));
        assert_eq!(LocationError::from_code(4), LocationError::Unknown(4));
        assert_eq!(LocationError::from_code(255), LocationError::Unknown(255));
    }
}
