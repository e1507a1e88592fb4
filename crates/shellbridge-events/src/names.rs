//! The closed set of application event names.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Name of an application event.
///
/// Subscribers register against a name; every [`DomainEvent`](crate::DomainEvent)
/// maps to exactly one name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    /// The user moved to a different view.
    Navigate,
    /// An API call found that the user must sign in.
    LoginRequired,
    /// Data for the current view has finished loading (or failed to).
    DataStatus,
    /// The main view should fetch its data again.
    ReloadMainView,
    /// The user info fragment should fetch its data again.
    ReloadUserInfo,
    /// The native host finished a login.
    MobileLoginComplete,
    /// The native host finished a logout.
    MobileLogoutComplete,
    /// An error should be shown to the user.
    SetError,
}

impl EventName {
    /// Every event name, in declaration order.
    pub const ALL: [EventName; 8] = [
        EventName::Navigate,
        EventName::LoginRequired,
        EventName::DataStatus,
        EventName::ReloadMainView,
        EventName::ReloadUserInfo,
        EventName::MobileLoginComplete,
        EventName::MobileLogoutComplete,
        EventName::SetError,
    ];

    /// The wire name of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventName::Navigate => "Navigate",
            EventName::LoginRequired => "LoginRequired",
            EventName::DataStatus => "DataStatus",
            EventName::ReloadMainView => "ReloadMainView",
            EventName::ReloadUserInfo => "ReloadUserInfo",
            EventName::MobileLoginComplete => "MobileLoginComplete",
            EventName::MobileLogoutComplete => "MobileLogoutComplete",
            EventName::SetError => "SetError",
        }
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EventError::UnknownName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(EventName::MobileLoginComplete.to_string(), "MobileLoginComplete");
        assert_eq!(EventName::SetError.to_string(), "SetError");
    }

    #[test]
    fn test_parse_every_name() {
        for name in EventName::ALL {
            assert_eq!(name.as_str().parse::<EventName>().unwrap(), name);
        }
    }

    #[test]
    fn test_parse_unknown_name() {
        let err = "mobileLoginComplete".parse::<EventName>().unwrap_err();
        assert!(err.to_string().contains("mobileLoginComplete"));
    }

    #[test]
    fn test_serde_uses_wire_name() {
        let json = serde_json::to_string(&EventName::ReloadMainView).unwrap();
        assert_eq!(json, "\"ReloadMainView\"");
    }
}
