//! Typed event payloads.

use serde::{Deserialize, Serialize};

use crate::names::EventName;

/// Details of an error surfaced to the user through [`DomainEvent::SetError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorInfo {
    /// Human readable message.
    pub message: String,
    /// Machine readable code, when the failing layer supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// An application event together with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", content = "payload")]
pub enum DomainEvent {
    Navigate {
        #[serde(rename = "isMainView")]
        is_main_view: bool,
    },
    LoginRequired,
    DataStatus {
        loaded: bool,
    },
    ReloadMainView {
        #[serde(rename = "causeError")]
        cause_error: bool,
    },
    ReloadUserInfo {
        #[serde(rename = "causeError")]
        cause_error: bool,
    },
    MobileLoginComplete,
    MobileLogoutComplete,
    SetError {
        area: String,
        error: ErrorInfo,
    },
}

impl DomainEvent {
    /// The name subscribers use to receive this event.
    pub fn name(&self) -> EventName {
        match self {
            DomainEvent::Navigate { .. } => EventName::Navigate,
            DomainEvent::LoginRequired => EventName::LoginRequired,
            DomainEvent::DataStatus { .. } => EventName::DataStatus,
            DomainEvent::ReloadMainView { .. } => EventName::ReloadMainView,
            DomainEvent::ReloadUserInfo { .. } => EventName::ReloadUserInfo,
            DomainEvent::MobileLoginComplete => EventName::MobileLoginComplete,
            DomainEvent::MobileLogoutComplete => EventName::MobileLogoutComplete,
            DomainEvent::SetError { .. } => EventName::SetError,
        }
    }
}
