//! In-process stand-in for the native mobile host.
//!
//! Reads calls off a `ChannelHost` queue and answers each one through the
//! bridge channel, the way a real shell would call back into the web view.

use std::sync::Weak;
use std::time::Duration;

use shellbridge_bridge::{BridgeChannel, BridgeOperation, NativeCall, NativeResponse};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use crate::config::SimulatorConfig;

/// Token and session state held by the simulated host.
#[derive(Debug)]
pub struct SimulatedHost {
    config: SimulatorConfig,
    logged_in: bool,
    access_token: Option<String>,
    access_expired: bool,
    refresh_expired: bool,
    refresh_count: u32,
}

impl SimulatedHost {
    pub fn new(config: SimulatorConfig) -> Self {
        let access_token = config.logged_in.then(|| config.access_token.clone());
        Self {
            logged_in: config.logged_in,
            access_token,
            access_expired: false,
            refresh_expired: false,
            refresh_count: 0,
            config,
        }
    }

    /// Answer calls until the queue closes.
    ///
    /// The channel owns the queue's sender through its host, so the task only
    /// holds a weak reference; dropping the last handle to the channel closes
    /// the queue and ends the task.
    pub fn spawn(
        mut self,
        mut calls: UnboundedReceiver<NativeCall>,
        channel: Weak<BridgeChannel>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(call) = calls.recv().await {
                if self.config.ignore.contains(&call.operation) {
                    tracing::debug!(operation = %call.operation, "simulator ignoring call");
                    continue;
                }
                if self.config.latency_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(self.config.latency_ms)).await;
                }
                let response = self.handle(&call);
                let Some(channel) = channel.upgrade() else {
                    break;
                };
                let outcome = channel.deliver_response(response);
                tracing::debug!(operation = %call.operation, ?outcome, "simulator delivered");
            }
        })
    }

    /// Produce the host's answer for one call.
    pub fn handle(&mut self, call: &NativeCall) -> NativeResponse {
        let result = if self.config.fail.contains(&call.operation) {
            Err(format!("simulated failure of {}", call.operation))
        } else {
            self.apply(call.operation)
        };

        let (result, error) = match result {
            Ok(value) => (Some(value), None),
            Err(message) => (None, Some(message)),
        };
        NativeResponse {
            correlation_id: call.correlation_id.to_string(),
            result,
            error,
        }
    }

    fn apply(&mut self, operation: BridgeOperation) -> Result<String, String> {
        match operation {
            BridgeOperation::Login => {
                self.logged_in = true;
                self.access_expired = false;
                self.refresh_expired = false;
                self.access_token = Some(self.config.access_token.clone());
                Ok(String::new())
            }
            BridgeOperation::Logout => {
                self.logged_in = false;
                self.access_token = None;
                Ok(String::new())
            }
            BridgeOperation::ExpireAccessToken => {
                self.access_expired = true;
                Ok(String::new())
            }
            BridgeOperation::ExpireRefreshToken => {
                self.refresh_expired = true;
                Ok(String::new())
            }
            BridgeOperation::GetAccessToken => match &self.access_token {
                Some(_) if self.access_expired => {
                    // The host sends the expired token; the API rejects it and
                    // the caller retries with a refresh.
                    Ok(format!("{}-expired", self.config.access_token))
                }
                Some(token) => Ok(token.clone()),
                None => Err("login required".to_string()),
            },
            BridgeOperation::RefreshAccessToken => {
                if !self.logged_in || self.refresh_expired {
                    self.access_token = None;
                    return Err("login required".to_string());
                }
                self.refresh_count += 1;
                let token = format!("{}-{}", self.config.refresh_prefix, self.refresh_count);
                self.access_token = Some(token.clone());
                self.access_expired = false;
                Ok(token)
            }
        }
    }
}
