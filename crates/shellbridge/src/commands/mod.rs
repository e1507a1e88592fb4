//! CLI command handlers.

pub mod auth;
pub mod session;
pub mod token;

use std::sync::Arc;

use shellbridge_auth::MobileAuthenticator;
use shellbridge_bridge::{BridgeChannel, ChannelHost};
use shellbridge_events::{EventName, EventNotifier};
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::simulator::SimulatedHost;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Authenticator wired to a running simulated host.
pub struct Bridge {
    pub auth: MobileAuthenticator,
    host_task: JoinHandle<()>,
}

impl Bridge {
    /// Start the simulated host and build an authenticator over it.
    ///
    /// Every published event is echoed to stdout.
    pub fn start(ctx: &Context) -> Self {
        let (host, calls) = ChannelHost::new();
        let channel = Arc::new(BridgeChannel::with_config(
            Arc::new(host),
            &ctx.config.bridge,
        ));
        let host_task =
            SimulatedHost::new(ctx.config.simulator.clone()).spawn(calls, Arc::downgrade(&channel));

        let events = EventNotifier::shared();
        for name in EventName::ALL {
            events.subscribe(name, |event| {
                let payload = serde_json::to_string(event).unwrap_or_default();
                println!("event: {payload}");
            });
        }

        Self {
            auth: MobileAuthenticator::with_channel(channel, events),
            host_task,
        }
    }

    /// Drop the authenticator and wait for the simulated host to stop.
    pub async fn shutdown(self) {
        drop(self.auth);
        if let Err(e) = self.host_task.await {
            tracing::warn!("simulated host task failed: {e}");
        }
    }
}
