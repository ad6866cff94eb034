use crate::clients::OrderClient;
use crate::config::Config;
use crate::workflow::Workflow;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Errors raised while shutting the system down.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Session host task failed: {0}")]
    HostTask(#[from] tokio::task::JoinError),
}

/// The running ordering service.
///
/// `PizzaSystem` is responsible for:
/// - **Wiring**: building the shared [`Workflow`] from the [`Config`] and injecting it
///   into the session host as its context
/// - **Lifecycle**: spawning the host task and stopping it again
///
/// # Example
///
/// ```rust
/// use pizza_palace::config::Config;
/// use pizza_palace::lifecycle::PizzaSystem;
/// use pizza_palace::model::SessionOpen;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = PizzaSystem::new(&Config::default());
///
///     let id = system.order_client.open_session(SessionOpen::default()).await?;
///     let menu = system.order_client.get_menu(id).await?;
///     assert!(menu.message.starts_with("Our pizzas:"));
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct PizzaSystem {
    /// Client for driving ordering sessions
    pub order_client: OrderClient,

    /// Session host task, awaited on shutdown
    handle: tokio::task::JoinHandle<()>,
}

impl PizzaSystem {
    /// Spawns the session host. Must be called inside a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        let workflow = Arc::new(Workflow::new(config.catalog.clone(), config.unknown_items));
        info!(
            pizzas = workflow.catalog().menu().entries().len(),
            sizes = workflow.catalog().sizes().entries().len(),
            unknown_items = %workflow.policy(),
            "Starting pizza system"
        );

        let (host, order_client) = crate::session_actor::new(config.session_buffer);
        let handle = tokio::spawn(host.run(workflow));

        Self {
            order_client,
            handle,
        }
    }

    /// Stops the session host and waits for it to finish.
    ///
    /// Dropping the client closes the host's channel; the host drains what is already queued
    /// and exits. Any clones of the client handed out earlier keep the host alive until they
    /// are dropped too.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.order_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Session host task failed");
            return Err(e.into());
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
