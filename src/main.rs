//! # Pizza Palace Demo
//!
//! Plays one scripted phone order against a running [`PizzaSystem`]:
//! menu, two pizzas, a change of mind, checkout and confirmation.
//! The calls arrive the way a dialogue host sends them, as function names with JSON arguments.

use pizza_palace::agent::AgentProfile;
use pizza_palace::config::Config;
use pizza_palace::lifecycle::tracing::setup_tracing;
use pizza_palace::lifecycle::PizzaSystem;
use pizza_palace::model::SessionOpen;
use serde_json::json;
use session_host::SessionClient;
use tracing::{debug, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    info!(catalog = ?config.catalog_path, "Starting Pizza Palace");
    debug!(
        profile = %AgentProfile::pizza_palace(&config.catalog).to_json(),
        "Agent profile"
    );

    let system = PizzaSystem::new(&config);
    let client = &system.order_client;

    let id = client
        .open_session(SessionOpen {
            caller: Some("+15550100".to_string()),
        })
        .await?;

    let calls = [
        ("get_menu", json!({})),
        ("start_order", json!({})),
        ("add_pizza", json!({ "pizza_type": "margherita", "size": "small" })),
        ("add_pizza", json!({ "pizza_type": "calzone", "size": "large" })),
        ("add_pizza", json!({ "pizza_type": "pepperoni", "size": "large" })),
        ("add_pizza", json!({ "pizza_type": "veggie" })),
        ("remove_last_item", json!({})),
        ("finish_order", json!({})),
        ("confirm_order", json!({})),
    ];

    let span = tracing::info_span!("phone_order", session_id = %id);
    async {
        for (name, args) in &calls {
            let reply = client.call(id, name, args).await?;
            info!(
                function = *name,
                refused = reply.is_refused(),
                stage = ?reply.switch_to,
                "{}",
                reply.message
            );
            debug!(global_data = %reply.global_data(), "State update");
        }
        Ok::<_, pizza_palace::session_actor::SessionError>(())
    }
    .instrument(span)
    .await?;

    let snapshot = client.snapshot(id).await?;
    info!(
        stage = %snapshot.stage,
        items = snapshot.order.cart.len(),
        confirmed = snapshot.order.confirmed,
        "Final state"
    );
    client.close(id).await?;

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
