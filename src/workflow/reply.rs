//! What an operation hands back to the dialogue host.

use crate::model::{CartItem, OperationKind, Price, WorkflowStage};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Why an operation did nothing.
///
/// Refusals are part of the conversation: the `Display` text is what the customer hears.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Refusal {
    #[error("Your cart is empty.")]
    EmptyCart,

    #[error("Sorry, we don't have {0} pizza. Would you like to hear the menu?")]
    UnknownPizza(String),

    #[error("Sorry, we don't make a {size} size. You can choose {available}.")]
    UnknownSize { size: String, available: String },

    #[error("Sorry, I can't {} right now.", .operation.phrase())]
    NotAvailable {
        operation: OperationKind,
        stage: WorkflowStage,
    },
}

/// A field of the order that an operation changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    Cart(Vec<CartItem>),
    Total(Option<Price>),
    Confirmed(bool),
    Started(bool),
}

/// The outbound half of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text for the customer.
    pub message: String,
    /// Stage the host should switch its active context to.
    pub switch_to: Option<WorkflowStage>,
    /// Changed fields, in the order they were changed.
    pub changes: Vec<StateChange>,
    pub refusal: Option<Refusal>,
}

impl Reply {
    pub fn say(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            switch_to: None,
            changes: Vec::new(),
            refusal: None,
        }
    }

    pub fn refuse(refusal: Refusal) -> Self {
        Self {
            message: refusal.to_string(),
            switch_to: None,
            changes: Vec::new(),
            refusal: Some(refusal),
        }
    }

    /// Refusal followed by a prompt, e.g. "Your cart is empty. What pizza would you like?"
    pub fn refuse_then(refusal: Refusal, prompt: &str) -> Self {
        let mut reply = Self::refuse(refusal);
        reply.message = format!("{} {prompt}", reply.message);
        reply
    }

    pub fn switch_to(mut self, stage: WorkflowStage) -> Self {
        self.switch_to = Some(stage);
        self
    }

    pub fn change(mut self, change: StateChange) -> Self {
        self.changes.push(change);
        self
    }

    pub fn is_refused(&self) -> bool {
        self.refusal.is_some()
    }

    /// The changes as the partial session-data update a dialogue host merges into its store.
    ///
    /// Keys: `items`, `total`, `order_confirmed`, `order_started`. A cleared total is `0`.
    pub fn global_data(&self) -> Value {
        let mut data = Map::new();
        for change in &self.changes {
            let (key, value) = match change {
                StateChange::Cart(items) => ("items", json!(items)),
                StateChange::Total(total) => {
                    ("total", json!(f64::from(total.unwrap_or(Price::ZERO))))
                }
                StateChange::Confirmed(confirmed) => ("order_confirmed", json!(confirmed)),
                StateChange::Started(started) => ("order_started", json!(started)),
            };
            data.insert(key.to_string(), value);
        }
        Value::Object(data)
    }
}
