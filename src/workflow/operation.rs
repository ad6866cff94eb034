//! Workflow operations and decoding of host function calls.

use crate::model::OperationKind;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// A request to the workflow, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    GetMenu,
    StartOrder,
    /// `size` falls back to the catalog's default size when absent.
    AddPizza {
        pizza: String,
        size: Option<String>,
    },
    RemoveLastItem,
    FinishOrder,
    ConfirmOrder,
    CancelOrder,
    AddMore,
}

/// The dialogue host called a function this workflow does not understand.
///
/// These are contract violations between host and workflow, not something to tell the customer.
#[derive(Debug, Error)]
pub enum CallError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid arguments for {function}: {source}")]
    InvalidArguments {
        function: OperationKind,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct AddPizzaArgs {
    pizza_type: String,
    #[serde(default)]
    size: Option<String>,
}

impl Operation {
    pub fn add_pizza(pizza: impl Into<String>, size: impl Into<String>) -> Self {
        Operation::AddPizza {
            pizza: pizza.into(),
            size: Some(size.into()),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::GetMenu => OperationKind::GetMenu,
            Operation::StartOrder => OperationKind::StartOrder,
            Operation::AddPizza { .. } => OperationKind::AddPizza,
            Operation::RemoveLastItem => OperationKind::RemoveLastItem,
            Operation::FinishOrder => OperationKind::FinishOrder,
            Operation::ConfirmOrder => OperationKind::ConfirmOrder,
            Operation::CancelOrder => OperationKind::CancelOrder,
            Operation::AddMore => OperationKind::AddMore,
        }
    }

    /// Decodes a host function call such as `add_pizza {"pizza_type": "veggie", "size": "large"}`.
    ///
    /// Operations without parameters ignore `args`.
    pub fn from_call(name: &str, args: &Value) -> Result<Self, CallError> {
        let kind: OperationKind = name.parse().map_err(CallError::UnknownFunction)?;
        Ok(match kind {
            OperationKind::GetMenu => Operation::GetMenu,
            OperationKind::StartOrder => Operation::StartOrder,
            OperationKind::AddPizza => {
                let args = AddPizzaArgs::deserialize(args).map_err(|source| {
                    CallError::InvalidArguments {
                        function: kind,
                        source,
                    }
                })?;
                Operation::AddPizza {
                    pizza: args.pizza_type,
                    size: args.size,
                }
            }
            OperationKind::RemoveLastItem => Operation::RemoveLastItem,
            OperationKind::FinishOrder => Operation::FinishOrder,
            OperationKind::ConfirmOrder => Operation::ConfirmOrder,
            OperationKind::CancelOrder => Operation::CancelOrder,
            OperationKind::AddMore => Operation::AddMore,
        })
    }
}
