//! Workflow stages and the static stage table.
//!
//! The table in [`StageDefinition::for_stage`] is the single source of truth for which
//! operations a stage accepts and which stages it may hand over to. The workflow checks
//! preconditions against it, and the agent profile publishes it to the dialogue host.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Display};
use std::str::FromStr;

/// The phase a conversation is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStage {
    #[default]
    Greeting,
    Ordering,
    Checkout,
}

impl WorkflowStage {
    pub const ALL: [WorkflowStage; 3] = [
        WorkflowStage::Greeting,
        WorkflowStage::Ordering,
        WorkflowStage::Checkout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            WorkflowStage::Greeting => "greeting",
            WorkflowStage::Ordering => "ordering",
            WorkflowStage::Checkout => "checkout",
        }
    }

    pub fn definition(self) -> &'static StageDefinition {
        StageDefinition::for_stage(self)
    }

    /// Whether `operation` may run in this stage.
    pub fn allows(self, operation: OperationKind) -> bool {
        self.definition().operations().any(|op| op == operation)
    }

    pub fn can_switch_to(self, next: WorkflowStage) -> bool {
        self.definition().transitions.contains(&next)
    }
}

impl Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Names of the workflow operations, without their arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    GetMenu,
    StartOrder,
    AddPizza,
    RemoveLastItem,
    FinishOrder,
    ConfirmOrder,
    CancelOrder,
    AddMore,
}

impl OperationKind {
    pub const ALL: [OperationKind; 8] = [
        OperationKind::GetMenu,
        OperationKind::StartOrder,
        OperationKind::AddPizza,
        OperationKind::RemoveLastItem,
        OperationKind::FinishOrder,
        OperationKind::ConfirmOrder,
        OperationKind::CancelOrder,
        OperationKind::AddMore,
    ];

    /// Function name as the dialogue host calls it.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::GetMenu => "get_menu",
            OperationKind::StartOrder => "start_order",
            OperationKind::AddPizza => "add_pizza",
            OperationKind::RemoveLastItem => "remove_last_item",
            OperationKind::FinishOrder => "finish_order",
            OperationKind::ConfirmOrder => "confirm_order",
            OperationKind::CancelOrder => "cancel_order",
            OperationKind::AddMore => "add_more",
        }
    }

    /// Tool description shown to the dialogue host.
    pub fn description(self) -> &'static str {
        match self {
            OperationKind::GetMenu => "Get the pizza menu",
            OperationKind::StartOrder => "Start a new pizza order",
            OperationKind::AddPizza => "Add a pizza to the order",
            OperationKind::RemoveLastItem => "Remove the last item from the order",
            OperationKind::FinishOrder => "Finish ordering and proceed to checkout",
            OperationKind::ConfirmOrder => "Confirm and place the order",
            OperationKind::CancelOrder => "Cancel the order",
            OperationKind::AddMore => "Go back to add more items",
        }
    }

    /// What the caller asked for, as it reads in a sentence.
    pub fn phrase(self) -> &'static str {
        match self {
            OperationKind::GetMenu => "read the menu",
            OperationKind::StartOrder => "start a new order",
            OperationKind::AddPizza => "add a pizza",
            OperationKind::RemoveLastItem => "remove an item",
            OperationKind::FinishOrder => "check out",
            OperationKind::ConfirmOrder => "confirm the order",
            OperationKind::CancelOrder => "cancel the order",
            OperationKind::AddMore => "add more items",
        }
    }

    /// Operations valid in every stage.
    pub fn is_global(self) -> bool {
        matches!(self, OperationKind::GetMenu | OperationKind::CancelOrder)
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One prompt step inside a stage.
#[derive(Debug, Serialize)]
pub struct StepDefinition {
    pub name: &'static str,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria: Option<&'static str>,
    /// Steps the host may advance to; `"next"` means the following step.
    pub valid_steps: &'static [&'static str],
    /// Operations specific to this step. Published together with the global ones.
    #[serde(serialize_with = "serialize_with_globals")]
    pub operations: &'static [OperationKind],
}

/// Everything the host needs to know about a stage.
///
/// Serialized with a stage-level `operations` list holding exactly what
/// [`WorkflowStage::allows`] accepts.
#[derive(Debug)]
pub struct StageDefinition {
    pub stage: WorkflowStage,
    pub steps: &'static [StepDefinition],
    pub transitions: &'static [WorkflowStage],
}

impl StageDefinition {
    pub fn for_stage(stage: WorkflowStage) -> &'static StageDefinition {
        match stage {
            WorkflowStage::Greeting => &GREETING,
            WorkflowStage::Ordering => &ORDERING,
            WorkflowStage::Checkout => &CHECKOUT,
        }
    }

    /// Every operation the stage accepts: its steps' operations plus the global ones.
    pub fn operations(&self) -> impl Iterator<Item = OperationKind> + '_ {
        with_globals(
            self.steps
                .iter()
                .flat_map(|step| step.operations.iter().copied()),
        )
        .into_iter()
    }
}

impl Serialize for StageDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("StageDefinition", 4)?;
        state.serialize_field("stage", &self.stage)?;
        state.serialize_field("steps", self.steps)?;
        state.serialize_field("operations", &self.operations().collect::<Vec<_>>())?;
        state.serialize_field("transitions", self.transitions)?;
        state.end()
    }
}

/// `listed` in order, followed by any global operation it is missing.
fn with_globals(listed: impl Iterator<Item = OperationKind>) -> Vec<OperationKind> {
    let mut ops: Vec<OperationKind> = Vec::new();
    for op in listed.chain(OperationKind::ALL.into_iter().filter(|op| op.is_global())) {
        if !ops.contains(&op) {
            ops.push(op);
        }
    }
    ops
}

fn serialize_with_globals<S: Serializer>(
    operations: &&'static [OperationKind],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    with_globals(operations.iter().copied()).serialize(serializer)
}

static GREETING: StageDefinition = StageDefinition {
    stage: WorkflowStage::Greeting,
    steps: &[
        StepDefinition {
            name: "welcome",
            text: "Welcome to Pizza Palace! Would you like to hear our menu or start ordering?",
            criteria: Some("Customer has indicated they want to order or hear menu"),
            valid_steps: &["next"],
            operations: &[],
        },
        StepDefinition {
            name: "ready",
            text: "Ready to take your order when you are!",
            criteria: None,
            valid_steps: &[],
            operations: &[OperationKind::GetMenu, OperationKind::StartOrder],
        },
    ],
    transitions: &[WorkflowStage::Greeting, WorkflowStage::Ordering],
};

static ORDERING: StageDefinition = StageDefinition {
    stage: WorkflowStage::Ordering,
    steps: &[StepDefinition {
        name: "select",
        text: "What pizza would you like to order?",
        criteria: Some("Customer has selected pizzas or wants to checkout"),
        valid_steps: &[],
        operations: &[
            OperationKind::AddPizza,
            OperationKind::FinishOrder,
            OperationKind::GetMenu,
            OperationKind::RemoveLastItem,
        ],
    }],
    transitions: &[WorkflowStage::Greeting, WorkflowStage::Checkout],
};

static CHECKOUT: StageDefinition = StageDefinition {
    stage: WorkflowStage::Checkout,
    steps: &[StepDefinition {
        name: "confirm",
        text: "Please confirm your order.",
        criteria: None,
        valid_steps: &[],
        operations: &[
            OperationKind::ConfirmOrder,
            OperationKind::CancelOrder,
            OperationKind::AddMore,
        ],
    }],
    transitions: &[WorkflowStage::Greeting, WorkflowStage::Ordering],
};

#[cfg(test)]
mod tests {
    use super::*;
    use OperationKind::*;

    fn allowed(stage: WorkflowStage) -> Vec<OperationKind> {
        OperationKind::ALL
            .into_iter()
            .filter(|op| stage.allows(*op))
            .collect()
    }

    #[test]
    fn test_operations_per_stage() {
        assert_eq!(allowed(WorkflowStage::Greeting), [GetMenu, StartOrder, CancelOrder]);
        assert_eq!(
            allowed(WorkflowStage::Ordering),
            [GetMenu, AddPizza, RemoveLastItem, FinishOrder, CancelOrder]
        );
        assert_eq!(
            allowed(WorkflowStage::Checkout),
            [GetMenu, ConfirmOrder, CancelOrder, AddMore]
        );
    }

    #[test]
    fn test_every_stage_can_return_to_greeting() {
        for stage in WorkflowStage::ALL {
            assert!(stage.can_switch_to(WorkflowStage::Greeting), "{stage}");
        }
        assert!(!WorkflowStage::Greeting.can_switch_to(WorkflowStage::Checkout));
    }

    #[test]
    fn test_operation_names_parse_back() {
        for op in OperationKind::ALL {
            assert_eq!(op.name().parse::<OperationKind>(), Ok(op));
        }
        assert_eq!("order_drink".parse::<OperationKind>(), Err("order_drink".to_string()));
    }

    #[test]
    fn test_stage_table_serializes_for_host() {
        let json = serde_json::to_value(WorkflowStage::Greeting.definition()).unwrap();
        assert_eq!(json["stage"], "greeting");
        assert_eq!(json["steps"][0]["valid_steps"], serde_json::json!(["next"]));
        assert_eq!(
            json["steps"][1]["operations"],
            serde_json::json!(["get_menu", "start_order", "cancel_order"])
        );
        assert!(json["steps"][1].get("criteria").is_none());
    }

    #[test]
    fn test_published_operations_match_preconditions() {
        for stage in WorkflowStage::ALL {
            let json = serde_json::to_value(stage.definition()).unwrap();

            let mut published: Vec<OperationKind> =
                serde_json::from_value(json["operations"].clone()).unwrap();
            published.sort_by_key(|op| op.name());
            let mut accepted = allowed(stage);
            accepted.sort_by_key(|op| op.name());
            assert_eq!(published, accepted, "{stage}");

            for step in json["steps"].as_array().unwrap() {
                let ops: Vec<OperationKind> =
                    serde_json::from_value(step["operations"].clone()).unwrap();
                assert!(ops.contains(&CancelOrder), "{stage}: {}", step["name"]);
                assert!(ops.contains(&GetMenu), "{stage}: {}", step["name"]);
                assert!(ops.iter().all(|op| stage.allows(*op)), "{stage}: {}", step["name"]);
            }
        }
    }
}
