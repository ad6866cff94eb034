//! # Agent Profile
//!
//! Everything a dialogue host needs to run the ordering agent: its prompt, voice, the stage
//! table and the function manifest. The profile is derived from the [`Catalog`], so a deployer
//! who swaps the menu gets matching `enum` constraints in the `add_pizza` parameters.

use crate::model::{Catalog, OperationKind, StageDefinition, WorkflowStage};
use serde::Serialize;
use serde_json::{json, Value};

/// A titled block of the system prompt, as prose or as bullets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptSection {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
}

impl PromptSection {
    pub fn text(title: &str, body: &str) -> Self {
        Self {
            title: title.to_string(),
            body: Some(body.to_string()),
            bullets: Vec::new(),
        }
    }

    pub fn bullets(title: &str, bullets: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Language {
    pub name: String,
    pub code: String,
    pub voice: String,
}

/// One callable function, with a JSON-schema description of its arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: OperationKind,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentProfile {
    pub name: String,
    pub prompt: Vec<PromptSection>,
    pub languages: Vec<Language>,
    pub stages: Vec<&'static StageDefinition>,
    pub tools: Vec<ToolDefinition>,
}

impl AgentProfile {
    /// The Pizza Palace ordering agent for `catalog`.
    pub fn pizza_palace(catalog: &Catalog) -> Self {
        Self {
            name: "pizza-agent".to_string(),
            prompt: vec![
                PromptSection::text("Role", "You are a pizza ordering assistant for Pizza Palace."),
                PromptSection::bullets(
                    "Guidelines",
                    &[
                        "Be friendly and helpful",
                        "Confirm orders before checkout",
                        "Suggest popular items if asked",
                    ],
                ),
            ],
            languages: vec![Language {
                name: "English".to_string(),
                code: "en-US".to_string(),
                voice: "rime.spore".to_string(),
            }],
            stages: WorkflowStage::ALL
                .into_iter()
                .map(WorkflowStage::definition)
                .collect(),
            tools: OperationKind::ALL
                .into_iter()
                .map(|op| ToolDefinition {
                    name: op,
                    description: op.description(),
                    parameters: parameters(op, catalog),
                })
                .collect(),
        }
    }

    pub fn tool(&self, name: OperationKind) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    pub fn to_json(&self) -> Value {
        json!(self)
    }
}

fn parameters(op: OperationKind, catalog: &Catalog) -> Value {
    match op {
        OperationKind::AddPizza => json!({
            "type": "object",
            "properties": {
                "pizza_type": {
                    "type": "string",
                    "enum": catalog.menu().names().collect::<Vec<_>>(),
                    "description": "Type of pizza"
                },
                "size": {
                    "type": "string",
                    "enum": catalog.sizes().names().collect::<Vec<_>>(),
                    "description": "Pizza size"
                }
            },
            "required": ["pizza_type", "size"]
        }),
        _ => json!({ "type": "object", "properties": {} }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuEntry, Price, SizeEntry};

    #[test]
    fn test_profile_shape() {
        let json = AgentProfile::pizza_palace(&Catalog::default()).to_json();

        assert_eq!(json["name"], "pizza-agent");
        assert_eq!(json["prompt"][0]["title"], "Role");
        assert_eq!(
            json["prompt"][1]["bullets"][1],
            "Confirm orders before checkout"
        );
        assert!(json["prompt"][1].get("body").is_none());
        assert_eq!(
            json["languages"][0],
            json!({ "name": "English", "code": "en-US", "voice": "rime.spore" })
        );
        assert_eq!(json["stages"][2]["stage"], "checkout");
        assert_eq!(
            json["stages"][1]["operations"],
            json!(["add_pizza", "finish_order", "get_menu", "remove_last_item", "cancel_order"])
        );
        assert_eq!(
            json["stages"][2]["operations"],
            json!(["confirm_order", "cancel_order", "add_more", "get_menu"])
        );
        assert_eq!(json["tools"].as_array().map(Vec::len), Some(8));
        assert_eq!(json["tools"][7]["name"], "add_more");
    }

    #[test]
    fn test_add_pizza_schema_follows_catalog() {
        let catalog = Catalog::new(
            vec![MenuEntry {
                name: "Calzone".into(),
                price: Price::from_cents(1100),
            }],
            vec![SizeEntry {
                name: "medium".into(),
                upcharge: Price::ZERO,
            }],
        )
        .unwrap();
        let profile = AgentProfile::pizza_palace(&catalog);

        let add_pizza = profile.tool(OperationKind::AddPizza).unwrap();
        assert_eq!(add_pizza.description, "Add a pizza to the order");
        assert_eq!(
            add_pizza.parameters["properties"]["pizza_type"]["enum"],
            json!(["calzone"])
        );
        assert_eq!(add_pizza.parameters["required"], json!(["pizza_type", "size"]));

        let menu = profile.tool(OperationKind::GetMenu).unwrap();
        assert_eq!(menu.parameters["properties"], json!({}));
    }
}
