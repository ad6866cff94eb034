//! # Order Workflow
//!
//! The three-stage ordering conversation (greeting → ordering → checkout) as pure functions.
//!
//! [`Workflow::apply`] takes the current stage and order, runs one [`Operation`] and returns an
//! [`Outcome`]: the next order state plus a [`Reply`] for the dialogue host. Nothing is mutated
//! in place and nothing is shared between sessions; the session host owns the state and
//! threads it through.
//!
//! Preconditions come from the stage table ([`WorkflowStage::allows`]). An operation the current
//! stage does not accept is refused with [`Refusal::NotAvailable`] and changes nothing.

pub mod operation;
pub mod reply;

pub use operation::*;
pub use reply::*;

use crate::model::catalog::normalize;
use crate::model::{CartItem, Catalog, OrderState, Price, WorkflowStage};
use serde::Deserialize;
use std::fmt::{self, Display};
use std::str::FromStr;
use tracing::{debug, warn};

/// What `add_pizza` does with a pizza or size that is not in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownItemPolicy {
    /// Refuse the item and leave the cart alone.
    #[default]
    Reject,
    /// Add the item anyway, pricing the unknown part at zero.
    Free,
}

impl Display for UnknownItemPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownItemPolicy::Reject => f.write_str("reject"),
            UnknownItemPolicy::Free => f.write_str("free"),
        }
    }
}

impl FromStr for UnknownItemPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "reject" => Ok(UnknownItemPolicy::Reject),
            "free" => Ok(UnknownItemPolicy::Free),
            _ => Err(format!("expected 'reject' or 'free', got '{s}'")),
        }
    }
}

/// Result of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub state: OrderState,
    pub reply: Reply,
}

impl Outcome {
    fn unchanged(state: &OrderState, reply: Reply) -> Self {
        Self {
            state: state.clone(),
            reply,
        }
    }
}

/// The ordering workflow for one catalog.
///
/// Built once and shared read-only by every session.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    catalog: Catalog,
    policy: UnknownItemPolicy,
}

impl Workflow {
    pub fn new(catalog: Catalog, policy: UnknownItemPolicy) -> Self {
        Self { catalog, policy }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> UnknownItemPolicy {
        self.policy
    }

    /// Runs `operation` against `state` in `stage`.
    pub fn apply(&self, stage: WorkflowStage, state: &OrderState, operation: Operation) -> Outcome {
        let kind = operation.kind();
        if !stage.allows(kind) {
            debug!(%stage, operation = %kind, "Operation not available");
            return Outcome::unchanged(
                state,
                Reply::refuse(Refusal::NotAvailable {
                    operation: kind,
                    stage,
                }),
            );
        }

        match operation {
            Operation::GetMenu => Outcome::unchanged(state, Reply::say(self.menu_text())),
            Operation::StartOrder => start_order(state),
            Operation::AddPizza { pizza, size } => self.add_pizza(state, &pizza, size.as_deref()),
            Operation::RemoveLastItem => remove_last_item(state),
            Operation::FinishOrder => finish_order(state),
            Operation::ConfirmOrder => confirm_order(state),
            Operation::CancelOrder => cancel_order(state),
            Operation::AddMore => Outcome::unchanged(
                state,
                Reply::say("Sure! What else would you like?").switch_to(WorkflowStage::Ordering),
            ),
        }
    }

    /// "Our pizzas: Margherita: $12.99, .... Size upcharges: Medium: +$2.00, .... Small has no upcharge."
    pub fn menu_text(&self) -> String {
        let pizzas = self
            .catalog
            .menu()
            .entries()
            .iter()
            .map(|e| format!("{}: {}", title_case(&e.name), e.price))
            .collect::<Vec<_>>();

        let (charged, free): (Vec<_>, Vec<_>) = self
            .catalog
            .sizes()
            .entries()
            .iter()
            .partition(|e| e.upcharge > Price::ZERO);

        let mut text = format!("Our pizzas: {}.", pizzas.join(", "));
        if !charged.is_empty() {
            let upcharges = charged
                .iter()
                .map(|e| format!("{}: +{}", title_case(&e.name), e.upcharge))
                .collect::<Vec<_>>();
            text.push_str(&format!(" Size upcharges: {}.", upcharges.join(", ")));
        }
        match free.as_slice() {
            [] => {}
            [one] => text.push_str(&format!(" {} has no upcharge.", title_case(&one.name))),
            many => {
                let names = many.iter().map(|e| title_case(&e.name)).collect::<Vec<_>>();
                text.push_str(&format!(" {} have no upcharge.", or_list(&names, "and")));
            }
        }
        text
    }

    fn add_pizza(&self, state: &OrderState, pizza: &str, size: Option<&str>) -> Outcome {
        let pizza = normalize(pizza);
        let size = size.map(normalize).unwrap_or_else(|| Catalog::DEFAULT_SIZE.to_string());

        let base = self.catalog.menu().price(&pizza);
        let upcharge = self.catalog.sizes().upcharge(&size);

        let price = match (self.policy, base, upcharge) {
            (_, Some(base), Some(upcharge)) => base + upcharge,
            (UnknownItemPolicy::Reject, None, _) => {
                return Outcome::unchanged(state, Reply::refuse(Refusal::UnknownPizza(pizza)));
            }
            (UnknownItemPolicy::Reject, _, None) => {
                let names = self.catalog.sizes().names().map(str::to_string).collect::<Vec<_>>();
                return Outcome::unchanged(
                    state,
                    Reply::refuse(Refusal::UnknownSize {
                        size,
                        available: or_list(&names, "or"),
                    }),
                );
            }
            (UnknownItemPolicy::Free, base, upcharge) => {
                warn!(
                    %pizza,
                    %size,
                    known_pizza = base.is_some(),
                    known_size = upcharge.is_some(),
                    "Pricing unknown item at zero"
                );
                base.unwrap_or(Price::ZERO) + upcharge.unwrap_or(Price::ZERO)
            }
        };

        let mut next = state.clone();
        next.cart.push(CartItem::new(pizza.clone(), size.clone(), price));
        let reply = Reply::say(format!(
            "Added {size} {pizza} pizza ({price}). You have {} item(s). Would you like anything else?",
            next.cart.len()
        ))
        .change(StateChange::Cart(next.cart.clone()));

        Outcome { state: next, reply }
    }
}

fn start_order(state: &OrderState) -> Outcome {
    let next = OrderState {
        started: true,
        ..OrderState::default()
    };

    let mut reply = Reply::say("Great! What pizza would you like?")
        .switch_to(WorkflowStage::Ordering)
        .change(StateChange::Started(true))
        .change(StateChange::Cart(Vec::new()));
    if state.total.is_some() {
        reply = reply.change(StateChange::Total(None));
    }
    if state.confirmed {
        reply = reply.change(StateChange::Confirmed(false));
    }

    Outcome { state: next, reply }
}

fn remove_last_item(state: &OrderState) -> Outcome {
    let mut next = state.clone();
    let Some(removed) = next.cart.pop() else {
        return Outcome::unchanged(state, Reply::refuse(Refusal::EmptyCart));
    };

    let reply = Reply::say(format!(
        "Removed {}. You have {} item(s) remaining.",
        removed.label(),
        next.cart.len()
    ))
    .change(StateChange::Cart(next.cart.clone()));

    Outcome { state: next, reply }
}

fn finish_order(state: &OrderState) -> Outcome {
    if state.is_empty() {
        return Outcome::unchanged(
            state,
            Reply::refuse_then(Refusal::EmptyCart, "What pizza would you like?"),
        );
    }

    let total = state.cart_total();
    let next = OrderState {
        total: Some(total),
        ..state.clone()
    };
    let reply = Reply::say(format!(
        "Your order: {}. Total: {total}. Ready to checkout?",
        next.summary()
    ))
    .switch_to(WorkflowStage::Checkout)
    .change(StateChange::Total(Some(total)));

    Outcome { state: next, reply }
}

fn confirm_order(state: &OrderState) -> Outcome {
    let next = OrderState {
        confirmed: true,
        ..state.clone()
    };
    let reply = Reply::say(format!(
        "Order confirmed! {}. Total: {}. Ready in 20 minutes. Thank you!",
        next.summary(),
        next.total.unwrap_or(Price::ZERO)
    ))
    .change(StateChange::Confirmed(true));

    Outcome { state: next, reply }
}

fn cancel_order(state: &OrderState) -> Outcome {
    let mut reply = Reply::say("Order cancelled. Come back anytime!")
        .switch_to(WorkflowStage::Greeting)
        .change(StateChange::Cart(Vec::new()))
        .change(StateChange::Total(None));
    if state.confirmed {
        reply = reply.change(StateChange::Confirmed(false));
    }
    if state.started {
        reply = reply.change(StateChange::Started(false));
    }

    Outcome {
        state: OrderState::default(),
        reply,
    }
}

/// "meat lovers" → "Meat Lovers"
fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// "small, medium or large"
fn or_list(names: &[String], last: &str) -> String {
    match names {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., tail] => format!("{} {last} {tail}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MenuEntry, OperationKind, SizeEntry};

    fn ordering(items: &[(&str, &str, u32)]) -> OrderState {
        OrderState {
            cart: items
                .iter()
                .map(|(p, s, c)| CartItem::new(*p, *s, Price::from_cents(*c)))
                .collect(),
            started: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_text() {
        let text = Workflow::default().menu_text();
        assert_eq!(
            text,
            "Our pizzas: Margherita: $12.99, Pepperoni: $14.99, Veggie: $13.99, \
             Meat Lovers: $16.99, Hawaiian: $14.99, Supreme: $17.99. \
             Size upcharges: Medium: +$2.00, Large: +$4.00. Small has no upcharge."
        );
    }

    #[test]
    fn test_menu_text_follows_catalog() {
        let catalog = Catalog::new(
            vec![MenuEntry {
                name: "calzone".into(),
                price: Price::from_cents(1100),
            }],
            vec![
                SizeEntry {
                    name: "personal".into(),
                    upcharge: Price::ZERO,
                },
                SizeEntry {
                    name: "medium".into(),
                    upcharge: Price::ZERO,
                },
            ],
        )
        .unwrap();
        let text = Workflow::new(catalog, UnknownItemPolicy::Reject).menu_text();
        assert_eq!(text, "Our pizzas: Calzone: $11.00. Personal and Medium have no upcharge.");
    }

    #[test]
    fn test_start_order_opens_a_fresh_cart() {
        let workflow = Workflow::default();
        let outcome = workflow.apply(
            WorkflowStage::Greeting,
            &OrderState::default(),
            Operation::StartOrder,
        );

        assert_eq!(outcome.reply.message, "Great! What pizza would you like?");
        assert_eq!(outcome.reply.switch_to, Some(WorkflowStage::Ordering));
        assert!(outcome.state.started);
        assert!(outcome.state.is_empty());
        assert_eq!(
            outcome.reply.changes,
            [StateChange::Started(true), StateChange::Cart(vec![])]
        );
    }

    #[test]
    fn test_add_pizza_prices_base_plus_upcharge() {
        let workflow = Workflow::default();
        let outcome = workflow.apply(
            WorkflowStage::Ordering,
            &ordering(&[]),
            Operation::add_pizza("Pepperoni", "LARGE"),
        );

        assert_eq!(
            outcome.reply.message,
            "Added large pepperoni pizza ($18.99). You have 1 item(s). Would you like anything else?"
        );
        assert_eq!(
            outcome.state.cart,
            [CartItem::new("pepperoni", "large", Price::from_cents(1899))]
        );
    }

    #[test]
    fn test_add_pizza_defaults_to_medium() {
        let outcome = Workflow::default().apply(
            WorkflowStage::Ordering,
            &ordering(&[]),
            Operation::AddPizza {
                pizza: "veggie".into(),
                size: None,
            },
        );
        assert_eq!(outcome.state.cart[0].size, "medium");
        assert_eq!(outcome.state.cart[0].price, Price::from_cents(1599));
    }

    #[test]
    fn test_unknown_items_are_rejected_by_default() {
        let workflow = Workflow::default();
        let state = ordering(&[("veggie", "small", 1399)]);

        let outcome = workflow.apply(
            WorkflowStage::Ordering,
            &state,
            Operation::add_pizza("calzone", "small"),
        );
        assert_eq!(outcome.state, state);
        assert_eq!(
            outcome.reply.refusal,
            Some(Refusal::UnknownPizza("calzone".into()))
        );

        let outcome = workflow.apply(
            WorkflowStage::Ordering,
            &state,
            Operation::add_pizza("veggie", "family"),
        );
        assert_eq!(outcome.state, state);
        assert_eq!(
            outcome.reply.message,
            "Sorry, we don't make a family size. You can choose small, medium or large."
        );
        assert!(outcome.reply.changes.is_empty());
    }

    #[test]
    fn test_free_policy_prices_unknown_parts_at_zero() {
        let workflow = Workflow::new(Catalog::default(), UnknownItemPolicy::Free);

        let outcome = workflow.apply(
            WorkflowStage::Ordering,
            &ordering(&[]),
            Operation::add_pizza("calzone", "large"),
        );
        assert_eq!(outcome.state.cart[0].price, Price::from_cents(400));

        let outcome = workflow.apply(
            WorkflowStage::Ordering,
            &outcome.state,
            Operation::add_pizza("supreme", "family"),
        );
        assert_eq!(outcome.state.cart[1].price, Price::from_cents(1799));
        assert_eq!(outcome.state.cart.len(), 2);
    }

    #[test]
    fn test_remove_last_item() {
        let workflow = Workflow::default();
        let state = ordering(&[("veggie", "small", 1399), ("supreme", "large", 2199)]);

        let outcome = workflow.apply(WorkflowStage::Ordering, &state, Operation::RemoveLastItem);
        assert_eq!(
            outcome.reply.message,
            "Removed large supreme. You have 1 item(s) remaining."
        );
        assert_eq!(outcome.state.cart.len(), 1);

        let empty = ordering(&[]);
        let outcome = workflow.apply(WorkflowStage::Ordering, &empty, Operation::RemoveLastItem);
        assert_eq!(outcome.reply.message, "Your cart is empty.");
        assert_eq!(outcome.reply.refusal, Some(Refusal::EmptyCart));
        assert_eq!(outcome.state, empty);
    }

    #[test]
    fn test_finish_order_requires_items() {
        let workflow = Workflow::default();
        let outcome = workflow.apply(WorkflowStage::Ordering, &ordering(&[]), Operation::FinishOrder);

        assert_eq!(
            outcome.reply.message,
            "Your cart is empty. What pizza would you like?"
        );
        assert_eq!(outcome.reply.switch_to, None);
        assert_eq!(outcome.state.total, None);
    }

    #[test]
    fn test_checkout_and_confirm() {
        let workflow = Workflow::default();
        let state = ordering(&[("margherita", "small", 1299), ("pepperoni", "large", 1899)]);

        let finished = workflow.apply(WorkflowStage::Ordering, &state, Operation::FinishOrder);
        assert_eq!(
            finished.reply.message,
            "Your order: small margherita, large pepperoni. Total: $31.98. Ready to checkout?"
        );
        assert_eq!(finished.reply.switch_to, Some(WorkflowStage::Checkout));
        assert_eq!(finished.state.total, Some(Price::from_cents(3198)));

        let confirmed =
            workflow.apply(WorkflowStage::Checkout, &finished.state, Operation::ConfirmOrder);
        assert_eq!(
            confirmed.reply.message,
            "Order confirmed! small margherita, large pepperoni. Total: $31.98. \
             Ready in 20 minutes. Thank you!"
        );
        assert!(confirmed.state.confirmed);
        assert_eq!(confirmed.reply.switch_to, None);
    }

    #[test]
    fn test_confirm_without_total_reports_zero() {
        let state = ordering(&[("veggie", "small", 1399)]);
        let outcome =
            Workflow::default().apply(WorkflowStage::Checkout, &state, Operation::ConfirmOrder);
        assert!(outcome.reply.message.contains("Total: $0.00."));
    }

    #[test]
    fn test_cancel_resets_everything() {
        let workflow = Workflow::default();
        let state = OrderState {
            total: Some(Price::from_cents(1399)),
            confirmed: true,
            ..ordering(&[("veggie", "small", 1399)])
        };

        for stage in WorkflowStage::ALL {
            let outcome = workflow.apply(stage, &state, Operation::CancelOrder);
            assert_eq!(outcome.reply.message, "Order cancelled. Come back anytime!");
            assert_eq!(outcome.state, OrderState::default());
            assert_eq!(outcome.reply.switch_to, Some(WorkflowStage::Greeting));
            assert_eq!(
                outcome.reply.changes,
                [
                    StateChange::Cart(vec![]),
                    StateChange::Total(None),
                    StateChange::Confirmed(false),
                    StateChange::Started(false),
                ]
            );
        }
    }

    #[test]
    fn test_add_more_returns_to_ordering() {
        let state = ordering(&[("veggie", "small", 1399)]);
        let outcome = Workflow::default().apply(WorkflowStage::Checkout, &state, Operation::AddMore);
        assert_eq!(outcome.reply.message, "Sure! What else would you like?");
        assert_eq!(outcome.reply.switch_to, Some(WorkflowStage::Ordering));
        assert_eq!(outcome.state, state);
    }

    #[test]
    fn test_operations_outside_their_stage_are_refused() {
        let workflow = Workflow::default();
        let state = OrderState::default();

        let outcome = workflow.apply(
            WorkflowStage::Greeting,
            &state,
            Operation::add_pizza("veggie", "small"),
        );
        assert_eq!(outcome.state, state);
        assert_eq!(
            outcome.reply.refusal,
            Some(Refusal::NotAvailable {
                operation: OperationKind::AddPizza,
                stage: WorkflowStage::Greeting,
            })
        );

        let outcome = workflow.apply(WorkflowStage::Checkout, &state, Operation::StartOrder);
        assert!(outcome.reply.is_refused());
        assert_eq!(outcome.reply.switch_to, None);
    }

    #[test]
    fn test_requested_switches_follow_stage_table() {
        let workflow = Workflow::default();
        let state = ordering(&[("veggie", "small", 1399)]);
        let operations = [
            Operation::GetMenu,
            Operation::StartOrder,
            Operation::add_pizza("veggie", "large"),
            Operation::RemoveLastItem,
            Operation::FinishOrder,
            Operation::ConfirmOrder,
            Operation::CancelOrder,
            Operation::AddMore,
        ];

        for stage in WorkflowStage::ALL {
            for op in operations.clone() {
                if let Some(next) = workflow.apply(stage, &state, op.clone()).reply.switch_to {
                    assert!(stage.can_switch_to(next), "{stage} -> {next} via {:?}", op);
                }
            }
        }
    }

    #[test]
    fn test_policy_parses() {
        assert_eq!("reject".parse::<UnknownItemPolicy>(), Ok(UnknownItemPolicy::Reject));
        assert_eq!(" FREE ".parse::<UnknownItemPolicy>(), Ok(UnknownItemPolicy::Free));
        assert!("maybe".parse::<UnknownItemPolicy>().is_err());
    }
}
