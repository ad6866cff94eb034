use crate::model::Price;
use serde::{Deserialize, Serialize};

/// One pizza in the cart.
///
/// `price` is fixed when the item is added and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "type")]
    pub pizza: String,
    pub size: String,
    pub price: Price,
}

impl CartItem {
    pub fn new(pizza: impl Into<String>, size: impl Into<String>, price: Price) -> Self {
        Self {
            pizza: pizza.into(),
            size: size.into(),
            price,
        }
    }

    /// "large pepperoni"
    pub fn label(&self) -> String {
        format!("{} {}", self.size, self.pizza)
    }
}

/// The order being built in one conversation session.
///
/// # Session Host
/// `OrderState` is owned by a [`Session`](crate::model::Session), which implements the
/// [`SessionEntity`](session_host::SessionEntity) trait. The workflow never mutates it in place:
/// each operation receives the current state and hands back a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub cart: Vec<CartItem>,
    /// Set when the order enters checkout; cleared on cancel.
    pub total: Option<Price>,
    pub confirmed: bool,
    pub started: bool,
}

impl OrderState {
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Sum of the item prices currently in the cart.
    pub fn cart_total(&self) -> Price {
        self.cart.iter().map(|item| item.price).sum()
    }

    /// Items as "size pizza", comma separated.
    pub fn summary(&self) -> String {
        self.cart
            .iter()
            .map(CartItem::label)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_and_total() {
        let order = OrderState {
            cart: vec![
                CartItem::new("margherita", "small", Price::from_cents(1299)),
                CartItem::new("pepperoni", "large", Price::from_cents(1899)),
            ],
            ..Default::default()
        };
        assert_eq!(order.summary(), "small margherita, large pepperoni");
        assert_eq!(order.cart_total(), Price::from_cents(3198));
        assert_eq!(OrderState::default().cart_total(), Price::ZERO);
        assert_eq!(OrderState::default().summary(), "");
    }

    #[test]
    fn test_cart_item_uses_host_field_names() {
        let item = CartItem::new("veggie", "medium", Price::from_cents(1599));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "veggie", "size": "medium", "price": 15.99 }));
    }
}
