//! # Order Types
//!
//! Order-creation payload sent to the payment gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Literal appended to the generated customer token
pub const CUSTOMER_ID_SUFFIX: &str = "-001";

/// Supported currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    INR,
}

/// Fixed order settings, taken from configuration at startup
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSettings {
    /// Amount charged for every order
    pub order_amount: Decimal,
    /// Payment methods offered on the hosted page (e.g. "cc,dc,upi")
    pub payment_methods: String,
    /// Where the gateway redirects after payment
    pub return_url: String,
}

impl OrderSettings {
    pub fn new(
        order_amount: Decimal,
        payment_methods: impl Into<String>,
        return_url: impl Into<String>,
    ) -> Self {
        Self {
            order_amount,
            payment_methods: payment_methods.into(),
            return_url: return_url.into(),
        }
    }
}

/// Caller-supplied contact fields. Opaque, never validated here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerContact {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl CustomerContact {
    pub fn new(name: Option<&str>, phone: Option<&str>, email: Option<&str>) -> Self {
        Self {
            name: name.map(String::from),
            phone: phone.map(String::from),
            email: email.map(String::from),
        }
    }
}

/// Customer block of the order payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
}

/// Checkout page settings of the order payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMeta {
    pub payment_methods: String,
    pub return_url: String,
}

/// An order-creation request.
///
/// `order_id` and `customer_details.customer_id` are generated on
/// construction and are unique per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub order_amount: Decimal,
    pub order_currency: Currency,
    pub order_id: String,
    pub customer_details: CustomerDetails,
    pub order_meta: OrderMeta,
}

impl OrderRequest {
    /// Create a new order request with fresh order and customer identifiers
    pub fn new(settings: &OrderSettings, contact: CustomerContact) -> Self {
        let customer_id = format!("{}{}", Uuid::new_v4(), CUSTOMER_ID_SUFFIX);

        Self {
            order_amount: settings.order_amount,
            order_currency: Currency::INR,
            order_id: Uuid::new_v4().to_string(),
            customer_details: CustomerDetails {
                customer_id,
                customer_name: contact.name,
                customer_email: contact.email,
                customer_phone: contact.phone,
            },
            order_meta: OrderMeta {
                payment_methods: settings.payment_methods.clone(),
                return_url: settings.return_url.clone(),
            },
        }
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_details.customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn settings() -> OrderSettings {
        OrderSettings::new(
            Decimal::new(49900, 2),
            "cc,dc,upi",
            "https://shop.example/return",
        )
    }

    #[test]
    fn test_new_order_fields() {
        let contact = CustomerContact::new(Some("Asha"), Some("9999999999"), Some("a@b.in"));
        let order = OrderRequest::new(&settings(), contact);

        assert_eq!(order.order_currency, Currency::INR);
        assert_eq!(order.order_amount, Decimal::new(49900, 2));
        assert_eq!(order.order_meta.payment_methods, "cc,dc,upi");
        assert_eq!(order.order_meta.return_url, "https://shop.example/return");
        assert_eq!(order.customer_details.customer_name.as_deref(), Some("Asha"));
        assert_eq!(order.customer_details.customer_phone.as_deref(), Some("9999999999"));
        assert!(order.customer_id().ends_with(CUSTOMER_ID_SUFFIX));
        assert!(Uuid::parse_str(&order.order_id).is_ok());
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let order = OrderRequest::new(&settings(), CustomerContact::default());
            assert_ne!(order.order_id, order.customer_id());
            assert!(seen.insert(order.order_id.clone()));
            assert!(seen.insert(order.customer_id().to_string()));
        }
    }

    #[test]
    fn test_payload_shape() {
        let contact = CustomerContact::new(Some("Asha"), None, Some("a@b.in"));
        let order = OrderRequest::new(&settings(), contact);
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["order_currency"], "INR");
        assert_eq!(json["order_amount"], serde_json::json!(499.0));
        assert_eq!(json["order_id"], order.order_id.as_str());
        assert_eq!(json["customer_details"]["customer_email"], "a@b.in");
        assert!(json["customer_details"].get("customer_phone").is_none());
        assert_eq!(json["order_meta"]["return_url"], "https://shop.example/return");
    }
}
