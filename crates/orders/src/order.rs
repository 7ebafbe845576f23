use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tonecart_core::{DomainError, DomainResult, OrderId, ProductId, UserId};

use crate::status::OrderStatus;

/// One product line within an order.
///
/// `product_name` and `unit_price` are snapshots taken from the catalog at
/// order time, so later catalog edits never retroactively alter a recorded
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    /// Price in smallest currency unit (e.g., cents), snapshotted.
    pub unit_price: u64,
}

impl OrderLine {
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Untrusted client input for one order line: product and quantity only.
/// Prices are always re-derived from the catalog at order time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Structured shipping address, required at order creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub recipient: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn validate(&self) -> DomainResult<()> {
        let fields = [
            ("recipient", &self.recipient),
            ("street", &self.street),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "shipping address field {name} cannot be empty"
                )));
            }
        }
        Ok(())
    }
}

/// Payment method label. Recorded verbatim on the order; this core performs
/// no payment processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CashOnDelivery,
    Card,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "cash_on_delivery",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash_on_delivery" => Ok(PaymentMethod::CashOnDelivery),
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(DomainError::validation(format!(
                "unknown payment method {other:?}; expected one of: cash_on_delivery, card, bank_transfer",
            ))),
        }
    }
}

/// Carrier metadata attached to a shipped order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub carrier: String,
    pub tracking_number: String,
    pub estimated_delivery: DateTime<Utc>,
}

impl TrackingInfo {
    pub fn validate(&self) -> DomainResult<()> {
        if self.carrier.trim().is_empty() {
            return Err(DomainError::validation("carrier cannot be empty"));
        }
        if self.tracking_number.trim().is_empty() {
            return Err(DomainError::validation("tracking_number cannot be empty"));
        }
        Ok(())
    }
}

/// Order record.
///
/// Created exactly once with status `pending`; afterwards only `status`,
/// `tracking` and `updated_at` ever change, and only through
/// [`Order::transition`] and [`Order::set_tracking`]. Line snapshots and
/// `total_price` are immutable for the life of the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    user_id: UserId,
    lines: Vec<OrderLine>,
    /// Sum of line subtotals plus shipping fee, in smallest currency unit.
    total_price: u64,
    shipping_fee: u64,
    shipping_address: ShippingAddress,
    payment_method: PaymentMethod,
    status: OrderStatus,
    tracking: Option<TrackingInfo>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a `pending` order from snapshotted lines.
    ///
    /// The total is derived here, server-side, from the snapshots — never
    /// from client-computed figures.
    pub fn create(
        id: OrderId,
        user_id: UserId,
        lines: Vec<OrderLine>,
        shipping_address: ShippingAddress,
        shipping_fee: u64,
        payment_method: PaymentMethod,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation(
                "order must contain at least one line",
            ));
        }
        shipping_address.validate()?;

        let mut total_price = shipping_fee;
        for line in &lines {
            if line.quantity == 0 {
                return Err(DomainError::validation("line quantity must be at least 1"));
            }
            let subtotal = line
                .unit_price
                .checked_mul(u64::from(line.quantity))
                .ok_or_else(|| DomainError::validation("line subtotal overflows"))?;
            total_price = total_price
                .checked_add(subtotal)
                .ok_or_else(|| DomainError::validation("order total overflows"))?;
        }

        Ok(Self {
            id,
            user_id,
            lines,
            total_price,
            shipping_fee,
            shipping_address,
            payment_method,
            status: OrderStatus::Pending,
            tracking: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    pub fn shipping_fee(&self) -> u64 {
        self.shipping_fee
    }

    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn tracking(&self) -> Option<&TrackingInfo> {
        self.tracking.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Move the order to `target` if the transition table allows it.
    ///
    /// A rejected transition leaves the order untouched. Transitions never
    /// affect stock; inventory was committed at creation.
    pub fn transition(&mut self, target: OrderStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.status.can_transition_to(target) {
            return Err(DomainError::invalid_transition(format!(
                "{} -> {}",
                self.status, target
            )));
        }
        self.status = target;
        self.updated_at = now;
        Ok(())
    }

    /// Attach or overwrite carrier metadata. Allowed only while the order is
    /// exactly `shipped`; add and update are the same operation.
    pub fn set_tracking(&mut self, tracking: TrackingInfo, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status != OrderStatus::Shipped {
            return Err(DomainError::invalid_state(format!(
                "tracking requires status shipped, order is {}",
                self.status
            )));
        }
        tracking.validate()?;
        self.tracking = Some(tracking);
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_address() -> ShippingAddress {
        ShippingAddress {
            recipient: "Amina Diallo".into(),
            street: "14 Rue des Lilas".into(),
            city: "Lyon".into(),
            postal_code: "69003".into(),
            country: "FR".into(),
        }
    }

    fn line(price: u64, quantity: u32) -> OrderLine {
        OrderLine {
            product_id: ProductId::new(),
            product_name: "Velvet Matte Foundation".into(),
            quantity,
            unit_price: price,
        }
    }

    fn test_order(lines: Vec<OrderLine>, shipping_fee: u64) -> Order {
        Order::create(
            OrderId::new(),
            UserId::new(),
            lines,
            test_address(),
            shipping_fee,
            PaymentMethod::Card,
            Utc::now(),
        )
        .unwrap()
    }

    fn tracking() -> TrackingInfo {
        TrackingInfo {
            carrier: "DHL".into(),
            tracking_number: "JD014600003RS".into(),
            estimated_delivery: Utc::now() + chrono::Duration::days(3),
        }
    }

    #[test]
    fn total_is_sum_of_line_subtotals_plus_shipping_fee() {
        let order = test_order(vec![line(1899, 2), line(450, 3)], 500);
        assert_eq!(order.total_price(), 1899 * 2 + 450 * 3 + 500);
    }

    #[test]
    fn create_starts_pending_without_tracking() {
        let order = test_order(vec![line(100, 1)], 0);
        assert_eq!(order.status(), OrderStatus::Pending);
        assert!(order.tracking().is_none());
    }

    #[test]
    fn create_rejects_empty_lines_and_zero_quantity() {
        let err = Order::create(
            OrderId::new(),
            UserId::new(),
            vec![],
            test_address(),
            0,
            PaymentMethod::Card,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Order::create(
            OrderId::new(),
            UserId::new(),
            vec![line(100, 0)],
            test_address(),
            0,
            PaymentMethod::Card,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_blank_address_field() {
        let mut address = test_address();
        address.city = "  ".into();
        let err = Order::create(
            OrderId::new(),
            UserId::new(),
            vec![line(100, 1)],
            address,
            0,
            PaymentMethod::Card,
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn happy_path_pending_shipped_delivered() {
        let mut order = test_order(vec![line(100, 1)], 0);
        order.transition(OrderStatus::Shipped, Utc::now()).unwrap();
        order.transition(OrderStatus::Delivered, Utc::now()).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);

        let err = order
            .transition(OrderStatus::Pending, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(order.status(), OrderStatus::Delivered);
    }

    #[test]
    fn cancel_allowed_only_from_pending() {
        let mut order = test_order(vec![line(100, 1)], 0);
        order.transition(OrderStatus::Cancelled, Utc::now()).unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);

        let mut shipped = test_order(vec![line(100, 1)], 0);
        shipped.transition(OrderStatus::Shipped, Utc::now()).unwrap();
        let err = shipped
            .transition(OrderStatus::Cancelled, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
        assert_eq!(shipped.status(), OrderStatus::Shipped);
    }

    #[test]
    fn self_transition_is_rejected() {
        let mut order = test_order(vec![line(100, 1)], 0);
        order.transition(OrderStatus::Shipped, Utc::now()).unwrap();
        let err = order
            .transition(OrderStatus::Shipped, Utc::now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition(_)));
    }

    #[test]
    fn rejected_transition_does_not_alter_total_or_lines() {
        let mut order = test_order(vec![line(1899, 2)], 500);
        let total = order.total_price();
        let _ = order.transition(OrderStatus::Delivered, Utc::now());
        assert_eq!(order.total_price(), total);
        assert_eq!(order.lines().len(), 1);
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn tracking_gated_on_shipped() {
        let mut order = test_order(vec![line(100, 1)], 0);

        // pending: rejected
        let err = order.set_tracking(tracking(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
        assert!(order.tracking().is_none());

        // shipped: allowed, and re-setting overwrites
        order.transition(OrderStatus::Shipped, Utc::now()).unwrap();
        order.set_tracking(tracking(), Utc::now()).unwrap();
        let mut second = tracking();
        second.tracking_number = "JD014600004RS".into();
        order.set_tracking(second.clone(), Utc::now()).unwrap();
        assert_eq!(order.tracking().unwrap().tracking_number, second.tracking_number);
        assert_eq!(order.status(), OrderStatus::Shipped);

        // delivered: rejected again
        order.transition(OrderStatus::Delivered, Utc::now()).unwrap();
        let err = order.set_tracking(tracking(), Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn tracking_rejects_blank_carrier() {
        let mut order = test_order(vec![line(100, 1)], 0);
        order.transition(OrderStatus::Shipped, Utc::now()).unwrap();
        let mut t = tracking();
        t.carrier = "".into();
        let err = order.set_tracking(t, Utc::now()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: the recorded total always equals the sum of
            /// snapshotted line subtotals plus the shipping fee.
            #[test]
            fn total_matches_line_arithmetic(
                prices in proptest::collection::vec(0u64..1_000_000, 1..8),
                quantities in proptest::collection::vec(1u32..100, 1..8),
                shipping_fee in 0u64..10_000,
            ) {
                let lines: Vec<OrderLine> = prices
                    .iter()
                    .zip(quantities.iter().cycle())
                    .map(|(&price, &quantity)| line_with(price, quantity))
                    .collect();

                let expected: u64 = lines.iter().map(OrderLine::subtotal).sum::<u64>()
                    + shipping_fee;

                let order = Order::create(
                    OrderId::new(),
                    UserId::new(),
                    lines,
                    test_address(),
                    shipping_fee,
                    PaymentMethod::CashOnDelivery,
                    Utc::now(),
                ).unwrap();

                prop_assert_eq!(order.total_price(), expected);
            }
        }

        fn line_with(price: u64, quantity: u32) -> OrderLine {
            OrderLine {
                product_id: ProductId::new(),
                product_name: "P".into(),
                quantity,
                unit_price: price,
            }
        }
    }
}
