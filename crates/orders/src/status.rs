use core::str::FromStr;

use serde::{Deserialize, Serialize};

use tonecart_core::DomainError;

/// Order status lifecycle.
///
/// The only legal paths are `pending -> shipped -> delivered` and the escape
/// `pending -> cancelled`. Both `delivered` and `cancelled` are terminal.
/// Every transition goes through [`OrderStatus::can_transition_to`]; there
/// are no ad hoc status comparisons anywhere else in the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// The defined successor in the forward progression, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Transition table: the forward successor, or cancellation while still
    /// pending. Everything else is rejected.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        if self.next() == Some(target) {
            return true;
        }
        self == OrderStatus::Pending && target == OrderStatus::Cancelled
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "unknown order status {other:?}; expected one of: pending, shipped, delivered, cancelled",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OrderStatus::*;
    use super::*;

    const ALL: [OrderStatus; 4] = [Pending, Shipped, Delivered, Cancelled];

    #[test]
    fn successor_table() {
        assert_eq!(Pending.next(), Some(Shipped));
        assert_eq!(Shipped.next(), Some(Delivered));
        assert_eq!(Delivered.next(), None);
        assert_eq!(Cancelled.next(), None);
    }

    #[test]
    fn transition_table_is_exactly_the_three_legal_edges() {
        for from in ALL {
            for to in ALL {
                let legal = matches!(
                    (from, to),
                    (Pending, Shipped) | (Shipped, Delivered) | (Pending, Cancelled)
                );
                assert_eq!(
                    from.can_transition_to(to),
                    legal,
                    "transition {from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states() {
        assert!(!Pending.is_terminal());
        assert!(!Shipped.is_terminal());
        assert!(Delivered.is_terminal());
        assert!(Cancelled.is_terminal());
    }

    #[test]
    fn parse_round_trips_and_rejects_unknown() {
        for status in ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("refunded".parse::<OrderStatus>().is_err());
    }
}
