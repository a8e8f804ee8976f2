//! Delivery status enum.

use serde::{Deserialize, Serialize};

/// Where a shipment sits in the carrier's lifecycle.
///
/// Derived from carrier query payloads by the client's classifier; the
/// wire values match what the embedding app stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    /// Submitted to the carrier but no movement recorded yet.
    #[default]
    Pending,
    /// The carrier has at least one movement record for the shipment.
    InTransit,
    /// The carrier reported the shipment as handed to the receiver.
    Delivered,
    /// No usable payload to classify.
    Unknown,
}

impl DeliveryStatus {
    /// True once the carrier reports the shipment handed over.
    #[must_use]
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InTransit).unwrap(),
            "\"IN_TRANSIT\""
        );
        let parsed: DeliveryStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(parsed, DeliveryStatus::Delivered);
    }

    #[test]
    fn test_default_is_pending() {
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::Pending);
    }

    #[test]
    fn test_is_final() {
        assert!(DeliveryStatus::Delivered.is_final());
        assert!(!DeliveryStatus::InTransit.is_final());
        assert!(!DeliveryStatus::Pending.is_final());
        assert!(!DeliveryStatus::Unknown.is_final());
    }
}
