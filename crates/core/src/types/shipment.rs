//! Shipment request types.

use serde::{Deserialize, Serialize};

use crate::types::address::ShippingAddress;

/// One order line going into a parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItem {
    pub title: String,
    pub quantity: u32,
}

/// A fulfilment location registered with the carrier.
///
/// `code` is the short prefix baked into integration codes (e.g. `G04`);
/// `carrier_branch_id` is the carrier-side address id used as the sender
/// account when address-id routing is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub name: String,
    pub code: String,
    pub carrier_branch_id: String,
}

/// Everything needed to hand one shipment to the carrier.
///
/// Constructed per call and never persisted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    /// Order number as the source displays it, e.g. `#1042`.
    pub order_number: String,
    pub items: Vec<ShipmentItem>,
    pub address: ShippingAddress,
    pub supplier: Supplier,
    /// Desired parcel count. Values below 1 are treated as 1.
    pub piece_count: u32,
}

impl ShipmentRequest {
    /// Parcel count with the lower bound applied.
    #[must_use]
    pub const fn effective_piece_count(&self) -> u32 {
        if self.piece_count < 1 { 1 } else { self.piece_count }
    }

    /// Invoice number for the carrier: the order number without `#`.
    #[must_use]
    pub fn invoice_number(&self) -> String {
        self.order_number.replace('#', "")
    }

    /// Short per-piece description: `{qty}x {title}` entries joined with
    /// commas, capped at 50 characters (carrier field limit).
    #[must_use]
    pub fn content_summary(&self) -> String {
        let joined = self
            .items
            .iter()
            .map(|item| format!("{}x {}", item.quantity, item.title))
            .collect::<Vec<_>>()
            .join(", ");
        truncate_chars(&joined, 50)
    }

    /// Full content description: item titles joined with commas, capped at
    /// 255 characters (carrier field limit).
    #[must_use]
    pub fn content_description(&self) -> String {
        let joined = self
            .items
            .iter()
            .map(|item| item.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        truncate_chars(&joined, 255)
    }
}

/// Truncate to at most `max` characters without splitting a multi-byte
/// character. Turkish titles routinely contain them.
fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    s.chars().take(max).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> ShipmentRequest {
        ShipmentRequest {
            order_number: "#1042".to_owned(),
            items: vec![
                ShipmentItem {
                    title: "Büyük Gözlü Şal".to_owned(),
                    quantity: 2,
                },
                ShipmentItem {
                    title: "Çanta".to_owned(),
                    quantity: 1,
                },
            ],
            address: ShippingAddress {
                first_name: "Ayşe".to_owned(),
                last_name: "Yılmaz".to_owned(),
                address1: "Bağdat Cad. No:1".to_owned(),
                address2: None,
                district: "Kadıköy".to_owned(),
                province: "İstanbul".to_owned(),
                phone: "+905551112233".to_owned(),
                postal_code: Some("34720".to_owned()),
            },
            supplier: Supplier {
                name: "Merkez Depo".to_owned(),
                code: "G04".to_owned(),
                carrier_branch_id: "812".to_owned(),
            },
            piece_count: 1,
        }
    }

    #[test]
    fn test_invoice_number_strips_hash() {
        assert_eq!(request().invoice_number(), "1042");
    }

    #[test]
    fn test_effective_piece_count_floors_at_one() {
        let mut req = request();
        req.piece_count = 0;
        assert_eq!(req.effective_piece_count(), 1);
        req.piece_count = 3;
        assert_eq!(req.effective_piece_count(), 3);
    }

    #[test]
    fn test_content_summary_format() {
        assert_eq!(request().content_summary(), "2x Büyük Gözlü Şal, 1x Çanta");
    }

    #[test]
    fn test_content_summary_truncates_on_char_boundary() {
        let mut req = request();
        req.items = vec![ShipmentItem {
            title: "Ş".repeat(80),
            quantity: 1,
        }];
        let summary = req.content_summary();
        assert_eq!(summary.chars().count(), 50);
        assert!(summary.starts_with("1x Ş"));
    }

    #[test]
    fn test_content_description_joins_titles() {
        assert_eq!(request().content_description(), "Büyük Gözlü Şal, Çanta");
    }

    #[test]
    fn test_content_description_truncates_at_255() {
        let mut req = request();
        req.items = vec![ShipmentItem {
            title: "a".repeat(300),
            quantity: 1,
        }];
        assert_eq!(req.content_description().chars().count(), 255);
    }
}
