//! Shipping address as supplied by the order source.

use serde::{Deserialize, Serialize};

/// A Turkish shipping address in the shape the order source provides it.
///
/// `province` is the il (city level) and `district` the ilçe (town level);
/// the carrier requires both. Addresses arrive here unrepaired - swapped,
/// lower-cased, or partially empty fields are expected and handled by the
/// client's normalizer before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// İlçe. May be empty or may actually hold the province.
    pub district: String,
    /// İl. May be empty when the source put it in `district`.
    pub province: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl ShippingAddress {
    /// Receiver name for the carrier: first and last name joined, trimmed.
    #[must_use]
    pub fn receiver_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// Street address for the carrier: `address1` and `address2` joined
    /// with a comma, skipping an absent or empty second line.
    #[must_use]
    pub fn street_address(&self) -> String {
        match self.address2.as_deref() {
            Some(line2) if !line2.trim().is_empty() => {
                format!("{}, {line2}", self.address1)
            }
            _ => self.address1.clone(),
        }
    }
}
