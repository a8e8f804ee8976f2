//! Carrier integration code (MÖK) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`IntegrationCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum IntegrationCodeError {
    /// The input string is empty.
    #[error("integration code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("integration code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A carrier integration code (MÖK - müşteri özel kodu).
///
/// The merchant-generated key that identifies a shipment to the carrier.
/// Every later lookup - tracking resolution, label retrieval, delivery
/// status - references the shipment through this code.
///
/// ## Constraints
///
/// - Length: 1-30 characters (carrier field limit)
///
/// ## Examples
///
/// ```
/// use aras_kargo_core::IntegrationCode;
///
/// let code = IntegrationCode::parse("SP1042G0412345").unwrap();
/// assert_eq!(code.as_str(), "SP1042G0412345");
///
/// // Piece barcodes are suffixed only for multi-piece shipments.
/// assert_eq!(code.piece_barcode(1, 3), "SP1042G0412345-1");
/// assert_eq!(code.piece_barcode(1, 1), "SP1042G0412345");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct IntegrationCode(String);

impl IntegrationCode {
    /// Maximum length accepted by the carrier's `IntegrationCode` field.
    pub const MAX_LENGTH: usize = 30;

    /// Parse an `IntegrationCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or longer than 30 characters.
    pub fn parse(s: &str) -> Result<Self, IntegrationCodeError> {
        if s.is_empty() {
            return Err(IntegrationCodeError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(IntegrationCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `IntegrationCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Barcode number for one piece of a shipment.
    ///
    /// `index` is 1-based. Multi-piece shipments get `-1`, `-2`, ...
    /// suffixes; a single-piece shipment uses the bare code.
    #[must_use]
    pub fn piece_barcode(&self, index: u32, count: u32) -> String {
        if count > 1 {
            format!("{}-{index}", self.0)
        } else {
            self.0.clone()
        }
    }

    /// Barcode numbers for all pieces of a shipment, in piece order.
    #[must_use]
    pub fn piece_barcodes(&self, count: u32) -> Vec<String> {
        (1..=count.max(1))
            .map(|i| self.piece_barcode(i, count))
            .collect()
    }
}

impl fmt::Display for IntegrationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IntegrationCode {
    type Err = IntegrationCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for IntegrationCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(IntegrationCode::parse("SP1042G0412345").is_ok());
        assert!(IntegrationCode::parse(&"A".repeat(30)).is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            IntegrationCode::parse(""),
            Err(IntegrationCodeError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        assert!(matches!(
            IntegrationCode::parse(&"A".repeat(31)),
            Err(IntegrationCodeError::TooLong { max: 30 })
        ));
    }

    #[test]
    fn test_piece_barcode_single_piece_is_bare() {
        let code = IntegrationCode::parse("ORD1G0400001").unwrap();
        assert_eq!(code.piece_barcode(1, 1), "ORD1G0400001");
    }

    #[test]
    fn test_piece_barcode_multi_piece_is_suffixed() {
        let code = IntegrationCode::parse("ORD1G0400001").unwrap();
        assert_eq!(code.piece_barcode(1, 2), "ORD1G0400001-1");
        assert_eq!(code.piece_barcode(2, 2), "ORD1G0400001-2");
    }

    #[test]
    fn test_piece_barcodes_in_order() {
        let code = IntegrationCode::parse("ORD1G0400001").unwrap();
        assert_eq!(
            code.piece_barcodes(3),
            vec!["ORD1G0400001-1", "ORD1G0400001-2", "ORD1G0400001-3"]
        );
        assert_eq!(code.piece_barcodes(1), vec!["ORD1G0400001"]);
        assert_eq!(code.piece_barcodes(0), vec!["ORD1G0400001"]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let code = IntegrationCode::parse("ORD1G0400001").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"ORD1G0400001\"");

        let parsed: IntegrationCode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
    }

    #[test]
    fn test_from_str() {
        let code: IntegrationCode = "ORD1G0400001".parse().unwrap();
        assert_eq!(code.as_str(), "ORD1G0400001");
    }
}
