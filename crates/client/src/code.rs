//! Integration code (MÖK) generation.
//!
//! The carrier identifies shipments by a merchant-generated code of at
//! most 30 characters. The code concatenates the cleaned order number,
//! the supplier prefix, and a 5-digit disambiguator; for multi-piece
//! shipments the tail of the limit is reserved for `-N` piece barcodes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use aras_kargo_core::IntegrationCode;

use crate::error::ArasError;

/// Process-wide counter mixed into the suffix. Epoch milliseconds alone
/// collide when two shipments are submitted in the same millisecond.
static SUFFIX_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate an integration code for one shipment.
///
/// The order number keeps only ASCII alphanumerics (`#1042` becomes
/// `1042`), the supplier code is appended as-is, and a 5-digit zero-padded
/// suffix disambiguates resubmissions of the same order. The whole code is
/// truncated to 30 characters minus the space a `-N` piece suffix needs
/// when `piece_count > 1`.
///
/// # Errors
///
/// Returns [`ArasError::InvalidCode`] if the assembled code fails
/// validation. With a non-empty supplier code this cannot happen; the
/// error path exists so callers never panic on degenerate input.
pub fn generate_integration_code(
    order_number: &str,
    supplier_code: &str,
    piece_count: u32,
) -> Result<IntegrationCode, ArasError> {
    let reserve = piece_suffix_reserve(piece_count);
    let max_length = IntegrationCode::MAX_LENGTH - reserve;

    let cleaned: String = order_number
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    let candidate: String = format!("{cleaned}{supplier_code}{}", unique_suffix())
        .chars()
        .take(max_length)
        .collect();

    Ok(IntegrationCode::parse(&candidate)?)
}

/// Characters to reserve for `-N` piece barcode suffixes.
fn piece_suffix_reserve(piece_count: u32) -> usize {
    if piece_count > 1 {
        piece_count.to_string().len() + 1
    } else {
        0
    }
}

/// 5-digit zero-padded suffix from epoch milliseconds plus the counter.
fn unique_suffix() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0);
    let counter = SUFFIX_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:05}", millis.wrapping_add(counter) % 100_000)
}
