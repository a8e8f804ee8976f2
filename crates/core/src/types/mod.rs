//! Core types for the Aras Kargo integration.
//!
//! This module provides the value objects exchanged with the carrier client.

pub mod address;
pub mod code;
pub mod shipment;
pub mod status;

pub use address::ShippingAddress;
pub use code::{IntegrationCode, IntegrationCodeError};
pub use shipment::{ShipmentItem, ShipmentRequest, Supplier};
pub use status::DeliveryStatus;
