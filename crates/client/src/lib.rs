//! Aras Kargo carrier client.
//!
//! This crate talks to Aras Kargo's two SOAP surfaces on behalf of the
//! fulfillment app: the legacy `.asmx` cargo service (shipment
//! submission, barcodes) and the WCF integration service (dataset and
//! JSON queries).
//!
//! # Operations
//!
//! - [`ArasClient::submit_shipment`] - register a shipment (`SetOrder`)
//! - [`ArasClient::resolve_tracking`] - pull the tracking number through
//!   the query cascade
//! - [`ArasClient::fetch_label`] - fetch the printable label as base64
//! - [`ArasClient::query_delivery_status`] - classify the delivery state
//!
//! Every operation returns an outcome struct with a `success` flag and an
//! operator-facing Turkish `message`; none of them return `Err` to the
//! caller. The client holds no per-merchant state: credentials travel in
//! [`ArasSettings`] on each call, so one client serves every shop.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod address;
pub mod client;
pub mod code;
pub mod config;
pub mod error;
pub mod label;
pub mod settings;
pub mod shipment;
pub mod status;
pub mod tracking;

mod response;
mod soap;

pub use address::{NormalizedAddress, normalize};
pub use client::ArasClient;
pub use code::generate_integration_code;
pub use config::{ArasConfig, ArasEndpoints, FieldAliases};
pub use error::ArasError;
pub use label::LabelOutcome;
pub use settings::{AddressIdMode, ArasSettings};
pub use shipment::SubmissionOutcome;
pub use status::{StatusClassification, StatusOutcome, classify};
pub use tracking::{TRACKING_CASCADE, TrackingOp, TrackingOutcome};
