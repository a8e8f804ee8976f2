//! Aras Kargo Core - Shared domain types.
//!
//! This crate provides the types passed between the carrier client and its
//! callers:
//! - `client` - The SOAP/HTTP carrier client (submission, tracking, labels)
//! - `cli` - Operator diagnostics against the carrier services
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no XML.
//! Everything here is a value object: constructed by the caller, consumed by
//! the client, never mutated in place.
//!
//! # Modules
//!
//! - [`types`] - Shipment requests, addresses, integration codes, and
//!   delivery statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
