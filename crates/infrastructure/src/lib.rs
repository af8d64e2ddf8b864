//! Link Expression Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod serialization;
pub mod snapshot;

pub use serialization::{DocumentFormat, SerializationError, from_json, from_yaml, to_json_stable};
pub use snapshot::{ConfigurationSnapshot, SnapshotError, SnapshotRegistry, load_snapshot};
