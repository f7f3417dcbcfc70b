//! doddns
//!
//! A dynamic DNS update endpoint for DigitalOcean-managed domains.
//! Clients that learn a new address push it here; the service validates
//! the request, authenticates it with a security token, finds the
//! matching A or AAAA record through the DigitalOcean domain records
//! API, and rewrites its value.
//!
//! The request pipeline is rate limited with a process-wide token
//! bucket, and each remote call runs under its own deadline. A client
//! is told exactly where its request died: 400 for bad input, 401 for a
//! bad token, 404 when the record cannot be found, 424 when the
//! provider refused the edit, 429 when the bucket is empty.
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod limit;
pub mod query;
pub mod reconcile;
pub mod record_store;

pub use api::new as new_http;
pub use config::{Config, SharedConfig};
pub use error::Error;
pub use query::{RecordKind, UpdateRequest};
pub use record_store::{DigitalOceanStore, DynRecordStore, Lookup, RecordStore};
