//! Remote DNS control-plane access.
//!
//! The update pipeline needs exactly two capabilities from a managed DNS
//! provider: find the id of a record by `(zone, type, name)`, and
//! replace that record's data by id. [`RecordStore`] captures both;
//! swapping providers means implementing it once.
//!
//! Provider HTTP statuses are returned as data rather than folded into
//! errors, because the [reconciler][crate::reconcile] reports a lookup
//! failure differently from an edit failure.

use crate::error::Error;
use crate::query::RecordKind;
use async_trait::async_trait;
use std::sync::Arc;

pub mod digitalocean;

#[allow(clippy::module_name_repetitions)]
pub use digitalocean::DigitalOceanStore;

/// The outcome of a record lookup: the provider's HTTP status and the
/// id of the first matching record, if the provider returned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookup {
    pub status: u16,
    pub id: Option<i64>,
}

/// `DynRecordStore` is a shared handle to a [`RecordStore`] usable from
/// concurrent request handlers. The store itself is an HTTP client and
/// needs no further synchronization.
#[allow(clippy::module_name_repetitions)]
pub type DynRecordStore = Arc<dyn RecordStore + Send + Sync>;

/// An async trait describing the two remote calls a record update needs.
#[async_trait]
pub trait RecordStore {
    /// Finds the record for `(zone, kind, name)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the call itself fails; provider
    /// statuses other than 200 are reported in the [`Lookup`], not here.
    async fn find_record(
        &self,
        zone: &str,
        kind: RecordKind,
        name: &str,
    ) -> Result<Lookup, Error>;

    /// Replaces the data of record `id` in `zone` with `addr`, returning
    /// the provider's HTTP status.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the call itself fails.
    async fn update_record(&self, zone: &str, id: i64, addr: &str) -> Result<u16, Error>;
}
