//! The lookup-then-edit reconciliation against the record store.
//!
//! Two remote calls, each under its own deadline, each with its own
//! failure mode: a lookup problem means the record cannot be addressed
//! (reported as 404 upstream), an edit problem means the provider
//! refused or lost the write (reported as 424). No retries happen here;
//! setting a record to its current value is already a no-op at the
//! provider, so repeated requests are safe.

use crate::error::Error;
use crate::query::UpdateRequest;
use crate::record_store::RecordStore;
use std::time::Duration;
use tokio::time::timeout;

/// Deadline applied to each remote call individually.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Locates the record named by `request` and replaces its data with the
/// new address.
///
/// # Errors
///
/// - [`Error::LookupFailed`] when the record id cannot be retrieved
///   (transport failure, elapsed deadline, or a non-200 provider
///   status).
/// - [`Error::RecordMissing`] when the provider answered but holds no
///   usable record for the `(zone, type, name)` triple.
/// - [`Error::EditFailed`] when the edit call fails the same ways the
///   lookup can.
pub async fn reconcile(
    request: &UpdateRequest,
    store: &(dyn RecordStore + Send + Sync),
) -> Result<(), Error> {
    // Unreachable for a parsed request; kept as a guard for direct callers.
    let Some(zone) = request.zone() else {
        return Err(Error::LookupFailed("Invalid record name".to_string()));
    };

    let lookup = match timeout(
        REQUEST_TIMEOUT,
        store.find_record(&zone, request.kind, &request.name),
    )
    .await
    {
        Err(_) => return Err(Error::LookupFailed("Lookup deadline exceeded".to_string())),
        Ok(Err(err)) => return Err(Error::LookupFailed(err.to_string())),
        Ok(Ok(lookup)) => lookup,
    };

    if lookup.status != 200 {
        return Err(Error::LookupFailed(format!(
            "Unexpected response: {}",
            lookup.status
        )));
    }

    let id = match lookup.id {
        Some(id) if id >= 0 => id,
        _ => return Err(Error::RecordMissing),
    };

    let status = match timeout(
        REQUEST_TIMEOUT,
        store.update_record(&zone, id, &request.addr),
    )
    .await
    {
        Err(_) => return Err(Error::EditFailed("Edit deadline exceeded".to_string())),
        Ok(Err(err)) => return Err(Error::EditFailed(err.to_string())),
        Ok(Ok(status)) => status,
    };

    if status != 200 {
        return Err(Error::EditFailed(format!("Unexpected response: {status}")));
    }

    Ok(())
}
