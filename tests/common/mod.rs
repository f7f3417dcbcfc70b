//! Test doubles shared by the endpoint tests.

use async_trait::async_trait;
use doddns::error::Error;
use doddns::record_store::{Lookup, RecordStore};
use doddns::RecordKind;
use std::sync::Mutex;

/// One observed call against the stub store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Find {
        zone: String,
        kind: RecordKind,
        name: String,
    },
    Update {
        zone: String,
        id: i64,
        addr: String,
    },
}

/// A [`RecordStore`] with scripted responses that records every call it
/// receives, so tests can assert both the HTTP result and the exact
/// provider traffic.
pub struct StubRecordStore {
    find: Result<Lookup, String>,
    update: Result<u16, String>,
    calls: Mutex<Vec<Call>>,
}

impl StubRecordStore {
    /// A store holding one record with the given id; edits succeed.
    pub fn with_record(id: i64) -> Self {
        Self::scripted(
            Ok(Lookup {
                status: 200,
                id: Some(id),
            }),
            Ok(200),
        )
    }

    /// A store that answers lookups with an empty record list.
    pub fn empty() -> Self {
        Self::scripted(
            Ok(Lookup {
                status: 200,
                id: None,
            }),
            Ok(200),
        )
    }

    /// A store whose lookup answers with the given provider status.
    pub fn lookup_status(status: u16) -> Self {
        Self::scripted(Ok(Lookup { status, id: None }), Ok(200))
    }

    /// A store holding record `id` whose edit answers with `status`.
    pub fn edit_status(id: i64, status: u16) -> Self {
        Self::scripted(
            Ok(Lookup {
                status: 200,
                id: Some(id),
            }),
            Ok(status),
        )
    }

    /// A store whose lookup fails at the transport level.
    pub fn unreachable() -> Self {
        Self::scripted(Err("connection refused".to_string()), Ok(200))
    }

    pub fn scripted(find: Result<Lookup, String>, update: Result<u16, String>) -> Self {
        Self {
            find,
            update,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Everything the store has been asked so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for StubRecordStore {
    async fn find_record(&self, zone: &str, kind: RecordKind, name: &str) -> Result<Lookup, Error> {
        self.calls.lock().unwrap().push(Call::Find {
            zone: zone.to_string(),
            kind,
            name: name.to_string(),
        });
        self.find
            .clone()
            .map_err(Error::Transport)
    }

    async fn update_record(&self, zone: &str, id: i64, addr: &str) -> Result<u16, Error> {
        self.calls.lock().unwrap().push(Call::Update {
            zone: zone.to_string(),
            id,
            addr: addr.to_string(),
        });
        self.update.clone().map_err(Error::Transport)
    }
}
