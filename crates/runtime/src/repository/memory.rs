//! In-memory SessionRepository implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use venture_core::{RunSession, SessionId};

use super::{RepoResult, SessionRepository, decode_record, encode_record};

/// In-memory session store for tests and ephemeral play.
///
/// Goes through the same encode/decode path as the file store so
/// integrity checking and invariant validation get exercised either way.
#[derive(Default)]
pub struct InMemorySessionRepository {
    records: Mutex<HashMap<u64, Vec<u8>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn save(&self, session: &RunSession) -> RepoResult<()> {
        let bytes = encode_record(session)?;
        self.records
            .lock()
            .expect("repository lock poisoned")
            .insert(session.id.0, bytes);
        Ok(())
    }

    fn load(&self, id: SessionId) -> RepoResult<Option<RunSession>> {
        let records = self.records.lock().expect("repository lock poisoned");
        match records.get(&id.0) {
            Some(bytes) => Ok(Some(decode_record(bytes)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, id: SessionId) -> RepoResult<()> {
        self.records
            .lock()
            .expect("repository lock poisoned")
            .remove(&id.0);
        Ok(())
    }

    fn list_ids(&self) -> RepoResult<Vec<SessionId>> {
        let records = self.records.lock().expect("repository lock poisoned");
        let mut ids: Vec<SessionId> = records.keys().copied().map(SessionId).collect();
        ids.sort();
        Ok(ids)
    }
}
