//! Session persistence.
//!
//! A [`RunSession`] is persisted as a flat, versioned record sufficient to
//! fully reconstruct resume behavior from cold storage. Loads fail closed:
//! integrity or invariant violations surface as [`RepositoryError::Corrupt`]
//! and the caller treats the run as abandoned rather than guessing.

mod file;
mod memory;

pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepository;

use venture_core::{RunSession, SessionId};

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("session record is corrupt: {0}")]
    Corrupt(String),
}

/// Common result type for repositories.
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Session record storage.
///
/// Implementations must verify integrity on load and run the session's
/// own invariant validation before handing a record back.
pub trait SessionRepository: Send + Sync {
    fn save(&self, session: &RunSession) -> RepoResult<()>;
    fn load(&self, id: SessionId) -> RepoResult<Option<RunSession>>;
    fn delete(&self, id: SessionId) -> RepoResult<()>;
    fn list_ids(&self) -> RepoResult<Vec<SessionId>>;
}

/// Serialize a session with an integrity digest prefix.
///
/// Layout: 32-byte SHA-256 of the payload, then the bincode payload.
pub(crate) fn encode_record(session: &RunSession) -> RepoResult<Vec<u8>> {
    use sha2::{Digest, Sha256};

    let payload =
        bincode::serialize(session).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    let digest = Sha256::digest(&payload);

    let mut bytes = Vec::with_capacity(32 + payload.len());
    bytes.extend_from_slice(&digest);
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and verify a record produced by [`encode_record`].
pub(crate) fn decode_record(bytes: &[u8]) -> RepoResult<RunSession> {
    use sha2::{Digest, Sha256};

    if bytes.len() < 32 {
        return Err(RepositoryError::Corrupt("record shorter than digest".into()));
    }
    let (stored_digest, payload) = bytes.split_at(32);
    let digest = Sha256::digest(payload);
    if digest.as_slice() != stored_digest {
        return Err(RepositoryError::Corrupt("integrity digest mismatch".into()));
    }

    let session: RunSession =
        bincode::deserialize(payload).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    // Structural integrity passed; now check the session's own invariants.
    session
        .validate()
        .map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

    Ok(session)
}
