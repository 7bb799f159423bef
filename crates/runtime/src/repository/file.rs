//! File-based SessionRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use venture_core::{RunSession, SessionId};

use super::{RepoResult, RepositoryError, SessionRepository, decode_record, encode_record};

/// File-based implementation of SessionRepository.
///
/// Stores sessions as individual files indexed by session id.
///
/// # File Format
///
/// Sessions are stored as `session_{id}.bin`: a 32-byte SHA-256 integrity
/// digest followed by the bincode payload. Writes go to a temp file and
/// land with an atomic rename, so a crash mid-write leaves either the old
/// record or none — never a torn one.
pub struct FileSessionRepository {
    base_dir: PathBuf,
}

impl FileSessionRepository {
    /// Create a new file-based session repository.
    pub fn new(base_dir: impl AsRef<Path>) -> RepoResult<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    /// Open a repository under the platform data directory.
    pub fn open_default() -> RepoResult<Self> {
        let base_dir = directories::ProjectDirs::from("", "", "venture")
            .map(|dirs| dirs.data_dir().join("sessions"))
            .unwrap_or_else(|| PathBuf::from(".venture/sessions"));
        Self::new(base_dir)
    }

    /// Get the path to a session file.
    fn session_path(&self, id: SessionId) -> PathBuf {
        self.base_dir.join(format!("session_{}.bin", id.0))
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, session: &RunSession) -> RepoResult<()> {
        let path = self.session_path(session.id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes = encode_record(session)?;

        // Write to temp file, then atomic rename.
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved session[{}] to {}", session.id, path.display());

        Ok(())
    }

    fn load(&self, id: SessionId) -> RepoResult<Option<RunSession>> {
        let path = self.session_path(id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let session = decode_record(&bytes)?;

        tracing::debug!("Loaded session[{}] from {}", id, path.display());

        Ok(Some(session))
    }

    fn delete(&self, id: SessionId) -> RepoResult<()> {
        let path = self.session_path(id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", id);
        }

        Ok(())
    }

    fn list_ids(&self) -> RepoResult<Vec<SessionId>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)? {
            let entry = entry.map_err(RepositoryError::Io)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            let Some(id) = name
                .strip_prefix("session_")
                .and_then(|rest| rest.strip_suffix(".bin"))
                .and_then(|digits| digits.parse::<u64>().ok())
            else {
                continue;
            };
            ids.push(SessionId(id));
        }

        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::sample_session;
    use super::*;

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();

        let session = sample_session(10);
        repo.save(&session).unwrap();

        let loaded = repo.load(session.id).unwrap().unwrap();
        assert_eq!(session, loaded);
        assert_eq!(repo.list_ids().unwrap(), vec![session.id]);
    }

    #[test]
    fn missing_sessions_load_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();
        assert!(repo.load(SessionId(999)).unwrap().is_none());
    }

    #[test]
    fn corrupt_files_fail_closed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();

        let session = sample_session(11);
        repo.save(&session).unwrap();

        // Flip one payload byte on disk.
        let path = dir.path().join(format!("session_{}.bin", session.id.0));
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x01;
        std::fs::write(&path, bytes).unwrap();

        assert!(matches!(
            repo.load(session.id),
            Err(RepositoryError::Corrupt(_))
        ));
    }

    #[test]
    fn delete_removes_the_record() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileSessionRepository::new(dir.path()).unwrap();

        let session = sample_session(12);
        repo.save(&session).unwrap();
        repo.delete(session.id).unwrap();

        assert!(repo.load(session.id).unwrap().is_none());
        assert!(repo.list_ids().unwrap().is_empty());
    }
}
