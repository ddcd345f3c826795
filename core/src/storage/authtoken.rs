use std::path::{Path, PathBuf};

use codeiv_webclient::AuthToken;

use super::{error::*, util};

/// The bearer token's "local persistent storage": one JSON file in the cache dir.
#[derive(Debug, Clone)]
pub struct AuthTokenFile {
    pub filepath: PathBuf,
}

impl AuthTokenFile {
    pub const FILENAME: &str = "auth.json";

    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(Self::FILENAME))
    }

    /// `Ok(None)` if nothing was saved yet.
    #[must_use]
    pub fn load(&self) -> Result<Option<AuthToken>> {
        match util::read_json(&self.filepath) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    #[must_use]
    pub fn save(&self, token: &AuthToken) -> Result<()> {
        util::write_json_with_mkdir(&self.filepath, token)
    }

    #[must_use]
    pub fn erase(&self) -> Result<()> {
        match util::remove_file(&self.filepath) {
            Err(e) if e.is_not_found() => Ok(()),
            res => res,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng as _;

    fn scratch_dir() -> PathBuf {
        let n: u64 = rand::thread_rng().gen();
        std::env::temp_dir().join(format!("codeiv-authtoken-test-{:x}", n))
    }

    #[test]
    fn save_load_erase() {
        let dir = scratch_dir();
        let file = AuthTokenFile::in_dir(&dir);

        assert_eq!(file.load().unwrap(), None);

        let token = AuthToken {
            id_token: Some("id".to_owned()),
            refresh_token: Some("refresh".to_owned()),
            uid: Some("u-1".to_owned()),
            ..Default::default()
        };
        file.save(&token).unwrap();
        assert_eq!(file.load().unwrap(), Some(token));

        file.erase().unwrap();
        assert_eq!(file.load().unwrap(), None);
        // erasing twice is fine
        file.erase().unwrap();

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn broken_json_is_an_error() {
        let dir = scratch_dir();
        let file = AuthTokenFile::in_dir(&dir);
        util::write_with_mkdir(&file.filepath, "{ not json").unwrap();

        let err = file.load().unwrap_err();
        assert_eq!(err.action, ActionKind::DeserializeFromJson);

        let _ = std::fs::remove_dir_all(dir);
    }
}
