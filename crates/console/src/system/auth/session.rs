//! Session of the signed-in user
//!
//! Built from a successful login and passed explicitly to every operation
//! that stamps a user id or needs a permission check. The CLI keeps it in a
//! small JSON file between invocations.

use contracts::system::auth::UserInfo;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::shared::config::AccessConfig;
use crate::shared::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
        }
    }

    /// Login answers without both id and username are not a session
    pub fn from_user(user: UserInfo) -> ConsoleResult<Self> {
        if !user.is_complete() {
            return Err(ConsoleError::Transport(
                "Unexpected response from server".to_string(),
            ));
        }
        Ok(Self::new(user.id, user.username))
    }

    /// Billing rows may only be edited by configured users
    pub fn can_edit_billing(&self, access: &AccessConfig) -> bool {
        let username = self.username.trim();
        access
            .billing_editors
            .iter()
            .any(|editor| editor.trim().eq_ignore_ascii_case(username))
    }

    pub fn require_billing_editor(&self, access: &AccessConfig) -> ConsoleResult<()> {
        if self.can_edit_billing(access) {
            Ok(())
        } else {
            tracing::warn!("User '{}' is not allowed to modify billing", self.username);
            Err(ConsoleError::Unauthorized)
        }
    }

    pub fn save(&self, path: &Path) -> ConsoleResult<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| session_io("create", dir, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConsoleError::Session(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| session_io("write", path, e))?;
        Ok(())
    }

    /// `None` when nobody is signed in
    pub fn load(path: &Path) -> ConsoleResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path).map_err(|e| session_io("read", path, e))?;
        match serde_json::from_str::<Session>(&text) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    pub fn clear(path: &Path) -> ConsoleResult<()> {
        if path.exists() {
            std::fs::remove_file(path).map_err(|e| session_io("remove", path, e))?;
        }
        Ok(())
    }
}

fn session_io(action: &str, path: &Path, e: std::io::Error) -> ConsoleError {
    ConsoleError::Session(format!("cannot {} {}: {}", action, path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(editors: &[&str]) -> AccessConfig {
        AccessConfig {
            billing_editors: editors.iter().map(|e| e.to_string()).collect(),
        }
    }

    #[test]
    fn test_billing_editor_check() {
        let session = Session::new("7", "Akash");
        assert!(session.can_edit_billing(&access(&["shubham", "akash"])));
        assert!(!session.can_edit_billing(&access(&["shubham"])));
        assert!(!session.can_edit_billing(&access(&[])));
        assert!(matches!(
            session.require_billing_editor(&access(&[])),
            Err(ConsoleError::Unauthorized)
        ));
    }

    #[test]
    fn test_from_user_requires_id_and_name() {
        let user = UserInfo {
            id: "".into(),
            username: "akash".into(),
        };
        assert!(Session::from_user(user).is_err());
    }

    #[test]
    fn test_save_load_clear() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state").join("session.json");

        assert_eq!(Session::load(&path).unwrap(), None);
        let session = Session::new("7", "akash");
        session.save(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), Some(session));

        Session::clear(&path).unwrap();
        assert_eq!(Session::load(&path).unwrap(), None);
    }

    #[test]
    fn test_unreadable_session_file_is_session_error() {
        let tmp = tempfile::tempdir().unwrap();
        // a directory at the session path cannot be read as a file
        let path = tmp.path().join("session.json");
        std::fs::create_dir(&path).unwrap();

        let err = Session::load(&path).unwrap_err();
        assert!(matches!(err, ConsoleError::Session(_)));
        assert!(err.to_string().starts_with("Session error: cannot read"));
    }
}
