use std::ops::{Deref, DerefMut};
use std::path::Path;

use anyhow::Context as _;
use codeiv_webclient::{AuthToken, Authenticator, CurrentUser, Role, UserProfile};

use crate::storage::AuthTokenFile;

/// An authenticator whose token survives across runs in the cache dir.
/// Built once at the application root and passed down by reference.
pub struct AuthSession {
    auth: Box<dyn Authenticator>,
    authtoken_file: AuthTokenFile,
}

impl Deref for AuthSession {
    type Target = Box<dyn Authenticator>;

    fn deref(&self) -> &Self::Target {
        &self.auth
    }
}

impl DerefMut for AuthSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.auth
    }
}

impl AuthSession {
    pub fn new(auth: Box<dyn Authenticator>, save_dir: impl AsRef<Path>) -> Self {
        let mut x = Self {
            auth,
            authtoken_file: AuthTokenFile::in_dir(save_dir),
        };

        x.load_authtoken_if_file_exists().unwrap_or_else(|e| {
            log::warn!("Ignoring stored auth token: {:#}", e);
        });
        x
    }

    pub fn load_authtoken_if_file_exists(&mut self) -> anyhow::Result<()> {
        let token = self.authtoken_file.load().with_context(|| {
            format!(
                "Invalid auth token file '{}'",
                self.authtoken_file.filepath.to_string_lossy()
            )
        })?;
        if let Some(token) = token {
            self.auth.load_authtoken(token);
        }
        Ok(())
    }

    #[must_use]
    pub fn save_authtoken_to_storage(&self) -> anyhow::Result<()> {
        self.authtoken_file
            .save(&self.auth.export_authtoken())
            .context("Failed to save auth token")
    }

    #[must_use]
    pub fn remove_authtoken_from_storage(&self) -> anyhow::Result<()> {
        self.authtoken_file
            .erase()
            .context("Failed to remove auth token")
    }

    pub fn token(&self) -> AuthToken {
        self.auth.export_authtoken()
    }

    pub fn check(&self, requirement: Requirement) -> Access {
        RouteGuard::check(
            self.auth.current_user().as_ref(),
            self.auth.current_profile(),
            requirement,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    SignedIn,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
    RedirectToDashboard,
}

pub struct RouteGuard;

impl RouteGuard {
    /// A signed-in user without a profile document is never an admin.
    pub fn check(
        user: Option<&CurrentUser>,
        profile: Option<&UserProfile>,
        requirement: Requirement,
    ) -> Access {
        if user.is_none() {
            return Access::RedirectToLogin;
        }
        let is_admin = profile.map_or(false, |p| p.role == Role::Admin);
        if requirement == Requirement::Admin && !is_admin {
            return Access::RedirectToDashboard;
        }
        Access::Granted
    }
}
