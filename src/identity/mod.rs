//! Identity verification adapter.
//!
//! Answers one question for the request handlers: is this user id a
//! registered account? "Not registered" is `Ok(false)`; any other provider
//! failure is an error so the caller can tell the two apart.

mod firebase;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::Config;
use crate::errors::AppError;

pub use firebase::{FirebaseVerifier, ServiceAccount};

/// Checks user ids against an external identity system
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Whether `user_id` belongs to a registered account
    async fn exists(&self, user_id: &str) -> Result<bool, AppError>;
}

/// Verifier backed by a fixed set of known user ids
#[derive(Debug, Clone, Default)]
pub struct StaticVerifier {
    known: HashSet<String>,
}

impl StaticVerifier {
    pub fn new<I, S>(user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: user_ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StaticVerifier {
    async fn exists(&self, user_id: &str) -> Result<bool, AppError> {
        Ok(self.known.contains(user_id))
    }
}

/// Build the verifier selected by configuration
///
/// Precedence: auth emulator, then service-account credentials, then a static
/// allow list. With none configured the process cannot authorize anything,
/// which is a startup error.
pub fn build_verifier(config: &Config) -> Result<Arc<dyn IdentityVerifier>, AppError> {
    let timeout = Duration::from_secs(config.identity_timeout_secs);

    if let Some(host) = &config.firebase_auth_emulator_host {
        let project_id = config.firebase_project_id.as_deref().ok_or_else(|| {
            AppError::config(
                "FIREBASE_PROJECT_ID is required when FIREBASE_AUTH_EMULATOR_HOST is set",
            )
        })?;
        log::info!("Identity verification: auth emulator at {}", host);
        return Ok(Arc::new(FirebaseVerifier::for_emulator(host, project_id, timeout)?));
    }

    if let Some(path) = &config.firebase_credentials_file {
        let mut account = ServiceAccount::from_file(path)?;
        if let Some(project_id) = &config.firebase_project_id {
            account.project_id = project_id.clone();
        }
        log::info!(
            "Identity verification: Firebase project '{}' as {}",
            account.project_id,
            account.client_email
        );
        return Ok(Arc::new(FirebaseVerifier::from_service_account(
            account,
            timeout,
            config.access_token_ttl_secs,
        )?));
    }

    if let Some(ids) = &config.allowed_user_ids {
        log::warn!(
            "Identity verification: static allow list with {} user(s); not for production",
            ids.len()
        );
        return Ok(Arc::new(StaticVerifier::new(ids.iter().cloned())));
    }

    Err(AppError::config(
        "No identity provider configured; set FIREBASE_CREDENTIALS_FILE, \
         FIREBASE_AUTH_EMULATOR_HOST or ALLOWED_USER_IDS",
    ))
}
