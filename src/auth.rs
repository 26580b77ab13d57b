//! Authorization gate for owner-scoped operations.
//!
//! Every mutating or owner-scoped request names its owner by user id. The
//! gate rejects ids the identity provider does not know before the store is
//! touched.

use crate::errors::AppError;
use crate::identity::IdentityVerifier;
use crate::metrics::AppMetrics;

/// Ensure `user_id` belongs to a registered account.
///
/// - unknown or empty id: [`AppError::UnknownUser`] (400)
/// - provider failure: [`AppError::IdentityProviderError`] (500)
pub async fn require_known_user(
    verifier: &dyn IdentityVerifier,
    user_id: &str,
    metrics: Option<&AppMetrics>,
) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        if let Some(m) = metrics {
            m.record_identity_check("unknown");
        }
        return Err(AppError::UnknownUser("A user id is required".into()));
    }

    match verifier.exists(user_id).await {
        Ok(true) => {
            if let Some(m) = metrics {
                m.record_identity_check("known");
            }
            Ok(())
        }
        Ok(false) => {
            log::warn!("Rejected request for unknown user '{}'", user_id);
            if let Some(m) = metrics {
                m.record_identity_check("unknown");
            }
            Err(AppError::user_not_found(user_id))
        }
        Err(e) => {
            log::error!("Identity check for '{}' failed: {}", user_id, e);
            if let Some(m) = metrics {
                m.record_identity_check("error");
            }
            Err(e)
        }
    }
}
