//! Resolves the session into the acting user, once per request.

use std::sync::Arc;

use gatehouse_models::{User, UserId};
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::metrics::track_identity_lookup_failure;
use crate::middleware::session::SessionState;
use crate::modules::users::UserRepository;

/// Per-request identity resolution.
///
/// The first call to [`IdentityResolver::resolve`] performs at most one
/// repository lookup and caches the outcome, present or absent. A lookup that
/// fails for any reason leaves the request anonymous and clears the session,
/// so the stale id is not looked up again on the next request.
pub struct IdentityResolver {
    session: Arc<SessionState>,
    users: Arc<dyn UserRepository>,
    cached: OnceCell<Option<User>>,
}

impl IdentityResolver {
    pub fn new(session: Arc<SessionState>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            session,
            users,
            cached: OnceCell::new(),
        }
    }

    pub async fn resolve(&self) -> Option<&User> {
        self.cached.get_or_init(|| self.lookup()).await.as_ref()
    }

    pub async fn logged_in(&self) -> bool {
        self.resolve().await.is_some()
    }

    /// The cached identity, without triggering a lookup.
    pub fn cached(&self) -> Option<&User> {
        self.cached.get().and_then(Option::as_ref)
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    async fn lookup(&self) -> Option<User> {
        let raw = self.session.user_id()?;

        let id = match raw.parse::<UserId>() {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "Session holds a corrupt user id; clearing session");
                track_identity_lookup_failure("corrupt_identifier");
                self.session.clear();
                return None;
            }
        };

        match self.users.find(id).await {
            Ok(user) => {
                debug!(user_id = %user.id, "Resolved session identity");
                Some(user)
            }
            Err(err) => {
                warn!(user_id = %id, error = %err, "Identity lookup failed; clearing session");
                track_identity_lookup_failure(err.reason());
                self.session.clear();
                None
            }
        }
    }
}
