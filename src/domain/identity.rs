//! Authenticated user identity and the provider abstraction around it.

/// The user on whose behalf an operation runs.
///
/// Inserted into request extensions by [`crate::api::middleware::auth`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserIdentity {
    pub uid: String,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Answers "who is the current authenticated user?".
///
/// Injected into [`crate::application::RunningStore`] instead of being read
/// from global state.
pub trait IdentityProvider: Send + Sync {
    /// Returns the current user, or `None` when nobody is signed in.
    fn current_user(&self) -> Option<UserIdentity>;
}

/// Identity provider with a fixed answer, used by the CLI and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserIdentity>,
}

impl StaticIdentity {
    pub fn signed_in(uid: impl Into<String>) -> Self {
        Self {
            user: Some(UserIdentity::new(uid)),
        }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserIdentity> {
        self.user.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_identity() {
        assert_eq!(
            StaticIdentity::signed_in("runner-1").current_user(),
            Some(UserIdentity::new("runner-1"))
        );
        assert_eq!(StaticIdentity::anonymous().current_user(), None);
    }
}
