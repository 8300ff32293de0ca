//! Credential checking for the `Authorization: <user id>:<secret>` scheme.
//!
//! The header carries the identifier and secret in plain text, split on the
//! first colon. The secret may itself contain colons.

use tracing::{debug, warn};

use crate::database::repository::UserRepository;
use crate::services::ServiceError;

/// Identity resolved by the gate. Every todo operation is scoped to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Identifier/secret pair taken from a request
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("secret", &"***")
            .finish()
    }
}

impl Credentials {
    /// Parse the raw `Authorization` header value.
    /// A missing header or a value without a colon is rejected before any lookup.
    pub fn parse(header: Option<&str>) -> Result<Self, ServiceError> {
        let value = header.ok_or_else(|| ServiceError::unauthorized("invalid authentication"))?;
        let (user_id, secret) = value
            .split_once(':')
            .ok_or_else(|| ServiceError::unauthorized("invalid authentication"))?;

        Ok(Self {
            user_id: user_id.to_string(),
            secret: secret.to_string(),
        })
    }
}

/// Check the pair against the user store.
/// Wrong credentials are `Unauthorized`; a failing store is `Internal`.
pub async fn authenticate<U: UserRepository>(
    users: &U,
    cx: &mut U::Context,
    credentials: &Credentials,
) -> Result<AuthUser, ServiceError> {
    let authenticated = users
        .authenticate(cx, &credentials.user_id, &credentials.secret)
        .await
        .map_err(|e| ServiceError::internal("can't verify credentials", e))?;

    if !authenticated {
        warn!("Authentication failed for user '{}'", credentials.user_id);
        return Err(ServiceError::unauthorized("user not found or invalid password"));
    }

    debug!("Authenticated user '{}'", credentials.user_id);
    Ok(AuthUser {
        user_id: credentials.user_id.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::database::manager::DatabaseError;
    use crate::database::memory::{MemoryContext, MemoryUserRepository};
    use crate::services::ErrorKind;

    #[derive(Clone)]
    struct BrokenUsers;

    #[async_trait]
    impl UserRepository for BrokenUsers {
        type Context = MemoryContext;

        async fn authenticate(&self, _cx: &mut MemoryContext, _id: &str, _secret: &str) -> Result<bool, DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        }

        async fn create(&self, _cx: &mut MemoryContext, _id: &str, _secret: &str) -> Result<(), DatabaseError> {
            Err(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut))
        }
    }

    #[test]
    fn parses_identifier_and_secret() {
        let creds = Credentials::parse(Some("alice:pa:ss")).unwrap();
        assert_eq!(creds.user_id, "alice");
        assert_eq!(creds.secret, "pa:ss");

        let creds = Credentials::parse(Some("alice:")).unwrap();
        assert_eq!(creds.secret, "");
    }

    #[test]
    fn rejects_missing_or_malformed_header() {
        for header in [None, Some(""), Some("alice"), Some("Bearer abc")] {
            let err = Credentials::parse(header).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let creds = Credentials::parse(Some("alice:hunter2")).unwrap();
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }

    #[tokio::test]
    async fn resolves_identity_for_valid_credentials() {
        let users = MemoryUserRepository::new();
        let mut cx = MemoryContext;
        users.create(&mut cx, "alice", "secret").await.unwrap();

        let creds = Credentials::parse(Some("alice:secret")).unwrap();
        let user = authenticate(&users, &mut cx, &creds).await.unwrap();
        assert_eq!(user.user_id, "alice");
    }

    #[tokio::test]
    async fn wrong_secret_and_unknown_user_are_unauthorized() {
        let users = MemoryUserRepository::new();
        let mut cx = MemoryContext;
        users.create(&mut cx, "alice", "secret").await.unwrap();

        for header in ["alice:nope", "mallory:secret"] {
            let creds = Credentials::parse(Some(header)).unwrap();
            let err = authenticate(&users, &mut cx, &creds).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }
    }

    #[tokio::test]
    async fn store_fault_is_internal_not_unauthorized() {
        let mut cx = MemoryContext;
        let creds = Credentials::parse(Some("alice:secret")).unwrap();
        let err = authenticate(&BrokenUsers, &mut cx, &creds).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
