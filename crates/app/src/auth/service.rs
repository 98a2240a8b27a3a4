//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, AuthServiceError, IssuedApiToken, NewApiToken, generate_api_token,
        hash_api_token, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or database insertion fails.
    pub async fn issue_api_token(
        &self,
        user: UserUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token = generate_api_token();

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: Uuid::now_v7(),
                user_uuid: user,
                token_hash: hash_api_token(&token),
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        self.repository
            .list_api_tokens_by_user(user)
            .await
            .map_err(AuthServiceError::from)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token: Uuid) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let token = self
            .repository
            .find_active_api_token_by_hash(&hash_api_token(bearer_token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        // Best-effort metadata update; auth success should not depend on this write.
        if let Err(source) = self
            .repository
            .touch_api_token_last_used(token.uuid)
            .await
        {
            warn!(token_uuid = %token.uuid, "failed to record token use: {source}");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user that owns it.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn issued_token_authenticates_its_user() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("alice").await;

        let issued = ctx.auth.issue_api_token(user).await?;

        assert_eq!(issued.metadata.user_uuid, user);
        assert!(issued.metadata.revoked_at.is_none());

        let authenticated = ctx.auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(authenticated, user);

        let tokens = ctx.auth.list_api_tokens(user).await?;

        assert_eq!(tokens.len(), 1);
        assert!(tokens.iter().all(|t| t.last_used_at.is_some()));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_token_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.authenticate_bearer("sf_nope").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn revoked_token_no_longer_authenticates() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("bob").await;

        let issued = ctx.auth.issue_api_token(user).await?;

        assert!(ctx.auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(!ctx.auth.revoke_api_token(issued.metadata.uuid).await?);

        let result = ctx.auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound after revocation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issuing_for_unknown_user_returns_unknown_user() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.issue_api_token(UserUuid::new()).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }
}
