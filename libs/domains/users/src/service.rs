use std::sync::Arc;
use uuid::Uuid;

use axum_helpers::{Claims, TokenService};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, Credentials, LoginResponse, UpdateUser, UserResponse};
use crate::password;
use crate::repository::UserRepository;

/// Service layer for the user directory.
///
/// Holds only an `Arc` to the store; stateless otherwise and safe for
/// unbounded concurrent use. Write payloads reach this layer with their
/// `password` field already hashed by the credential interceptor.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new user. Duplicate emails surface from the store.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<UserResponse> {
        let user = crate::models::User::new(input);
        let created = self.repository.insert(user).await?;
        Ok(created.into())
    }

    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        Ok(user.into())
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.list().await?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }

    pub async fn update_user(&self, id: Uuid, input: UpdateUser) -> UserResult<UserResponse> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        user.apply_update(input);

        let updated = self.repository.update(user).await?;
        Ok(updated.into())
    }

    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }

    /// Authenticate a credential pair and mint a signed token.
    ///
    /// One attempt, terminal outcomes only; retries are the caller's
    /// policy:
    ///
    /// 1. lookup by email — [`UserError::EmailNotFound`] when absent
    /// 2. verify the candidate against the stored hash —
    ///    [`UserError::PasswordMismatch`] on failure (a user with no stored
    ///    hash can never pass)
    /// 3. build the claim set and issue the token
    pub async fn authenticate(
        &self,
        tokens: &TokenService,
        credentials: Credentials,
    ) -> UserResult<LoginResponse> {
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await?
            .ok_or(UserError::EmailNotFound)?;

        if !password::verify(user.password_hash.as_deref(), &credentials.password) {
            return Err(UserError::PasswordMismatch);
        }

        let claims = Claims::for_identity(&user.email, &user.first_name, &user.last_name)?;
        let signed = tokens.issue(claims)?;

        Ok(LoginResponse {
            token: signed.token,
            expiration: signed.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::repository::InMemoryUserRepository;
    use axum_helpers::JwtConfig;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn token_service() -> TokenService {
        TokenService::new(JwtConfig::new(
            "https://issuer.test",
            "https://audience.test",
            "a-test-secret-long-enough-to-be-plausible",
            24,
        ))
    }

    fn create_input(email: &str, password_hash: Option<String>) -> CreateUser {
        CreateUser {
            first_name: "Maria".to_string(),
            last_name: "Souza".to_string(),
            email: email.to_string(),
            password: password_hash,
            role: Some(Role::User),
            cpf_cnpj: None,
            facebook_id: None,
            google_id: None,
            picture_url: None,
        }
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let service = service();

        let created = service
            .create_user(create_input("maria@test.com", None))
            .await
            .unwrap();
        let fetched = service.get_user(created.id).await.unwrap();

        assert_eq!(fetched.email, "maria@test.com");
        assert_eq!(fetched.role, Role::User);
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_from_the_store() {
        let service = service();
        service
            .create_user(create_input("maria@test.com", None))
            .await
            .unwrap();

        let result = service.create_user(create_input("maria@test.com", None)).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn update_and_delete() {
        let service = service();
        let created = service
            .create_user(create_input("maria@test.com", None))
            .await
            .unwrap();

        let updated = service
            .update_user(
                created.id,
                UpdateUser {
                    first_name: Some("Mariana".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.first_name, "Mariana");

        service.delete_user(created.id).await.unwrap();
        assert!(matches!(
            service.get_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn unknown_email_yields_email_not_found() {
        let result = service()
            .authenticate(
                &token_service(),
                Credentials {
                    email: "nobody@test.com".to_string(),
                    password: "whatever".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::EmailNotFound)));
    }

    #[tokio::test]
    async fn wrong_password_yields_password_mismatch() {
        let service = service();
        let hash = password::hash("pw123456").unwrap();
        service
            .create_user(create_input("maria@test.com", Some(hash)))
            .await
            .unwrap();

        let result = service
            .authenticate(
                &token_service(),
                Credentials {
                    email: "maria@test.com".to_string(),
                    password: "wrong-password".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn user_without_a_stored_hash_cannot_authenticate() {
        let service = service();
        service
            .create_user(create_input("federated@test.com", None))
            .await
            .unwrap();

        let result = service
            .authenticate(
                &token_service(),
                Credentials {
                    email: "federated@test.com".to_string(),
                    password: "anything".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn successful_login_issues_a_bounded_token() {
        let service = service();
        let tokens = token_service();
        let hash = password::hash("pw123456").unwrap();
        service
            .create_user(create_input("maria@test.com", Some(hash)))
            .await
            .unwrap();

        let before = chrono::Utc::now().timestamp();
        let response = service
            .authenticate(
                &tokens,
                Credentials {
                    email: "maria@test.com".to_string(),
                    password: "pw123456".to_string(),
                },
            )
            .await
            .unwrap();
        let after = chrono::Utc::now().timestamp();

        let claims = tokens.verify(&response.token).unwrap();
        assert_eq!(claims.identity.sub, "maria@test.com");
        assert_eq!(claims.identity.given_name, "Maria");
        assert_eq!(claims.identity.family_name, "Souza");

        // Expiry is exactly issuance plus the configured 24 hours
        assert!(claims.exp >= before + 24 * 3600);
        assert!(claims.exp <= after + 24 * 3600);
        assert_eq!(claims.exp, response.expiration.timestamp());
    }

    #[tokio::test]
    async fn two_logins_for_the_same_user_carry_different_token_ids() {
        let service = service();
        let tokens = token_service();
        let hash = password::hash("pw123456").unwrap();
        service
            .create_user(create_input("maria@test.com", Some(hash)))
            .await
            .unwrap();

        let credentials = || Credentials {
            email: "maria@test.com".to_string(),
            password: "pw123456".to_string(),
        };
        let first = service.authenticate(&tokens, credentials()).await.unwrap();
        let second = service.authenticate(&tokens, credentials()).await.unwrap();

        assert_ne!(first.token, second.token);
        let first = tokens.verify(&first.token).unwrap();
        let second = tokens.verify(&second.token).unwrap();
        assert_ne!(first.identity.jti, second.identity.jti);
    }
}
