use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;

/// Record store contract for users: point lookups by id and by email, plus
/// the write operations. Email uniqueness is the store's responsibility and
/// surfaces as [`UserError::DuplicateEmail`]; callers must treat any write
/// as able to fail that way.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn insert(&self, user: User) -> UserResult<User>;

    /// Point lookup by id
    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Point lookup by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// All users, newest first
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Replace an existing user
    async fn update(&self, user: User) -> UserResult<User>;

    /// Delete by id; `false` when nothing was there
    async fn delete(&self, id: Uuid) -> UserResult<bool>;
}

/// In-memory store used in development and tests; stands in for the
/// external record store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        let email_taken = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));
        if email_taken {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn update(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(UserError::NotFound(user.id));
        }

        let email_taken = users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if email_taken {
            return Err(UserError::DuplicateEmail(user.email));
        }

        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = %id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateUser;

    fn sample(email: &str) -> User {
        User::new(CreateUser {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password: Some("stored-hash".to_string()),
            role: None,
            cpf_cnpj: None,
            facebook_id: None,
            google_id: None,
            picture_url: None,
        })
    }

    #[tokio::test]
    async fn insert_and_find_by_id() {
        let repo = InMemoryUserRepository::new();

        let created = repo.insert(sample("test@example.com")).await.unwrap();
        let fetched = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(fetched.unwrap().email, "test@example.com");
    }

    #[tokio::test]
    async fn find_by_email_is_case_insensitive() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample("test@example.com")).await.unwrap();

        assert!(repo.find_by_email("TEST@EXAMPLE.COM").await.unwrap().is_some());
        assert!(repo.find_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample("test@example.com")).await.unwrap();

        let result = repo.insert(sample("Test@Example.com")).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn update_rejects_stealing_an_email() {
        let repo = InMemoryUserRepository::new();
        repo.insert(sample("first@example.com")).await.unwrap();
        let mut second = repo.insert(sample("second@example.com")).await.unwrap();

        second.email = "first@example.com".to_string();
        let result = repo.update(second).await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn delete_reports_whether_something_was_removed() {
        let repo = InMemoryUserRepository::new();
        let created = repo.insert(sample("test@example.com")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
