use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
    Moderator,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
            Role::Moderator => write!(f, "moderator"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            "moderator" => Ok(Role::Moderator),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User entity as held by the record store.
///
/// The id is generated at creation and never client-supplied. The password
/// hash is nullable: identities created through third-party federation may
/// carry no credential at all, and such users can never authenticate by
/// password.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all users; uniqueness is enforced by the store
    pub email: String,
    /// bcrypt hash, never a plaintext secret (never exposed in responses)
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub role: Role,
    /// National registry id (CPF or CNPJ)
    pub cpf_cnpj: Option<String>,
    pub facebook_id: Option<String>,
    pub google_id: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Materialize a new user from a create payload.
    ///
    /// The payload's `password` field holds the bcrypt hash by the time it
    /// reaches this layer; the interceptor has already replaced the
    /// plaintext on the way in.
    pub fn new(input: CreateUser) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password,
            role: input.role.unwrap_or_default(),
            cpf_cnpj: input.cpf_cnpj,
            facebook_id: input.facebook_id,
            google_id: input.google_id,
            picture_url: input.picture_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update (the password, when present, is already hashed).
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(first_name) = update.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(hash) = update.password {
            self.password_hash = Some(hash);
        }
        if let Some(role) = update.role {
            self.role = role;
        }
        if let Some(cpf_cnpj) = update.cpf_cnpj {
            self.cpf_cnpj = Some(cpf_cnpj);
        }
        if let Some(facebook_id) = update.facebook_id {
            self.facebook_id = Some(facebook_id);
        }
        if let Some(google_id) = update.google_id {
            self.google_id = Some(google_id);
        }
        if let Some(picture_url) = update.picture_url {
            self.picture_url = Some(picture_url);
        }
        self.updated_at = Utc::now();
    }
}

/// DTO for registering a new user
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, max = 100, message = "FirstName must be 3 to 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 3, max = 100, message = "LastName must be 3 to 100 characters"))]
    pub last_name: String,
    #[validate(email, length(max = 100))]
    pub email: String,
    /// bcrypt hash once the request has passed the credential interceptor;
    /// absent for federated identities
    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[validate(length(min = 11, max = 14, message = "CpfCnpj must be 11 to 14 characters"))]
    pub cpf_cnpj: Option<String>,
    pub facebook_id: Option<String>,
    pub google_id: Option<String>,
    pub picture_url: Option<String>,
}

/// DTO for updating an existing user
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 3, max = 100))]
    pub last_name: Option<String>,
    #[validate(email, length(max = 100))]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,
    pub role: Option<Role>,
    #[validate(length(min = 11, max = 14))]
    pub cpf_cnpj: Option<String>,
    pub facebook_id: Option<String>,
    pub google_id: Option<String>,
    pub picture_url: Option<String>,
}

/// Ephemeral login input; never persisted, never logged
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// User response DTO (without the password hash)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub cpf_cnpj: Option<String>,
    pub facebook_id: Option<String>,
    pub google_id: Option<String>,
    pub picture_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            cpf_cnpj: user.cpf_cnpj,
            facebook_id: user.facebook_id,
            google_id: user.google_id,
            picture_url: user.picture_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Response after a successful login
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Compact signed token
    pub token: String,
    /// Expiry instant (RFC 3339)
    pub expiration: DateTime<Utc>,
}
