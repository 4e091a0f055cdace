use domain_users::models::{
    CreateUser, Credentials, LoginResponse, Role, UpdateUser, UserResponse,
};
use utoipa::OpenApi;

/// OpenAPI document served at /api-docs/openapi.json and rendered by the
/// Swagger UI.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Services",
        description = "User directory with credential authentication and token issuance"
    ),
    components(schemas(
        CreateUser,
        UpdateUser,
        Credentials,
        LoginResponse,
        Role,
        UserResponse
    ))
)]
pub struct ApiDoc;
