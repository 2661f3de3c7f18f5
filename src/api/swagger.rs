use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "0.1.0",
        description = "Minimal CRUD API for the 'user' resource, backed by MongoDB."
    ),
    paths(
        crate::api::health::health_check,
        crate::api::users::get_users,
        crate::api::users::add_user,
        crate::api::users::get_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::user::CreateUserRequest,
            crate::models::user::UserResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint for monitoring service status."),
        (name = "Users", description = "Create and fetch 'user' documents in the users collection."),
    )
)]
pub struct ApiDoc;
