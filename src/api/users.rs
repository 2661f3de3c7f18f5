use actix_web::{http::StatusCode, web, Responder};
use std::collections::HashMap;

use crate::{
    api::pretty_json,
    database::{MongoDB, RequestContext},
    models::CreateUserRequest,
    services::user_service,
    utils::error::ApiError,
};

/// POST /users - Create a new 'user'.
///
/// The body is decoded manually so a bad payload surfaces as a plain-text 400
/// rather than the framework's default error shape. A client-supplied id is
/// overwritten server-side.
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = crate::models::UserResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 500, description = "Database error")
    )
)]
pub async fn add_user(db: web::Data<MongoDB>, body: web::Bytes) -> impl Responder {
    let ctx = RequestContext::new(&db, HashMap::new());

    let request: CreateUserRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("POST /users - rejected malformed body: {}", e);
            return ApiError::MalformedRequest(e.to_string()).into_response();
        }
    };

    match user_service::add_user(&ctx, request).await {
        Ok(user) => {
            log::info!("✅ POST /users - created user {}", user.id);
            pretty_json(StatusCode::CREATED, &user)
        }
        Err(e) => {
            log::error!("❌ POST /users - {}", e);
            e.into_response()
        }
    }
}

/// GET /users/{id} - Fetch a single 'user'.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "Hex ObjectId of the user")),
    responses(
        (status = 200, description = "User found", body = crate::models::UserResponse),
        (status = 400, description = "Invalid ObjectID"),
        (status = 404, description = "No user with that id"),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_user(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let ctx = RequestContext::new(
        &db,
        HashMap::from([("id".to_string(), path.into_inner())]),
    );
    let id = ctx.param("id").unwrap_or_default().to_string();

    match user_service::get_user(&ctx, &id).await {
        Ok(user) => {
            log::info!("✅ GET /users/{} - found", id);
            pretty_json(StatusCode::OK, &user)
        }
        Err(e) => {
            log::warn!("⚠️ GET /users/{} - {}", id, e);
            e.into_response()
        }
    }
}

/// GET /users - Fetch every 'user'.
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, possibly empty", body = [crate::models::UserResponse]),
        (status = 500, description = "Database error")
    )
)]
pub async fn get_users(db: web::Data<MongoDB>) -> impl Responder {
    let ctx = RequestContext::new(&db, HashMap::new());

    match user_service::get_users(&ctx).await {
        Ok(users) => {
            log::info!("✅ GET /users - listed {} users", users.len());
            pretty_json(StatusCode::OK, &users)
        }
        Err(e) => {
            log::error!("❌ GET /users - {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserResponse;
    use actix_web::http::header;
    use actix_web::{test, App};

    macro_rules! test_app {
        () => {{
            let mongo = MongoDB::new("mongodb://localhost:27017", "user_service_test")
                .await
                .expect("MongoDB must be running for these tests");
            let db_data = web::Data::new(mongo);

            test::init_service(
                App::new()
                    .app_data(db_data.clone())
                    .route("/users", web::get().to(get_users))
                    .route("/users", web::post().to(add_user))
                    .route("/users/{id}", web::get().to(get_user)),
            )
            .await
        }};
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_post_creates_user_with_generated_id() {
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/users")
            .set_payload(r#"{"name":"ismo","tags":["talon","mies"]}"#)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let body = test::read_body(response).await;
        let user: UserResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(user.id.len(), 24);
        assert_eq!(user.name, "ismo");
        assert_eq!(user.tags, vec!["talon", "mies"]);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_post_overwrites_client_supplied_id() {
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/users")
            .set_payload(r#"{"id":"000000000000000000000000","name":"ismo"}"#)
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let user: UserResponse =
            serde_json::from_slice(&test::read_body(response).await).unwrap();
        assert_ne!(user.id, "000000000000000000000000");
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_post_malformed_body_is_bad_request() {
        let app = test_app!();

        for payload in ["", "{not json", "[1,2,3]"] {
            let request = test::TestRequest::post()
                .uri("/users")
                .set_payload(payload)
                .to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {:?}", payload);
        }
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_get_returns_created_user_verbatim() {
        let app = test_app!();

        let request = test::TestRequest::post()
            .uri("/users")
            .set_payload(r#"{"name":"round","tags":["trip"]}"#)
            .to_request();
        let created: UserResponse =
            serde_json::from_slice(&test::read_body(test::call_service(&app, request).await).await)
                .unwrap();

        let request = test::TestRequest::get()
            .uri(&format!("/users/{}", created.id))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = test::read_body(response).await;
        let fetched: UserResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched, created);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_get_invalid_id_is_bad_request() {
        let app = test_app!();

        let request = test::TestRequest::get().uri("/users/not-an-id").to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = test::read_body(response).await;
        assert_eq!(&body[..], b"Invalid ObjectID");
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_get_unknown_id_is_not_found() {
        let app = test_app!();

        let missing = mongodb::bson::oid::ObjectId::new().to_hex();
        let request = test::TestRequest::get()
            .uri(&format!("/users/{}", missing))
            .to_request();
        let response = test::call_service(&app, request).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_list_contains_created_users() {
        let app = test_app!();

        let mut created = Vec::new();
        for name in ["alpha", "beta"] {
            let request = test::TestRequest::post()
                .uri("/users")
                .set_payload(format!(r#"{{"name":"{}"}}"#, name))
                .to_request();
            let user: UserResponse = serde_json::from_slice(
                &test::read_body(test::call_service(&app, request).await).await,
            )
            .unwrap();
            created.push(user);
        }

        let request = test::TestRequest::get().uri("/users").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let all: Vec<UserResponse> =
            serde_json::from_slice(&test::read_body(response).await).unwrap();
        for user in created {
            assert!(all.contains(&user));
        }
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_concurrent_posts_yield_distinct_ids() {
        let app = test_app!();

        let mut ids = Vec::new();
        for i in 0..8 {
            let request = test::TestRequest::post()
                .uri("/users")
                .set_payload(format!(r#"{{"name":"concurrent-{}"}}"#, i))
                .to_request();
            let user: UserResponse = serde_json::from_slice(
                &test::read_body(test::call_service(&app, request).await).await,
            )
            .unwrap();
            ids.push(user.id);
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }
}
