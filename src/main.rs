mod api;
mod database;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let database_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "default".to_string());

    log::info!("🚀 Starting User Service...");
    log::info!("📊 Database: {} ({})", database_url, database_name);

    // Connect failure is fatal, there is no retry at this layer.
    let db = database::MongoDB::new(&database_url, &database_name)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db);

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi),
            )
            .route("/health", web::get().to(api::health::health_check))
            .route("/users", web::get().to(api::users::get_users))
            .route("/users", web::post().to(api::users::add_user))
            .route("/users/{id}", web::get().to(api::users::get_user))
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
