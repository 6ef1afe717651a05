// File: services/reserva_backend/src/main.rs
use axum::{routing::get, Router};
use reserva_booking::routes as booking_routes;
use reserva_config::load_config;
use reserva_supabase::SupabaseClient;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::warn;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    reserva_common::logging::init();

    if !config.use_supabase {
        warn!("use_supabase is disabled; remote calls will fail until it is configured");
    }
    let supabase_config = config
        .supabase
        .clone()
        .expect("Supabase config missing");
    let supabase = Arc::new(SupabaseClient::new(supabase_config));

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Reserva API!" }))
        .merge(booking_routes::routes(config.clone(), supabase.clone()));

    // The widget is embedded in the marketing site and calls from the browser
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(CorsLayer::permissive());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use reserva_booking::doc::BookingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Reserva API",
                version = "0.1.0",
                description = "Gym booking service API docs"
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(BookingApiDoc::openapi());
        println!("📖 Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    // Serve the generated marketing site in dev mode
    if cfg!(debug_assertions) {
        println!("Running in development mode, serving static files from ./dist");
        app = app.fallback_service(ServeDir::new("dist"));
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await.unwrap();
    println!("Starting server at http://{}", addr);
    println!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}
