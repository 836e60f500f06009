use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::handlers::{companies, jobs, system};
use crate::middleware::{authenticate_jwt, ensure_admin};

/// The full application: public reads, admin-only writes
pub fn app() -> Router {
    let settings = config::config();

    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(company_routes())
        .merge(job_routes())
        // Global middleware
        .layer(middleware::from_fn(authenticate_jwt))
        .layer(DefaultBodyLimit::max(settings.api.max_request_size_bytes))
        .layer(cors_layer());

    if settings.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn company_routes() -> Router {
    let public = Router::new()
        .route("/companies", get(companies::list))
        .route("/companies/:handle", get(companies::get));

    let admin = Router::new()
        .route("/companies", post(companies::create))
        .route("/companies/:handle", patch(companies::update).delete(companies::remove))
        .route_layer(middleware::from_fn(ensure_admin));

    public.merge(admin)
}

fn job_routes() -> Router {
    let public = Router::new()
        .route("/jobs", get(jobs::list))
        .route("/jobs/:id", get(jobs::get));

    let admin = Router::new()
        .route("/jobs", post(jobs::create))
        .route("/jobs/:id", patch(jobs::update).delete(jobs::remove))
        .route_layer(middleware::from_fn(ensure_admin));

    public.merge(admin)
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Skipping invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
