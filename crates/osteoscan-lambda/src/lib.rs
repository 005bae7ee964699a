//! osteoscan-lambda
//!
//! The HTTP API: axum routes over the intake service, run on AWS Lambda.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use osteoscan_bedrock::AnalysisModel;
use osteoscan_core::image::MAX_IMAGE_BYTES;

use state::AppState;

/// Build the API router over `state`.
pub fn router<M: AnalysisModel + 'static>(state: AppState<M>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/patients",
            get(routes::patients::list_patients::<M>).post(routes::patients::create_patient::<M>),
        )
        .route(
            "/patients/{id}",
            get(routes::patients::get_patient::<M>).put(routes::patients::update_patient::<M>),
        )
        .route(
            "/uploads",
            post(routes::uploads::upload_image::<M>).layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES)),
        )
        .route(
            "/analyses",
            get(routes::analyses::list_analyses::<M>)
                .post(routes::analyses::submit_analysis::<M>),
        )
        .route("/analyses/{id}", get(routes::analyses::get_analysis::<M>))
        .route(
            "/analyses/{id}/approve",
            post(routes::analyses::approve_analysis::<M>),
        )
        .route(
            "/analyses/{id}/revalidate",
            post(routes::analyses::revalidate_analysis::<M>),
        )
        .route("/reports", get(routes::reports::list_reports::<M>))
        .route(
            "/reports/{id}/render",
            get(routes::reports::render_analysis_report::<M>),
        )
        .route("/dashboard", get(routes::dashboard::dashboard::<M>))
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::audit::audit_log))
                .layer(cors),
        )
        .with_state(state)
}
