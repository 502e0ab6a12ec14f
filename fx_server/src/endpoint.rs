//! HTTP surface of the relay.
//!
//! `GET /cotacao` runs one acquisition and answers `200 {"Bid": <number>}`.
//! Any pipeline error becomes a bare `500`; the cause is logged for the
//! operator and never sent to the caller. `GET /health` answers `OK` without
//! touching the pipeline.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use fx_common::BidResponse;
use fx_common::net::{HEALTH_PATH, RELAY_PATH};
use log::error;
use rust_decimal::prelude::ToPrimitive;

use crate::pipeline::AcquisitionPipeline;

/// Shared state handed to every request.
#[derive(Clone)]
pub struct RelayState {
    pipeline: Arc<AcquisitionPipeline>,
}

impl RelayState {
    /// Wrap a pipeline for use by the router.
    pub fn new(pipeline: AcquisitionPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Build the relay router.
pub fn create_router(state: RelayState) -> Router {
    Router::new()
        .route(RELAY_PATH, get(get_quote))
        .route(HEALTH_PATH, get(health_check))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn get_quote(State(state): State<RelayState>) -> Response {
    let acquired = match state.pipeline.acquire_now().await {
        Ok(acquired) => acquired,
        Err(e) => {
            error!("Quote acquisition failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match acquired.bid.to_f64() {
        Some(bid) => (StatusCode::OK, Json(BidResponse { bid })).into_response(),
        None => {
            error!("Bid {} does not fit in a JSON number", acquired.bid);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
