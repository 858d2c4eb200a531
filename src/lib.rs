use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    serve::Serve,
    Json, Router,
};

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::error::Error;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Level;

use domain::CampAPIError;
pub mod routes;
use crate::utils::tracing::*;
use routes::{
    camps::{
        delete_camp, get_camp_list, get_camp_report, join_camp, new_camp,
        update_camp,
    },
    rooms::{delete_room, get_room_list, new_room, update_room},
    workers::{
        assign_worker, delete_worker, get_worker, get_worker_list,
        move_worker, new_worker, unassign_worker, update_worker,
    },
};
pub mod app_state;
pub mod domain;
pub mod services;
use app_state::AppState;
pub mod utils;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CampAPIError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            CampAPIError::AccessDenied(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::FORBIDDEN, format!("Access denied for camp: {id}"))
            }
            CampAPIError::AlreadyMember => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, "Already a member of camp".to_string())
            }
            CampAPIError::IDNotFoundError(id) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, format!("{id}"))
            }
            CampAPIError::InvalidCampCode => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::NOT_FOUND, "Invalid camp code".to_string())
            }
            CampAPIError::JsonRejection(rejection) => {
                log_error_chain(&self, Level::DEBUG);
                (rejection.status(), rejection.body_text())
            }
            CampAPIError::OccupancyConflict(conflict) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::CONFLICT, format!("{conflict}"))
            }
            CampAPIError::QueryRejection(rejection) => {
                log_error_chain(&self, Level::DEBUG);
                (rejection.status(), rejection.body_text())
            }
            CampAPIError::RoomNumberTaken(number) => {
                log_error_chain(&self, Level::DEBUG);
                (
                    StatusCode::CONFLICT,
                    format!("Room number already in use: {number}"),
                )
            }
            CampAPIError::UnexpectedError(_) => {
                log_error_chain(&self, Level::ERROR);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                )
            }
            CampAPIError::ValidationError(message) => {
                log_error_chain(&self, Level::DEBUG);
                (StatusCode::BAD_REQUEST, format!("{message}"))
            }
        };
        let body = Json(ErrorResponse {
            error: error_message,
        });
        (status, body).into_response()
    }
}

fn log_error_chain(e: &(dyn Error + 'static), debug_level: Level) {
    let separator =
        "\n-----------------------------------------------------------------------------------\n";
    let mut report = format!("{}{:?}\n", separator, e);
    let mut current = e.source();
    while let Some(cause) = current {
        let str = format!("Caused by:\n\n{:?}", cause);
        report = format!("{}\n{}", report, str);
        current = cause.source();
    }
    report = format!("{}\n{}", report, separator);
    match debug_level {
        Level::ERROR => tracing::error!("{}", report),
        Level::WARN => tracing::warn!("{}", report),
        Level::INFO => tracing::info!("{}", report),
        Level::DEBUG => tracing::debug!("{}", report),
        Level::TRACE => tracing::trace!("{}", report),
    }
}

pub struct Application {
    server: Serve<Router, Router>,
    pub address: String,
}

impl Application {
    pub async fn build(
        app_state: AppState,
        address: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let allowed_origins = [
            "http://localhost:3000".parse()?,
            "http://127.0.0.1:3000".parse()?,
        ];

        let cors = CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_credentials(true)
            .allow_origin(allowed_origins);

        let router = Router::new()
            .route("/camps/new", post(new_camp))
            .route("/camps/list", get(get_camp_list))
            .route("/camps/join", post(join_camp))
            .route("/camps/update", put(update_camp))
            .route("/camps/delete", delete(delete_camp))
            .route("/camps/report", get(get_camp_report))
            .route("/rooms/new", post(new_room))
            .route("/rooms/list", get(get_room_list))
            .route("/rooms/update", put(update_room))
            .route("/rooms/delete", delete(delete_room))
            .route("/workers/new", post(new_worker))
            .route("/workers/get", get(get_worker))
            .route("/workers/list", get(get_worker_list))
            .route("/workers/update", put(update_worker))
            .route("/workers/assign", post(assign_worker))
            .route("/workers/unassign", post(unassign_worker))
            .route("/workers/move", post(move_worker))
            .route("/workers/delete", delete(delete_worker))
            .with_state(app_state)
            .layer(cors)
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            );

        let listener = tokio::net::TcpListener::bind(address).await?;
        let address = listener.local_addr()?.to_string();
        let server = axum::serve(listener, router);

        Ok(Application { server, address })
    }

    pub async fn run(self) -> Result<(), std::io::Error> {
        tracing::info!("listening on {}", &self.address);
        self.server.with_graceful_shutdown(shutdown_signal()).await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

pub async fn get_postgres_pool(
    url: &Secret<String>,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(url.expose_secret())
        .await
}
