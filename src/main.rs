#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    routes::{
        index::get_index_route,
        students::{
            get_students, internal_delete_student, internal_get_console,
            internal_get_edit_student, internal_get_students_table, internal_post_cancel_edit,
            internal_post_student, internal_put_student,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post, put},
};
use std::env;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod api;
mod config;
mod data;
mod endpoints;
mod error;
mod maud_conveniences;
mod routes;
mod state;
mod view;

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
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

fn router(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students))
        .route(
            "/internal/students",
            get(internal_get_console).post(internal_post_student),
        )
        .route("/internal/students/table", get(internal_get_students_table))
        .route("/internal/students/cancel", post(internal_post_cancel_edit))
        .route("/internal/students/{id}/edit", get(internal_get_edit_student))
        .route(
            "/internal/students/{id}",
            put(internal_put_student).delete(internal_delete_student),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv {
        warn!(?e, "Not loading .env, relying on the environment");
    }

    let config = RuntimeConfiguration::new().expect("unable to create config");
    let state = RosterState::new(config).expect("unable to create state");
    let backend_config = state.config().backend_config();
    info!(
        backend = backend_config.base_url(),
        timeout = ?backend_config.timeout(),
        "Using student backend"
    );

    let app = router(state);

    let server_ip = env::var("ROSTER_SERVER_IP").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = TcpListener::bind(&server_ip)
        .await
        .expect("unable to listen on server ip");

    info!(?server_ip, "Listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("unable to serve app");
}
