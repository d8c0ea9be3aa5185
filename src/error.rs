use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse request timeout {:?}", original))]
    ParseTimeout {
        source: ParseIntError,
        original: String,
    },
    #[snafu(display("Unable to build HTTP client"))]
    BuildClient { source: reqwest::Error },
    #[snafu(display("Error sending request to `{}`", endpoint))]
    SendRequest {
        source: reqwest::Error,
        endpoint: String,
    },
    #[snafu(display("Error decoding response from `{}`", endpoint))]
    DecodeResponse {
        source: reqwest::Error,
        endpoint: String,
    },
    #[snafu(display("Backend returned {}: {}", status, message))]
    BackendStatus { status: StatusCode, message: String },
    #[snafu(display("Unable to find student with ID: {}", id))]
    MissingStudent { id: String },
}

impl RosterError {
    /// The text shown to the user when a backend operation fails.
    ///
    /// Server-supplied messages win; everything else falls back to the
    /// display of the error and its immediate source.
    pub fn user_message(&self) -> String {
        match self {
            Self::BackendStatus { message, .. } => message.clone(),
            Self::SendRequest { source, .. } | Self::DecodeResponse { source, .. } => {
                format!("{self} ({source})")
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //upstream broke

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error "}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } | Self::ParseTimeout { .. } => ISE,
            Self::BuildClient { .. } => ISE,
            Self::SendRequest { .. } | Self::DecodeResponse { .. } => BG,
            Self::BackendStatus { .. } => BG,
            Self::MissingStudent { .. } => NF,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.user_message()))).into_response()
    }
}
