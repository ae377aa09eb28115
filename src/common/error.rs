use std::path::PathBuf;

use snafu::prelude::*;

use crate::cloudflare::ApiError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to read zone file {}: {source}", path.display()))]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse zone file: {source}"))]
    Parse {
        source: hickory_proto::serialize::txt::ParseError,
    },
    #[snafu(display("Zone {name} not found. Create it manually or pass --auto-create"))]
    ZoneNotFound { name: String },
    #[snafu(display("{method} {path} failed: {source}"))]
    Network {
        method: String,
        path: String,
        source: reqwest::Error,
    },
    #[snafu(display("{method} {path} rejected: {}", render_api_errors(errors)))]
    Api {
        method: String,
        path: String,
        query: Vec<(String, String)>,
        body: Option<String>,
        errors: Vec<ApiError>,
    },
    #[snafu(display("{} record operations failed: {}", failures.len(), render_failures(failures)))]
    Apply { failures: Vec<Error> },
    #[snafu(display("{message}"))]
    Config { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

fn render_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|err| format!("{} {}", err.code, err.message))
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_failures(failures: &[Error]) -> String {
    failures
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
