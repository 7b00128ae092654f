use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum HintError {
    #[snafu(display("Failed to build http client: {source}"))]
    Client { source: reqwest::Error },

    #[snafu(display("Hint request failed: {source}"))]
    Request { source: reqwest::Error },

    #[snafu(display("Hint backend responded with status {status}: {body}"))]
    Status { status: u16, body: String },

    #[snafu(display("Hint backend response has no text"))]
    MissingContent,
}

pub type HintResult<T> = std::result::Result<T, HintError>;
