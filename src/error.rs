use chromiumoxide::error::CdpError;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An exception thrown by a script running in the page.
    #[error("Script execution failed: {0}")]
    Execution(String),
    /// Transport failure talking to the browser.
    #[error("Chromium Error: {0}")]
    Cdp(#[from] CdpError),

    #[error("Expected a row of 3 cells, got {cells}.")]
    MalformedRow { cells: usize },
    #[error("Couldn't parse an amount from cell: {0:?}")]
    AmountParse(String),
    #[error("Row extraction returned an unexpected value: {0}")]
    UnexpectedScriptResult(serde_json::Error),

    #[error("Couldn't configure the browser: {0}")]
    BrowserConfig(String),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),
}

impl Error {
    /// True for failures of the remote page or the transport to it.
    pub fn is_execution(&self) -> bool {
        matches!(self, Error::Execution(_) | Error::Cdp(_))
    }
}
