use warp::http::StatusCode;

/// The failures that get their own status or message at the web boundary
///
/// Anything else that goes wrong while handling a request is an opaque `anyhow::Error`
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    UrlRequired,
    UnsupportedPlatform,
    MethodNotAllowed,
    /// The proxied video responded with a non-success status
    Download(u16),
    /// The embedded data couldn't be found in the page
    Extraction(&'static str),
}

impl Error {
    /// Client mistakes get their own status, everything else is a server error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UrlRequired | Self::UnsupportedPlatform => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Download(..) | Self::Extraction(..) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UrlRequired => f.write_str("URL is required"),
            Self::UnsupportedPlatform => f.write_str("Unsupported platform"),
            Self::MethodNotAllowed => f.write_str("Method not allowed"),
            Self::Download(status) => write!(f, "Download failed: {}", status),
            Self::Extraction(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {}

/// Flattens the error chain into a single line
pub fn chain(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}

pub fn inspect_err<F, D>(err: &anyhow::Error, kind: F)
where
    F: Fn() -> D,
    D: std::fmt::Display,
{
    let err = err
        .chain()
        .enumerate()
        .fold(String::new(), |mut a, (i, err)| {
            a.push_str(&format!("\n[{}] --> ", i));
            a.push_str(&err.to_string());
            a
        });

    log::warn!("got an error: {} because: {}", kind(), err);
}
