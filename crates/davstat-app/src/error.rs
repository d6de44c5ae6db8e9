use salvo::http::StatusCode;
use thiserror::Error;

use davstat_core::error::CoreError;
use davstat_rfc::error::RfcError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    RfcError(#[from] RfcError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// ## Summary
    /// Maps the error onto the HTTP status answered to the client.
    ///
    /// Malformed requests are the client's fault; everything else, including
    /// missing `WebDAV` metadata, is a server configuration problem.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::CoreError(CoreError::InvalidInput(_))
            | Self::RfcError(RfcError::UnknownPropertyRequestSyntax(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use davstat_rfc::rfc::dav::parse::ParseError;

    use super::*;

    #[test]
    fn client_errors_are_bad_requests() {
        let err = AppError::from(RfcError::from(ParseError::missing_element("prop")));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::from(CoreError::InvalidInput("../etc".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn configuration_errors_are_server_errors() {
        let err = AppError::from(RfcError::MissingWebDavMetadata("/x".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = AppError::from(std::io::Error::other("disk gone"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
