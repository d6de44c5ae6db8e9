use thiserror::Error;

use crate::rfc::dav::parse::ParseError;

/// Errors raised while parsing a property request or rendering a multistatus document
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("no WebDAV metadata found for {0}, declare it with enable_webdav_for")]
    MissingWebDavMetadata(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Unknown status code: {0}")]
    UnknownStatusCode(String),

    #[error("Unknown property request syntax: {0}")]
    UnknownPropertyRequestSyntax(#[from] ParseError),

    #[error("{0} is not a valid MIME type file extension")]
    UnknownFormat(String),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
