//! Salvo host exposing a directory tree over `WebDAV` PROPFIND.

pub mod app;
pub mod error;
pub mod host;
