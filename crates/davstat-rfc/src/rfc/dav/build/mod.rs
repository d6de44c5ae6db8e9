//! `WebDAV` XML serialization for responses.

pub mod multistatus;

pub use multistatus::serialize_multistatus;
