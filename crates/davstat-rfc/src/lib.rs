//! `WebDAV` PROPFIND rendering engine.
//!
//! Turns a requested resource, a parsed property request, a traversal depth
//! and a host-supplied enumeration of sub-resources into a `DAV:multistatus`
//! document. Everything HTTP-facing (routing, headers, persistence) belongs to
//! the host.

pub mod error;
pub mod rfc;
