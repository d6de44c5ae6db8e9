//! Resource descriptors.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::href::Href;
use super::status::Status;
use crate::error::{RfcError, RfcResult};

/// Format tag marking a collection.
const COLLECTION_FORMAT: &str = "collection";

/// The representation a resource is exposed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceFormat {
    /// A collection (directory-like resource).
    Collection,
    /// A concrete representation identified by its file extension.
    Media {
        /// Format extension, e.g. `pdf`.
        extension: String,
        /// MIME type, e.g. `application/pdf`.
        mime_type: String,
    },
}

impl ResourceFormat {
    /// Looks up a format by its extension (or the `collection` tag).
    ///
    /// ## Errors
    /// Returns `UnknownFormat` if no MIME type is known for the extension.
    pub fn from_extension(extension: &str) -> RfcResult<Self> {
        let extension = extension.trim().trim_start_matches('.').to_ascii_lowercase();
        if extension == COLLECTION_FORMAT {
            return Ok(Self::Collection);
        }

        mime_guess::from_ext(&extension)
            .first_raw()
            .map(|mime_type| Self::Media {
                mime_type: mime_type.to_owned(),
                extension: extension.clone(),
            })
            .ok_or(RfcError::UnknownFormat(extension))
    }

    /// Chooses the format of the primary resource of a request.
    ///
    /// An explicit format wins. Without one, actions declared as collections
    /// render as [`ResourceFormat::Collection`] and everything else falls back
    /// to `fallback`.
    #[must_use]
    pub fn for_request(
        explicit: Option<Self>,
        metadata: Option<&super::registry::WebDavMetadata>,
        fallback: &Self,
    ) -> Self {
        match (explicit, metadata) {
            (Some(format), _) => format,
            (None, Some(meta)) if meta.collection => Self::Collection,
            (None, _) => fallback.clone(),
        }
    }

    /// Returns whether this is the collection format.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection)
    }

    /// Returns the format tag (`collection` or the extension).
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Collection => COLLECTION_FORMAT,
            Self::Media { extension, .. } => extension,
        }
    }

    /// Returns the MIME type, or `None` for collections.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::Collection => None,
            Self::Media { mime_type, .. } => Some(mime_type),
        }
    }
}

impl Default for ResourceFormat {
    /// Opaque binary content.
    fn default() -> Self {
        Self::Media {
            extension: "bin".to_owned(),
            mime_type: "application/octet-stream".to_owned(),
        }
    }
}

/// An update timestamp as supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatedAt {
    /// Native timestamp.
    Timestamp(DateTime<Utc>),
    /// Textual timestamp, parsed when properties are resolved.
    Text(String),
}

impl UpdatedAt {
    /// Resolves the timestamp.
    ///
    /// Accepts RFC 3339, RFC 2822 and `YYYY-MM-DD hh:mm:ss [+zzzz]` text.
    ///
    /// ## Errors
    /// Returns `InvalidTimestamp` if textual input matches none of these.
    pub fn resolve(&self) -> RfcResult<DateTime<Utc>> {
        match self {
            Self::Timestamp(timestamp) => Ok(*timestamp),
            Self::Text(text) => parse_timestamp(text),
        }
    }
}

impl From<DateTime<Utc>> for UpdatedAt {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Self::Timestamp(timestamp)
    }
}

impl From<&str> for UpdatedAt {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for UpdatedAt {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

fn parse_timestamp(text: &str) -> RfcResult<DateTime<Utc>> {
    let trimmed = text.trim();

    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_rfc2822(trimmed))
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S %z"))
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S").map(|naive| naive.and_utc())
        })
        .map_err(|err| {
            tracing::debug!(error = %err, value = %text, "Unparsable updated_at");
            RfcError::InvalidTimestamp(text.to_owned())
        })
}

/// Per-resource attribute overrides supplied by the host.
///
/// Unset fields leave the target untouched when merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Content length in bytes.
    pub size: Option<u64>,
    /// Representation format.
    pub format: Option<ResourceFormat>,
    /// Last update time.
    pub updated_at: Option<UpdatedAt>,
    /// Per-resource status.
    pub status: Option<Status>,
}

impl ResourceOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ResourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, updated_at: impl Into<UpdatedAt>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Overwrites every field that is set in `other`.
    pub fn merge(&mut self, other: Self) {
        if other.size.is_some() {
            self.size = other.size;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.updated_at.is_some() {
            self.updated_at = other.updated_at;
        }
        if other.status.is_some() {
            self.status = other.status;
        }
    }
}

/// One addressable resource of a render pass.
///
/// Collections always carry a slash-terminated href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    href: Href,
    format: ResourceFormat,
    size: Option<u64>,
    updated_at: Option<UpdatedAt>,
    status: Option<Status>,
}

impl ResourceDescriptor {
    /// Creates a descriptor, normalizing collection hrefs.
    #[must_use]
    pub fn new(url: impl Into<Href>, format: ResourceFormat) -> Self {
        let href = url.into();
        let href = if format.is_collection() {
            href.with_trailing_slash()
        } else {
            href
        };

        Self {
            href,
            format,
            size: None,
            updated_at: None,
            status: None,
        }
    }

    /// Creates a descriptor from host options, using `default_format` when
    /// the options carry none.
    #[must_use]
    pub fn from_options(
        url: impl Into<Href>,
        options: ResourceOptions,
        default_format: &ResourceFormat,
    ) -> Self {
        let format = options.format.unwrap_or_else(|| default_format.clone());
        let mut descriptor = Self::new(url, format);
        descriptor.size = options.size;
        descriptor.updated_at = options.updated_at;
        descriptor.status = options.status;
        descriptor
    }

    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_updated_at(mut self, updated_at: impl Into<UpdatedAt>) -> Self {
        self.updated_at = Some(updated_at.into());
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns the (normalized) href.
    #[must_use]
    pub fn href(&self) -> &Href {
        &self.href
    }

    #[must_use]
    pub fn format(&self) -> &ResourceFormat {
        &self.format
    }

    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[must_use]
    pub fn updated_at(&self) -> Option<&UpdatedAt> {
        self.updated_at.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Returns whether this resource is a collection.
    #[must_use]
    pub fn is_collection(&self) -> bool {
        self.format.is_collection()
    }
}
