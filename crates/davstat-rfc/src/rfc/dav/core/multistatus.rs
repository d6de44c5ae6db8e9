//! Multistatus response types.

use super::href::Href;
use super::namespace::NamespaceBinding;
use super::property::XmlFragment;

/// A multistatus document (RFC 4918 §13).
#[derive(Debug, Clone, Default)]
pub struct Multistatus {
    /// Individual responses, primary resource first.
    pub responses: Vec<Response>,
}

impl Multistatus {
    /// Creates an empty multistatus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a response.
    pub fn add_response(&mut self, response: impl Into<Response>) {
        self.responses.push(response.into());
    }
}

/// A `response` element.
#[derive(Debug, Clone)]
pub enum Response {
    /// Property-driven response.
    Propstat(PropstatResponse),
    /// Resource-level response without a `prop` block.
    Status(StatusResponse),
}

impl From<PropstatResponse> for Response {
    fn from(response: PropstatResponse) -> Self {
        Self::Propstat(response)
    }
}

impl From<StatusResponse> for Response {
    fn from(response: StatusResponse) -> Self {
        Self::Status(response)
    }
}

/// A response carrying property values.
#[derive(Debug, Clone)]
pub struct PropstatResponse {
    /// The resource href.
    pub href: Href,
    /// Property groups sharing one status.
    pub propstats: Vec<Propstat>,
}

/// A group of properties sharing one status.
#[derive(Debug, Clone)]
pub struct Propstat {
    /// Namespace declarations emitted on the `propstat` element.
    pub namespaces: Vec<NamespaceBinding>,
    /// Full status line, e.g. `HTTP/1.1 200 OK`.
    pub status: String,
    /// Property elements in output order.
    pub properties: Vec<RenderedProperty>,
}

/// One element of a `prop` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedProperty {
    /// Qualified element name, e.g. `D:getlastmodified` or `lp1:color`.
    pub element_name: String,
    /// Attributes forwarded from the request.
    pub attributes: Vec<(String, String)>,
    pub content: PropertyContent,
}

/// Content of a rendered property element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyContent {
    Empty,
    Text(String),
    Element(XmlFragment),
}

/// A resource-level response: `href`, `status` and an optional `error`.
#[derive(Debug, Clone)]
pub struct StatusResponse {
    pub href: Href,
    /// Full status line.
    pub status: String,
    /// Error description.
    pub error: Option<String>,
}
