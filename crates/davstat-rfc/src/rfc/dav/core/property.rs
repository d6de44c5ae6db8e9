//! DAV property types.

use std::fmt;
use std::sync::Arc;

/// The live properties computed for every resource, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardProperty {
    QuotaUsedBytes,
    QuotaAvailableBytes,
    CreationDate,
    GetLastModified,
    GetContentLength,
    GetContentType,
    ResourceType,
}

impl StandardProperty {
    /// Returns the element (local) name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::QuotaUsedBytes => "quota-used-bytes",
            Self::QuotaAvailableBytes => "quota-available-bytes",
            Self::CreationDate => "creationdate",
            Self::GetLastModified => "getlastmodified",
            Self::GetContentLength => "getcontentlength",
            Self::GetContentType => "getcontenttype",
            Self::ResourceType => "resourcetype",
        }
    }
}

impl fmt::Display for StandardProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A self-contained XML element in the `DAV:` namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlFragment {
    /// Local element name.
    pub name: String,
    /// Optional text content.
    pub text: Option<String>,
    /// Child elements.
    pub children: Vec<XmlFragment>,
}

impl XmlFragment {
    /// Creates an empty element, e.g. `<D:collection/>`.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Returns whether the element has neither text nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }
}

/// A deferred producer of a structural property value.
#[derive(Clone)]
pub struct ElementThunk(Arc<dyn Fn() -> XmlFragment + Send + Sync>);

impl ElementThunk {
    /// Wraps a producer.
    pub fn new(producer: impl Fn() -> XmlFragment + Send + Sync + 'static) -> Self {
        Self(Arc::new(producer))
    }

    /// Runs the producer.
    #[must_use]
    pub fn produce(&self) -> XmlFragment {
        (self.0)()
    }
}

impl fmt::Debug for ElementThunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementThunk").finish_non_exhaustive()
    }
}

/// A computed property value.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// Text content.
    Text(String),
    /// Integer value.
    Integer(u64),
    /// Structural value emitted as a nested element.
    Element(ElementThunk),
}

impl PropertyValue {
    /// Returns the textual content of scalar values.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Integer(value) => Some(value.to_string()),
            Self::Element(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_thunk_produces_fragment() {
        let thunk = ElementThunk::new(|| XmlFragment::empty("collection"));
        let fragment = thunk.produce();

        assert_eq!(fragment.name, "collection");
        assert!(fragment.is_empty());
    }

    #[test]
    fn scalar_text() {
        assert_eq!(PropertyValue::Integer(42).as_text().as_deref(), Some("42"));
        assert_eq!(
            PropertyValue::Text("text/plain".into()).as_text().as_deref(),
            Some("text/plain")
        );
        let element = PropertyValue::Element(ElementThunk::new(|| XmlFragment::empty("x")));
        assert!(element.as_text().is_none());
    }
}
