//! XML namespace helpers.

/// `DAV:` namespace URI.
pub const DAV_NS: &str = "DAV:";

/// Prefix the multistatus root declares for [`DAV_NS`].
pub const DAV_PREFIX: &str = "D";

/// A namespace declaration attached to an element (`xmlns:<prefix>="<uri>"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceBinding {
    /// The declared prefix.
    pub prefix: String,
    /// The namespace URI.
    pub uri: String,
}

impl NamespaceBinding {
    /// Creates a new binding.
    #[must_use]
    pub fn new(prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            uri: uri.into(),
        }
    }

    /// Returns the attribute name declaring this binding.
    #[must_use]
    pub fn attribute_name(&self) -> String {
        format!("xmlns:{}", self.prefix)
    }

    /// Qualifies a local name with this binding's prefix.
    #[must_use]
    pub fn qualify(&self, local_name: &str) -> String {
        format!("{}:{local_name}", self.prefix)
    }
}

/// Splits `prefix:local` into its parts. Names without a colon have no prefix.
#[must_use]
pub fn split_prefixed_name(name: &str) -> (Option<&str>, &str) {
    match name.rsplit_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

/// Returns whether `name` is usable as an element or attribute name: one or
/// two colon-separated parts, each a valid XML `NCName`.
#[must_use]
pub fn is_qualified_name(name: &str) -> bool {
    let mut parts = name.split(':');
    let valid = parts.by_ref().take(2).all(is_ncname);
    valid && parts.next().is_none()
}

fn is_ncname(part: &str) -> bool {
    let mut chars = part.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '\u{b7}'))
}
