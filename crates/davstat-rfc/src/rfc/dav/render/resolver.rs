//! Computed property values.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::RfcResult;
use crate::rfc::dav::core::{
    ElementThunk, PropertyValue, ResourceDescriptor, StandardProperty, UpdatedAt, XmlFragment,
};

/// Bytes reported as used. Quota accounting is not tracked.
pub const QUOTA_USED_BYTES: u64 = 0;

/// Bytes reported as available (10 GiB).
pub const QUOTA_AVAILABLE_BYTES: u64 = 10 * 1024 * 1024 * 1024;

/// `Tue, 04 Mar 2014 10:00:00 +0000`
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Formats a timestamp for `creationdate` (RFC 3339, UTC, whole seconds).
#[must_use]
pub fn format_creation_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formats a timestamp for `getlastmodified` (RFC 2822).
#[must_use]
pub fn format_http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(HTTP_DATE_FORMAT).to_string()
}

/// The live properties of one resource, in fixed output order.
///
/// An entry without a value is still a known property and renders as an
/// empty element (e.g. `getcontentlength` of a collection).
#[derive(Debug, Clone)]
pub struct ComputedProperties {
    entries: Vec<(StandardProperty, Option<PropertyValue>)>,
}

impl ComputedProperties {
    /// Computes the properties of `resource`.
    ///
    /// A resource without `updated_at` is treated as modified at `now`.
    ///
    /// ## Errors
    /// Returns `InvalidTimestamp` if a textual `updated_at` cannot be parsed.
    pub fn resolve(resource: &ResourceDescriptor, now: DateTime<Utc>) -> RfcResult<Self> {
        let updated_at = resource
            .updated_at()
            .map(UpdatedAt::resolve)
            .transpose()?
            .unwrap_or(now);

        let mut entries = vec![
            (
                StandardProperty::QuotaUsedBytes,
                Some(PropertyValue::Integer(QUOTA_USED_BYTES)),
            ),
            (
                StandardProperty::QuotaAvailableBytes,
                Some(PropertyValue::Integer(QUOTA_AVAILABLE_BYTES)),
            ),
            (
                StandardProperty::CreationDate,
                Some(PropertyValue::Text(format_creation_date(&updated_at))),
            ),
            (
                StandardProperty::GetLastModified,
                Some(PropertyValue::Text(format_http_date(&updated_at))),
            ),
            (
                StandardProperty::GetContentLength,
                resource.size().map(PropertyValue::Integer),
            ),
            (
                StandardProperty::GetContentType,
                resource
                    .format()
                    .mime_type()
                    .map(|mime| PropertyValue::Text(mime.to_owned())),
            ),
        ];

        if resource.is_collection() {
            entries.push((
                StandardProperty::ResourceType,
                Some(PropertyValue::Element(ElementThunk::new(|| {
                    XmlFragment::empty("collection")
                }))),
            ));
        }

        Ok(Self { entries })
    }

    /// Looks up a value by element name. Unknown and valueless properties
    /// both yield `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(property, _)| property.name() == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Returns the names of every computed property, in output order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(property, _)| property.name())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::error::RfcError;
    use crate::rfc::dav::core::ResourceFormat;

    fn fixed() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 3, 4, 10, 0, 0).unwrap()
    }

    #[test]
    fn date_formats() {
        assert_eq!(format_creation_date(&fixed()), "2014-03-04T10:00:00Z");
        assert_eq!(format_http_date(&fixed()), "Tue, 04 Mar 2014 10:00:00 +0000");
    }

    #[test]
    fn collection_properties() {
        let resource = ResourceDescriptor::new("/docs", ResourceFormat::Collection)
            .with_updated_at(fixed());
        let props = ComputedProperties::resolve(&resource, Utc::now()).unwrap();

        let names: Vec<_> = props.names().collect();
        assert_eq!(
            names,
            [
                "quota-used-bytes",
                "quota-available-bytes",
                "creationdate",
                "getlastmodified",
                "getcontentlength",
                "getcontenttype",
                "resourcetype",
            ]
        );
        assert!(props.get("getcontenttype").is_none());
        assert!(props.get("getcontentlength").is_none());
        assert!(matches!(props.get("resourcetype"), Some(PropertyValue::Element(_))));
        assert_eq!(
            props.get("quota-available-bytes").and_then(PropertyValue::as_text).as_deref(),
            Some("10737418240")
        );
    }

    #[test]
    fn plain_resource_properties() {
        let pdf = ResourceFormat::from_extension("pdf").unwrap();
        let resource = ResourceDescriptor::new("/docs/a.pdf", pdf)
            .with_size(42)
            .with_updated_at("2014-03-04 10:00:00 +0000");
        let props = ComputedProperties::resolve(&resource, Utc::now()).unwrap();

        assert_eq!(props.names().count(), 6);
        assert!(props.get("resourcetype").is_none());
        assert_eq!(
            props.get("getcontentlength").and_then(PropertyValue::as_text).as_deref(),
            Some("42")
        );
        assert_eq!(
            props.get("getcontenttype").and_then(PropertyValue::as_text).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(
            props.get("getlastmodified").and_then(PropertyValue::as_text).as_deref(),
            Some("Tue, 04 Mar 2014 10:00:00 +0000")
        );
    }

    #[test]
    fn missing_updated_at_uses_now() {
        let resource = ResourceDescriptor::new("/docs/", ResourceFormat::Collection);
        let props = ComputedProperties::resolve(&resource, fixed()).unwrap();
        assert_eq!(
            props.get("creationdate").and_then(PropertyValue::as_text).as_deref(),
            Some("2014-03-04T10:00:00Z")
        );
    }

    #[test]
    fn invalid_updated_at_fails() {
        let resource = ResourceDescriptor::new("/docs/", ResourceFormat::Collection)
            .with_updated_at("yesterday-ish");
        assert!(matches!(
            ComputedProperties::resolve(&resource, fixed()),
            Err(RfcError::InvalidTimestamp(_))
        ));
    }
}
