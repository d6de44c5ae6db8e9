/// Header names and values shared by the engine host
pub const DAV_HEADER: &str = "DAV";
pub const DEPTH_HEADER: &str = "Depth";
pub const ALLOW_HEADER: &str = "Allow";

/// Compliance class advertised in the `DAV` response header
pub const DAV_COMPLIANCE_CLASS: &str = "1";

pub const XML_MIME_TYPE: &str = "application/xml";
pub const XML_CONTENT_TYPE: &str = const_str::concat!(XML_MIME_TYPE, "; charset=utf-8");

/// Controller names the filesystem host registers its actions under
pub const FOLDERS_CONTROLLER: &str = "folders";
pub const FILES_CONTROLLER: &str = "files";

pub const INDEX_ACTION: &str = "index";
pub const SHOW_ACTION: &str = "show";
