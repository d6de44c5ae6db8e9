//! A directory tree served as `WebDAV` resources.
//!
//! Directories are routed to `folders#index` and registered as collections;
//! files are routed to `files#show` and may be exposed in additional formats.

use std::ffi::OsStr;
use std::fs::{DirEntry, Metadata};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::AppResult;
use davstat_core::config::DavConfig;
use davstat_core::constants::{FILES_CONTROLLER, FOLDERS_CONTROLLER, INDEX_ACTION, SHOW_ACTION};
use davstat_core::error::CoreError;
use davstat_rfc::rfc::dav::{
    ActionId, ActionRegistry, Depth, Href, PropfindRequest, RenderContext, Renderer,
    ResourceFormat, ResourceOptions, RouteResolver, WebDavOptions, render,
};

/// A collection member: its href and attributes.
type Member = (String, ResourceOptions);

#[derive(Debug)]
pub struct FsSite {
    root: PathBuf,
    registry: ActionRegistry,
    default_format: ResourceFormat,
}

impl FsSite {
    /// Serves `root`, exposing files additionally in each of `file_accept`.
    #[must_use]
    pub fn new(
        root: impl Into<PathBuf>,
        default_format: ResourceFormat,
        file_accept: &[String],
    ) -> Self {
        let mut registry = ActionRegistry::new();
        registry
            .enable_webdav_for(FOLDERS_CONTROLLER, &[INDEX_ACTION], &WebDavOptions::new())
            .enable_webdav_for(
                FILES_CONTROLLER,
                &[SHOW_ACTION],
                &WebDavOptions::new()
                    .collection(false)
                    .accept(file_accept.iter().cloned()),
            );

        Self {
            root: root.into(),
            registry,
            default_format,
        }
    }

    /// ## Summary
    /// Builds the site from the `dav` settings.
    ///
    /// ## Errors
    /// Returns a configuration error if a configured format is unknown.
    pub fn from_settings(dav: &DavConfig) -> AppResult<Self> {
        let known = |extension: &str| {
            ResourceFormat::from_extension(extension)
                .map_err(|err| CoreError::ConfigError(err.to_string()))
        };

        let default_format = known(&dav.default_format)?;
        for extension in &dav.file_accept {
            known(extension)?;
        }

        Ok(Self::new(&dav.root, default_format, &dav.file_accept))
    }

    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// ## Summary
    /// Maps a (percent-encoded) request path onto the served tree.
    ///
    /// ## Errors
    /// Returns `InvalidInput` for undecodable paths and paths with `..` segments.
    pub fn local_path(&self, path: &str) -> AppResult<PathBuf> {
        let decoded = urlencoding::decode(path)
            .map_err(|err| CoreError::InvalidInput(format!("{path}: {err}")))?;

        let mut local = self.root.clone();
        for segment in decoded.split('/').filter(|s| !s.is_empty() && *s != ".") {
            if segment == ".." {
                return Err(CoreError::InvalidInput(format!("{path}: parent segment")).into());
            }
            local.push(segment);
        }
        Ok(local)
    }

    /// ## Summary
    /// Renders the PROPFIND multistatus document for `path`.
    ///
    /// A path that does not exist renders a resource-level `404 Not Found`.
    ///
    /// ## Errors
    /// Returns an error for invalid paths, unreadable directories and any
    /// rendering failure.
    #[tracing::instrument(skip(self, request))]
    pub fn render_propfind(
        &self,
        path: &str,
        request: PropfindRequest,
        depth: Depth,
    ) -> AppResult<(String, Depth)> {
        let local = self.local_path(path)?;
        let Ok(metadata) = std::fs::metadata(&local) else {
            tracing::debug!(local = %local.display(), "Resource not found");
            return Ok((Renderer::new().not_found(path)?, depth));
        };

        let mut ctx = RenderContext::new(path, self, &self.registry)
            .with_request(request)
            .with_depth(depth)
            .with_default_format(self.default_format.clone())
            .with_resource(entry_options(&metadata));

        if metadata.is_dir() {
            let members = members(self, path, &local)?;
            ctx = ctx.with_responder(move |selector| {
                for (href, options) in members {
                    selector.subresource(href, options);
                }
                Ok(())
            });
        } else if let Some(format) = format_of(&local) {
            ctx = ctx.with_format(format);
        } else {
            // The default format applies.
        }

        Ok(render(ctx)?)
    }
}

impl RouteResolver for FsSite {
    fn recognize(&self, path: &str) -> Option<ActionId> {
        let metadata = std::fs::metadata(self.local_path(path).ok()?).ok()?;
        if metadata.is_dir() {
            Some(ActionId::new(FOLDERS_CONTROLLER, INDEX_ACTION))
        } else {
            Some(ActionId::new(FILES_CONTROLLER, SHOW_ACTION))
        }
    }
}

/// Lists the routable entries of `dir`, sorted by name.
///
/// Entries the site cannot route back to (dangling symlinks, names that are
/// not UTF-8) are skipped.
fn members(site: &FsSite, path: &str, dir: &Path) -> AppResult<Vec<Member>> {
    let base = Href::new(path).with_trailing_slash();

    let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(DirEntry::file_name);

    let mut members = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!(entry = %entry.path().display(), "Skipping entry with non UTF-8 name");
            continue;
        };

        let href = String::from(base.join(&urlencoding::encode(&name)));
        if site.recognize(&href).is_none() {
            tracing::warn!(%href, "Skipping unroutable entry");
            continue;
        }

        let metadata = std::fs::metadata(entry.path())?;
        let mut options = entry_options(&metadata);
        // Directories are rendered as collections whatever their name.
        if let Some(format) = format_of(&entry.path()) {
            options = options.with_format(format);
        }
        members.push((href, options));
    }

    Ok(members)
}

fn entry_options(metadata: &Metadata) -> ResourceOptions {
    let mut options = ResourceOptions::new();
    if metadata.is_file() {
        options = options.with_size(metadata.len());
    }
    if let Ok(modified) = metadata.modified() {
        options = options.with_updated_at(DateTime::<Utc>::from(modified));
    }
    options
}

/// Format of a file by its extension, if known.
fn format_of(path: &Path) -> Option<ResourceFormat> {
    path.extension()
        .and_then(OsStr::to_str)
        .and_then(|extension| ResourceFormat::from_extension(extension).ok())
        .filter(|format| !format.is_collection())
}

#[cfg(test)]
mod tests {
    use super::*;
    use davstat_rfc::rfc::dav::RequestedProperty;

    use crate::error::AppError;

    fn site_with(file_accept: &[String]) -> (tempfile::TempDir, FsSite) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
        std::fs::write(dir.path().join("my notes.md"), "# notes").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let site = FsSite::new(dir.path(), ResourceFormat::default(), file_accept);
        (dir, site)
    }

    fn hrefs(xml: &str) -> Vec<&str> {
        xml.split("<D:href>")
            .skip(1)
            .filter_map(|rest| rest.split('<').next())
            .collect()
    }

    fn props(names: &[&str]) -> PropfindRequest {
        PropfindRequest::prop(names.iter().map(|n| RequestedProperty::new(*n)).collect())
    }

    #[test]
    fn local_path_decodes_and_rejects_parents() {
        let (dir, site) = site_with(&[]);

        assert_eq!(
            site.local_path("/my%20notes.md").unwrap(),
            dir.path().join("my notes.md")
        );
        assert_eq!(site.local_path("/").unwrap(), dir.path());
        assert!(matches!(
            site.local_path("/sub/../../etc"),
            Err(AppError::CoreError(CoreError::InvalidInput(_)))
        ));
    }

    #[test]
    fn recognize_directories_and_files() {
        let (_dir, site) = site_with(&[]);

        assert_eq!(
            site.recognize("/sub"),
            Some(ActionId::new(FOLDERS_CONTROLLER, INDEX_ACTION))
        );
        assert_eq!(
            site.recognize("/a.txt"),
            Some(ActionId::new(FILES_CONTROLLER, SHOW_ACTION))
        );
        assert_eq!(site.recognize("/missing"), None);
        assert_eq!(site.registry().len(), 2);
    }

    #[test]
    fn directory_lists_sorted_members() {
        let (_dir, site) = site_with(&[]);

        let (xml, depth) = site
            .render_propfind("/", props(&["getcontentlength", "resourcetype"]), Depth::One)
            .unwrap();

        assert_eq!(depth, Depth::One);
        assert_eq!(hrefs(&xml), ["/", "/a.txt", "/my%20notes.md", "/sub/"]);
        // Three declared members size the root collection.
        assert!(xml.contains("<D:getcontentlength>3</D:getcontentlength>"));
        assert!(xml.contains("<D:getcontentlength>5</D:getcontentlength>"));
    }

    #[test]
    fn file_uses_its_extension_format() {
        let (_dir, site) = site_with(&[]);

        let (xml, _) = site
            .render_propfind("/a.txt", props(&["getcontenttype"]), Depth::Zero)
            .unwrap();
        assert!(xml.contains("<D:getcontenttype>text/plain</D:getcontenttype>"));
    }

    #[test]
    fn accepted_formats_become_variants() {
        let (_dir, site) = site_with(&["pdf".to_owned()]);

        let (xml, _) = site
            .render_propfind("/", props(&["getcontenttype"]), Depth::One)
            .unwrap();

        assert!(xml.contains("<D:href>/a.txt.pdf</D:href>"));
        assert!(!xml.contains("<D:href>/a.txt</D:href>"));
        assert!(xml.contains("<D:getcontenttype>application/pdf</D:getcontenttype>"));
    }

    #[test]
    fn missing_path_is_not_found() {
        let (_dir, site) = site_with(&[]);

        let (xml, _) = site
            .render_propfind("/nope", PropfindRequest::allprop(), Depth::Zero)
            .unwrap();
        assert!(xml.contains("<D:href>/nope</D:href><D:status>HTTP/1.1 404 Not Found</D:status>"));
    }

    #[cfg(unix)]
    #[test_log::test]
    fn dangling_symlink_is_skipped() {
        let (dir, site) = site_with(&[]);
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("link")).unwrap();

        let (xml, _) = site
            .render_propfind("/", PropfindRequest::allprop(), Depth::One)
            .unwrap();

        assert_eq!(hrefs(&xml), ["/", "/a.txt", "/my%20notes.md", "/sub/"]);
    }

    #[test]
    fn unknown_configured_format_fails() {
        let dav = DavConfig {
            root: ".".into(),
            default_format: "bin".into(),
            file_accept: vec!["not-a-format".into()],
        };

        assert!(matches!(
            FsSite::from_settings(&dav),
            Err(AppError::CoreError(CoreError::ConfigError(_)))
        ));
    }
}
