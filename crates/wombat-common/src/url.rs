//! Reference resolution utilities.
//!
//! [SVG 1.1 § 5.3.2 IRI references](https://www.w3.org/TR/SVG11/linking.html#IRIReference)
//!
//! References in SVG documents are IRIs: an optional document location
//! followed by an optional `#fragment` naming an element in that document.

use std::path::{Path, PathBuf};

/// An `href` value split into its document location and fragment.
///
/// [§ 5.3.2](https://www.w3.org/TR/SVG11/linking.html#IRIReference)
/// "An IRI reference with a fragment identifier references a specific element
/// within an SVG document."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference<'a> {
    /// Document part of the reference. Empty for same-document references.
    pub location: &'a str,
    /// Element id after `#`, if any.
    pub fragment: Option<&'a str>,
}

impl<'a> Reference<'a> {
    /// Split an `href` value at its first `#`.
    #[must_use]
    pub fn parse(href: &'a str) -> Self {
        let href = href.trim();
        match href.split_once('#') {
            Some((location, fragment)) => Self {
                location,
                fragment: (!fragment.is_empty()).then_some(fragment),
            },
            None => Self {
                location: href,
                fragment: None,
            },
        }
    }

    /// Whether the reference points back into the referencing document.
    #[must_use]
    pub const fn is_same_document(&self) -> bool {
        self.location.is_empty()
    }

    /// Whether the location names a network resource.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    /// Whether the location is an inline `data:` URL.
    #[must_use]
    pub fn is_data(&self) -> bool {
        self.location.starts_with("data:")
    }
}

/// Resolve a document location against the location of the referencing
/// document.
///
/// # Algorithm
///
/// STEP 1: Strip a `file://` scheme, which names a local path.
///
/// STEP 2: "If url is an absolute URL, return url." Absolute paths are kept.
///
/// STEP 3: Otherwise, resolve relative to the directory of `base`. Without a
/// base the path is relative to the working directory.
#[must_use]
pub fn resolve_location(location: &str, base: Option<&Path>) -> PathBuf {
    // STEP 1
    let location = location.strip_prefix("file://").unwrap_or(location);
    let path = Path::new(location);

    // STEP 2
    if path.is_absolute() {
        return path.to_path_buf();
    }

    // STEP 3
    match base.and_then(Path::parent) {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}
