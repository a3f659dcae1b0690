//! Resolution of `use` references against the file system.
//!
//! [SVG 1.1 § 5.3.2 IRI references](https://www.w3.org/TR/SVG11/linking.html#IRIReference)

use std::path::{Path, PathBuf};

use wombat_common::data_url::DataUrl;
use wombat_common::url::{Reference, resolve_location};
use wombat_dom::AttributesMap;
use wombat_svg::{DocumentLoader, LoadedDocument, SvgError};
use wombat_xml::{ParseOptions, parse_svg_bytes};

/// Loads referenced documents from `data:` URLs and local files.
///
/// # Algorithm
///
/// STEP 1: Split the reference into a location and an optional `#id`.
///
/// STEP 2: Read the document. A `data:` URL is decoded in place; an empty
/// location rereads the referencing document; anything else is a path,
/// relative to the referencing document's directory.
///
/// STEP 3: Parse it with the `use` attributes as inherited values, rooted at
/// the element with the given id.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    fn read(reference: &Reference<'_>, base: Option<&Path>) -> Result<(Vec<u8>, Option<PathBuf>), String> {
        if reference.is_remote() {
            return Err("remote documents are not supported".to_string());
        }
        if reference.is_data() {
            let bytes = DataUrl::parse(reference.location)
                .and_then(|url| url.decode())
                .map_err(|error| error.to_string())?;
            return Ok((bytes, None));
        }

        let path = if reference.is_same_document() {
            base.ok_or("same-document reference without a document location")?
                .to_path_buf()
        } else {
            resolve_location(reference.location, base)
        };
        let bytes = std::fs::read(&path)
            .map_err(|error| format!("cannot read '{}': {error}", path.display()))?;
        Ok((bytes, Some(path)))
    }
}

impl DocumentLoader for FileLoader {
    fn load(
        &self,
        href: &str,
        base: Option<&Path>,
        inherited: &AttributesMap,
    ) -> Result<LoadedDocument, SvgError> {
        let failure = |reason: String| SvgError::ReferenceResolution {
            href: href.to_string(),
            reason,
        };

        // STEP 1
        let reference = Reference::parse(href);

        // STEP 2
        let (bytes, location) = Self::read(&reference, base).map_err(failure)?;

        // STEP 3
        let options = ParseOptions {
            inherited: Some(inherited),
            element_id: reference.fragment,
        };
        let tree = parse_svg_bytes(&bytes, &options).map_err(|error| failure(error.to_string()))?;
        log::debug!(
            "[Wombat Render] loaded {href} from {}",
            location
                .as_deref()
                .map_or_else(|| "inline data".to_string(), |path| path.display().to_string())
        );
        Ok(LoadedDocument { tree, location })
    }
}
