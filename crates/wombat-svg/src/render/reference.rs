//! The `use` element and referenced documents.
//!
//! [SVG 1.1 § 5.6 The 'use' element](https://www.w3.org/TR/SVG11/struct.html#UseElement)

use std::path::{Path, PathBuf};

use wombat_common::warning::warn_once;
use wombat_dom::{AttributesMap, DomTree, ElementData, XLINK_HREF};

use super::{Geometry, Renderer};
use crate::canvas::Canvas;
use crate::error::SvgError;
use crate::values::resolve_length;
use crate::viewbox::{apply_viewbox, document_size};

/// Maximum number of nested `use` references, guarding against cycles.
pub const MAX_REFERENCE_DEPTH: usize = 16;

/// A document resolved from a reference.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// The referenced element as the root of its own tree.
    pub tree: DomTree,
    /// Where the document was loaded from, the base for its own references.
    /// `None` for documents with no location, such as data URLs.
    pub location: Option<PathBuf>,
}

/// Resolves `use` references to documents.
pub trait DocumentLoader {
    /// Load the document `href` points to.
    ///
    /// `base` is the location of the referencing document. The root of the
    /// returned tree takes `inherited`, the attributes of the `use` element
    /// without `x` and `y`, except `transform` and `opacity`. Its own
    /// attributes take precedence.
    ///
    /// # Errors
    ///
    /// [`SvgError::ReferenceResolution`] if the document cannot be found or
    /// parsed.
    fn load(
        &self,
        href: &str,
        base: Option<&Path>,
        inherited: &AttributesMap,
    ) -> Result<LoadedDocument, SvgError>;
}

impl<C: Canvas + ?Sized> Renderer<'_, C> {
    /// [§ 5.6](https://www.w3.org/TR/SVG11/struct.html#UseElement)
    ///
    /// "In the generated content, the 'use' will be replaced by 'g', where all
    /// attributes from the 'use' element except for 'x', 'y', 'width',
    /// 'height' and 'xlink:href' are transferred to the generated 'g' element.
    /// An additional transformation translate(x,y) is appended to the end
    /// (i.e., right-side) of the 'transform' attribute on the generated 'g'."
    pub(super) fn use_reference(
        &mut self,
        element: &ElementData,
        base: Option<&Path>,
    ) -> Result<Geometry, SvgError> {
        self.canvas.translate(
            resolve_length(element.get("x"))?,
            resolve_length(element.get("y"))?,
        );

        let Some(href) = element.get(XLINK_HREF).or_else(|| element.get("href")) else {
            warn_once("SVG", "<use> without href draws nothing");
            return Ok(Geometry::default());
        };
        if self.depth >= MAX_REFERENCE_DEPTH {
            return Err(SvgError::ReferenceResolution {
                href: href.to_string(),
                reason: format!("more than {MAX_REFERENCE_DEPTH} nested references"),
            });
        }

        let inherited: AttributesMap = element
            .attrs
            .iter()
            .filter(|(name, _)| !matches!(name.as_str(), "x" | "y"))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        let document = self.loader.load(href, base, &inherited)?;
        log::debug!(
            "[Wombat SVG] <use> {href} resolved to {} nodes",
            document.tree.len()
        );

        if let Some(root) = document.tree.element(document.tree.root()) {
            let (width, height) = document_size(root)?;
            apply_viewbox(&mut *self.canvas, width, height, root.get("viewBox"))?;
        }

        let location = document.location.as_deref().or(base);
        self.depth += 1;
        let result = self.render_node(&document.tree, document.tree.root(), location);
        self.depth -= 1;
        result.map(|()| Geometry::default())
    }
}
