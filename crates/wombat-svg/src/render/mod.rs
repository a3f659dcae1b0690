//! Recursive rendering of the node tree.
//!
//! [SVG 1.1 § 3 Rendering Model](https://www.w3.org/TR/SVG11/render.html)
//!
//! "Elements in an SVG document fragment have an implicit drawing order,
//! with the first elements in the SVG document fragment getting 'painted'
//! first."
//!
//! # Per node
//!
//! STEP 1: Save the graphics state, unless the node is a document element.
//!
//! STEP 2: Move to `(x, y)` and apply `transform`.
//!
//! STEP 3: Build the tag's geometry on the current path.
//!
//! STEP 4: Stroke, keeping the path, then fill, consuming it.
//!
//! STEP 5: Render the children in document order.
//!
//! STEP 6: Restore the graphics state saved in step 1, on every exit path.

mod reference;
mod shapes;
mod text;

pub use reference::{DocumentLoader, LoadedDocument, MAX_REFERENCE_DEPTH};

use std::ops::{Deref, DerefMut};
use std::path::Path;

use kurbo::Point;
use strum_macros::EnumString;
use wombat_dom::{DomTree, ElementData, NodeId};

use crate::canvas::{Canvas, FillRule};
use crate::error::SvgError;
use crate::path::draw_path;
use crate::transform::apply_transform;
use crate::values::{Color, resolve_color, resolve_length, resolve_number};
use crate::viewbox::{apply_viewbox, document_size};

/// Elements that build geometry. Every other element only paints its
/// (empty) path and renders its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Tag {
    Circle,
    Ellipse,
    Line,
    Path,
    Polygon,
    Polyline,
    Rect,
    Text,
    Tspan,
    Use,
}

/// What a tag handler tells the paint step.
#[derive(Debug, Clone, Copy, Default)]
struct Geometry {
    /// Line width when `stroke-width` is absent.
    stroke_width: Option<f64>,
    /// Fill replacing the `fill` attribute.
    fill: Option<Color>,
}

/// Walks a node tree and issues drawing calls on a [`Canvas`].
///
/// The renderer owns the text cursor shared by sibling `text` and `tspan`
/// elements and the depth of nested `use` references.
pub struct Renderer<'a, C: Canvas + ?Sized> {
    canvas: &'a mut C,
    loader: &'a dyn DocumentLoader,
    /// End of the last drawn text, user space.
    cursor: Point,
    /// Number of `use` references being rendered.
    depth: usize,
}

/// Saves the canvas state on creation and restores it on drop.
struct SavedState<'r, 'a, C: Canvas + ?Sized> {
    renderer: &'r mut Renderer<'a, C>,
}

impl<'r, 'a, C: Canvas + ?Sized> SavedState<'r, 'a, C> {
    fn new(renderer: &'r mut Renderer<'a, C>) -> Self {
        renderer.canvas.save();
        Self { renderer }
    }
}

impl<'a, C: Canvas + ?Sized> Deref for SavedState<'_, 'a, C> {
    type Target = Renderer<'a, C>;

    fn deref(&self) -> &Self::Target {
        self.renderer
    }
}

impl<C: Canvas + ?Sized> DerefMut for SavedState<'_, '_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.renderer
    }
}

impl<C: Canvas + ?Sized> Drop for SavedState<'_, '_, C> {
    fn drop(&mut self) {
        self.renderer.canvas.restore();
    }
}

impl<'a, C: Canvas + ?Sized> Renderer<'a, C> {
    /// Create a renderer drawing on `canvas` and resolving `use` references
    /// through `loader`.
    pub fn new(canvas: &'a mut C, loader: &'a dyn DocumentLoader) -> Self {
        Self {
            canvas,
            loader,
            cursor: Point::ORIGIN,
            depth: 0,
        }
    }

    /// End of the last text drawn, in the user space it was drawn in.
    #[must_use]
    pub const fn text_cursor(&self) -> Point {
        self.cursor
    }

    /// Render a whole document: apply the document element's viewBox, then
    /// render the tree.
    ///
    /// `base` is the location of the document, against which relative
    /// references are resolved.
    ///
    /// # Errors
    ///
    /// The first error met anywhere in the tree. Nothing is caught.
    pub fn render_document(&mut self, tree: &DomTree, base: Option<&Path>) -> Result<(), SvgError> {
        if let Some(root) = tree.element(tree.root()) {
            let (width, height) = document_size(root)?;
            apply_viewbox(&mut *self.canvas, width, height, root.get("viewBox"))?;
        }
        self.render_node(tree, tree.root(), base)
    }

    /// Render `id` and its subtree.
    ///
    /// # Errors
    ///
    /// The first error met in the subtree.
    pub fn render_node(
        &mut self,
        tree: &DomTree,
        id: NodeId,
        base: Option<&Path>,
    ) -> Result<(), SvgError> {
        // STEP 1 / STEP 6
        if tree.is_root(id) {
            return self.draw(tree, id, base);
        }
        let mut saved = SavedState::new(self);
        saved.draw(tree, id, base)
    }

    fn draw(&mut self, tree: &DomTree, id: NodeId, base: Option<&Path>) -> Result<(), SvgError> {
        let Some(element) = tree.element(id) else {
            return Ok(());
        };
        log::trace!("[Wombat SVG] rendering <{}>", element.tag_name);

        // STEP 2
        self.canvas.move_to(
            resolve_length(element.get("x"))?,
            resolve_length(element.get("y"))?,
        );
        if let Some(transform) = element.get("transform") {
            apply_transform(&mut *self.canvas, transform)?;
        }

        // STEP 3
        let geometry = match element.tag_name.parse::<Tag>() {
            Ok(tag) => self.geometry(tag, element, base)?,
            Err(_) => Geometry::default(),
        };

        // STEP 4
        let opacity = resolve_number(element.get("opacity"), 1.0)?;
        let stroke_opacity = opacity * resolve_number(element.get("stroke-opacity"), 1.0)?;
        let fill_opacity = opacity * resolve_number(element.get("fill-opacity"), 1.0)?;

        let line_width = match element.get("stroke-width").filter(|width| !width.trim().is_empty()) {
            Some(width) => resolve_length(Some(width))?,
            None => geometry.stroke_width.unwrap_or(0.0),
        };
        self.canvas.set_line_width(line_width);
        self.canvas
            .set_source(resolve_color(element.get("stroke"), stroke_opacity)?);
        self.canvas.stroke_preserve();

        let rule = if element.get("fill-rule") == Some("evenodd") {
            FillRule::EvenOdd
        } else {
            FillRule::NonZero
        };
        self.canvas.set_fill_rule(rule);
        let fill = match geometry.fill {
            Some(fill) => fill,
            None => resolve_color(element.get("fill"), fill_opacity)?,
        };
        self.canvas.set_source(fill);
        self.canvas.fill();

        // STEP 5
        for &child in tree.children(id) {
            self.render_node(tree, child, base)?;
        }
        Ok(())
    }

    fn geometry(
        &mut self,
        tag: Tag,
        element: &ElementData,
        base: Option<&Path>,
    ) -> Result<Geometry, SvgError> {
        match tag {
            Tag::Circle => shapes::circle(&mut *self.canvas, element),
            Tag::Ellipse => shapes::ellipse(&mut *self.canvas, element),
            Tag::Line => shapes::line(&mut *self.canvas, element),
            Tag::Rect => shapes::rect(&mut *self.canvas, element),
            Tag::Polyline => shapes::polyline(&mut *self.canvas, element, false),
            Tag::Polygon => shapes::polyline(&mut *self.canvas, element, true),
            Tag::Path => {
                draw_path(&mut *self.canvas, element.get("d").unwrap_or(""))?;
                Ok(Geometry {
                    stroke_width: Some(1.0),
                    fill: None,
                })
            }
            Tag::Text => {
                let position = Point::new(
                    resolve_length(element.get("x"))?,
                    resolve_length(element.get("y"))?,
                );
                self.draw_text(element, position)
            }
            Tag::Tspan => self.tspan(element),
            Tag::Use => self.use_reference(element, base),
        }
    }
}

/// Render a document onto `canvas`.
///
/// # Errors
///
/// The first error met anywhere in the tree.
pub fn render_document<C: Canvas + ?Sized>(
    canvas: &mut C,
    tree: &DomTree,
    loader: &dyn DocumentLoader,
    base: Option<&Path>,
) -> Result<(), SvgError> {
    Renderer::new(canvas, loader).render_document(tree, base)
}
