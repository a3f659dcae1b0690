//! Attribute normalization: `style` expansion and inheritance.
//!
//! [SVG 1.1 § 6.4 Specifying properties using the presentation attributes](https://www.w3.org/TR/SVG11/styling.html#UsingPresentationAttributes)

use wombat_dom::AttributesMap;

/// [SVG 1.1 Appendix N Property Index](https://www.w3.org/TR/SVG11/propidx.html)
///
/// Presentation attributes whose property is "Inherited: yes" and that the
/// renderer consumes. Geometry (`x`, `d`, `r`...) and the non-inherited
/// `transform` and `opacity` never flow to children.
pub const INHERITED_ATTRIBUTES: &[&str] = &[
    "color",
    "fill",
    "fill-opacity",
    "fill-rule",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "stroke",
    "stroke-opacity",
    "stroke-width",
    "text-anchor",
];

/// [SVG 1.1 § 6.5 The 'style' attribute](https://www.w3.org/TR/SVG11/styling.html#StyleAttribute)
///
/// "The 'style' attribute allows per-element style rules to be specified
/// directly on a given element."
///
/// Expand `name: value` declarations separated by `;` into `attrs`, replacing
/// presentation attributes of the same name. Declarations without a colon are
/// ignored.
pub fn expand_style(style: &str, attrs: &mut AttributesMap) {
    for declaration in style.split(';') {
        if let Some((name, value)) = declaration.split_once(':') {
            let _ = attrs.insert(name.trim().to_string(), value.trim().to_string());
        }
    }
}

/// Attributes of a referencing element that stay on it instead of seeding the
/// referenced document element.
pub const NOT_SEEDED_ATTRIBUTES: &[&str] = &["transform", "opacity"];

/// Collect the attributes a referenced document element takes from the
/// element referencing it: everything except [`NOT_SEEDED_ATTRIBUTES`].
///
/// Unlike [`inherited_from`] this keeps geometry, so a sized `use` reaches
/// the viewBox of the document it references.
pub(crate) fn seeded_from(referencing: &AttributesMap) -> AttributesMap {
    referencing
        .iter()
        .filter(|(name, _)| !NOT_SEEDED_ATTRIBUTES.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Collect the attributes a child inherits from `parent`.
pub(crate) fn inherited_from(parent: &AttributesMap) -> AttributesMap {
    INHERITED_ATTRIBUTES
        .iter()
        .filter_map(|&name| parent.get(name).map(|value| (name.to_string(), value.clone())))
        .collect()
}
