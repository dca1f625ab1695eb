//! HTML extractors for catalog items, game pages and game passes.
//!
//! Fields are described declaratively as [`FieldSpec`]s (where to look, how
//! to read it, whether the record survives without it) and applied against a
//! [`DocumentIndex`], a document-order view of one element subtree. The
//! upstream markup has few stable ids, so several locators count positions
//! rather than name elements.

pub mod game;
pub mod item;
pub mod passes;

pub use game::{extract_game_detail, game_links};
pub use item::{extract_item, item_cards};
pub use passes::extract_game_passes;

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::ExtractError;

// ---------------------------------------------------------------------------
// Selector helpers
// ---------------------------------------------------------------------------

/// Parse a selector literal. All call sites pass compile-time constants.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

/// Rendered text of an element: text nodes trimmed, empty ones dropped,
/// joined by a single space.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid digits regex"))
}

/// First run of ASCII digits in `text`, as an integer.
pub(crate) fn first_int(text: &str) -> Option<i64> {
    first_digits()
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

// ---------------------------------------------------------------------------
// DocumentIndex
// ---------------------------------------------------------------------------

/// Elements below a scope, in document (pre-)order, scope itself excluded.
pub(crate) struct DocumentIndex<'a> {
    scope: ElementRef<'a>,
    elements: Vec<ElementRef<'a>>,
}

impl<'a> DocumentIndex<'a> {
    pub fn new(scope: ElementRef<'a>) -> Self {
        let elements = scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect();
        Self { scope, elements }
    }

    fn position(&self, from: Option<usize>, sel: &Selector) -> Option<usize> {
        let start = from.map_or(0, |i| i + 1);
        self.elements
            .iter()
            .skip(start)
            .position(|el| sel.matches(el))
            .map(|p| p + start)
    }

    fn first(&self, css: &str) -> Option<ElementRef<'a>> {
        let sel = selector(css);
        self.position(None, &sel).map(|i| self.elements[i])
    }

    /// First `target` after the first `anchor`, in document order.
    fn after(&self, anchor: &str, target: &str) -> Option<ElementRef<'a>> {
        self.chase(anchor, 0, target)
    }

    /// Start at the first `anchor`, hop to the next `anchor` `hops` times,
    /// then take the next `target`. Every hop must land.
    fn chase(&self, anchor: &str, hops: usize, target: &str) -> Option<ElementRef<'a>> {
        let anchor = selector(anchor);
        let mut at = self.position(None, &anchor)?;
        for _ in 0..hops {
            at = self.position(Some(at), &anchor)?;
        }
        self.position(Some(at), &selector(target))
            .map(|i| self.elements[i])
    }

    fn within(&self, outer: &str, inner: &str) -> Option<ElementRef<'a>> {
        let outer = self.first(outer)?;
        outer.select(&selector(inner)).next()
    }

    fn with_text(&self, css: &str, text: &str) -> Option<ElementRef<'a>> {
        let sel = selector(css);
        self.elements
            .iter()
            .find(|el| sel.matches(el) && text_of(**el) == text)
            .copied()
    }

    fn ancestor(&self, css: &str) -> Option<ElementRef<'a>> {
        let sel = selector(css);
        self.scope
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| sel.matches(el))
    }

    pub fn locate(&self, locator: &Locator) -> Option<ElementRef<'a>> {
        match *locator {
            Locator::First(css) => self.first(css),
            Locator::After { anchor, target } => self.after(anchor, target),
            Locator::Chase {
                anchor,
                hops,
                target,
            } => self.chase(anchor, hops, target),
            Locator::Within { outer, inner } => self.within(outer, inner),
            Locator::WithText { selector, text } => self.with_text(selector, text),
            Locator::Ancestor(css) => self.ancestor(css),
        }
    }
}

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub(crate) enum Locator {
    First(&'static str),
    After {
        anchor: &'static str,
        target: &'static str,
    },
    Chase {
        anchor: &'static str,
        hops: usize,
        target: &'static str,
    },
    Within {
        outer: &'static str,
        inner: &'static str,
    },
    /// Element matching `selector` whose rendered text equals `text`.
    WithText {
        selector: &'static str,
        text: &'static str,
    },
    /// Nearest enclosing element of the scope.
    Ancestor(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Transform {
    Text,
    /// Whole trimmed text as an integer.
    Int,
    /// First digit run in the text.
    FirstInt,
    /// First digit run in the text node right after the element.
    FollowingInt,
    /// Attribute value resolved to an absolute URL by the caller.
    Attr(&'static str),
    /// Whether the element exists at all.
    Present,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldValue {
    Text(String),
    Int(i64),
    Flag(bool),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub locator: Locator,
    pub transform: Transform,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, locator: Locator, transform: Transform) -> Self {
        Self {
            name,
            locator,
            transform,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, locator: Locator, transform: Transform) -> Self {
        Self {
            name,
            locator,
            transform,
            required: false,
        }
    }

    /// Read this field. `Ok(None)` means an optional field was absent or
    /// unreadable; a required one fails instead.
    fn apply(&self, index: &DocumentIndex<'_>) -> Result<Option<FieldValue>, ExtractError> {
        let found = index.locate(&self.locator);
        if let Transform::Present = self.transform {
            return Ok(Some(FieldValue::Flag(found.is_some())));
        }

        let Some(el) = found else {
            return self.absent(ExtractError::Missing(self.name));
        };

        let value = match self.transform {
            Transform::Text => Some(FieldValue::Text(text_of(el))),
            Transform::Int => {
                let text = text_of(el);
                match text.trim().parse::<i64>() {
                    Ok(n) => Some(FieldValue::Int(n)),
                    Err(_) => {
                        return self.absent(ExtractError::Malformed {
                            field: self.name,
                            value: text,
                        })
                    }
                }
            }
            Transform::FirstInt => first_int(&text_of(el)).map(FieldValue::Int),
            Transform::FollowingInt => el
                .next_sibling()
                .and_then(|node| match node.value() {
                    scraper::Node::Text(t) => first_int(t),
                    scraper::Node::Element(_) => ElementRef::wrap(node).and_then(|e| first_int(&text_of(e))),
                    _ => None,
                })
                .map(FieldValue::Int),
            Transform::Attr(attr) => el
                .value()
                .attr(attr)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| FieldValue::Text(s.to_string())),
            Transform::Present => unreachable!("handled above"),
        };

        match value {
            Some(v) => Ok(Some(v)),
            None => self.absent(ExtractError::Missing(self.name)),
        }
    }

    fn absent(&self, err: ExtractError) -> Result<Option<FieldValue>, ExtractError> {
        if self.required {
            Err(err)
        } else {
            Ok(None)
        }
    }
}

// ---------------------------------------------------------------------------
// Field sets
// ---------------------------------------------------------------------------

/// Values read by [`extract_fields`], keyed by field name.
pub(crate) struct Fields(HashMap<&'static str, FieldValue>);

impl Fields {
    pub fn text(&self, name: &'static str) -> Result<String, ExtractError> {
        match self.0.get(name) {
            Some(FieldValue::Text(s)) => Ok(s.clone()),
            _ => Err(ExtractError::Missing(name)),
        }
    }

    pub fn int(&self, name: &'static str) -> Result<i64, ExtractError> {
        self.opt_int(name).ok_or(ExtractError::Missing(name))
    }

    pub fn opt_int(&self, name: &'static str) -> Option<i64> {
        match self.0.get(name) {
            Some(FieldValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn flag(&self, name: &'static str) -> bool {
        matches!(self.0.get(name), Some(FieldValue::Flag(true)))
    }
}

/// Apply every descriptor in order; the first failing required field aborts.
pub(crate) fn extract_fields(
    index: &DocumentIndex<'_>,
    specs: &[FieldSpec],
) -> Result<Fields, ExtractError> {
    let mut values = HashMap::with_capacity(specs.len());
    for spec in specs {
        if let Some(value) = spec.apply(index)? {
            values.insert(spec.name, value);
        }
    }
    Ok(Fields(values))
}
