//! Catalog item cards.
//!
//! Lenient per field: missing prices, price changes and limited markers
//! fall back to defaults, while a missing name, link or image drops the card.

use scraper::{ElementRef, Html};

use super::{extract_fields, selector, DocumentIndex, FieldSpec, Locator, Transform};
use crate::config::CrawlConfig;
use crate::error::ExtractError;
use crate::models::{CatalogItem, LimitedInfo, Price, PriceChange};

const CARD: &str = ".item-card";
const LIMITED_MARKER: &str = "p.text-limited";
const PRICE_CHANGE_LABEL: &str = "span.text-secondary.fw-normal";

const ITEM_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", Locator::First("p.text-secondary"), Transform::Text),
    FieldSpec::optional("robux", Locator::First("p.text-robux"), Transform::FirstInt),
    FieldSpec::optional("tickets", Locator::First("p.text-tickets"), Transform::FirstInt),
    FieldSpec::optional(
        "was",
        Locator::WithText {
            selector: PRICE_CHANGE_LABEL,
            text: "was",
        },
        Transform::FollowingInt,
    ),
    FieldSpec::optional(
        "now",
        Locator::WithText {
            selector: PRICE_CHANGE_LABEL,
            text: "now",
        },
        Transform::FollowingInt,
    ),
    FieldSpec::optional("limited", Locator::First(LIMITED_MARKER), Transform::Present),
    FieldSpec::optional(
        "limited_u",
        Locator::Within {
            outer: LIMITED_MARKER,
            inner: "span.text-limitedu",
        },
        Transform::Present,
    ),
    FieldSpec::required("link", Locator::Ancestor("a[href]"), Transform::Attr("href")),
    FieldSpec::required("image", Locator::First("img"), Transform::Attr("src")),
];

/// All item cards on a listing page, in page order.
pub fn item_cards(document: &Html) -> Vec<ElementRef<'_>> {
    document.select(&selector(CARD)).collect()
}

/// Parse one item card.
///
/// Fails only when a required field (name, link, image) is missing.
pub fn extract_item(card: ElementRef<'_>, config: &CrawlConfig) -> Result<CatalogItem, ExtractError> {
    let index = DocumentIndex::new(card);
    let fields = extract_fields(&index, ITEM_FIELDS)?;

    let name = fields.text("name")?;
    if name.is_empty() {
        return Err(ExtractError::Missing("name"));
    }

    let change = PriceChange::from_sides(fields.opt_int("was"), fields.opt_int("now"));
    let price = Price::from_parts(fields.opt_int("robux"), fields.opt_int("tickets"), change);

    let limited_info = if fields.flag("limited_u") {
        LimitedInfo::LimitedU
    } else if fields.flag("limited") {
        LimitedInfo::Limited
    } else {
        LimitedInfo::None
    };

    let link = absolute(config, "link", &fields.text("link")?)?;
    let image = absolute(config, "image", &fields.text("image")?)?;

    Ok(CatalogItem {
        name,
        price,
        limited_info,
        link,
        image,
    })
}

fn absolute(config: &CrawlConfig, field: &'static str, raw: &str) -> Result<String, ExtractError> {
    config.absolute(raw).ok_or_else(|| ExtractError::Malformed {
        field,
        value: raw.to_string(),
    })
}
