//! Category/sort labels and the item-type filter.

use syntax_crawler::classify::{category_label, matches, sort_label, UNKNOWN_CATEGORY, UNKNOWN_SORT};
use syntax_crawler::{CatalogItem, ItemType, LimitedInfo, Price, PriceChange};

fn item(price: Price, limited_info: LimitedInfo) -> CatalogItem {
    CatalogItem {
        name: "Hat".into(),
        price,
        limited_info,
        link: "https://www.syntax.eco/catalog/1".into(),
        image: "https://www.syntax.eco/thumbs/1.png".into(),
    }
}

fn priced(robux: i64) -> Price {
    Price::from_parts(Some(robux), None, PriceChange::None)
}

// ---------------------------------------------------------------------------
// labels
// ---------------------------------------------------------------------------

#[test]
fn known_categories() {
    assert_eq!(category_label(1), "Featured Hats");
    assert_eq!(category_label(5), "Collectible Hats");
    assert_eq!(category_label(16), "Faces");
}

#[test]
fn unknown_categories() {
    assert_eq!(category_label(0), UNKNOWN_CATEGORY);
    assert_eq!(category_label(17), UNKNOWN_CATEGORY);
    assert_eq!(category_label(-3), "Unknown Category");
}

#[test]
fn known_and_unknown_sorts() {
    assert_eq!(sort_label(0), "Relevance");
    assert_eq!(sort_label(4), "Best Selling");
    assert_eq!(sort_label(5), UNKNOWN_SORT);
}

// ---------------------------------------------------------------------------
// item-type filter
// ---------------------------------------------------------------------------

#[test]
fn all_accepts_everything() {
    assert!(matches(&item(Price::Free, LimitedInfo::LimitedU), ItemType::All));
    assert!(matches(&item(priced(5), LimitedInfo::None), ItemType::All));
}

#[test]
fn limited_excludes_limited_u() {
    assert!(matches(&item(priced(5), LimitedInfo::Limited), ItemType::Limited));
    assert!(!matches(&item(priced(5), LimitedInfo::LimitedU), ItemType::Limited));
    assert!(!matches(&item(priced(5), LimitedInfo::None), ItemType::Limited));
}

#[test]
fn limited_u_only() {
    assert!(matches(&item(priced(5), LimitedInfo::LimitedU), ItemType::LimitedU));
    assert!(!matches(&item(priced(5), LimitedInfo::Limited), ItemType::LimitedU));
}

#[test]
fn free_means_no_currency_at_all() {
    assert!(matches(&item(Price::Free, LimitedInfo::None), ItemType::Free));
    let tickets_only = Price::from_parts(None, Some(10), PriceChange::None);
    assert!(!matches(&item(tickets_only, LimitedInfo::None), ItemType::Free));
}

// ---------------------------------------------------------------------------
// item-type codes
// ---------------------------------------------------------------------------

#[test]
fn item_type_codes_parse() {
    assert_eq!("limited".parse::<ItemType>(), Ok(ItemType::Limited));
    assert_eq!(" Limited_U ".parse::<ItemType>(), Ok(ItemType::LimitedU));
    assert_eq!(ItemType::parse_or_all("free"), ItemType::Free);
}

#[test]
fn unknown_item_type_falls_back_to_all() {
    assert!("rare".parse::<ItemType>().is_err());
    assert_eq!(ItemType::parse_or_all("rare"), ItemType::All);
    assert_eq!(ItemType::parse_or_all(""), ItemType::All);
}

#[test]
fn item_type_display_round_trips() {
    for t in [ItemType::All, ItemType::Limited, ItemType::LimitedU, ItemType::Free] {
        assert_eq!(t.to_string().parse::<ItemType>(), Ok(t));
    }
}
