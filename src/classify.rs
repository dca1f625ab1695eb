//! Category/sort label lookup and item-type filtering.

use crate::models::{CatalogItem, ItemType, LimitedInfo};

pub const UNKNOWN_CATEGORY: &str = "Unknown Category";
pub const UNKNOWN_SORT: &str = "Unknown Sort Order";

const CATEGORIES: &[(i64, &str)] = &[
    (1, "Featured Hats"),
    (2, "Featured Gears"),
    (3, "Featured Faces"),
    (4, "Collectible Items"),
    (5, "Collectible Hats"),
    (6, "Collectible Gears"),
    (7, "Collectible Faces"),
    (8, "All Clothing"),
    (9, "Hats"),
    (10, "Shirts"),
    (11, "T-Shirts"),
    (12, "Pants"),
    (13, "Packages"),
    (14, "Body Parts"),
    (15, "Heads"),
    (16, "Faces"),
];

const SORTS: &[(i64, &str)] = &[
    (0, "Relevance"),
    (1, "Price ( Low to High )"),
    (2, "Price ( High to Low )"),
    (3, "Recently Updated"),
    (4, "Best Selling"),
];

fn lookup(table: &[(i64, &'static str)], code: i64) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

/// Display label for a catalog category code.
pub fn category_label(code: i64) -> &'static str {
    lookup(CATEGORIES, code).unwrap_or_else(|| {
        tracing::warn!(code, "unknown category code");
        UNKNOWN_CATEGORY
    })
}

/// Display label for a catalog sort code.
pub fn sort_label(code: i64) -> &'static str {
    lookup(SORTS, code).unwrap_or_else(|| {
        tracing::warn!(code, "unknown sort code");
        UNKNOWN_SORT
    })
}

/// Whether `item` passes the item-type filter.
///
/// `Limited` matches plain limiteds only; `Free` means the price itself is
/// free, not just that the robux price is missing.
pub fn matches(item: &CatalogItem, filter: ItemType) -> bool {
    match filter {
        ItemType::All => true,
        ItemType::Limited => item.limited_info == LimitedInfo::Limited,
        ItemType::LimitedU => item.limited_info == LimitedInfo::LimitedU,
        ItemType::Free => item.price.is_free(),
    }
}
