use scraper::Html;

use super::{selector, text_of};
use crate::config::CrawlConfig;
use crate::models::GamePass;

const STORE_TAB: &str = "div.tab-pane#nav-store";
const PASS_BLOCK: &str = "div.p-1";

/// Game passes listed in the store tab of a game page.
///
/// No store tab means no passes. Blocks missing an image, name or price are
/// skipped on their own.
pub fn extract_game_passes(document: &Html, config: &CrawlConfig) -> Vec<GamePass> {
    let Some(store) = document.select(&selector(STORE_TAB)).next() else {
        return Vec::new();
    };

    let blocks = selector(PASS_BLOCK);
    let img_sel = selector("img");
    let name_sel = selector("h5");
    let price_sel = selector("p.text-robux");

    store
        .select(&blocks)
        .filter_map(|block| {
            let image = block
                .select(&img_sel)
                .next()
                .and_then(|el| el.value().attr("src"))
                .and_then(|src| config.absolute(src));
            let pass_name = block.select(&name_sel).next().map(text_of);
            let pass_price = block
                .select(&price_sel)
                .next()
                .map(|el| strip_currency(&text_of(el)));

            match (image, pass_name, pass_price) {
                (Some(image), Some(name), Some(price)) => Some(GamePass { image, name, price }),
                _ => {
                    tracing::debug!("skipping incomplete game pass block");
                    None
                }
            }
        })
        .collect()
}

/// Keep digits and decimal points only (`"R$ 1,250"` → `"1250"`).
pub fn strip_currency(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}
