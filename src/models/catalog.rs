use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// PriceSide: one side of a price change
// ---------------------------------------------------------------------------

/// A "was" or "now" amount, or the literal `"Free"` when only the other side
/// was listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Value", try_from = "Value")]
pub enum PriceSide {
    Amount(i64),
    Free,
}

impl From<PriceSide> for Value {
    fn from(side: PriceSide) -> Self {
        match side {
            PriceSide::Amount(n) => Value::from(n),
            PriceSide::Free => Value::from("Free"),
        }
    }
}

impl TryFrom<Value> for PriceSide {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(PriceSide::Amount)
                .ok_or_else(|| format!("price amount out of range: {}", n)),
            Value::String(s) if s == "Free" => Ok(PriceSide::Free),
            other => Err(format!("expected integer or \"Free\", got {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceChange
// ---------------------------------------------------------------------------

/// Was/now price pair shown on discounted items. Serialized as `"None"` when
/// the item shows neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Value", try_from = "Value")]
pub enum PriceChange {
    None,
    Changed { was: PriceSide, now: PriceSide },
}

impl PriceChange {
    /// Combine the two optional sides.
    ///
    /// Both absent gives [`PriceChange::None`]; a single absent side becomes
    /// [`PriceSide::Free`].
    pub fn from_sides(was: Option<i64>, now: Option<i64>) -> Self {
        if was.is_none() && now.is_none() {
            return PriceChange::None;
        }
        let side = |v: Option<i64>| v.map(PriceSide::Amount).unwrap_or(PriceSide::Free);
        PriceChange::Changed {
            was: side(was),
            now: side(now),
        }
    }
}

impl From<PriceChange> for Value {
    fn from(change: PriceChange) -> Self {
        match change {
            PriceChange::None => Value::from("None"),
            PriceChange::Changed { was, now } => {
                serde_json::json!({ "was": Value::from(was), "now": Value::from(now) })
            }
        }
    }
}

impl TryFrom<Value> for PriceChange {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) if s == "None" => Ok(PriceChange::None),
            Value::Object(mut map) => {
                let mut side = |key: &str| {
                    map.remove(key)
                        .ok_or_else(|| format!("missing `{}`", key))
                        .and_then(PriceSide::try_from)
                };
                Ok(PriceChange::Changed {
                    was: side("was")?,
                    now: side("now")?,
                })
            }
            other => Err(format!("expected \"None\" or object, got {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Price {
    Free,
    Priced {
        robux: Option<i64>,
        tickets: Option<i64>,
        change: PriceChange,
    },
}

impl Price {
    /// An item listing neither currency is free; otherwise the missing
    /// currency is simply left out.
    pub fn from_parts(robux: Option<i64>, tickets: Option<i64>, change: PriceChange) -> Self {
        if robux.is_none() && tickets.is_none() {
            Price::Free
        } else {
            Price::Priced {
                robux,
                tickets,
                change,
            }
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Price::Free)
    }
}

// ---------------------------------------------------------------------------
// LimitedInfo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitedInfo {
    #[default]
    None,
    Limited,
    LimitedU,
}

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// One purchasable entry from a catalog listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: Price,
    pub limited_info: LimitedInfo,
    pub link: String,
    pub image: String,
}

// ---------------------------------------------------------------------------
// ItemType: listing filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[default]
    All,
    Limited,
    LimitedU,
    Free,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::All => "all",
            ItemType::Limited => "limited",
            ItemType::LimitedU => "limited_u",
            ItemType::Free => "free",
        }
    }

    /// Parse a filter code, falling back to [`ItemType::All`] for unknown codes.
    pub fn parse_or_all(code: &str) -> Self {
        code.parse().unwrap_or_else(|_| {
            tracing::warn!(code, "unknown item type; defaulting to all");
            ItemType::All
        })
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(ItemType::All),
            "limited" => Ok(ItemType::Limited),
            "limited_u" => Ok(ItemType::LimitedU),
            "free" => Ok(ItemType::Free),
            other => Err(format!("unknown item type: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogListing: result envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogListing {
    pub items: Vec<CatalogItem>,
    pub category_label: String,
    pub sort_label: String,
    pub item_type: ItemType,
}
