use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// GamePass
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePass {
    pub image: String,
    pub name: String,
    /// Digits and decimal point only; the currency symbol is stripped.
    pub price: String,
}

// ---------------------------------------------------------------------------
// GameDetail: aggregated stats from one game page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDetail {
    pub title: String,
    pub creator: String,
    pub favorites_count: i64,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub description: String,
    pub builder_club_required: bool,
    pub thumbnail: String,
    pub active_players: i64,
    pub visits_count: i64,
    /// As displayed upstream; not parsed.
    pub created_date: String,
    pub updated_date: String,
    pub server_size: i64,
    #[serde(default)]
    pub game_passes: Vec<GamePass>,
}

// ---------------------------------------------------------------------------
// GameListing: result envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameListing {
    pub games: Vec<GameDetail>,
    pub query: Option<String>,
}
