//! Shared HTML fixtures for the crawler integration tests.
//!
//! Builders render markup shaped like the upstream catalog, game listing and
//! game detail pages, with knobs to drop or corrupt individual fields.

#![allow(dead_code)]

use std::time::Duration;

use syntax_crawler::config::RETRY_STATUSES;
use syntax_crawler::{Credentials, RetryPolicy, SyntaxClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Catalog item cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CardFixture {
    pub name: Option<String>,
    pub robux: Option<String>,
    pub tickets: Option<String>,
    pub was: Option<String>,
    pub now: Option<String>,
    pub limited: bool,
    pub limited_u: bool,
    pub link: Option<String>,
    pub image: Option<String>,
}

impl CardFixture {
    /// A plain robux-priced item with link and image.
    pub fn named(name: &str) -> Self {
        let slug = name.replace(' ', "-");
        Self {
            name: Some(name.to_string()),
            robux: Some("R$ 100".to_string()),
            tickets: None,
            was: None,
            now: None,
            limited: false,
            limited_u: false,
            link: Some(format!("/catalog/{}", slug)),
            image: Some(format!("/thumbs/{}.png", slug)),
        }
    }

    pub fn free(mut self) -> Self {
        self.robux = None;
        self.tickets = None;
        self
    }

    pub fn render(&self) -> String {
        let mut inner = String::new();
        if let Some(image) = &self.image {
            inner.push_str(&format!("<img src=\"{}\" alt=\"thumb\">", image));
        }
        if self.limited {
            inner.push_str("<p class=\"position-absolute m-0 fw-bold text-limited\">LIMITED");
            if self.limited_u {
                inner.push_str("<span class=\"text-limitedu\">U</span>");
            }
            inner.push_str("</p>");
        }
        if let Some(name) = &self.name {
            inner.push_str(&format!("<p class=\"text-secondary\">{}</p>", name));
        }
        if let Some(robux) = &self.robux {
            inner.push_str(&format!("<p class=\"text-robux\">{}</p>", robux));
        }
        if let Some(tickets) = &self.tickets {
            inner.push_str(&format!("<p class=\"text-tickets\">{}</p>", tickets));
        }
        if self.was.is_some() || self.now.is_some() {
            inner.push_str("<div class=\"price-change\">");
            if let Some(was) = &self.was {
                inner.push_str(&format!(
                    "<span class=\"text-secondary fw-normal\">was</span> {} ",
                    was
                ));
            }
            if let Some(now) = &self.now {
                inner.push_str(&format!(
                    "<span class=\"text-secondary fw-normal\">now</span> {}",
                    now
                ));
            }
            inner.push_str("</div>");
        }

        let card = format!("<div class=\"item-card\">{}</div>", inner);
        match &self.link {
            Some(link) => format!("<a href=\"{}\" class=\"catalog-link\">{}</a>", link, card),
            None => format!("<div class=\"catalog-cell\">{}</div>", card),
        }
    }
}

fn pager(page: u32, total: u32) -> String {
    format!(
        "<div class=\"d-flex\"><p class=\"ms-2 me-2 text-white\">Page {} of {}</p></div>",
        page, total
    )
}

/// A catalog listing page holding `cards`, with a "Page n of m" pager.
pub fn catalog_page(cards: &[CardFixture], page: u32, total: u32) -> String {
    let body: String = cards.iter().map(CardFixture::render).collect();
    format!(
        "<!DOCTYPE html><html><head><title>Catalog</title></head><body>\
         <div class=\"container\"><div class=\"row\">{}</div>{}</div></body></html>",
        body,
        pager(page, total)
    )
}

/// `n` distinct priced items named `"{prefix} {i}"`.
pub fn cards(prefix: &str, n: usize) -> Vec<CardFixture> {
    (1..=n)
        .map(|i| CardFixture::named(&format!("{} {}", prefix, i)))
        .collect()
}

// ---------------------------------------------------------------------------
// Game listing and detail pages
// ---------------------------------------------------------------------------

/// A popular-games listing page linking to each of `hrefs`.
pub fn games_page(hrefs: &[&str], page: u32, total: u32) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| {
            format!(
                "<a class=\"text-decoration-none p-1 col-xxl-2 col-lg-3 col-md-4 col-sm-6\" href=\"{}\">\
                 <div class=\"card\"><span>game</span></div></a>",
                href
            )
        })
        .collect();
    format!(
        "<!DOCTYPE html><html><body><div class=\"row\">{}</div>\
         <p class=\"m-0 ms-2 me-2 text-white\">Page {} of {}</p></body></html>",
        links, page, total
    )
}

#[derive(Debug, Clone)]
pub struct GameFixture {
    pub title: String,
    pub creator: String,
    pub favorites: String,
    pub likes: String,
    pub dislikes: Option<String>,
    pub description: String,
    pub builders_club: bool,
    pub thumbnail: String,
    /// Active players, visits, created, updated, server size (in that order).
    pub stats: Vec<String>,
    /// `None` renders no store tab at all.
    pub passes: Option<Vec<(String, String, String)>>,
}

impl GameFixture {
    pub fn named(title: &str) -> Self {
        Self {
            title: title.to_string(),
            creator: "builderman".to_string(),
            favorites: "42".to_string(),
            likes: "100".to_string(),
            dislikes: Some("7".to_string()),
            description: "A tall tower to climb.".to_string(),
            builders_club: false,
            thumbnail: "/thumbs/game.png".to_string(),
            stats: ["12", "3400", "01/02/2023", "05/06/2024", "20"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            passes: Some(vec![(
                "/passes/vip.png".to_string(),
                "VIP".to_string(),
                "R$ 250".to_string(),
            )]),
        }
    }

    pub fn render(&self) -> String {
        let labels = ["Active", "Visits", "Created", "Updated", "Server Size"];
        let stats: String = self
            .stats
            .iter()
            .zip(labels.iter())
            .map(|(value, label)| {
                format!(
                    "<div class=\"col\"><p class=\"text-muted\">{}</p><h2>{}</h2></div>",
                    label, value
                )
            })
            .collect();

        let dislikes = self
            .dislikes
            .as_ref()
            .map(|d| format!("<span class=\"vote-down-text\">{}</span>", d))
            .unwrap_or_default();

        let builders_club = if self.builders_club {
            "<p>A Builders Club membership is required to join this game</p>"
        } else {
            ""
        };

        let store = match &self.passes {
            None => String::new(),
            Some(passes) => {
                let blocks: String = passes
                    .iter()
                    .map(|(img, name, price)| {
                        format!(
                            "<div class=\"p-1\"><div class=\"card\"><img src=\"{}\">\
                             <h5>{}</h5><p class=\"text-robux\">{}</p></div></div>",
                            img, name, price
                        )
                    })
                    .collect();
                format!(
                    "<div class=\"tab-content\"><div class=\"tab-pane fade\" id=\"nav-store\">{}</div></div>",
                    blocks
                )
            }
        };

        format!(
            "<!DOCTYPE html><html><head><title>{title}</title></head><body>\
             <div class=\"header\">\
               <img class=\"rounded\" src=\"{thumb}\">\
               <h1 class=\"m-0\">{title}</h1>\
               <p class=\"m-0\">By <a href=\"/users/1\">{creator}</a></p>\
             </div>\
             <div class=\"votes\">\
               <div class=\"icon-favorite\"></div><span class=\"text-favorite\">{fav}</span>\
               <div class=\"upvote\"></div><span class=\"vote-up-text\">{likes}</span>\
               {dislikes}\
             </div>\
             <div class=\"about\"><div class=\"ms-2\">{desc}</div>{bc}</div>\
             <div class=\"row stats\">{stats}</div>\
             {store}\
             </body></html>",
            title = self.title,
            thumb = self.thumbnail,
            creator = self.creator,
            fav = self.favorites,
            likes = self.likes,
            dislikes = dislikes,
            desc = self.description,
            bc = builders_club,
            stats = stats,
            store = store,
        )
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

pub const TEST_AGENT: &str = "SyntaxCrawlerTest/1.0";

pub fn credentials() -> Credentials {
    Credentials::new("session-token", "security-token")
}

/// A client aimed at `origin` with millisecond backoff.
pub fn client(origin: &str) -> SyntaxClient {
    SyntaxClient::builder()
        .origin(origin)
        .user_agent(TEST_AGENT)
        .timeout(Duration::from_secs(5))
        .retry_policy(fast_retry())
        .build()
        .unwrap()
}

pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        retry_statuses: RETRY_STATUSES.to_vec(),
        backoff_base: Duration::from_millis(1),
    }
}

// ---------------------------------------------------------------------------
// Mock upstream
// ---------------------------------------------------------------------------

/// Serve a catalog listing page. `None` is the root request; `Some(n)`
/// matches `page=n` and takes precedence over the root mock.
pub async fn card_page_mock(server: &MockServer, page: Option<u32>, body: String, expect: u64) {
    let response = ResponseTemplate::new(200).set_body_string(body);
    let mock = match page {
        Some(n) => Mock::given(method("GET"))
            .and(path("/catalog/"))
            .and(query_param("page", n.to_string()))
            .respond_with(response)
            .with_priority(1),
        None => Mock::given(method("GET"))
            .and(path("/catalog/"))
            .respond_with(response),
    };
    mock.expect(expect).mount(server).await;
}
