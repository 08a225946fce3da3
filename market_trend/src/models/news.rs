//! Headlines for the news panel.

use serde::{Deserialize, Serialize};

/// One headline as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: Option<String>,
    /// Publisher name, when the feed reports one.
    pub source: Option<String>,
    /// RFC 3339 timestamp as sent by the feed.
    pub published_at: Option<String>,
}

/// What the news panel renders: a few headlines, or a failure flag.
///
/// A failed fetch never surfaces as an error; it yields an empty list with
/// `unavailable` set, which is distinct from a feed that is simply empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NewsFeed {
    pub items: Vec<NewsItem>,
    pub unavailable: bool,
}

impl NewsFeed {
    /// Keeps the first `limit` items, in feed order.
    pub fn available(mut items: Vec<NewsItem>, limit: usize) -> Self {
        items.truncate(limit);
        Self {
            items,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            items: Vec::new(),
            unavailable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headline(n: usize) -> NewsItem {
        NewsItem {
            title: format!("headline {n}"),
            url: None,
            source: None,
            published_at: None,
        }
    }

    #[test]
    fn available_keeps_the_first_items() {
        let feed = NewsFeed::available((0..8).map(headline).collect(), 5);
        assert_eq!(feed.items.len(), 5);
        assert_eq!(feed.items[0].title, "headline 0");
        assert_eq!(feed.items[4].title, "headline 4");
        assert!(!feed.unavailable);
    }

    #[test]
    fn empty_feed_is_not_a_failure() {
        let empty = NewsFeed::available(Vec::new(), 5);
        assert!(empty.items.is_empty());
        assert_ne!(empty, NewsFeed::unavailable());
    }
}
