use serde::Deserialize;

use crate::models::news::NewsItem;

/// Body of `/posts/`. Pagination fields are ignored; only the first page is read.
#[derive(Deserialize, Debug)]
pub struct PostsResponse {
    pub results: Vec<Post>,
}

#[derive(Deserialize, Debug)]
pub struct Post {
    pub title: String,
    pub url: Option<String>,
    pub published_at: Option<String>,
    pub source: Option<PostSource>,
}

#[derive(Deserialize, Debug)]
pub struct PostSource {
    pub title: Option<String>,
    pub domain: Option<String>,
}

impl From<Post> for NewsItem {
    fn from(post: Post) -> Self {
        NewsItem {
            title: post.title,
            url: post.url,
            source: post.source.and_then(|s| s.title.or(s.domain)),
            published_at: post.published_at,
        }
    }
}

impl PostsResponse {
    pub fn into_items(self) -> Vec<NewsItem> {
        self.results.into_iter().map(NewsItem::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_become_news_items_in_order() {
        let json = r#"{
            "count": 2,
            "next": "https://cryptopanic.com/api/v1/posts/?page=2",
            "previous": null,
            "results": [
                {
                    "kind": "news",
                    "domain": "coindesk.com",
                    "source": {"title": "CoinDesk", "region": "en", "domain": "coindesk.com"},
                    "title": "Bitcoin ETF inflows hit a monthly high",
                    "published_at": "2025-06-01T12:30:00Z",
                    "slug": "Bitcoin-ETF-inflows",
                    "id": 101,
                    "url": "https://cryptopanic.com/news/101/Bitcoin-ETF-inflows"
                },
                {
                    "kind": "media",
                    "source": {"domain": "youtube.com"},
                    "title": "Weekly market recap",
                    "published_at": "2025-06-01T11:00:00Z",
                    "id": 102
                }
            ]
        }"#;
        let body: PostsResponse = serde_json::from_str(json).unwrap();
        let items = body.into_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Bitcoin ETF inflows hit a monthly high");
        assert_eq!(items[0].source.as_deref(), Some("CoinDesk"));
        assert_eq!(
            items[0].url.as_deref(),
            Some("https://cryptopanic.com/news/101/Bitcoin-ETF-inflows")
        );
        assert_eq!(items[1].source.as_deref(), Some("youtube.com"));
        assert!(items[1].url.is_none());
    }

    #[test]
    fn error_body_is_malformed() {
        let body = r#"{"status": "Incomplete", "info": "Token not found"}"#;
        assert!(serde_json::from_str::<PostsResponse>(body).is_err());
    }
}
