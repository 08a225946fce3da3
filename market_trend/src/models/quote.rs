//! Spot quotes and the gainers/losers ranking built from them.

use serde::Serialize;

/// Latest price and 24h change for one entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub id: String,
    pub symbol: String,
    pub price: f64,
    /// Percentage change over the last 24 hours.
    pub change_24h: f64,
}

/// Best and worst performers over the last 24 hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovers {
    /// Highest change first.
    pub gainers: Vec<PriceQuote>,
    /// Lowest change first.
    pub losers: Vec<PriceQuote>,
}

impl TopMovers {
    /// Ranks `quotes` by 24h change and keeps `n` from each end.
    ///
    /// Quotes whose change is NaN are left out. With fewer than `2 * n`
    /// quotes the two lists overlap.
    pub fn from_quotes(quotes: impl IntoIterator<Item = PriceQuote>, n: usize) -> Self {
        let mut ranked: Vec<PriceQuote> = quotes
            .into_iter()
            .filter(|q| !q.change_24h.is_nan())
            .collect();
        ranked.sort_by(|a, b| b.change_24h.total_cmp(&a.change_24h));

        let gainers = ranked.iter().take(n).cloned().collect();
        let losers = ranked.iter().rev().take(n).cloned().collect();

        Self { gainers, losers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(id: &str, change: f64) -> PriceQuote {
        PriceQuote {
            id: id.to_string(),
            symbol: id.to_uppercase(),
            price: 1.0,
            change_24h: change,
        }
    }

    fn ids(quotes: &[PriceQuote]) -> Vec<&str> {
        quotes.iter().map(|q| q.id.as_str()).collect()
    }

    #[test]
    fn picks_both_ends() {
        let quotes = vec![
            quote("a", 1.5),
            quote("b", -4.0),
            quote("c", 9.0),
            quote("d", 0.0),
            quote("e", -1.0),
            quote("f", 3.0),
            quote("g", -0.5),
        ];
        let movers = TopMovers::from_quotes(quotes, 3);
        assert_eq!(ids(&movers.gainers), vec!["c", "f", "a"]);
        assert_eq!(ids(&movers.losers), vec!["b", "e", "g"]);
    }

    #[test]
    fn nan_changes_are_skipped() {
        let quotes = vec![quote("a", f64::NAN), quote("b", 2.0), quote("c", -2.0)];
        let movers = TopMovers::from_quotes(quotes, 3);
        assert_eq!(ids(&movers.gainers), vec!["b", "c"]);
        assert_eq!(ids(&movers.losers), vec!["c", "b"]);
    }

    #[test]
    fn empty_input_gives_empty_lists() {
        let movers = TopMovers::from_quotes(Vec::new(), 3);
        assert!(movers.gainers.is_empty());
        assert!(movers.losers.is_empty());
    }
}
