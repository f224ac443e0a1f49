//! Stock Catalog
//!
//! The hand-authored category table behind `/popular` and `/browse`, and the
//! client-side asset filter behind `/search`.
//!
//! The category table is a `static` array: it is built at compile time and
//! shared read-only by every command invocation.

// =============================================================================
// Categories
// =============================================================================

/// Category used when `/popular` is invoked without an argument.
pub const DEFAULT_CATEGORY: &str = "tech";

/// A named group of popular symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Lookup key, lowercase (e.g. `tech`).
    pub key: &'static str,
    /// Display name (e.g. `Technology Giants`).
    pub name: &'static str,
    /// Short label shown by `/browse`.
    pub label: &'static str,
    /// Emoji shown by `/browse`.
    pub emoji: &'static str,
    /// Company names shown by `/browse`.
    pub blurb: &'static str,
    /// Member symbols in display order.
    pub symbols: &'static [&'static str],
}

/// Every category, in display order.
pub static CATEGORIES: [Category; 8] = [
    Category {
        key: "tech",
        name: "Technology Giants",
        label: "Tech",
        emoji: "💻",
        blurb: "Apple, Microsoft, Google, Meta, Nvidia, Tesla, AMD, Intel",
        symbols: &[
            "AAPL", "MSFT", "GOOGL", "META", "NVDA", "TSLA", "AMD", "INTC", "CRM", "ORCL",
        ],
    },
    Category {
        key: "finance",
        name: "Financial Services",
        label: "Finance",
        emoji: "💰",
        blurb: "JPMorgan, Bank of America, Wells Fargo, Goldman Sachs",
        symbols: &[
            "JPM", "BAC", "WFC", "GS", "MS", "C", "BLK", "AXP", "SCHW", "USB",
        ],
    },
    Category {
        key: "healthcare",
        name: "Healthcare & Pharma",
        label: "Healthcare",
        emoji: "🏥",
        blurb: "Johnson & Johnson, UnitedHealth, Pfizer, AbbVie",
        symbols: &[
            "JNJ", "UNH", "PFE", "ABBV", "TMO", "MRK", "ABT", "LLY", "DHR", "CVS",
        ],
    },
    Category {
        key: "consumer",
        name: "Consumer Goods",
        label: "Consumer",
        emoji: "🛒",
        blurb: "Amazon, Walmart, Home Depot, Nike, McDonald's",
        symbols: &[
            "AMZN", "WMT", "HD", "NKE", "MCD", "SBUX", "TGT", "LOW", "COST", "PG",
        ],
    },
    Category {
        key: "energy",
        name: "Energy & Oil",
        label: "Energy",
        emoji: "⚡",
        blurb: "Exxon, Chevron, ConocoPhillips, Schlumberger",
        symbols: &[
            "XOM", "CVX", "COP", "SLB", "EOG", "PXD", "MPC", "PSX", "VLO", "OXY",
        ],
    },
    Category {
        key: "entertainment",
        name: "Media & Entertainment",
        label: "Entertainment",
        emoji: "🎬",
        blurb: "Disney, Netflix, Comcast, EA, Spotify",
        symbols: &[
            "DIS", "NFLX", "CMCSA", "WBD", "PARA", "EA", "TTWO", "LYV", "SPOT", "RBLX",
        ],
    },
    Category {
        key: "automotive",
        name: "Automotive",
        label: "Automotive",
        emoji: "🚗",
        blurb: "Tesla, Ford, GM, Rivian, Lucid, NIO",
        symbols: &[
            "TSLA", "F", "GM", "RIVN", "LCID", "NIO", "XPEV", "LI", "TM", "HMC",
        ],
    },
    Category {
        key: "airlines",
        name: "Airlines & Travel",
        label: "Airlines",
        emoji: "✈️",
        blurb: "Delta, American, United, Southwest",
        symbols: &[
            "DAL", "AAL", "UAL", "LUV", "ALK", "JBLU", "SAVE", "HA", "SKYW", "ALGT",
        ],
    },
];

/// Look up a category by key, ignoring case and surrounding whitespace.
#[must_use]
pub fn find_category(key: &str) -> Option<&'static Category> {
    let key = key.trim().to_lowercase();
    CATEGORIES.iter().find(|category| category.key == key)
}

/// All category keys in display order.
pub fn category_keys() -> impl Iterator<Item = &'static str> {
    CATEGORIES.iter().map(|category| category.key)
}

// =============================================================================
// Assets
// =============================================================================

/// Maximum number of search results shown.
pub const SEARCH_RESULT_LIMIT: usize = 15;

/// A tradable instrument as listed by the broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    pub name: String,
    /// Listing exchange.
    pub exchange: String,
    /// Whether the broker accepts orders for it.
    pub tradable: bool,
    /// Whether fractional shares are allowed.
    pub fractionable: bool,
}

/// Case-insensitive substring match on symbol or name, capped at `limit`.
#[must_use]
pub fn search_assets<'a>(assets: &'a [Asset], query: &str, limit: usize) -> Vec<&'a Asset> {
    let needle = query.trim().to_uppercase();
    assets
        .iter()
        .filter(|asset| {
            asset.symbol.to_uppercase().contains(&needle)
                || asset.name.to_uppercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(symbol: &str, name: &str) -> Asset {
        Asset {
            symbol: symbol.to_string(),
            name: name.to_string(),
            exchange: "NASDAQ".to_string(),
            tradable: true,
            fractionable: false,
        }
    }

    #[test]
    fn every_category_has_ten_unique_symbols() {
        for category in &CATEGORIES {
            assert_eq!(category.symbols.len(), 10, "{}", category.key);
            let mut sorted = category.symbols.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 10, "{}", category.key);
        }
    }

    #[test]
    fn category_keys_are_lowercase_and_unique() {
        let keys: Vec<_> = category_keys().collect();
        assert_eq!(keys.len(), CATEGORIES.len());
        for key in &keys {
            assert_eq!(*key, key.to_lowercase());
            assert_eq!(keys.iter().filter(|k| *k == key).count(), 1);
        }
    }

    #[test]
    fn find_category_ignores_case() {
        assert_eq!(find_category("TECH").map(|c| c.name), Some("Technology Giants"));
        assert_eq!(find_category(" Airlines ").map(|c| c.key), Some("airlines"));
        assert!(find_category("crypto").is_none());
        assert!(find_category(DEFAULT_CATEGORY).is_some());
    }

    #[test]
    fn search_matches_symbol_or_name() {
        let assets = vec![
            asset("AAPL", "Apple Inc. Common Stock"),
            asset("APLE", "Apple Hospitality REIT"),
            asset("MSFT", "Microsoft Corporation"),
        ];

        let symbols: Vec<_> = search_assets(&assets, "apple", 15)
            .into_iter()
            .map(|a| a.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["AAPL", "APLE"]);

        let by_symbol = search_assets(&assets, "msf", 15);
        assert_eq!(by_symbol.len(), 1);
        assert!(search_assets(&assets, "zzz", 15).is_empty());
    }

    #[test]
    fn search_caps_results() {
        let assets: Vec<Asset> = (0..40).map(|i| asset(&format!("A{i}"), "Alpha")).collect();
        assert_eq!(
            search_assets(&assets, "alpha", SEARCH_RESULT_LIMIT).len(),
            SEARCH_RESULT_LIMIT
        );
    }
}
