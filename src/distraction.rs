//! Flags records pointing at sites that tend to eat time. Matching is a plain substring check on
//! the URL, so `youtube.com` also catches `m.youtube.com/watch?...`.

use crate::{history::HistoryEntry, tabs::TabRecord};

pub const DEFAULT_DISTRACTING_DOMAINS: [&str; 4] =
    ["youtube.com", "reddit.com", "twitter.com", "instagram.com"];

/// Anything that can be checked against the distracting domain list.
pub trait HasUrl {
    fn url(&self) -> &str;
}

impl HasUrl for TabRecord {
    fn url(&self) -> &str {
        &self.url
    }
}

impl HasUrl for HistoryEntry {
    fn url(&self) -> &str {
        &self.url
    }
}

/// Returns the first listed domain contained in `url`. Blank entries never match.
pub fn matching_domain<'a, D: AsRef<str>>(url: &str, domains: &'a [D]) -> Option<&'a str> {
    domains
        .iter()
        .map(AsRef::as_ref)
        .filter(|domain| !domain.trim().is_empty())
        .find(|domain| url.contains(domain))
}

/// Keeps the records whose URL contains any of `domains`, in their original order.
pub fn filter_distracting<'a, T: HasUrl, D: AsRef<str>>(
    records: &'a [T],
    domains: &[D],
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| matching_domain(record.url(), domains).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::tabs::TabRecord;

    use super::{filter_distracting, matching_domain, DEFAULT_DISTRACTING_DOMAINS};

    fn tab(url: &str, window: u32) -> TabRecord {
        TabRecord {
            url: url.into(),
            title: format!("title of {url}"),
            window,
        }
    }

    #[test]
    fn test_no_matches_is_empty() {
        let tabs = vec![
            tab("https://docs.rs/chrono", 1),
            tab("https://github.com/rust-lang/rust", 1),
        ];
        assert!(filter_distracting(&tabs, &DEFAULT_DISTRACTING_DOMAINS).is_empty());
    }

    #[test]
    fn test_all_match_keeps_everything_in_order() {
        let tabs = vec![
            tab("https://www.reddit.com/r/rust", 2),
            tab("https://www.youtube.com/watch?v=1", 1),
            tab("https://instagram.com/", 1),
            tab("https://twitter.com/home", 3),
        ];
        let filtered = filter_distracting(&tabs, &DEFAULT_DISTRACTING_DOMAINS);
        assert_eq!(filtered, tabs.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_mixed_preserves_order() {
        let tabs = vec![
            tab("https://www.youtube.com/watch?v=1", 1),
            tab("https://docs.rs", 1),
            tab("https://old.reddit.com", 2),
        ];
        let filtered = filter_distracting(&tabs, &DEFAULT_DISTRACTING_DOMAINS);
        assert_eq!(filtered, vec![&tabs[0], &tabs[2]]);
    }

    #[test]
    fn test_custom_domains() {
        let tabs = vec![tab("https://news.ycombinator.com", 1), tab("https://youtube.com", 1)];
        let custom = vec!["ycombinator.com".to_string()];
        assert_eq!(filter_distracting(&tabs, &custom), vec![&tabs[0]]);
    }

    #[test]
    fn test_blank_domains_match_nothing() {
        let tabs = vec![tab("https://docs.rs", 1), tab("https://youtube.com", 1)];
        assert!(filter_distracting(&tabs, &["", "  "]).is_empty());
        assert_eq!(filter_distracting(&tabs, &["", "youtube.com"]), vec![&tabs[1]]);
        assert_eq!(matching_domain("https://docs.rs", &["", " ", "docs.rs"]), Some("docs.rs"));
    }

    #[test]
    fn test_matching_domain_picks_first_listed() {
        assert_eq!(
            matching_domain("https://twitter.com/youtube.com", &DEFAULT_DISTRACTING_DOMAINS),
            Some("youtube.com")
        );
        assert_eq!(matching_domain("https://example.org", &DEFAULT_DISTRACTING_DOMAINS), None);
    }
}
