//! Affiliate tagging of outbound marketplace URLs.

use crate::catalog::Source;
use serde::{Deserialize, Serialize};

/// Affiliate id appended to Amazon links unless configured otherwise.
pub const DEFAULT_AMAZON_TAG: &str = "atozhomedel0b-21";

/// Affiliate program settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateConfig {
    /// Value of the `tag` query parameter for Amazon links.
    #[serde(default = "default_amazon_tag")]
    pub amazon_tag: String,
}

fn default_amazon_tag() -> String {
    DEFAULT_AMAZON_TAG.to_string()
}

impl Default for AffiliateConfig {
    fn default() -> Self {
        Self {
            amazon_tag: default_amazon_tag(),
        }
    }
}

impl AffiliateConfig {
    pub fn new(amazon_tag: impl Into<String>) -> Self {
        Self {
            amazon_tag: amazon_tag.into(),
        }
    }

    /// Decorate `url` with the affiliate parameter for `source`.
    ///
    /// Only Amazon links are tagged. A URL that already carries a `tag=`
    /// parameter is returned unchanged, so decorating twice is a no-op.
    pub fn decorate(&self, url: &str, source: Source) -> String {
        if source != Source::Amazon || url.contains("tag=") {
            return url.to_string();
        }
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}tag={}", url, separator, self.amazon_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amazon_gets_tag() {
        let config = AffiliateConfig::default();
        assert_eq!(
            config.decorate("https://www.amazon.in/dp/B0001", Source::Amazon),
            "https://www.amazon.in/dp/B0001?tag=atozhomedel0b-21"
        );
        assert_eq!(
            config.decorate("https://www.amazon.in/s?k=atta", Source::Amazon),
            "https://www.amazon.in/s?k=atta&tag=atozhomedel0b-21"
        );
    }

    #[test]
    fn test_decorate_is_idempotent() {
        let config = AffiliateConfig::new("mytag-21");
        let once = config.decorate("https://www.amazon.in/dp/B0001", Source::Amazon);
        let twice = config.decorate(&once, Source::Amazon);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("tag=").count(), 1);
    }

    #[test]
    fn test_other_sources_untouched() {
        let config = AffiliateConfig::default();
        let url = "https://www.flipkart.com/item/p/itm123";
        assert_eq!(config.decorate(url, Source::Flipkart), url);
        assert_eq!(config.decorate(url, Source::Indiamart), url);
    }
}
