use rustc_hash::FxHashSet;

/// Ordered set of trusted anchor tokens.
///
/// The order is the search priority used when deriving prices; membership
/// decides which side of a trade or pool is trusted for USD tracking.
/// Entries are stored lowercase and deduplicated, keeping the first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    tokens: Vec<String>,
    members: FxHashSet<String>,
}

impl Whitelist {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut whitelist = Self::default();
        for token in tokens {
            let token = token.as_ref().to_lowercase();
            if whitelist.members.insert(token.clone()) {
                whitelist.tokens.push(token);
            }
        }
        whitelist
    }

    pub fn contains(&self, token: &str) -> bool {
        self.members.contains(&token.to_lowercase())
    }

    /// Iterate entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_keeps_order_and_dedups() {
        let whitelist = Whitelist::new(["0xBB", "0xaa", "0xbb"]);
        assert_eq!(whitelist.iter().collect::<Vec<_>>(), vec!["0xbb", "0xaa"]);
        assert_eq!(whitelist.len(), 2);
    }

    #[test]
    fn test_whitelist_contains_is_case_insensitive() {
        let whitelist = Whitelist::new(["0x5AEa5775959fBC2557Cc8789bC1bf90A239D9a91"]);
        assert!(whitelist.contains("0x5aea5775959fbc2557cc8789bc1bf90a239d9a91"));
        assert!(whitelist.contains("0x5AEA5775959FBC2557CC8789BC1BF90A239D9A91"));
        assert!(!whitelist.contains("0x3355df6d4c9c3035724fd0e3914de96a5a83aaf4"));
    }

    #[test]
    fn test_empty_whitelist() {
        let whitelist = Whitelist::new(Vec::<String>::new());
        assert!(whitelist.is_empty());
        assert!(!whitelist.contains("0xaa"));
    }
}
