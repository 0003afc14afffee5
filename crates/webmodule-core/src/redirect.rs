//! Exact-path redirect resolution.
//!
//! Rules are matched by plain string equality, in insertion order, first
//! match wins. There are no wildcards: tables are small and fixed at boot,
//! so the default implementation is a linear scan over a `Vec`.

use std::collections::HashMap;

use crate::route::RedirectRule;

/// Storage for redirect rules.
pub trait RedirectTable: Send + Sync {
    /// Append a rule. No deduplication, no validation of the target.
    fn add(&mut self, rule: RedirectRule);

    /// Target of the first rule whose `from_path` equals `path`.
    fn resolve(&self, path: &str) -> Option<&str>;

    /// All rules in insertion order.
    fn rules(&self) -> &[RedirectRule];

    fn len(&self) -> usize {
        self.rules().len()
    }

    fn is_empty(&self) -> bool {
        self.rules().is_empty()
    }
}

/// Linear-scan redirect table.
#[derive(Debug, Clone, Default)]
pub struct LinearRedirects {
    rules: Vec<RedirectRule>,
}

impl LinearRedirects {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RedirectTable for LinearRedirects {
    fn add(&mut self, rule: RedirectRule) {
        self.rules.push(rule);
    }

    fn resolve(&self, path: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|rule| rule.from_path == path)
            .map(|rule| rule.to_path.as_str())
    }

    fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }
}

/// Hash-indexed redirect table for larger rule sets.
///
/// Keeps the same first-match-wins semantics: the index only records the
/// position of the first rule for each source path.
#[derive(Debug, Clone, Default)]
pub struct IndexedRedirects {
    rules: Vec<RedirectRule>,
    index: HashMap<String, usize>,
}

impl IndexedRedirects {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RedirectTable for IndexedRedirects {
    fn add(&mut self, rule: RedirectRule) {
        let position = self.rules.len();
        self.index.entry(rule.from_path.clone()).or_insert(position);
        self.rules.push(rule);
    }

    fn resolve(&self, path: &str) -> Option<&str> {
        self.index
            .get(path)
            .map(|&i| self.rules[i].to_path.as_str())
    }

    fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populate(table: &mut dyn RedirectTable) {
        table.add(RedirectRule::new("/", "/main/"));
        table.add(RedirectRule::new("/old", "/main/"));
        table.add(RedirectRule::new("/config", "/settings/"));
        table.add(RedirectRule::new("/config", "/elsewhere/"));
        table.add(RedirectRule::new("/docs", "https://example.com/documentation"));
    }

    fn check_semantics(table: &dyn RedirectTable) {
        assert_eq!(table.resolve("/"), Some("/main/"));
        assert_eq!(table.resolve("/old"), Some("/main/"));
        // First match wins over later duplicates
        assert_eq!(table.resolve("/config"), Some("/settings/"));
        assert_eq!(
            table.resolve("/docs"),
            Some("https://example.com/documentation")
        );
        // Exact match only
        assert_eq!(table.resolve("/main/"), None);
        assert_eq!(table.resolve("/old/"), None);
        assert_eq!(table.resolve("/OLD"), None);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_linear_redirects() {
        let mut table = LinearRedirects::new();
        assert!(table.is_empty());
        populate(&mut table);
        check_semantics(&table);
    }

    #[test]
    fn test_indexed_redirects_match_linear() {
        let mut table = IndexedRedirects::new();
        populate(&mut table);
        check_semantics(&table);
    }

    #[test]
    fn test_empty_target_is_stored() {
        let mut table = IndexedRedirects::new();
        table.add(RedirectRule::new("/blank", ""));
        table.add(RedirectRule::new("/blank", "/later"));
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("/blank"), Some(""));
    }
}
