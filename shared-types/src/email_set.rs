use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered set of email addresses, iterated in first-seen order.
///
/// Comparison is exact and case-sensitive; no normalisation is applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct EmailSet {
    emails: Vec<String>,
    seen: HashSet<String>,
}

impl EmailSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an address, returning `false` if it was already present.
    pub fn insert(&mut self, email: impl Into<String>) -> bool {
        let email = email.into();
        if self.seen.contains(&email) {
            return false;
        }
        self.seen.insert(email.clone());
        self.emails.push(email);
        true
    }

    /// Append another set, keeping the first occurrence of every address.
    pub fn merge(&mut self, other: EmailSet) {
        for email in other.emails {
            self.insert(email);
        }
    }

    pub fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.emails.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.emails
    }

    pub fn into_vec(self) -> Vec<String> {
        self.emails
    }

    /// Render for an output sink, e.g. `join("\n")` for display or clipboard.
    pub fn join(&self, separator: &str) -> String {
        self.emails.join(separator)
    }
}

impl PartialEq for EmailSet {
    fn eq(&self, other: &Self) -> bool {
        self.emails == other.emails
    }
}

impl Eq for EmailSet {}

impl<S: Into<String>> FromIterator<S> for EmailSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = EmailSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for EmailSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for email in iter {
            self.insert(email);
        }
    }
}

impl IntoIterator for EmailSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.into_iter()
    }
}

impl<'a> IntoIterator for &'a EmailSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.emails.iter()
    }
}

impl From<Vec<String>> for EmailSet {
    fn from(emails: Vec<String>) -> Self {
        emails.into_iter().collect()
    }
}

impl From<EmailSet> for Vec<String> {
    fn from(set: EmailSet) -> Self {
        set.emails
    }
}

impl PartialEq<Vec<&str>> for EmailSet {
    fn eq(&self, other: &Vec<&str>) -> bool {
        self.emails.len() == other.len() && self.emails.iter().zip(other).all(|(a, b)| a == b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_occurrence() {
        let mut set = EmailSet::new();
        assert!(set.insert("a@x.com"));
        assert!(set.insert("b@y.com"));
        assert!(!set.insert("a@x.com"));

        assert_eq!(set, vec!["a@x.com", "b@y.com"]);
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let set: EmailSet = ["Jane@Example.com", "jane@example.com"].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first: EmailSet = ["a@x.com", "b@y.com"].into_iter().collect();
        let second: EmailSet = ["c@z.com", "a@x.com", "d@w.com"].into_iter().collect();
        first.merge(second);

        assert_eq!(first, vec!["a@x.com", "b@y.com", "c@z.com", "d@w.com"]);
    }

    #[test]
    fn test_join_for_output() {
        let set: EmailSet = ["a@x.com", "b@y.com"].into_iter().collect();
        assert_eq!(set.join("\n"), "a@x.com\nb@y.com");
        assert_eq!(EmailSet::new().join("\n"), "");
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let set: EmailSet = ["a@x.com", "b@y.com"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["a@x.com","b@y.com"]"#);

        let back: EmailSet = serde_json::from_str(r#"["a@x.com","a@x.com"]"#).unwrap();
        assert_eq!(back, vec!["a@x.com"]);
        assert!(back.contains("a@x.com"));
    }
}
