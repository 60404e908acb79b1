//! Class list
//!
//! Space-separated class tokens of an element. Presentation flags such as
//! `flipped` or `hovered` are stored here.

/// Ordered set of class tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from space-separated string, dropping duplicates
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        list.set_value(s);
        list
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s)
    pub fn add(&mut self, tokens: &[&str]) {
        for token in tokens {
            if !token.is_empty() && !self.contains(token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Remove token(s)
    pub fn remove(&mut self, tokens: &[&str]) {
        self.tokens.retain(|t| !tokens.contains(&t.as_str()));
    }

    /// Toggle token, returns new state
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> bool {
        let present = self.contains(token);
        let want = force.unwrap_or(!present);
        if want && !present {
            self.add(&[token]);
        } else if !want && present {
            self.remove(&[token]);
        }
        want
    }

    /// Replace token, returns whether it was present
    pub fn replace(&mut self, old_token: &str, new_token: &str) -> bool {
        if old_token == new_token {
            return self.contains(old_token);
        }
        let Some(pos) = self.tokens.iter().position(|t| t == old_token) else {
            return false;
        };
        if self.contains(new_token) {
            self.tokens.remove(pos);
        } else {
            self.tokens[pos] = new_token.to_string();
        }
        true
    }

    /// Serialized value
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Reset from a space-separated string
    pub fn set_value(&mut self, value: &str) {
        self.tokens.clear();
        for token in value.split_whitespace() {
            self.add(&[token]);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let list = ClassList::from_string("doggo fighter  doggo");
        assert_eq!(list.len(), 2);
        assert!(list.contains("doggo"));
        assert!(list.contains("fighter"));
    }

    #[test]
    fn test_add_remove() {
        let mut list = ClassList::new();
        list.add(&["flipped", "hovered"]);
        assert_eq!(list.len(), 2);

        list.remove(&["flipped"]);
        assert_eq!(list.value(), "hovered");

        // Removing an absent token is a no-op
        list.remove(&["flipped"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_toggle() {
        let mut list = ClassList::new();

        assert!(list.toggle("inverted", None));
        assert!(list.contains("inverted"));

        assert!(!list.toggle("inverted", None));
        assert!(!list.contains("inverted"));

        assert!(list.toggle("inverted", Some(true)));
        assert!(list.toggle("inverted", Some(true)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_replace() {
        let mut list = ClassList::from_string("doggo blank");
        assert!(list.replace("blank", "fighter"));
        assert_eq!(list.value(), "doggo fighter");
        assert!(!list.replace("missing", "x"));

        // same token in place of itself keeps the list intact
        assert!(list.replace("fighter", "fighter"));
        assert_eq!(list.value(), "doggo fighter");
        assert!(!list.replace("missing", "missing"));
        assert_eq!(list.value(), "doggo fighter");
    }
}
