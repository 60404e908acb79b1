//! Inline style
//!
//! The `style` attribute as an ordered list of declarations. Property names
//! are stored in kebab-case; the camelCase spelling used by script-style
//! property access (`backgroundImage`) is accepted everywhere.

/// Inline style declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    decls: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `prop: value; prop: value`
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for decl in split_declarations(css) {
            if let Some((prop, value)) = decl.split_once(':') {
                style.set(prop.trim(), value.trim());
            }
        }
        style
    }

    /// Set a property; an empty value removes it
    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let name = normalize_property(property);
        let value = value.into();
        if name.is_empty() {
            return;
        }
        if value.trim().is_empty() {
            self.decls.retain(|(p, _)| *p != name);
            return;
        }
        match self.decls.iter_mut().find(|(p, _)| *p == name) {
            Some((_, v)) => *v = value,
            None => self.decls.push((name, value)),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        let name = normalize_property(property);
        self.decls
            .iter()
            .find(|(p, _)| *p == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let name = normalize_property(property);
        let pos = self.decls.iter().position(|(p, _)| *p == name)?;
        Some(self.decls.remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Serialized declarations
    pub fn css_text(&self) -> String {
        self.decls
            .iter()
            .map(|(p, v)| format!("{p}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Split on `;` outside parentheses and quotes, so `url(data:...;base64,...)`
/// stays one value
fn split_declarations(css: &str) -> Vec<&str> {
    let mut decls = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in css.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                decls.push(&css[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    decls.push(&css[start..]);
    decls
}

/// `backgroundImage` -> `background-image`
fn normalize_property(property: &str) -> String {
    let property = property.trim();
    if property.starts_with("--") {
        return property.to_string();
    }
    let mut out = String::with_capacity(property.len() + 4);
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_and_kebab_are_the_same_property() {
        let mut style = InlineStyle::new();
        style.set("backgroundImage", "url(http://x/y.png)");
        assert_eq!(style.get("background-image"), Some("url(http://x/y.png)"));

        style.set("background-image", "none");
        assert_eq!(style.len(), 1);
        assert_eq!(style.get("backgroundImage"), Some("none"));
    }

    #[test]
    fn test_parse_and_serialize() {
        let style = InlineStyle::parse("position: fixed; bottom:0;; font-size: 2em");
        assert_eq!(style.len(), 3);
        assert_eq!(style.get("bottom"), Some("0"));
        assert_eq!(style.css_text(), "position: fixed; bottom: 0; font-size: 2em;");
    }

    #[test]
    fn test_parse_keeps_semicolons_inside_url() {
        let css = "background-image: url(data:image/png;base64,AAAA); color: red";
        let style = InlineStyle::parse(css);
        assert_eq!(style.len(), 2);
        assert_eq!(style.get("backgroundImage"), Some("url(data:image/png;base64,AAAA)"));
        assert_eq!(style.get("color"), Some("red"));

        let reparsed = InlineStyle::parse(&style.css_text());
        assert_eq!(reparsed, style);

        let quoted = InlineStyle::parse(r#"content: "a;b"; top: 0"#);
        assert_eq!(quoted.get("content"), Some(r#""a;b""#));
        assert_eq!(quoted.get("top"), Some("0"));
    }

    #[test]
    fn test_empty_value_removes() {
        let mut style = InlineStyle::parse("border: medium solid red");
        style.set("border", "");
        assert!(style.is_empty());
        assert_eq!(style.remove("border"), None);
    }
}
