//! Selectors
//!
//! The subset of CSS selectors the page is wired with: type, universal, id,
//! class and attribute selectors, combined with the descendant and child
//! combinators, in comma-separated lists.

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Simple selectors that all apply to one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrSelector>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrSelector {
    /// `[name]`
    Exists(String),
    /// `[name="value"]`
    Equals(String, String),
}

impl SelectorList {
    pub fn parse(input: &str) -> DomResult<Self> {
        let mut selectors = Vec::new();
        for part in split_top_level(input) {
            selectors.push(ComplexSelector::parse(part).map_err(|_| invalid(input))?);
        }
        if selectors.is_empty() {
            return Err(invalid(input));
        }
        Ok(Self { selectors })
    }

    /// Check whether an element matches any selector of the list
    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node))
    }

    pub fn selectors(&self) -> &[ComplexSelector] {
        &self.selectors
    }
}

impl std::str::FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl ComplexSelector {
    pub fn parse(input: &str) -> DomResult<Self> {
        let mut cursor = Cursor::new(input);
        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        let mut pending: Option<Combinator> = None;

        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None => break,
                Some('>') => {
                    if compounds.is_empty() || pending.is_some() {
                        return Err(invalid(input));
                    }
                    cursor.bump();
                    pending = Some(Combinator::Child);
                }
                Some(_) => {
                    if !compounds.is_empty() {
                        combinators.push(pending.take().unwrap_or(Combinator::Descendant));
                    }
                    compounds.push(CompoundSelector::parse(&mut cursor, input)?);
                }
            }
        }

        if compounds.is_empty() || pending.is_some() {
            return Err(invalid(input));
        }
        Ok(Self {
            compounds,
            combinators,
        })
    }

    pub fn matches(&self, tree: &DomTree, node: NodeId) -> bool {
        self.matches_at(tree, node, self.compounds.len() - 1)
    }

    fn matches_at(&self, tree: &DomTree, node: NodeId, idx: usize) -> bool {
        let Some(elem) = tree.element(node) else {
            return false;
        };
        if !self.compounds[idx].matches(elem) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Child => tree
                .parent(node)
                .is_some_and(|p| self.matches_at(tree, p, idx - 1)),
            Combinator::Descendant => tree
                .ancestors(node)
                .any(|a| self.matches_at(tree, a, idx - 1)),
        }
    }
}

impl CompoundSelector {
    fn parse(cursor: &mut Cursor<'_>, input: &str) -> DomResult<Self> {
        let mut compound = Self::default();
        let mut any = false;

        match cursor.peek() {
            Some('*') => {
                cursor.bump();
                any = true;
            }
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(cursor.ident().to_ascii_lowercase());
                any = true;
            }
            _ => {}
        }

        loop {
            match cursor.peek() {
                Some('#') => {
                    cursor.bump();
                    let id = cursor.ident();
                    if id.is_empty() {
                        return Err(invalid(input));
                    }
                    compound.id = Some(id);
                }
                Some('.') => {
                    cursor.bump();
                    let class = cursor.ident();
                    if class.is_empty() {
                        return Err(invalid(input));
                    }
                    compound.classes.push(class);
                }
                Some('[') => {
                    cursor.bump();
                    compound.attrs.push(parse_attr(cursor, input)?);
                }
                None | Some('>') => break,
                Some(c) if c.is_whitespace() => break,
                Some(_) => return Err(invalid(input)),
            }
            any = true;
        }

        if !any {
            return Err(invalid(input));
        }
        Ok(compound)
    }

    pub fn matches(&self, elem: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if elem.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if elem.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| elem.classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|attr| match attr {
            AttrSelector::Exists(name) => elem.has_attr(name),
            AttrSelector::Equals(name, value) => {
                elem.attr_value(name).as_deref() == Some(value.as_str())
            }
        })
    }
}

fn parse_attr(cursor: &mut Cursor<'_>, input: &str) -> DomResult<AttrSelector> {
    cursor.skip_whitespace();
    let name = cursor.ident().to_ascii_lowercase();
    if name.is_empty() {
        return Err(invalid(input));
    }
    cursor.skip_whitespace();
    match cursor.bump() {
        Some(']') => Ok(AttrSelector::Exists(name)),
        Some('=') => {
            cursor.skip_whitespace();
            let value = match cursor.peek() {
                Some(q @ ('"' | '\'')) => {
                    cursor.bump();
                    cursor.until(q).ok_or_else(|| invalid(input))?
                }
                _ => cursor.ident(),
            };
            cursor.skip_whitespace();
            match cursor.bump() {
                Some(']') => Ok(AttrSelector::Equals(name, value)),
                _ => Err(invalid(input)),
            }
        }
        _ => Err(invalid(input)),
    }
}

fn invalid(input: &str) -> DomError {
    DomError::InvalidSelector(input.to_string())
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Split on commas that are outside brackets and quotes
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

struct Cursor<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn ident(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_char(c)) {
            out.push(c);
            self.bump();
        }
        out
    }

    /// Read up to (and consume) `end`; None if the input runs out first
    fn until(&mut self, end: char) -> Option<String> {
        let mut out = String::new();
        loop {
            match self.bump()? {
                c if c == end => return Some(out),
                c => out.push(c),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (DomTree, NodeId, NodeId, NodeId) {
        // <section id="applicant-preview"><div class="doggo blank"><h1/></div></section>
        let mut tree = DomTree::new();
        let section = tree.create_element_with(ElementData::with_attrs(
            "section",
            [("id", "applicant-preview")],
        ));
        let doggo = tree.create_element_with(ElementData::with_attrs(
            "div",
            [("class", "doggo blank")],
        ));
        let h1 = tree.create_element("h1");
        tree.append_child(NodeId::ROOT, section).unwrap();
        tree.append_child(section, doggo).unwrap();
        tree.append_child(doggo, h1).unwrap();
        (tree, section, doggo, h1)
    }

    #[test]
    fn test_parse_compound() {
        let list = SelectorList::parse(".doggo.fighter").unwrap();
        let compound = &list.selectors()[0].compounds[0];
        assert_eq!(compound.classes, vec!["doggo", "fighter"]);
        assert_eq!(compound.tag, None);
    }

    #[test]
    fn test_parse_attribute_forms() {
        for sel in [
            r#"input[name="picture-url"]"#,
            "input[name='picture-url']",
            "input[name=picture-url]",
            "input[ name = \"picture-url\" ]",
        ] {
            let list = SelectorList::parse(sel).unwrap();
            assert_eq!(
                list.selectors()[0].compounds[0].attrs,
                vec![AttrSelector::Equals("name".into(), "picture-url".into())],
                "{sel}"
            );
        }
    }

    #[test]
    fn test_invalid_selectors() {
        for sel in ["", "   ", ".", "#", "div >", "> div", "a > > b", "[name", "[name=\"x]", "a:hover", "a,", "[x~=y]"] {
            assert!(
                matches!(SelectorList::parse(sel), Err(DomError::InvalidSelector(_))),
                "{sel:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_descendant_and_child() {
        let (tree, _, doggo, h1) = tree();
        let desc = SelectorList::parse("#applicant-preview .doggo.blank").unwrap();
        assert!(desc.matches(&tree, doggo));

        let child = SelectorList::parse("#applicant-preview > h1").unwrap();
        assert!(!child.matches(&tree, h1));

        let deep = SelectorList::parse("section h1").unwrap();
        assert!(deep.matches(&tree, h1));
    }

    #[test]
    fn test_list_matches_any() {
        let (tree, section, doggo, h1) = tree();
        let list = SelectorList::parse("h1, section").unwrap();
        assert!(list.matches(&tree, section));
        assert!(list.matches(&tree, h1));
        assert!(!list.matches(&tree, doggo));
    }

    #[test]
    fn test_class_attribute_selector_uses_class_list() {
        let (tree, _, doggo, _) = tree();
        assert!(SelectorList::parse("[class]").unwrap().matches(&tree, doggo));
        assert!(
            SelectorList::parse(r#"div[class="doggo blank"]"#)
                .unwrap()
                .matches(&tree, doggo)
        );
    }
}
