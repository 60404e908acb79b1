//! Form data
//!
//! Named field values collected from a form's controls at submission time.

use crate::{Document, DomError, DomResult, NodeId};

/// Form data set, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the submittable controls of `form`
    ///
    /// Controls need a non-empty `name` and no `disabled` attribute.
    /// Checkboxes and radios count only when checked; button-like inputs
    /// never do.
    pub fn from_form(document: &Document, form: NodeId) -> DomResult<Self> {
        let tree = document.tree();
        if tree.element(form).is_none() {
            return Err(DomError::NotAnElement(form));
        }

        let mut data = Self::new();
        for id in tree.descendants(form) {
            let Some(elem) = tree.element(id) else {
                continue;
            };
            let Some(name) = elem.get_attr("name").filter(|n| !n.is_empty()) else {
                continue;
            };
            if elem.has_attr("disabled") {
                continue;
            }
            let value = match elem.tag.as_str() {
                "input" => match elem.input_type().as_str() {
                    "submit" | "button" | "reset" | "image" | "file" => continue,
                    "checkbox" | "radio" if !elem.checked => continue,
                    "checkbox" | "radio" => elem.get_attr("value").unwrap_or("on").to_string(),
                    _ => elem.value.clone(),
                },
                "textarea" => elem.value.clone(),
                "select" => selected_option_value(document, id),
                _ => continue,
            };
            data.append(name, value);
        }
        Ok(data)
    }

    /// Append a text value
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name`
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Delete all entries with name
    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to URL-encoded string
    pub fn to_url_encoded(&self) -> String {
        self.entries
            .iter()
            .map(|(name, value)| format!("{}={}", urlencode(name), urlencode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Select the option of `select` whose value is `value`
///
/// Returns false, leaving the selection alone, when no option matches.
pub fn select_option(document: &mut Document, select: NodeId, value: &str) -> DomResult<bool> {
    if document.tag_name(select) != Some("select") {
        return Err(DomError::NotAnElement(select));
    }
    let options = options_of(document, select);
    let Some(chosen) = options
        .iter()
        .copied()
        .find(|&id| option_value(document, id) == value)
    else {
        return Ok(false);
    };
    for id in options {
        if let Some(option) = document.element_mut(id) {
            if id == chosen {
                option.set_attr("selected", "");
            } else {
                option.remove_attr("selected");
            }
        }
    }
    Ok(true)
}

fn options_of(document: &Document, select: NodeId) -> Vec<NodeId> {
    let tree = document.tree();
    tree.descendants(select)
        .into_iter()
        .filter(|&id| tree.element(id).is_some_and(|e| e.tag == "option"))
        .collect()
}

/// `value` attribute, falling back to the trimmed text
fn option_value(document: &Document, option: NodeId) -> String {
    match document.element(option).and_then(|e| e.get_attr("value")) {
        Some(value) => value.to_string(),
        None => document.text_content(option).trim().to_string(),
    }
}

/// Value of the selected option, or of the first option when none is
fn selected_option_value(document: &Document, select: NodeId) -> String {
    let tree = document.tree();
    let options = options_of(document, select);
    let chosen = options
        .iter()
        .copied()
        .find(|&id| tree.element(id).is_some_and(|e| e.has_attr("selected")))
        .or_else(|| options.first().copied());
    chosen
        .map(|option| option_value(document, option))
        .unwrap_or_default()
}

fn urlencode(s: &str) -> String {
    let mut result = String::new();
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            b' ' => result.push('+'),
            _ => result.push_str(&format!("%{byte:02X}")),
        }
    }
    result
}
