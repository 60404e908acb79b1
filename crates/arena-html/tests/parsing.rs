//! Parsing tests for arena-html
//!
//! Edge cases of the HTML5 algorithm and what ends up in the arena DOM.

use arena_html::{parse, parse_with_url, HtmlParser};

#[test]
fn test_parse_minimal_html() {
    let doc = HtmlParser::new().parse("");
    assert!(doc.tree().len() >= 1, "Even empty HTML should have root");
    assert!(doc.body().is_some(), "html5ever always synthesizes a body");
}

#[test]
fn test_parse_keeps_url() {
    let doc = parse_with_url("<p>hi</p>", "http://localhost/arena.html");
    assert_eq!(doc.url(), "http://localhost/arena.html");
}

#[test]
fn test_classes_and_ids_are_queryable() {
    let html = r#"
        <div class="team salmon">
            <div id="toxic-tim" class="doggo fighter"><h1>Toxic Tim</h1></div>
        </div>
    "#;
    let doc = parse(html);

    let tim = doc.get_element_by_id("toxic-tim").expect("fighter");
    assert_eq!(doc.query_selector(".team.salmon .doggo.fighter").unwrap(), Some(tim));
    assert_eq!(doc.text_content(tim), "Toxic Tim");
}

#[test]
fn test_whitespace_text_is_dropped() {
    let doc = parse("<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>");
    let ul = doc.query_selector("ul").unwrap().expect("ul");
    assert_eq!(doc.tree().children(ul).count(), 2);
}

#[test]
fn test_form_controls_get_live_values() {
    let html = r#"
        <form>
            <input name="name" value="Rex">
            <textarea name="bio">Good boy</textarea>
        </form>
    "#;
    let doc = parse(html);
    let input = doc.query_selector(r#"input[name="name"]"#).unwrap().expect("input");
    let textarea = doc.query_selector("textarea").unwrap().expect("textarea");

    assert_eq!(doc.value(input), Some("Rex"));
    assert_eq!(doc.value(textarea), Some("Good boy"));
}

#[test]
fn test_parse_malformed_html() {
    let html = r#"
        <div class="doggo fighter">
            <p>Unclosed paragraph
            <span>Unclosed span
        </div>
        <p>Another paragraph without closing
    "#;

    let doc = parse(html);
    assert_eq!(doc.query_selector_all("p").unwrap().len(), 2);
}

#[test]
fn test_inline_style_is_parsed() {
    let doc = parse(r#"<div id="readout" style="position: fixed; bottom: 0"></div>"#);
    let div = doc.get_element_by_id("readout").expect("div");
    assert_eq!(doc.style(div).and_then(|s| s.get("position")), Some("fixed"));
}
