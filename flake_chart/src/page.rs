//! In-memory page the views render into.
//!
//! The page stands in for the browser document: views and the error
//! presenter receive it explicitly and mutate its body. Once a run is over
//! the page is serialized to a standalone HTML file.

use chrono::Utc;
use itertools::Itertools;

use crate::defaults::{CHART_CONTAINER_ID, DEFAULT_PAGE_TITLE};

/// A node of the page body.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Element(element) => element.text_content(),
            Node::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Inline style declarations in insertion order.
    pub style: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Element {
        Element {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Element {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: &str) -> Element {
        self.classes.push(class.to_string());
        self
    }

    #[must_use]
    pub fn with_style(mut self, property: &str, value: &str) -> Element {
        self.set_style(property, value);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Element {
        self.children.push(Node::Text(text.to_string()));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Element {
        self.children.push(Node::Element(child));
        self
    }

    /// Set a style property, replacing an earlier value of the same property.
    pub fn set_style(&mut self, property: &str, value: &str) {
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, v)) => *v = value.to_string(),
            None => self.style.push((property.to_string(), value.to_string())),
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| match child {
            Node::Element(element) => element.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// All descendant elements with the given tag, in document order.
    pub fn find_all_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        for child in self.child_elements() {
            if child.tag == tag {
                found.push(child);
            }
            found.extend(child.find_all_by_tag(tag));
        }
        found
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", escape_html(id)));
        }
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape_html(&self.classes.join(" "))));
        }
        if !self.style.is_empty() {
            let style = self
                .style
                .iter()
                .map(|(p, v)| format!("{}: {}", p, v))
                .join("; ");
            out.push_str(&format!(" style=\"{}\"", escape_html(&style)));
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) => out.push_str(&escape_html(text)),
            }
        }
        out.push_str(&format!("</{}>", self.tag));
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

const DEFAULT_PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{{TITLE}}</title>
    {{HEAD}}
    <style>{{CUSTOM_CSS}}</style>
</head>
{{BODY}}
<!-- generated {{TIMESTAMP}} -->
<script>{{SCRIPTS}}</script>
</html>"#;

/// Metadata for rendering the page shell
pub struct PageMetadata {
    pub title: String,
    pub custom_css: String,
    pub timestamp: String,
}

impl PageMetadata {
    pub fn new(title: Option<String>, custom_css: String) -> PageMetadata {
        PageMetadata {
            title: title.unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
            custom_css,
            timestamp: Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

/// The render target: document head assets plus a mutable body.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    head: Vec<String>,
    scripts: Vec<String>,
    body: Element,
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Page {
    /// A fresh page whose body holds the empty chart container.
    pub fn new() -> Page {
        Page {
            head: Vec::new(),
            scripts: Vec::new(),
            body: Element::new("body").with_child(Element::new("div").with_id(CHART_CONTAINER_ID)),
        }
    }

    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.body.find_by_id(id)
    }

    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.body.find_by_id_mut(id)
    }

    /// Remove every child of the body.
    pub fn clear_body(&mut self) {
        self.body.children.clear();
    }

    /// Add raw markup to the document head, once.
    pub fn add_head_asset(&mut self, asset: &str) {
        if !self.head.iter().any(|a| a == asset) {
            self.head.push(asset.to_string());
        }
    }

    pub fn head_assets(&self) -> &[String] {
        &self.head
    }

    /// Add an inline script that runs after the body is loaded, once.
    pub fn add_script(&mut self, script: &str) {
        if !self.scripts.iter().any(|s| s == script) {
            self.scripts.push(script.to_string());
        }
    }

    pub fn to_html(&self, metadata: &PageMetadata) -> String {
        apply_template(
            DEFAULT_PAGE_TEMPLATE,
            &[
                ("TITLE", escape_html(&metadata.title).as_str()),
                ("HEAD", self.head.join("\n    ").as_str()),
                ("CUSTOM_CSS", metadata.custom_css.as_str()),
                ("TIMESTAMP", metadata.timestamp.as_str()),
                ("SCRIPTS", self.scripts.join("\n").as_str()),
                ("BODY", self.body.to_html().as_str()),
            ],
        )
    }
}

/// Fill the `{{NAME}}` placeholders of `template` in a single pass.
///
/// Substituted values are never scanned again, and unknown placeholders are
/// kept as they are.
fn apply_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let substitution = after.find("}}").and_then(|end| {
            values
                .iter()
                .find(|(name, _)| *name == &after[..end])
                .map(|(_, value)| (end, *value))
        });
        match substitution {
            Some((end, value)) => {
                out.push_str(value);
                rest = &after[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PageMetadata {
        PageMetadata {
            title: "Flakes".to_string(),
            custom_css: "td { padding: 2px; }".to_string(),
            timestamp: "2024-01-01 00:00:00 UTC".to_string(),
        }
    }

    #[test]
    fn test_new_page_has_empty_chart_container() {
        let page = Page::new();
        let container = page.element_by_id(CHART_CONTAINER_ID).unwrap();
        assert_eq!(container.tag, "div");
        assert!(container.children.is_empty());
    }

    #[test]
    fn test_clear_body() {
        let mut page = Page::new();
        page.body_mut().append_child(Element::new("p").with_text("hello"));
        page.clear_body();
        assert!(page.body().children.is_empty());
        assert!(page.element_by_id(CHART_CONTAINER_ID).is_none());
    }

    #[test]
    fn test_set_style_replaces() {
        let mut element = Element::new("td").with_style("text-align", "left");
        element.set_style("text-align", "right");
        assert_eq!(element.style, vec![("text-align".to_string(), "right".to_string())]);
        assert_eq!(element.style("text-align"), Some("right"));
        assert_eq!(element.style("color"), None);
    }

    #[test]
    fn test_element_html_is_escaped() {
        let element = Element::new("td")
            .with_class("name")
            .with_style("color", "red")
            .with_text("<TestA & \"B\">");
        assert_eq!(
            element.to_html(),
            r#"<td class="name" style="color: red">&lt;TestA &amp; &quot;B&quot;&gt;</td>"#
        );
    }

    #[test]
    fn test_find_all_by_tag_in_document_order() {
        let table = Element::new("table")
            .with_child(Element::new("tr").with_child(Element::new("td").with_text("1")))
            .with_child(
                Element::new("tbody")
                    .with_child(Element::new("tr").with_child(Element::new("td").with_text("2"))),
            );
        let cells: Vec<String> = table
            .find_all_by_tag("td")
            .iter()
            .map(|td| td.text_content())
            .collect();
        assert_eq!(cells, vec!["1", "2"]);
        assert_eq!(table.find_all_by_tag("tr").len(), 2);
    }

    #[test]
    fn test_assets_are_deduplicated() {
        let mut page = Page::new();
        page.add_head_asset("<script src=\"a.js\"></script>");
        page.add_head_asset("<script src=\"a.js\"></script>");
        page.add_script("init();");
        page.add_script("init();");
        assert_eq!(page.head_assets().len(), 1);
        let html = page.to_html(&metadata());
        assert_eq!(html.matches("init();").count(), 1);
    }

    #[test]
    fn test_page_html_shell() {
        let page = Page::new();
        let html = page.to_html(&metadata());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Flakes</title>"));
        assert!(html.contains("<style>td { padding: 2px; }</style>"));
        assert!(html.contains("<body><div id=\"chart_div\"></div></body>"));
        assert!(html.contains("2024-01-01 00:00:00 UTC"));
    }

    #[test]
    fn test_placeholders_in_user_values_are_kept() {
        let mut page = Page::new();
        page.body_mut()
            .append_child(Element::new("p").with_text("{{TIMESTAMP}}"));
        let metadata = PageMetadata {
            title: "{{BODY}} {{SCRIPTS}}".to_string(),
            custom_css: "/* {{TITLE}} */".to_string(),
            timestamp: "2024-01-01 00:00:00 UTC".to_string(),
        };

        let html = page.to_html(&metadata);

        assert!(html.contains("<title>{{BODY}} {{SCRIPTS}}</title>"));
        assert!(html.contains("<style>/* {{TITLE}} */</style>"));
        assert!(html.contains("<p>{{TIMESTAMP}}</p>"));
        assert_eq!(html.matches("<body>").count(), 1);
    }

    #[test]
    fn test_apply_template() {
        assert_eq!(
            apply_template("{{A}}-{{B}}-{{C}}-{{", &[("A", "{{B}}"), ("B", "x")]),
            "{{B}}-x-{{C}}-{{"
        );
    }

    #[test]
    fn test_default_title() {
        let metadata = PageMetadata::new(None, String::new());
        assert_eq!(metadata.title, DEFAULT_PAGE_TITLE);
        let metadata = PageMetadata::new(Some("Docker_Linux".to_string()), String::new());
        assert_eq!(metadata.title, "Docker_Linux");
    }
}
