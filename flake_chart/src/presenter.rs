use crate::page::{Element, Page};

/// Replace everything on the page with a single error message.
///
/// Any previous content, including a partially rendered chart, is erased.
pub fn show_error(page: &mut Page, message: &str) {
    log::error!("{}", message);
    page.clear_body();
    let banner = Element::new("p")
        .with_class("error")
        .with_style("color", "red")
        .with_style("font-family", "Arial")
        .with_style("font-weight", "bold")
        .with_style("margin", "5rem")
        .with_text(&format!("Error: {}", message));
    page.body_mut().append_child(banner);
}
