//! HTML rendering for the search page. Every function here is a pure
//! mapping from state to markup; nothing touches the network.

mod page;
mod qa_panel;
mod result_card;
mod search_bar;

pub use page::page;
pub use qa_panel::{qa_panel, QaPanelProps};
pub use result_card::result_card;
pub use search_bar::search_bar;

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
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

fn disabled_attr(disabled: bool) -> &'static str {
    if disabled {
        " disabled"
    } else {
        ""
    }
}
