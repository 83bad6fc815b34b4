use movie_search::TopK;

use super::{disabled_attr, escape};

pub fn search_bar(query: &str, top_k: TopK, loading: bool) -> String {
    let disabled = loading || query.trim().is_empty();

    let options: String = TopK::choices()
        .map(|choice| {
            let selected = if choice == top_k { " selected" } else { "" };
            format!(r#"<option value="{choice}"{selected}>{choice}</option>"#)
        })
        .collect();

    format!(
        r#"<form id="search-form" class="search-bar" method="post" action="/search">
  <div class="search-field">
    <label for="query">Search movies</label>
    <input id="query" name="query" value="{query}" placeholder="e.g., &quot;mind-bending sci-fi with emotional ending&quot;" autocomplete="off">
  </div>
  <div class="search-controls">
    <label for="top_k">Top</label>
    <select id="top_k" name="top_k">{options}</select>
    <button type="submit" data-requires="query" data-busy="{loading}"{disabled}>{label}</button>
  </div>
</form>"#,
        query = escape(query),
        disabled = disabled_attr(disabled),
        label = if loading { "Searching..." } else { "Search" },
    )
}
