use movie_search::PageState;

use super::{escape, qa_panel, result_card, search_bar, QaPanelProps};

// Re-enables trigger buttons as soon as their input has text, and keeps the
// ask form's hidden search fields in step with the search bar.
const SCRIPT: &str = r#"<script>
document.querySelectorAll('button[data-requires]').forEach(function (button) {
  var field = document.getElementById(button.dataset.requires);
  var busy = button.dataset.busy === 'true';
  field.addEventListener('input', function () {
    button.disabled = busy || field.value.trim().length === 0;
  });
});
[['query', 'ask-query'], ['top_k', 'ask-top-k']].forEach(function (pair) {
  var source = document.getElementById(pair[0]);
  var target = document.getElementById(pair[1]);
  ['input', 'change'].forEach(function (event) {
    source.addEventListener(event, function () { target.value = source.value; });
  });
});
</script>"#;

pub fn page(state: &PageState) -> String {
    // Another tab may be waiting on the backend; poll until it settles.
    let refresh = if state.loading || state.qa_loading {
        r#"<meta http-equiv="refresh" content="2">"#
    } else {
        ""
    };

    let search_error = state
        .error
        .as_deref()
        .map(|error| format!(r#"<p class="error">{}</p>"#, escape(error)))
        .unwrap_or_default();

    let summary = if state.results.is_empty() {
        "Run a search to see results".to_string()
    } else {
        format!("Showing {} results", state.results.len())
    };

    let cards: String = state.results.iter().map(result_card).collect();

    let qa = qa_panel(&QaPanelProps {
        question: &state.question,
        loading: state.qa_loading,
        answer: state.answer.as_deref(),
        error: state.qa_error.as_deref(),
        citations: &state.citations,
        query: &state.query,
        top_k: state.top_k,
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Movie Semantic Search</title>
  <meta name="description" content="Semantic search over movies + QA">
  {refresh}
</head>
<body>
<main>
  <header>
    <h1>Semantic Search Engine for Movies</h1>
    <p>Embedding-based search + QA over TMDb movies</p>
  </header>
  <section class="controls">
    {search_bar}
    {search_error}
  </section>
  <section class="columns">
    <div class="results">
      <div class="results-head">
        <h2>Results</h2>
        <span class="summary">{summary}</span>
      </div>
      <div class="cards">
{cards}
      </div>
    </div>
    <div class="qa">
{qa}
    </div>
  </section>
</main>
{SCRIPT}
</body>
</html>"#,
        search_bar = search_bar(&state.query, state.top_k, state.loading),
    )
}
