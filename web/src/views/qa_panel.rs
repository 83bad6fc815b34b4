use movie_search::{Citation, TopK};

use super::{disabled_attr, escape};

pub struct QaPanelProps<'a> {
    pub question: &'a str,
    pub loading: bool,
    pub answer: Option<&'a str>,
    pub error: Option<&'a str>,
    pub citations: &'a [Citation],
    /// Search inputs carried along so the answer uses the query on screen.
    pub query: &'a str,
    pub top_k: TopK,
}

pub fn qa_panel(props: &QaPanelProps<'_>) -> String {
    let disabled = props.loading || props.question.trim().is_empty();

    let error = props
        .error
        .map(|error| format!(r#"<p class="error">{}</p>"#, escape(error)))
        .unwrap_or_default();

    let answer = match props.answer {
        Some(answer) => format!(
            r#"<p class="answer-text">{}</p>{}"#,
            escape(answer),
            citation_chips(props.citations)
        ),
        None => r#"<p class="placeholder">Ask a question to see a grounded answer here.</p>"#.to_string(),
    };

    format!(
        r#"<section class="qa-panel">
  <h2>Ask a question (RAG)</h2>
  <p class="hint">Answers are grounded in your retrieved top results and include citations.</p>
  <form id="ask-form" method="post" action="/ask">
    <label for="question">Question</label>
    <textarea id="question" name="question" rows="4" placeholder="e.g., &quot;Which of these movies has the most hopeful ending and why?&quot;">{question}</textarea>
    <input type="hidden" id="ask-query" name="query" value="{query}">
    <input type="hidden" id="ask-top-k" name="top_k" value="{top_k}">
    <button type="submit" data-requires="question" data-busy="{loading}"{disabled}>{label}</button>
  </form>
  {error}
  <div class="answer">
    <p class="answer-title">Answer</p>
    {answer}
  </div>
</section>"#,
        question = escape(props.question),
        query = escape(props.query),
        top_k = props.top_k,
        loading = props.loading,
        disabled = disabled_attr(disabled),
        label = if props.loading { "Answering..." } else { "Answer" },
    )
}

fn citation_chips(citations: &[Citation]) -> String {
    if citations.is_empty() {
        return String::new();
    }

    let chips: String = citations
        .iter()
        .map(|citation| {
            format!(
                r#"<span class="chip" title="TMDb ID: {}">{} {}</span>"#,
                citation.movie_id,
                escape(&citation.reference),
                escape(&citation.title)
            )
        })
        .collect();

    format!(r#"<div class="citations"><p class="answer-title">Citations</p><div class="chips">{chips}</div></div>"#)
}
