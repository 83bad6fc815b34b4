use movie_search::SearchResult;

use super::escape;

pub fn result_card(result: &SearchResult) -> String {
    let year = result
        .year
        .map(|year| format!(r#" <span class="year">({year})</span>"#))
        .unwrap_or_default();

    let genres: String = result
        .genres
        .iter()
        .map(|genre| format!(r#"<span class="tag">{}</span>"#, escape(genre)))
        .collect();

    format!(
        r#"<article class="result-card" data-doc-id="{doc_id}">
  <div class="result-head">
    <div>
      <h3>{title}{year}</h3>
      <div class="tags">{genres}</div>
    </div>
    <div class="score">{score}%</div>
  </div>
  <p class="overview">{overview}</p>
</article>"#,
        doc_id = escape(&result.doc_id),
        title = escape(&result.title),
        score = result.score_percent(),
        overview = escape(&result.overview),
    )
}
