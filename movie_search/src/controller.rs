use serde::Serialize;
use tokio::sync::RwLock;

use crate::client::MovieApi;
use crate::error::ClientError;
use crate::models::*;

pub const DEFAULT_QUERY: &str = "space exploration with emotional ending";
pub const DEFAULT_QUESTION: &str = "Which movie in these results is most aligned with space exploration and an emotional ending? Explain briefly.";

const SEARCH_FALLBACK: &str = "Something went wrong";
const QA_FALLBACK: &str = "QA failed";

/// Where an Ask request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AskPhase {
    #[default]
    Idle,
    /// No results were on screen, so a search runs first to give the answer evidence.
    EnsuringEvidence,
    Answering,
}

/// How a finished request affected the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
    /// A newer request for the same action was issued; this response was dropped.
    Superseded,
}

/// Everything the page renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageState {
    pub query: String,
    pub top_k: TopK,
    pub results: Vec<SearchResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub question: String,
    pub qa_loading: bool,
    pub qa_error: Option<String>,
    pub answer: Option<String>,
    pub citations: Vec<Citation>,
    pub ask_phase: AskPhase,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            top_k: TopK::default(),
            results: Vec::new(),
            loading: false,
            error: None,
            question: DEFAULT_QUESTION.to_string(),
            qa_loading: false,
            qa_error: None,
            answer: None,
            citations: Vec::new(),
            ask_phase: AskPhase::Idle,
        }
    }
}

impl PageState {
    pub fn can_search(&self) -> bool {
        !self.loading && !self.query.trim().is_empty()
    }

    pub fn can_ask(&self) -> bool {
        !self.qa_loading && !self.question.trim().is_empty()
    }
}

#[derive(Debug, Default)]
struct Sequences {
    /// Latest request allowed to replace `results` (manual or evidence search).
    results: u64,
    /// Latest manual search; owns the `loading` flag.
    search: u64,
    ask: u64,
}

struct Inner {
    page: PageState,
    seq: Sequences,
}

/// Owns the page state and runs the Search and Ask workflows against a [`MovieApi`].
///
/// The lock is only held while reading or writing state, never across a
/// backend call, so both actions can be in flight at once.
pub struct PageController<A> {
    api: A,
    inner: RwLock<Inner>,
}

impl<A: MovieApi> PageController<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, PageState::default())
    }

    pub fn with_state(api: A, page: PageState) -> Self {
        Self {
            api,
            inner: RwLock::new(Inner {
                page,
                seq: Sequences::default(),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn snapshot(&self) -> PageState {
        self.inner.read().await.page.clone()
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.inner.write().await.page.query = query.into();
    }

    pub async fn set_top_k(&self, top_k: TopK) {
        self.inner.write().await.page.top_k = top_k;
    }

    pub async fn set_question(&self, question: impl Into<String>) {
        self.inner.write().await.page.question = question.into();
    }

    pub async fn search(&self) -> Outcome {
        let (seq, query, top_k) = {
            let mut inner = self.inner.write().await;
            inner.seq.results += 1;
            inner.seq.search = inner.seq.results;
            inner.page.loading = true;
            inner.page.error = None;
            (inner.seq.search, inner.page.query.clone(), inner.page.top_k)
        };

        let response = self.api.search(&query, top_k, None).await;

        let mut inner = self.inner.write().await;
        if seq != inner.seq.search {
            log::debug!("Dropping search #{} response, search #{} is newer", seq, inner.seq.search);
            return Outcome::Superseded;
        }
        inner.page.loading = false;

        match response {
            Ok(search) if seq == inner.seq.results => {
                inner.page.results = search.results;
                Outcome::Applied
            }
            Ok(_) => {
                log::debug!("Search #{} results overtaken by an evidence search", seq);
                Outcome::Superseded
            }
            Err(err) => {
                log::warn!("Search failed: {}", err);
                inner.page.error = Some(err.message_or(SEARCH_FALLBACK));
                Outcome::Failed
            }
        }
    }

    pub async fn ask(&self) -> Outcome {
        let (seq, question, query, top_k, needs_evidence) = {
            let mut inner = self.inner.write().await;
            inner.seq.ask += 1;
            let needs_evidence = inner.page.results.is_empty();
            inner.page.qa_loading = true;
            inner.page.qa_error = None;
            inner.page.ask_phase = if needs_evidence {
                AskPhase::EnsuringEvidence
            } else {
                AskPhase::Answering
            };
            (
                inner.seq.ask,
                inner.page.question.clone(),
                inner.page.query.clone(),
                inner.page.top_k,
                needs_evidence,
            )
        };

        if needs_evidence {
            if let Err(err) = self.ensure_evidence(seq, &query, top_k).await {
                return self.finish_ask(seq, Err(err)).await;
            }
        }

        let response = self.api.ask(&question, &query, top_k, None, None).await;
        self.finish_ask(seq, response).await
    }

    async fn ensure_evidence(&self, ask_seq: u64, query: &str, top_k: TopK) -> Result<(), ClientError> {
        let results_seq = {
            let mut inner = self.inner.write().await;
            inner.seq.results += 1;
            inner.seq.results
        };

        log::info!("No results on screen, searching before answering");
        let search = self.api.search(query, top_k, None).await?;

        let mut inner = self.inner.write().await;
        if results_seq == inner.seq.results {
            inner.page.results = search.results;
        } else {
            log::debug!("Evidence search #{} overtaken, keeping newer results", results_seq);
        }
        if ask_seq == inner.seq.ask {
            inner.page.ask_phase = AskPhase::Answering;
        }
        Ok(())
    }

    async fn finish_ask(&self, seq: u64, response: Result<QAResponse, ClientError>) -> Outcome {
        let mut inner = self.inner.write().await;
        if seq != inner.seq.ask {
            log::debug!("Dropping ask #{} response, ask #{} is newer", seq, inner.seq.ask);
            return Outcome::Superseded;
        }
        inner.page.qa_loading = false;
        inner.page.ask_phase = AskPhase::Idle;

        match response {
            Ok(qa) => {
                inner.page.answer = Some(qa.answer);
                inner.page.citations = qa.citations;
                Outcome::Applied
            }
            Err(err) => {
                log::warn!("Question answering failed: {}", err);
                inner.page.qa_error = Some(err.message_or(QA_FALLBACK));
                Outcome::Failed
            }
        }
    }
}
