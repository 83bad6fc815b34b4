use std::env;

use crate::error::{ClientError, Result};

pub const DEFAULT_MODEL_NAME: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_LLM_MODEL: &str = "gpt-5.2";

pub const BASE_URL_VAR: &str = "MOVIE_API_BASE_URL";
pub const MODEL_NAME_VAR: &str = "MOVIE_API_MODEL_NAME";
pub const LLM_MODEL_VAR: &str = "MOVIE_API_LLM_MODEL";

/// Settings handed to [`crate::SearchClient`] when it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    pub model_name: String,
    pub llm_model: String,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config(format!("{} is not set", BASE_URL_VAR)));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
        })
    }

    /// Reads the backend location and optional model overrides from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(BASE_URL_VAR).unwrap_or_default();
        let mut config = Self::new(base_url)?;

        if let Some(model_name) = non_empty_var(MODEL_NAME_VAR) {
            config.model_name = model_name;
        }
        if let Some(llm_model) = non_empty_var(LLM_MODEL_VAR) {
            config.llm_model = llm_model;
        }

        Ok(config)
    }

    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    pub fn with_llm_model(mut self, llm_model: impl Into<String>) -> Self {
        self.llm_model = llm_model.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
