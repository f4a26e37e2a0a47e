use tracing::{debug, warn};

use crate::{
    error::{AnalysisError, Result},
    gemini::{GeminiClient, GenerateContentRequest, GenerativeModel, Part},
    prompt::{image_prompt, title_prompt},
    provider::ProviderConfig,
    schema::analysis_schema,
    state::Submission,
    types::PhilosophicalAnalysis,
};

/// Builds analysis requests, sends them to the model and validates what
/// comes back. Never retries.
pub struct AnalysisCoordinator<M = GeminiClient> {
    config: ProviderConfig,
    model: M,
}

impl AnalysisCoordinator<GeminiClient> {
    pub fn from_config(config: ProviderConfig) -> Result<Self> {
        let model = GeminiClient::new(&config)?;
        Ok(Self::new(config, model))
    }
}

impl<M: GenerativeModel> AnalysisCoordinator<M> {
    pub fn new(config: ProviderConfig, model: M) -> Self {
        Self { config, model }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub async fn analyze_by_title(&self, title: &str) -> Result<PhilosophicalAnalysis> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AnalysisError::EmptyInput { what: "title" });
        }

        let request = GenerateContentRequest::new(
            vec![Part::text(title_prompt(title))],
            &self.config,
            analysis_schema(),
        );
        self.dispatch(&request).await
    }

    pub async fn analyze_by_image(&self, image: &[u8]) -> Result<PhilosophicalAnalysis> {
        if image.is_empty() {
            return Err(AnalysisError::EmptyInput { what: "image" });
        }

        let request = GenerateContentRequest::new(
            vec![Part::image(image), Part::text(image_prompt())],
            &self.config,
            analysis_schema(),
        );
        self.dispatch(&request).await
    }

    pub async fn analyze(&self, submission: &Submission) -> Result<PhilosophicalAnalysis> {
        match submission {
            Submission::Title(title) => self.analyze_by_title(title).await,
            Submission::Image(bytes) => self.analyze_by_image(bytes).await,
        }
    }

    async fn dispatch(&self, request: &GenerateContentRequest) -> Result<PhilosophicalAnalysis> {
        let api_key = self.config.validate_api_key()?;

        debug!(
            model = %self.config.model,
            image = request.has_image(),
            payload_bytes = request.payload_len(),
            web_search = self.config.web_search,
            "dispatching analysis request"
        );

        let response = self
            .model
            .generate_content(api_key, &self.config.model, request)
            .await
            .inspect_err(|e| warn!(error = %e, "provider call failed"))?;

        let body = response
            .into_text()
            .inspect_err(|e| warn!(error = %e, "provider returned no usable body"))?;

        PhilosophicalAnalysis::from_json(&body).inspect_err(|e| {
            warn!(error = %e, body_len = body.len(), "provider body failed schema validation")
        })
    }
}
