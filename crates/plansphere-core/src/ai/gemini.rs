//! Gemini backend implementation
//!
//! Talks to the Gemini REST API (`generateContent`). Structured operations
//! send a response schema and ask for JSON output; chat and destination
//! resolution enable the provider's search or maps grounding tools instead.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: API key (required)
//! - `PLANSPHERE_MODEL`: Model name (default: gemini-2.5-flash)
//! - `GEMINI_BASE_URL`: API base URL override (default: https://generativelanguage.googleapis.com)

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    AssistantReply, ChatMessage, CommunityPost, ExpenseTag, Itinerary, Photo, PhotoInsights,
    ResolvedDestination, SocialMediaContent, Source, TourGuide, TripPreferences, UserVoiceProfile,
};
use crate::prompts::PromptLibrary;

use super::parsing::{
    extract_json, resolved_destination, validate_community_posts, validate_currency,
    validate_expense_tag, validate_itinerary, validate_photo_insights, validate_social_content,
    validate_tour_guides,
};
use super::requests;
use super::types::{GenerationRequest, GenerationResponse, Grounding, ImageAttachment};
use super::TravelAi;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini backend
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    api_key: String,
    model: String,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl Clone for GeminiBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            prompts: self.prompts.clone(),
        }
    }
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    /// Create a new instance pointed at a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: model.to_string(),
            prompts: self.prompts.clone(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GEMINI_API_KEY`
    /// Optional: `PLANSPHERE_MODEL`, `GEMINI_BASE_URL`
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model =
            std::env::var("PLANSPHERE_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let mut backend = Self::new(&api_key, &model);
        if let Ok(base_url) = std::env::var("GEMINI_BASE_URL") {
            backend.base_url = base_url.trim_end_matches('/').to_string();
        }
        Some(backend)
    }

    fn prompts_mut(&self) -> Result<std::sync::RwLockWriteGuard<'_, PromptLibrary>> {
        self.prompts
            .write()
            .map_err(|_| Error::InvalidData("Failed to acquire prompt library lock".into()))
    }

    /// Execute one generation request and collect text plus grounding sources.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse> {
        let body = build_body(&request);
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Request(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let decoded: GenerateContentResponse = response.json().await?;
        let candidate = decoded
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::Request("No candidates in Gemini response".into()))?;

        let text = candidate
            .content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            return Err(Error::Request("Empty text in Gemini response".into()));
        }

        let sources = collect_sources(candidate.grounding_metadata);

        debug!(chars = text.len(), sources = sources.len(), "Gemini response");
        Ok(GenerationResponse { text, sources })
    }
}

/// Flatten grounding chunks into citation sources, defaulting untitled sites.
fn collect_sources(metadata: Option<GroundingMetadata>) -> Vec<Source> {
    metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web.or(chunk.maps))
                .map(|site| Source {
                    title: site.title.unwrap_or_else(|| "Source".to_string()),
                    uri: site.uri,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Assemble the `generateContent` request body.
fn build_body(request: &GenerationRequest) -> GenerateContentBody {
    let mut parts = Vec::new();
    if let Some(ref image) = request.image {
        parts.push(Part {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: base64::engine::general_purpose::STANDARD.encode(&image.data),
            }),
        });
    }
    parts.push(Part {
        text: Some(request.prompt.clone()),
        inline_data: None,
    });

    let generation_config = if request.temperature.is_some() || request.json_response {
        Some(GenerationConfig {
            temperature: request.temperature,
            response_mime_type: request
                .json_response
                .then(|| "application/json".to_string()),
            response_schema: request.schema.clone(),
        })
    } else {
        None
    };

    let tools = match request.grounding {
        Grounding::None => None,
        Grounding::WebSearch => Some(vec![Tool {
            google_search: Some(serde_json::json!({})),
            google_maps: None,
        }]),
        Grounding::Maps => Some(vec![Tool {
            google_search: None,
            google_maps: Some(serde_json::json!({})),
        }]),
    };

    GenerateContentBody {
        contents: vec![Content { parts }],
        generation_config,
        tools,
    }
}

// --- Wire types -------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentBody {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    #[serde(skip_serializing_if = "Option::is_none")]
    google_search: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    google_maps: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: CandidateContent,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<GroundingSite>,
    #[serde(default)]
    maps: Option<GroundingSite>,
}

#[derive(Debug, Deserialize)]
struct GroundingSite {
    uri: String,
    #[serde(default)]
    title: Option<String>,
}

#[async_trait]
impl TravelAi for GeminiBackend {
    async fn generate_itinerary(&self, prefs: &TripPreferences) -> Result<Itinerary> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::itinerary_request(&mut prompts, prefs)?
        };
        let response = self.generate(request).await?;
        validate_itinerary(extract_json(&response.text)?, prefs.duration)
    }

    async fn ask_assistant(
        &self,
        query: &str,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<AssistantReply> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::assistant_request(&mut prompts, query, context, history)?
        };
        let response = self.generate(request).await?;
        Ok(AssistantReply {
            text: response.text,
            sources: response.sources,
        })
    }

    async fn analyze_photo(&self, image: &[u8], context: &str) -> Result<PhotoInsights> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::photo_request(&mut prompts, ImageAttachment::jpeg(image.to_vec()), context)?
        };
        let response = self.generate(request).await?;
        Ok(validate_photo_insights(extract_json(&response.text)?))
    }

    async fn categorize_expense(&self, description: &str, amount: f64) -> Result<ExpenseTag> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::categorize_request(&mut prompts, description, amount)?
        };
        let response = self.generate(request).await?;
        Ok(validate_expense_tag(extract_json(&response.text)?))
    }

    async fn resolve_destination(&self, query: &str) -> Result<ResolvedDestination> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::destination_request(&mut prompts, query)?
        };
        let response = self.generate(request).await?;
        Ok(resolved_destination(&response, query))
    }

    async fn convert_currency(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::currency_request(&mut prompts, amount, from, to)?
        };
        let response = self.generate(request).await?;
        Ok(validate_currency(extract_json(&response.text)?))
    }

    async fn generate_social_content(
        &self,
        trip: &Itinerary,
        photos: &[Photo],
        voice: &UserVoiceProfile,
    ) -> Result<SocialMediaContent> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::social_request(&mut prompts, trip, photos, voice)?
        };
        let response = self.generate(request).await?;
        validate_social_content(extract_json(&response.text)?, photos.len())
    }

    async fn generate_tour_guides(&self, location: &str) -> Result<Vec<TourGuide>> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::guides_request(&mut prompts, location)?
        };
        let response = self.generate(request).await?;
        validate_tour_guides(extract_json(&response.text)?)
    }

    async fn generate_community_posts(&self, topic: &str) -> Result<Vec<CommunityPost>> {
        let request = {
            let mut prompts = self.prompts_mut()?;
            requests::posts_request(&mut prompts, topic)?
        };
        let response = self.generate(request).await?;
        validate_community_posts(extract_json(&response.text)?)
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/v1beta/models", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
