//! AI backend abstraction for travel content generation
//!
//! Every AI-backed operation goes through the [`TravelAi`] trait; callers
//! never talk to a provider directly. [`AiClient`] is the concrete entry
//! point, selecting a backend from the environment.

pub mod parsing;
pub mod requests;
pub mod types;

mod gemini;
mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use types::{GenerationRequest, GenerationResponse, Grounding, ImageAttachment};

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{
    AssistantReply, ChatMessage, CommunityPost, ExpenseTag, Itinerary, Photo, PhotoInsights,
    ResolvedDestination, SocialMediaContent, TourGuide, TripPreferences, UserVoiceProfile,
};

/// Backend interface for AI-generated travel content
#[async_trait]
pub trait TravelAi: Send + Sync {
    /// Generate a day-by-day itinerary from trip preferences
    async fn generate_itinerary(&self, prefs: &TripPreferences) -> Result<Itinerary>;

    /// Answer a travel question, grounded in web search
    async fn ask_assistant(
        &self,
        query: &str,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<AssistantReply>;

    /// Extract caption material from a travel photo
    async fn analyze_photo(&self, image: &[u8], context: &str) -> Result<PhotoInsights>;

    /// Suggest a taxonomy-corrected category for an expense
    async fn categorize_expense(&self, description: &str, amount: f64) -> Result<ExpenseTag>;

    /// Resolve a vague destination query to "City, Country"
    async fn resolve_destination(&self, query: &str) -> Result<ResolvedDestination>;

    /// Convert an amount between currencies at current rates
    async fn convert_currency(&self, amount: f64, from: &str, to: &str) -> Result<f64>;

    /// Generate the full multi-platform social content bundle in one shot
    async fn generate_social_content(
        &self,
        trip: &Itinerary,
        photos: &[Photo],
        voice: &UserVoiceProfile,
    ) -> Result<SocialMediaContent>;

    /// Generate tour guide listings for a location
    async fn generate_tour_guides(&self, location: &str) -> Result<Vec<TourGuide>>;

    /// Generate community feed posts about a topic
    async fn generate_community_posts(&self, topic: &str) -> Result<Vec<CommunityPost>>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Model name in use
    fn model(&self) -> &str;

    /// Host or endpoint identifier
    fn host(&self) -> &str;
}

/// Concrete AI client wrapping the available backends.
///
/// An enum rather than a trait object so the client stays `Clone` and cheap
/// to pass into spawned tasks.
#[derive(Clone)]
pub enum AiClient {
    Gemini(GeminiBackend),
    Mock(MockBackend),
}

impl AiClient {
    /// Build a client from environment variables.
    ///
    /// `PLANSPHERE_BACKEND` selects the backend (`gemini` default, `mock`).
    /// The Gemini backend additionally requires `GEMINI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let backend =
            std::env::var("PLANSPHERE_BACKEND").unwrap_or_else(|_| "gemini".to_string());
        match backend.to_lowercase().as_str() {
            "mock" => Ok(AiClient::Mock(MockBackend::new())),
            "gemini" => GeminiBackend::from_env().map(AiClient::Gemini).ok_or_else(|| {
                Error::Request("GEMINI_API_KEY is not set (or set PLANSPHERE_BACKEND=mock)".into())
            }),
            other => Err(Error::InvalidData(format!(
                "unknown backend: {} (expected gemini or mock)",
                other
            ))),
        }
    }

    /// A mock-backed client for tests and offline demos
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl TravelAi for AiClient {
    async fn generate_itinerary(&self, prefs: &TripPreferences) -> Result<Itinerary> {
        match self {
            AiClient::Gemini(b) => b.generate_itinerary(prefs).await,
            AiClient::Mock(b) => b.generate_itinerary(prefs).await,
        }
    }

    async fn ask_assistant(
        &self,
        query: &str,
        context: &str,
        history: &[ChatMessage],
    ) -> Result<AssistantReply> {
        match self {
            AiClient::Gemini(b) => b.ask_assistant(query, context, history).await,
            AiClient::Mock(b) => b.ask_assistant(query, context, history).await,
        }
    }

    async fn analyze_photo(&self, image: &[u8], context: &str) -> Result<PhotoInsights> {
        match self {
            AiClient::Gemini(b) => b.analyze_photo(image, context).await,
            AiClient::Mock(b) => b.analyze_photo(image, context).await,
        }
    }

    async fn categorize_expense(&self, description: &str, amount: f64) -> Result<ExpenseTag> {
        match self {
            AiClient::Gemini(b) => b.categorize_expense(description, amount).await,
            AiClient::Mock(b) => b.categorize_expense(description, amount).await,
        }
    }

    async fn resolve_destination(&self, query: &str) -> Result<ResolvedDestination> {
        match self {
            AiClient::Gemini(b) => b.resolve_destination(query).await,
            AiClient::Mock(b) => b.resolve_destination(query).await,
        }
    }

    async fn convert_currency(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        match self {
            AiClient::Gemini(b) => b.convert_currency(amount, from, to).await,
            AiClient::Mock(b) => b.convert_currency(amount, from, to).await,
        }
    }

    async fn generate_social_content(
        &self,
        trip: &Itinerary,
        photos: &[Photo],
        voice: &UserVoiceProfile,
    ) -> Result<SocialMediaContent> {
        match self {
            AiClient::Gemini(b) => b.generate_social_content(trip, photos, voice).await,
            AiClient::Mock(b) => b.generate_social_content(trip, photos, voice).await,
        }
    }

    async fn generate_tour_guides(&self, location: &str) -> Result<Vec<TourGuide>> {
        match self {
            AiClient::Gemini(b) => b.generate_tour_guides(location).await,
            AiClient::Mock(b) => b.generate_tour_guides(location).await,
        }
    }

    async fn generate_community_posts(&self, topic: &str) -> Result<Vec<CommunityPost>> {
        match self {
            AiClient::Gemini(b) => b.generate_community_posts(topic).await,
            AiClient::Mock(b) => b.generate_community_posts(topic).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Gemini(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Gemini(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client_delegates() {
        let client = AiClient::mock();
        assert_eq!(client.model(), "mock-model");
        assert_eq!(client.host(), "mock");
        assert!(client.health_check().await);
    }
}
