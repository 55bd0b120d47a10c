//! The concierge service: failure-policy-aware facade over a backend
//!
//! Callers use this instead of [`crate::ai::TravelAi`] directly. Each method
//! applies the operation's failure policy, so auxiliary features come back
//! with a usable default when the backend is down while the primary creation
//! flows still report their errors.

use tracing::info;

use crate::ai::TravelAi;
use crate::error::Result;
use crate::models::{
    AssistantReply, ChatMessage, CommunityPost, ExpenseTag, Itinerary, Photo, PhotoInsights,
    ResolvedDestination, SocialMediaContent, TourGuide, TripPreferences, UserVoiceProfile,
};
use crate::policy::{degrade_with, Operation};
use crate::taxonomy;

/// Canned reply when the assistant cannot be reached.
pub const OFFLINE_MESSAGE: &str = "Sorry, I am currently offline.";

/// Travel concierge over any [`TravelAi`] backend
#[derive(Clone)]
pub struct Concierge<A: TravelAi> {
    backend: A,
}

impl<A: TravelAi> Concierge<A> {
    pub fn new(backend: A) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    /// Generate an itinerary. Errors propagate; the caller keeps its current
    /// state and may retry.
    pub async fn plan_trip(&self, prefs: &TripPreferences) -> Result<Itinerary> {
        info!(
            destination = %prefs.destination,
            duration = prefs.duration,
            "planning trip"
        );
        self.backend.generate_itinerary(prefs).await
    }

    /// Generate the social content bundle. Errors propagate.
    pub async fn create_social_content(
        &self,
        trip: &Itinerary,
        photos: &[Photo],
        voice: &UserVoiceProfile,
    ) -> Result<SocialMediaContent> {
        info!(trip = %trip.title, photos = photos.len(), "generating social content");
        self.backend.generate_social_content(trip, photos, voice).await
    }

    /// Analyze a photo. Errors propagate.
    pub async fn analyze_photo(&self, image: &[u8], context: &str) -> Result<PhotoInsights> {
        self.backend.analyze_photo(image, context).await
    }

    /// Ask the assistant a question; degrades to a canned offline reply.
    pub async fn ask(
        &self,
        query: &str,
        context: &str,
        history: &[ChatMessage],
    ) -> AssistantReply {
        degrade_with(
            Operation::AskAssistant,
            self.backend.ask_assistant(query, context, history).await,
            AssistantReply {
                text: OFFLINE_MESSAGE.to_string(),
                sources: Vec::new(),
            },
        )
    }

    /// Suggest a category for an expense; degrades to the fallback tag.
    pub async fn tag_expense(&self, description: &str, amount: f64) -> ExpenseTag {
        degrade_with(
            Operation::CategorizeExpense,
            self.backend.categorize_expense(description, amount).await,
            taxonomy::fallback_tag(),
        )
    }

    /// Resolve a destination query; degrades to echoing the query back.
    pub async fn resolve_destination(&self, query: &str) -> ResolvedDestination {
        degrade_with(
            Operation::ResolveDestination,
            self.backend.resolve_destination(query).await,
            ResolvedDestination {
                name: query.trim().to_string(),
                url: None,
            },
        )
    }

    /// Convert currency; degrades to zero, which callers render as unavailable.
    pub async fn convert_currency(&self, amount: f64, from: &str, to: &str) -> f64 {
        degrade_with(
            Operation::ConvertCurrency,
            self.backend.convert_currency(amount, from, to).await,
            0.0,
        )
    }

    /// Generate tour guides; degrades to an empty list.
    pub async fn find_guides(&self, location: &str) -> Vec<TourGuide> {
        degrade_with(
            Operation::TourGuides,
            self.backend.generate_tour_guides(location).await,
            Vec::new(),
        )
    }

    /// Generate community posts; degrades to an empty feed.
    pub async fn community_feed(&self, topic: &str) -> Vec<CommunityPost> {
        degrade_with(
            Operation::CommunityPosts,
            self.backend.generate_community_posts(topic).await,
            Vec::new(),
        )
    }

    /// Check backend reachability
    pub async fn health_check(&self) -> bool {
        self.backend.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockBackend;
    use crate::models::Budget;

    fn prefs() -> TripPreferences {
        TripPreferences {
            destination: "Oslo, Norway".to_string(),
            duration: 2,
            budget: Budget::Low,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_plan_trip_propagates_errors() {
        let concierge = Concierge::new(MockBackend::failing());
        let err = concierge.plan_trip(&prefs()).await.unwrap_err();
        assert!(err.is_request_failure());
    }

    #[tokio::test]
    async fn test_social_content_propagates_errors() {
        let healthy = Concierge::new(MockBackend::new());
        let trip = healthy.plan_trip(&prefs()).await.unwrap();

        let concierge = Concierge::new(MockBackend::failing());
        let result = concierge
            .create_social_content(&trip, &[], &UserVoiceProfile::default())
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ask_degrades_to_offline_message() {
        let concierge = Concierge::new(MockBackend::failing());
        let reply = concierge.ask("best ramen?", "no plan", &[]).await;
        assert_eq!(reply.text, OFFLINE_MESSAGE);
        assert!(reply.sources.is_empty());
    }

    #[tokio::test]
    async fn test_convert_currency_degrades_to_zero() {
        let concierge = Concierge::new(MockBackend::failing());
        let converted = concierge.convert_currency(100.0, "USD", "EUR").await;
        assert_eq!(converted, 0.0);
    }

    #[tokio::test]
    async fn test_tag_expense_degrades_to_fallback() {
        let concierge = Concierge::new(MockBackend::failing());
        let tag = concierge.tag_expense("dinner downtown", 30.0).await;
        assert_eq!(tag.category, "Other");
        assert_eq!(tag.subcategory, "General");
    }

    #[tokio::test]
    async fn test_resolve_destination_degrades_to_echo() {
        let concierge = Concierge::new(MockBackend::failing());
        let resolved = concierge.resolve_destination("  kyoto  ").await;
        assert_eq!(resolved.name, "kyoto");
        assert!(resolved.url.is_none());
    }

    #[tokio::test]
    async fn test_feeds_degrade_to_empty() {
        let concierge = Concierge::new(MockBackend::failing());
        assert!(concierge.find_guides("Kyoto").await.is_empty());
        assert!(concierge.community_feed("Kyoto").await.is_empty());
    }

    #[tokio::test]
    async fn test_healthy_backend_answers() {
        let concierge = Concierge::new(MockBackend::new());
        let trip = concierge.plan_trip(&prefs()).await.unwrap();
        assert_eq!(trip.days.len(), 2);
        let converted = concierge.convert_currency(50.0, "USD", "EUR").await;
        assert_eq!(converted, 50.0);
    }
}
