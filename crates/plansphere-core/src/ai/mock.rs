//! Mock backend for testing
//!
//! Returns canned, contract-valid responses without any network access. The
//! failing variant errors on every operation, which exercises the failure
//! policies in [`crate::service`].

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{
    Activity, ActivityType, AssistantReply, BlogPost, ChatMessage, CommunityPost, DayPlan,
    ExpenseTag, FacebookPlan, InstagramPlan, InstagramPost, Itinerary, LinkedInPlan, Photo,
    PhotoAlbum, PhotoInsights, ReelPlan, ResolvedDestination, SocialMediaContent, Source,
    TikTokConcept, TikTokPlan, TourGuide, TripPreferences, TwitterPlan, UserVoiceProfile,
};
use crate::taxonomy;

use super::TravelAi;

/// Mock backend with deterministic canned responses
#[derive(Debug, Clone)]
pub struct MockBackend {
    healthy: bool,
    failing: bool,
    model: String,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            healthy: true,
            failing: false,
            model: "mock-model".to_string(),
        }
    }

    /// A backend where every operation fails with a request error
    pub fn failing() -> Self {
        Self {
            healthy: true,
            failing: true,
            model: "mock-model".to_string(),
        }
    }

    /// A backend that reports unhealthy but still answers
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            failing: false,
            model: "mock-model".to_string(),
        }
    }

    pub fn with_model(&self, model: &str) -> Self {
        Self {
            healthy: self.healthy,
            failing: self.failing,
            model: model.to_string(),
        }
    }

    fn fail_if_configured(&self) -> Result<()> {
        if self.failing {
            Err(Error::Request("mock backend configured to fail".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TravelAi for MockBackend {
    async fn generate_itinerary(&self, prefs: &TripPreferences) -> Result<Itinerary> {
        self.fail_if_configured()?;

        let days = (1..=prefs.duration.max(1))
            .map(|day| DayPlan {
                day,
                date: None,
                theme: format!("Day {} highlights", day),
                activities: vec![
                    Activity {
                        time: "09:00 AM - 11:00 AM".to_string(),
                        activity: format!("Morning walk, day {}", day),
                        description: "Start slow and look around.".to_string(),
                        location: prefs.destination.clone(),
                        estimated_cost: 0.0,
                        activity_type: ActivityType::Sightseeing,
                    },
                    Activity {
                        time: "12:30 PM - 02:00 PM".to_string(),
                        activity: "Local lunch spot".to_string(),
                        description: "Order whatever the regulars order.".to_string(),
                        location: prefs.destination.clone(),
                        estimated_cost: 18.0,
                        activity_type: ActivityType::Food,
                    },
                ],
            })
            .collect::<Vec<_>>();

        Ok(Itinerary {
            title: format!("A Taste of {}", prefs.destination),
            destination: prefs.destination.clone(),
            description: format!(
                "{} days of easygoing exploration for a {} trip.",
                days.len(),
                prefs.travelers.as_str().to_lowercase()
            ),
            total_estimated_cost: 18.0 * days.len() as f64,
            currency: "USD".to_string(),
            travel_tips: vec!["Carry small bills.".to_string()],
            days,
            rating: None,
        })
    }

    async fn ask_assistant(
        &self,
        query: &str,
        _context: &str,
        _history: &[ChatMessage],
    ) -> Result<AssistantReply> {
        self.fail_if_configured()?;
        Ok(AssistantReply {
            text: format!("Here is a quick answer about: {}", query),
            sources: vec![Source {
                title: "Travel notes".to_string(),
                uri: "https://example.com/notes".to_string(),
            }],
        })
    }

    async fn analyze_photo(&self, _image: &[u8], context: &str) -> Result<PhotoInsights> {
        self.fail_if_configured()?;
        Ok(PhotoInsights {
            caption: format!("Golden light over {}", context),
            hashtags: vec!["#travel".to_string(), "#wanderlust".to_string()],
            location: context.to_string(),
        })
    }

    async fn categorize_expense(&self, description: &str, _amount: f64) -> Result<ExpenseTag> {
        self.fail_if_configured()?;
        let lower = description.to_lowercase();
        let (category, subcategory) = if lower.contains("dinner")
            || lower.contains("restaurant")
            || lower.contains("lunch")
        {
            ("Food", "Restaurants")
        } else if lower.contains("taxi") || lower.contains("uber") {
            ("Transport", "Taxi")
        } else if lower.contains("hotel") {
            ("Accommodation", "Hotel")
        } else {
            (taxonomy::FALLBACK_CATEGORY, taxonomy::FALLBACK_SUBCATEGORY)
        };
        Ok(taxonomy::correct(category, subcategory))
    }

    async fn resolve_destination(&self, query: &str) -> Result<ResolvedDestination> {
        self.fail_if_configured()?;
        Ok(ResolvedDestination {
            name: format!("{}, Resolved", query.trim()),
            url: Some("https://maps.example.com/resolved".to_string()),
        })
    }

    async fn convert_currency(&self, amount: f64, _from: &str, _to: &str) -> Result<f64> {
        self.fail_if_configured()?;
        // identity rate
        Ok(amount)
    }

    async fn generate_social_content(
        &self,
        trip: &Itinerary,
        photos: &[Photo],
        _voice: &UserVoiceProfile,
    ) -> Result<SocialMediaContent> {
        self.fail_if_configured()?;
        let first_photo = if photos.is_empty() { 0 } else { 1 };
        Ok(SocialMediaContent {
            instagram: InstagramPlan {
                posts: vec![InstagramPost {
                    photo_reference: first_photo,
                    caption: format!("Still dreaming about {}", trip.destination),
                    hashtags: vec!["#travel".to_string()],
                    location_tag: trip.destination.clone(),
                    first_comment: "Ask me anything about this trip!".to_string(),
                    viral_potential_score: 72.0,
                }],
                stories: vec![],
                reel: ReelPlan::default(),
            },
            twitter: TwitterPlan {
                thread: vec![format!("Thread: what {} taught me", trip.destination)],
                standalone_tweet: format!("{} did not disappoint.", trip.destination),
                hashtags: vec!["#travel".to_string()],
            },
            facebook: FacebookPlan {
                post: format!("Back from {}. Full recap below.", trip.destination),
                photo_album: PhotoAlbum {
                    title: trip.title.clone(),
                    description: trip.description.clone(),
                    photo_order: (1..=photos.len() as i64).collect(),
                },
            },
            linked_in: LinkedInPlan {
                post: format!("What travel to {} taught me about planning.", trip.destination),
                tone: "professional".to_string(),
            },
            tiktok: TikTokPlan {
                concepts: vec![TikTokConcept {
                    hook: "You won't believe day one".to_string(),
                    narrative: "Quick cuts through the trip highlights.".to_string(),
                    photo_sequence: (1..=photos.len().min(5) as i64).collect(),
                    sound: "trending-upbeat".to_string(),
                    hashtags: vec!["#traveltok".to_string()],
                    duration: "30s".to_string(),
                }],
            },
            blog_post: BlogPost {
                seo_title: format!("{}: A Complete Guide", trip.destination),
                meta_description: trip.description.clone(),
                url: "complete-guide".to_string(),
                full_post: format!("Everything we did in {}.", trip.destination),
                sections: vec!["Getting there".to_string(), "Where to eat".to_string()],
                internal_links: vec![],
                cta_placement: vec!["after-intro".to_string()],
            },
        })
    }

    async fn generate_tour_guides(&self, location: &str) -> Result<Vec<TourGuide>> {
        self.fail_if_configured()?;
        Ok((1..=3)
            .map(|i| TourGuide {
                id: format!("guide-{}", i),
                name: format!("Guide {}", i),
                languages: vec!["English".to_string()],
                specialty: format!("Hidden corners of {}", location),
                rating: 4.5,
                rate_per_hour: 30.0 + i as f64 * 5.0,
                image_url: String::new(),
            })
            .collect())
    }

    async fn generate_community_posts(&self, topic: &str) -> Result<Vec<CommunityPost>> {
        self.fail_if_configured()?;
        Ok((1..=4)
            .map(|i| CommunityPost {
                id: format!("post-{}", i),
                user: format!("traveler{}", i),
                location: topic.to_string(),
                content: format!("Tip #{} about {}", i, topic),
                likes: i * 10,
                tags: vec![topic.to_string()],
                image_url: None,
                timestamp: 1_700_000_000_000 + i,
            })
            .collect())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Budget;

    fn prefs(destination: &str, duration: u32) -> TripPreferences {
        TripPreferences {
            destination: destination.to_string(),
            duration,
            budget: Budget::Medium,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_itinerary_matches_requested_duration() {
        let backend = MockBackend::new();
        let itinerary = backend
            .generate_itinerary(&prefs("Lisbon, Portugal", 3))
            .await
            .unwrap();
        assert_eq!(itinerary.days.len(), 3);
        assert!(itinerary.title.contains("Lisbon, Portugal"));
    }

    #[tokio::test]
    async fn test_failing_backend_errors_everywhere() {
        let backend = MockBackend::failing();
        let err = backend
            .generate_itinerary(&prefs("Lisbon", 2))
            .await
            .unwrap_err();
        assert!(err.is_request_failure());
        assert!(backend.convert_currency(10.0, "USD", "EUR").await.is_err());
        assert!(backend.generate_tour_guides("Lisbon").await.is_err());
    }

    #[tokio::test]
    async fn test_keyword_categorizer() {
        let backend = MockBackend::new();
        let tag = backend
            .categorize_expense("Dinner at the harbor", 42.5)
            .await
            .unwrap();
        assert_eq!(tag.category, "Food");
        assert_eq!(tag.subcategory, "Restaurants");

        let tag = backend.categorize_expense("mystery charge", 9.0).await.unwrap();
        assert_eq!(tag.category, "Other");
        assert_eq!(tag.subcategory, "General");
    }

    #[tokio::test]
    async fn test_health_flags() {
        assert!(MockBackend::new().health_check().await);
        assert!(!MockBackend::unhealthy().health_check().await);
    }

    #[tokio::test]
    async fn test_social_content_references_stay_in_range() {
        let backend = MockBackend::new();
        let itinerary = backend
            .generate_itinerary(&prefs("Rome, Italy", 2))
            .await
            .unwrap();
        let photos = vec![Photo::default(), Photo::default()];
        let content = backend
            .generate_social_content(&itinerary, &photos, &UserVoiceProfile::default())
            .await
            .unwrap();
        assert_eq!(content.facebook.photo_album.photo_order, vec![1, 2]);
        for reference in &content.tiktok.concepts[0].photo_sequence {
            assert!(*reference >= 1 && *reference <= 2);
        }
    }
}
