//! Domain entities for the PlanSphere travel planner
//!
//! Field names serialize in the camelCase wire format the generation API is
//! instructed to produce, so stored JSON and validated responses share one shape.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Budget level for a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Budget {
    Low,
    #[default]
    Medium,
    High,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Low => "Low",
            Budget::Medium => "Medium",
            Budget::High => "High",
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Budget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            other => Err(format!("unknown budget level: {other}")),
        }
    }
}

/// Travel party composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Travelers {
    Solo,
    #[default]
    Couple,
    Family,
    Friends,
    Seniors,
}

impl Travelers {
    pub fn as_str(&self) -> &'static str {
        match self {
            Travelers::Solo => "Solo",
            Travelers::Couple => "Couple",
            Travelers::Family => "Family",
            Travelers::Friends => "Friends",
            Travelers::Seniors => "Seniors",
        }
    }
}

impl fmt::Display for Travelers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Travelers {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solo" => Ok(Travelers::Solo),
            "couple" => Ok(Travelers::Couple),
            "family" => Ok(Travelers::Family),
            "friends" => Ok(Travelers::Friends),
            "seniors" => Ok(Travelers::Seniors),
            other => Err(format!("unknown travel party: {other}")),
        }
    }
}

/// Supported output languages for generated itinerary content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Hindi,
    Chinese,
    Japanese,
    Korean,
    Arabic,
    Portuguese,
    Russian,
    Italian,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::German => "German",
            Language::Hindi => "Hindi",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Italian => "Italian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" => Ok(Language::English),
            "spanish" => Ok(Language::Spanish),
            "french" => Ok(Language::French),
            "german" => Ok(Language::German),
            "hindi" => Ok(Language::Hindi),
            "chinese" | "mandarin" => Ok(Language::Chinese),
            "japanese" => Ok(Language::Japanese),
            "korean" => Ok(Language::Korean),
            "arabic" => Ok(Language::Arabic),
            "portuguese" => Ok(Language::Portuguese),
            "russian" => Ok(Language::Russian),
            "italian" => Ok(Language::Italian),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Inputs for one itinerary generation request.
///
/// Immutable once submitted; the planner form creates a fresh value per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPreferences {
    pub destination: String,
    /// Calendar date string, empty when the trip can start anytime.
    #[serde(default)]
    pub start_date: String,
    pub duration: u32,
    #[serde(default)]
    pub budget: Budget,
    #[serde(default)]
    pub travelers: Travelers,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub language: Language,
}

/// Kind of itinerary activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Food,
    Sightseeing,
    Adventure,
    Relax,
    Culture,
}

impl ActivityType {
    /// Canonical fallback when the model invents a type outside the enum.
    pub const FALLBACK: ActivityType = ActivityType::Sightseeing;

    /// Lenient decode of the wire value. The model sometimes emits the hyphenated
    /// spelling used in older prompt revisions.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(ActivityType::Food),
            "sightseeing" | "sight-seeing" => Some(ActivityType::Sightseeing),
            "adventure" => Some(ActivityType::Adventure),
            "relax" => Some(ActivityType::Relax),
            "culture" => Some(ActivityType::Culture),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Food => "food",
            ActivityType::Sightseeing => "sightseeing",
            ActivityType::Adventure => "adventure",
            ActivityType::Relax => "relax",
            ActivityType::Culture => "culture",
        }
    }
}

/// A single scheduled activity within a day plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Free-text time range, e.g. "08:00 AM - 09:30 AM"
    pub time: String,
    pub activity: String,
    pub description: String,
    pub location: String,
    pub estimated_cost: f64,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
}

/// One day of an itinerary; `day` is 1-based and unique within the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub theme: String,
    pub activities: Vec<Activity>,
}

/// A generated travel itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub title: String,
    pub destination: String,
    pub description: String,
    pub total_estimated_cost: f64,
    pub currency: String,
    pub travel_tips: Vec<String>,
    pub days: Vec<DayPlan>,
    /// User rating, 1-5, assigned after the fact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl Itinerary {
    /// Short summary used as assistant chat context.
    pub fn summary(&self) -> String {
        format!(
            "{} — {} days in {}. {}",
            self.title,
            self.days.len(),
            self.destination,
            self.description
        )
    }
}

/// A recorded travel expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub category: String,
    pub subcategory: String,
    pub amount: f64,
    /// Calendar date, YYYY-MM-DD.
    pub date: String,
    pub description: String,
}

impl Expense {
    /// Create an expense dated today with a fresh id.
    pub fn new(category: &str, subcategory: &str, amount: f64, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            amount,
            date: Utc::now().format("%Y-%m-%d").to_string(),
            description: description.to_string(),
        }
    }
}

/// Chat participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// A grounding citation attached to a search-augmented response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

/// One message of an assistant chat session.
///
/// Sessions are append-only and never persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    /// Unix milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self::with_role(Role::User, text, Vec::new())
    }

    pub fn model(text: &str, sources: Vec<Source>) -> Self {
        Self::with_role(Role::Model, text, sources)
    }

    fn with_role(role: Role, text: &str, sources: Vec<Source>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.to_string(),
            timestamp: Utc::now().timestamp_millis(),
            sources,
        }
    }
}

/// Assistant response: answer text plus optional grounding citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Category/subcategory suggestion for an expense, already taxonomy-corrected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseTag {
    pub category: String,
    pub subcategory: String,
}

/// Caption material extracted from a travel photo
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoInsights {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub location: String,
}

/// A destination query resolved to "City, Country" plus an optional maps link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDestination {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// A generated local tour guide listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourGuide {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub specialty: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rate_per_hour: f64,
    #[serde(default)]
    pub image_url: String,
}

/// A generated community feed post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

/// User identity plus default planning preferences and saved trips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub home_airport: String,
    #[serde(default)]
    pub saved_trips: Vec<Itinerary>,
    #[serde(default)]
    pub preferences: TripPreferences,
}

/// A photo in the social studio's working set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub ai_tags: Vec<String>,
    #[serde(default)]
    pub aesthetic_score: f64,
}

/// Writing tone for generated social content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Casual,
    Professional,
    Poetic,
    Humorous,
    Energetic,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Professional => "professional",
            Tone::Poetic => "poetic",
            Tone::Humorous => "humorous",
            Tone::Energetic => "energetic",
        }
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casual" => Ok(Tone::Casual),
            "professional" => Ok(Tone::Professional),
            "poetic" => Ok(Tone::Poetic),
            "humorous" => Ok(Tone::Humorous),
            "energetic" => Ok(Tone::Energetic),
            other => Err(format!("unknown tone: {other}")),
        }
    }
}

/// Target audience for generated social content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    #[default]
    Friends,
    Travelers,
    Professionals,
    Family,
}

impl Audience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Audience::Friends => "friends",
            Audience::Travelers => "travelers",
            Audience::Professionals => "professionals",
            Audience::Family => "family",
        }
    }
}

impl FromStr for Audience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "friends" => Ok(Audience::Friends),
            "travelers" => Ok(Audience::Travelers),
            "professionals" => Ok(Audience::Professionals),
            "family" => Ok(Audience::Family),
            other => Err(format!("unknown audience: {other}")),
        }
    }
}

/// Emoji density for generated social content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmojiStyle {
    None,
    #[default]
    Minimal,
    Heavy,
}

impl EmojiStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiStyle::None => "none",
            EmojiStyle::Minimal => "minimal",
            EmojiStyle::Heavy => "heavy",
        }
    }
}

impl FromStr for EmojiStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(EmojiStyle::None),
            "minimal" => Ok(EmojiStyle::Minimal),
            "heavy" => Ok(EmojiStyle::Heavy),
            other => Err(format!("unknown emoji style: {other}")),
        }
    }
}

/// The user's authentic content voice, fed into social content generation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserVoiceProfile {
    #[serde(default)]
    pub tone: Tone,
    #[serde(default)]
    pub audience: Audience,
    #[serde(default)]
    pub emoji_style: EmojiStyle,
    #[serde(default = "default_hashtag_count")]
    pub hashtag_count: u8,
}

fn default_hashtag_count() -> u8 {
    10
}

// --- Social media content bundle -------------------------------------------
//
// Produced in one shot per generation call; the nested structure mirrors the
// JSON the model is instructed to emit. The top-level platform blocks are
// required (strict operation); leaf lists default to empty.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPost {
    #[serde(default)]
    pub photo_reference: i64,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub location_tag: String,
    #[serde(default)]
    pub first_comment: String,
    #[serde(default)]
    pub viral_potential_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramStory {
    #[serde(default)]
    pub photo_reference: i64,
    #[serde(default)]
    pub sticker_ideas: Vec<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cta: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReelPlan {
    #[serde(default)]
    pub concept: String,
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub photo_sequence: Vec<i64>,
    #[serde(default)]
    pub music: String,
    #[serde(default)]
    pub captions: Vec<String>,
    #[serde(default)]
    pub trend_alignment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstagramPlan {
    #[serde(default)]
    pub posts: Vec<InstagramPost>,
    #[serde(default)]
    pub stories: Vec<InstagramStory>,
    #[serde(default)]
    pub reel: ReelPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterPlan {
    #[serde(default)]
    pub thread: Vec<String>,
    #[serde(default, rename = "standalonetweet")]
    pub standalone_tweet: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoAlbum {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_order: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacebookPlan {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub photo_album: PhotoAlbum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedInPlan {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub tone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TikTokConcept {
    #[serde(default)]
    pub hook: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub photo_sequence: Vec<i64>,
    #[serde(default)]
    pub sound: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikTokPlan {
    #[serde(default)]
    pub concepts: Vec<TikTokConcept>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub seo_title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub full_post: String,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub internal_links: Vec<String>,
    #[serde(default)]
    pub cta_placement: Vec<String>,
}

/// Platform-specific content generated in one shot for a finished trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaContent {
    pub instagram: InstagramPlan,
    pub twitter: TwitterPlan,
    pub facebook: FacebookPlan,
    #[serde(rename = "linkedIn")]
    pub linked_in: LinkedInPlan,
    pub tiktok: TikTokPlan,
    pub blog_post: BlogPost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_from_wire() {
        assert_eq!(ActivityType::from_wire("food"), Some(ActivityType::Food));
        assert_eq!(
            ActivityType::from_wire("Sight-Seeing"),
            Some(ActivityType::Sightseeing)
        );
        assert_eq!(ActivityType::from_wire("shopping"), None);
    }

    #[test]
    fn test_trip_preferences_wire_names() {
        let prefs = TripPreferences {
            destination: "Tokyo, Japan".to_string(),
            start_date: "2025-07-15".to_string(),
            duration: 5,
            ..Default::default()
        };
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["startDate"], "2025-07-15");
        assert_eq!(json["duration"], 5);
    }

    #[test]
    fn test_expense_new_defaults() {
        let expense = Expense::new("Food", "Restaurants", 12.5, "lunch");
        assert!(!expense.id.is_empty());
        assert_eq!(expense.date.len(), 10);
        assert_eq!(expense.category, "Food");
    }

    #[test]
    fn test_itinerary_roundtrip_keeps_wire_names() {
        let json = serde_json::json!({
            "title": "Tokyo Dreams",
            "destination": "Tokyo, Japan",
            "description": "A week of neon and noodles",
            "totalEstimatedCost": 1800.0,
            "currency": "JPY",
            "travelTips": ["Get a Suica card"],
            "days": [{
                "day": 1,
                "theme": "Arrival",
                "activities": [{
                    "time": "09:00 AM - 11:00 AM",
                    "activity": "Senso-ji",
                    "description": "Oldest temple in the city",
                    "location": "Asakusa",
                    "estimatedCost": 0.0,
                    "type": "culture"
                }]
            }]
        });
        let itinerary: Itinerary = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(itinerary.days[0].activities[0].activity_type, ActivityType::Culture);
        let back = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(back["days"][0]["activities"][0]["type"], "culture");
        assert_eq!(back["totalEstimatedCost"], 1800.0);
    }

    #[test]
    fn test_social_content_requires_platform_blocks() {
        let partial = serde_json::json!({ "instagram": { "posts": [], "stories": [], "reel": {} } });
        assert!(serde_json::from_value::<SocialMediaContent>(partial).is_err());
    }

    #[test]
    fn test_profile_equality_covers_preferences() {
        let mut a = UserProfile::default();
        let b = UserProfile::default();
        assert_eq!(a, b);
        a.preferences.destination = "Lisbon, Portugal".to_string();
        assert_ne!(a, b);
    }

    #[test]
    fn test_chat_message_constructors() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.role, Role::User);
        assert!(msg.sources.is_empty());
        assert!(msg.timestamp > 0);
    }
}
