//! Response parsing and contract validation
//!
//! Every AI response passes through two stages: JSON extraction from the raw
//! text (the model sometimes wraps output in prose or code fences), then
//! validation against the operation's contract. Validators are pure functions
//! of the decoded value, so re-validating an already valid entity returns it
//! unchanged.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{
    Activity, ActivityType, CommunityPost, DayPlan, ExpenseTag, Itinerary, PhotoInsights,
    ResolvedDestination, SocialMediaContent, TourGuide,
};
use crate::taxonomy;

use super::types::GenerationResponse;

/// How much raw text to include in parse errors.
const RAW_PREVIEW_LEN: usize = 200;

fn preview(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() > RAW_PREVIEW_LEN {
        let mut end = RAW_PREVIEW_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    } else {
        trimmed.to_string()
    }
}

/// Extract the first JSON document (object or array) from raw model output.
///
/// Scans from the earliest opening brace or bracket to the matching closing
/// one at the end, which strips surrounding prose and markdown fences.
pub fn extract_json(raw: &str) -> Result<Value> {
    let object_start = raw.find('{');
    let array_start = raw.find('[');

    let (start, close) = match (object_start, array_start) {
        (Some(o), Some(a)) if a < o => (a, ']'),
        (Some(o), _) => (o, '}'),
        (None, Some(a)) => (a, ']'),
        (None, None) => {
            return Err(Error::Parse(format!(
                "no JSON found in response: {}",
                preview(raw)
            )));
        }
    };

    let end = raw.rfind(close).ok_or_else(|| {
        Error::Parse(format!("unterminated JSON in response: {}", preview(raw)))
    })?;
    if end < start {
        return Err(Error::Parse(format!(
            "malformed JSON in response: {}",
            preview(raw)
        )));
    }

    serde_json::from_str(&raw[start..=end])
        .map_err(|e| Error::Parse(format!("JSON decode failed ({}): {}", e, preview(raw))))
}

// --- Itinerary --------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActivity {
    #[serde(default)]
    time: String,
    #[serde(default)]
    activity: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    estimated_cost: Option<f64>,
    #[serde(default, rename = "type")]
    activity_type: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDay {
    #[serde(default)]
    day: Option<u32>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    activities: Vec<RawActivity>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawItinerary {
    title: Option<String>,
    destination: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    total_estimated_cost: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    travel_tips: Vec<String>,
    #[serde(default)]
    days: Vec<RawDay>,
}

/// Validate a decoded itinerary against its contract.
///
/// Title, destination and a non-empty day list are required. Everything else
/// is repaired in place: unnamed activities are dropped, off-taxonomy activity
/// types fall back to sightseeing, negative costs clamp to zero, and a missing
/// day index is derived from position. A day count differing from the request
/// is accepted and logged.
pub fn validate_itinerary(value: Value, requested_days: u32) -> Result<Itinerary> {
    let raw: RawItinerary = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("itinerary shape invalid: {}", e)))?;

    let title = raw
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::Parse("itinerary missing title".into()))?;
    let destination = raw
        .destination
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| Error::Parse("itinerary missing destination".into()))?;
    if raw.days.is_empty() {
        return Err(Error::Parse("itinerary has no days".into()));
    }

    let mut days = Vec::with_capacity(raw.days.len());
    for (position, day) in raw.days.into_iter().enumerate() {
        let mut activities = Vec::with_capacity(day.activities.len());
        for activity in day.activities {
            if activity.activity.trim().is_empty() {
                warn!(day = position + 1, "dropping unnamed activity");
                continue;
            }
            let activity_type = match activity.activity_type.as_deref() {
                Some(text) => ActivityType::from_wire(text).unwrap_or_else(|| {
                    debug!(value = text, "unknown activity type, using fallback");
                    ActivityType::FALLBACK
                }),
                None => ActivityType::FALLBACK,
            };
            let estimated_cost = activity.estimated_cost.unwrap_or(0.0).max(0.0);
            activities.push(Activity {
                time: activity.time,
                activity: activity.activity,
                description: activity.description,
                location: activity.location,
                estimated_cost,
                activity_type,
            });
        }
        days.push(DayPlan {
            day: day.day.unwrap_or(position as u32 + 1),
            date: day.date,
            theme: day.theme,
            activities,
        });
    }

    if days.len() != requested_days as usize {
        warn!(
            requested = requested_days,
            produced = days.len(),
            "itinerary day count differs from request"
        );
    }

    Ok(Itinerary {
        title,
        destination,
        description: raw.description,
        total_estimated_cost: raw.total_estimated_cost.unwrap_or(0.0).max(0.0),
        currency: raw.currency.unwrap_or_else(|| "USD".to_string()),
        travel_tips: raw.travel_tips,
        days,
        rating: None,
    })
}

// --- Lenient validators -----------------------------------------------------

fn lenient_number(value: &Value, field: &str) -> f64 {
    match value.as_f64() {
        Some(n) if n >= 0.0 => n,
        Some(n) => {
            warn!(field, value = n, "negative number clamped to zero");
            0.0
        }
        None => {
            if !value.is_null() {
                warn!(field, ?value, "non-numeric value coerced to zero");
            }
            0.0
        }
    }
}

/// Validate an expense tag suggestion. Always succeeds: whatever the model
/// proposed is remapped onto the canonical taxonomy.
pub fn validate_expense_tag(value: Value) -> ExpenseTag {
    let category = value["category"].as_str().unwrap_or_default();
    let subcategory = value["subcategory"].as_str().unwrap_or_default();
    taxonomy::correct(category, subcategory)
}

/// Validate a currency conversion result. Missing or non-numeric results
/// coerce to zero; negative results clamp to zero.
pub fn validate_currency(value: Value) -> f64 {
    lenient_number(&value["result"], "result")
}

/// Validate photo insights. All fields are optional with empty defaults.
pub fn validate_photo_insights(value: Value) -> PhotoInsights {
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "photo insights shape invalid, using empty defaults");
        PhotoInsights::default()
    })
}

/// Validate the one-shot social content bundle.
///
/// Strict operation: all six platform blocks must be present. Photo
/// references outside 1..=photo_count are accepted but logged.
pub fn validate_social_content(value: Value, photo_count: usize) -> Result<SocialMediaContent> {
    let content: SocialMediaContent = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("social content shape invalid: {}", e)))?;

    let mut refs: Vec<i64> = Vec::new();
    refs.extend(content.instagram.posts.iter().map(|p| p.photo_reference));
    refs.extend(content.instagram.stories.iter().map(|s| s.photo_reference));
    refs.extend(content.instagram.reel.photo_sequence.iter().copied());
    refs.extend(content.facebook.photo_album.photo_order.iter().copied());
    for concept in &content.tiktok.concepts {
        refs.extend(concept.photo_sequence.iter().copied());
    }

    for reference in refs {
        if reference < 1 || reference > photo_count as i64 {
            warn!(
                reference,
                photo_count, "photo reference outside the provided photo set"
            );
        }
    }

    Ok(content)
}

/// Validate a tour guide list; negative ratings and rates clamp to zero.
pub fn validate_tour_guides(value: Value) -> Result<Vec<TourGuide>> {
    let mut guides: Vec<TourGuide> = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("tour guide list invalid: {}", e)))?;
    for guide in &mut guides {
        if guide.rating < 0.0 {
            warn!(name = %guide.name, rating = guide.rating, "negative rating clamped");
            guide.rating = 0.0;
        }
        if guide.rate_per_hour < 0.0 {
            guide.rate_per_hour = 0.0;
        }
    }
    Ok(guides)
}

/// Validate a community post list; negative like counts clamp to zero.
pub fn validate_community_posts(value: Value) -> Result<Vec<CommunityPost>> {
    let mut posts: Vec<CommunityPost> = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("community post list invalid: {}", e)))?;
    for post in &mut posts {
        if post.likes < 0 {
            post.likes = 0;
        }
    }
    Ok(posts)
}

/// Turn a grounded text response into a resolved destination.
///
/// The response text is the resolved name; an empty response echoes the
/// original query. The first grounding citation supplies the maps link.
pub fn resolved_destination(response: &GenerationResponse, query: &str) -> ResolvedDestination {
    let trimmed = response.text.trim();
    let name = if trimmed.is_empty() {
        query.trim().to_string()
    } else {
        trimmed.to_string()
    };
    ResolvedDestination {
        name,
        url: response.sources.first().map(|s| s.uri.clone()),
    }
}
