//! Prompt builders: typed parameters in, complete model requests out
//!
//! Each builder is a pure function of its inputs (the prompt library is the
//! template source, nothing else): no hidden state, no retries, no network.
//! Field ordering in the emitted text is deterministic so tests can assert on
//! substring presence.

use std::collections::HashMap;

use crate::error::Result;
use crate::models::{ChatMessage, Itinerary, Photo, Role, TripPreferences, UserVoiceProfile};
use crate::prompts::{PromptId, PromptLibrary};
use crate::{schema, taxonomy};

use super::types::{GenerationRequest, Grounding, ImageAttachment};

/// Most recent chat messages included in assistant prompts. Older messages
/// are dropped, not summarized.
pub const CHAT_HISTORY_WINDOW: usize = 5;

/// Build the itinerary generation request.
///
/// Content language follows the preferences; JSON keys stay English — the
/// language directive lives in the template, separate from the schema contract.
pub fn itinerary_request(
    prompts: &mut PromptLibrary,
    prefs: &TripPreferences,
) -> Result<GenerationRequest> {
    let duration = prefs.duration.to_string();
    let interests = prefs.interests.join(", ");
    let start_date = if prefs.start_date.trim().is_empty() {
        "Anytime".to_string()
    } else {
        prefs.start_date.clone()
    };

    let mut vars = HashMap::new();
    vars.insert("destination", prefs.destination.as_str());
    vars.insert("start_date", start_date.as_str());
    vars.insert("duration", duration.as_str());
    vars.insert("travelers", prefs.travelers.as_str());
    vars.insert("budget", prefs.budget.as_str());
    vars.insert("interests", interests.as_str());
    vars.insert("language", prefs.language.as_str());

    let prompt = prompts.get(PromptId::PlanItinerary)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::itinerary().to_value()),
        temperature: Some(0.4),
        json_response: true,
        ..Default::default()
    })
}

/// Build the chat assistant request with web-search grounding enabled.
pub fn assistant_request(
    prompts: &mut PromptLibrary,
    query: &str,
    context: &str,
    history: &[ChatMessage],
) -> Result<GenerationRequest> {
    let recent = if history.len() > CHAT_HISTORY_WINDOW {
        &history[history.len() - CHAT_HISTORY_WINDOW..]
    } else {
        history
    };
    let history_text = recent
        .iter()
        .map(|message| {
            let speaker = match message.role {
                Role::User => "User",
                Role::Model => "Assistant",
            };
            format!("{}: {}", speaker, message.text)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut vars = HashMap::new();
    vars.insert("query", query);
    vars.insert("context", context);
    vars.insert("history", history_text.as_str());

    let prompt = prompts.get(PromptId::TravelAssistant)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        grounding: Grounding::WebSearch,
        ..Default::default()
    })
}

/// Build the photo analysis request; the image travels as a typed attachment.
pub fn photo_request(
    prompts: &mut PromptLibrary,
    image: ImageAttachment,
    context: &str,
) -> Result<GenerationRequest> {
    let mut vars = HashMap::new();
    vars.insert("context", context);

    let prompt = prompts.get(PromptId::AnalyzePhoto)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::photo_insights().to_value()),
        image: Some(image),
        json_response: true,
        ..Default::default()
    })
}

/// Build the expense categorization request.
///
/// The category list and subcategory lines are generated from the taxonomy
/// table, so extending the taxonomy updates the prompt automatically.
pub fn categorize_request(
    prompts: &mut PromptLibrary,
    description: &str,
    amount: f64,
) -> Result<GenerationRequest> {
    let amount = amount.to_string();
    let categories = taxonomy::categories().join(", ");
    let taxonomy_lines = taxonomy::prompt_lines();

    let mut vars = HashMap::new();
    vars.insert("description", description);
    vars.insert("amount", amount.as_str());
    vars.insert("categories", categories.as_str());
    vars.insert("taxonomy", taxonomy_lines.as_str());

    let prompt = prompts.get(PromptId::CategorizeExpense)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::expense_tag().to_value()),
        json_response: true,
        ..Default::default()
    })
}

/// Build the destination resolution request with maps grounding.
pub fn destination_request(prompts: &mut PromptLibrary, query: &str) -> Result<GenerationRequest> {
    let mut vars = HashMap::new();
    vars.insert("query", query);

    let prompt = prompts.get(PromptId::ResolveDestination)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        grounding: Grounding::Maps,
        temperature: Some(0.0),
        ..Default::default()
    })
}

/// Build the currency conversion request.
pub fn currency_request(
    prompts: &mut PromptLibrary,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<GenerationRequest> {
    let amount = amount.to_string();

    let mut vars = HashMap::new();
    vars.insert("amount", amount.as_str());
    vars.insert("from", from);
    vars.insert("to", to);

    let prompt = prompts.get(PromptId::ConvertCurrency)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::currency_result().to_value()),
        json_response: true,
        ..Default::default()
    })
}

/// Build the one-shot social content request.
///
/// The nested output structure is described inline in the template (the
/// provider schema grammar cannot express it comfortably), so only the JSON
/// mime type is requested.
pub fn social_request(
    prompts: &mut PromptLibrary,
    trip: &Itinerary,
    photos: &[Photo],
    voice: &UserVoiceProfile,
) -> Result<GenerationRequest> {
    let highlights = trip
        .days
        .iter()
        .flat_map(|day| day.activities.iter())
        .map(|activity| activity.activity.as_str())
        .take(10)
        .collect::<Vec<_>>()
        .join(", ");
    let duration = trip.days.len().to_string();

    let photo_block = photos
        .iter()
        .enumerate()
        .map(|(idx, photo)| {
            format!(
                "Photo {}: {}\n- Location: {}\n- Tags: {}\n- Aesthetic Score: {}/100",
                idx + 1,
                photo.description,
                photo.location,
                photo.ai_tags.join(", "),
                photo.aesthetic_score
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let hashtag_count = voice.hashtag_count.to_string();

    let mut vars = HashMap::new();
    vars.insert("title", trip.title.as_str());
    vars.insert("highlights", highlights.as_str());
    vars.insert("duration", duration.as_str());
    vars.insert("vibe", trip.description.as_str());
    vars.insert("photos", photo_block.as_str());
    vars.insert("tone", voice.tone.as_str());
    vars.insert("audience", voice.audience.as_str());
    vars.insert("emoji_style", voice.emoji_style.as_str());
    vars.insert("hashtag_count", hashtag_count.as_str());

    let prompt = prompts.get(PromptId::SocialContent)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        temperature: Some(0.8),
        json_response: true,
        ..Default::default()
    })
}

/// Build the tour guide generation request.
pub fn guides_request(prompts: &mut PromptLibrary, location: &str) -> Result<GenerationRequest> {
    let mut vars = HashMap::new();
    vars.insert("location", location);

    let prompt = prompts.get(PromptId::TourGuides)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::tour_guides().to_value()),
        json_response: true,
        ..Default::default()
    })
}

/// Build the community feed generation request.
pub fn posts_request(prompts: &mut PromptLibrary, topic: &str) -> Result<GenerationRequest> {
    let mut vars = HashMap::new();
    vars.insert("topic", topic);

    let prompt = prompts.get(PromptId::CommunityPosts)?.render(&vars);
    Ok(GenerationRequest {
        prompt,
        schema: Some(schema::community_posts().to_value()),
        json_response: true,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Language, Travelers};

    fn sample_prefs() -> TripPreferences {
        TripPreferences {
            destination: "Kyoto, Japan".to_string(),
            start_date: String::new(),
            duration: 4,
            budget: Budget::High,
            travelers: Travelers::Family,
            interests: vec!["History".to_string(), "Food".to_string(), "Hidden Gems".to_string()],
            language: Language::Spanish,
        }
    }

    #[test]
    fn test_itinerary_prompt_contains_inputs_verbatim() {
        let mut lib = PromptLibrary::embedded_only();
        let request = itinerary_request(&mut lib, &sample_prefs()).unwrap();

        assert!(request.prompt.contains("Kyoto, Japan"));
        assert!(request.prompt.contains("4 days"));
        for interest in &sample_prefs().interests {
            assert!(request.prompt.contains(interest), "missing {interest}");
        }
        assert!(request.prompt.contains("Spanish"));
        assert!(request.prompt.contains("Anytime"));
        assert!(request.schema.is_some());
        assert_eq!(request.temperature, Some(0.4));
    }

    #[test]
    fn test_itinerary_prompt_keeps_explicit_start_date() {
        let mut lib = PromptLibrary::embedded_only();
        let mut prefs = sample_prefs();
        prefs.start_date = "2025-07-15".to_string();
        let request = itinerary_request(&mut lib, &prefs).unwrap();
        assert!(request.prompt.contains("Start Date: 2025-07-15."));
    }

    #[test]
    fn test_assistant_history_truncated_to_window() {
        let mut lib = PromptLibrary::embedded_only();
        let history: Vec<ChatMessage> = (0..8)
            .map(|i| ChatMessage::user(&format!("message-{i}")))
            .collect();

        let request = assistant_request(&mut lib, "what next?", "no plan", &history).unwrap();
        for i in 3..8 {
            assert!(request.prompt.contains(&format!("message-{i}")));
        }
        for i in 0..3 {
            assert!(!request.prompt.contains(&format!("message-{i}")));
        }
        assert_eq!(request.grounding, Grounding::WebSearch);
    }

    #[test]
    fn test_assistant_empty_history_drops_block() {
        let mut lib = PromptLibrary::embedded_only();
        let request = assistant_request(&mut lib, "hi", "ctx", &[]).unwrap();
        assert!(!request.prompt.contains("Chat History:"));
        assert!(request.prompt.contains("User Query: hi"));
    }

    #[test]
    fn test_categorize_prompt_lists_taxonomy() {
        let mut lib = PromptLibrary::embedded_only();
        let request = categorize_request(&mut lib, "taxi to airport", 23.0).unwrap();
        assert!(request.prompt.contains("\"taxi to airport\""));
        assert!(request.prompt.contains("23"));
        assert!(request.prompt.contains("Food, Transport, Accommodation"));
        assert!(request.prompt.contains("Transport -> Flight, Taxi"));
    }

    #[test]
    fn test_photo_request_keeps_image_out_of_text() {
        let mut lib = PromptLibrary::embedded_only();
        let bytes = vec![0xFF, 0xD8, 0xFF, 0xE0];
        let request =
            photo_request(&mut lib, ImageAttachment::jpeg(bytes.clone()), "sunset").unwrap();
        assert!(request.prompt.contains("sunset"));
        let image = request.image.expect("attachment");
        assert_eq!(image.data, bytes);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn test_destination_request_uses_maps_grounding() {
        let mut lib = PromptLibrary::embedded_only();
        let request = destination_request(&mut lib, "somewhere warm in january").unwrap();
        assert_eq!(request.grounding, Grounding::Maps);
        assert_eq!(request.temperature, Some(0.0));
        assert!(request.prompt.contains("somewhere warm in january"));
        assert!(request.schema.is_none());
    }

    #[test]
    fn test_social_request_caps_highlights() {
        use crate::models::{Activity, ActivityType, DayPlan};

        let activities: Vec<Activity> = (0..15)
            .map(|i| Activity {
                time: String::new(),
                activity: format!("spot-{i}"),
                description: String::new(),
                location: String::new(),
                estimated_cost: 0.0,
                activity_type: ActivityType::Sightseeing,
            })
            .collect();
        let trip = Itinerary {
            title: "Lisbon Light".to_string(),
            destination: "Lisbon, Portugal".to_string(),
            description: "Tiles and tarts".to_string(),
            total_estimated_cost: 900.0,
            currency: "EUR".to_string(),
            travel_tips: vec![],
            days: vec![DayPlan {
                day: 1,
                date: None,
                theme: "Wander".to_string(),
                activities,
            }],
            rating: None,
        };

        let mut lib = PromptLibrary::embedded_only();
        let request = social_request(&mut lib, &trip, &[], &UserVoiceProfile::default()).unwrap();
        assert!(request.prompt.contains("spot-9"));
        assert!(!request.prompt.contains("spot-10"));
        assert!(!request.prompt.contains("PHOTOS AVAILABLE"));
        assert_eq!(request.temperature, Some(0.8));
    }

    #[test]
    fn test_social_request_indexes_photos_from_one() {
        let trip = Itinerary {
            title: "T".to_string(),
            destination: "D".to_string(),
            description: "V".to_string(),
            total_estimated_cost: 0.0,
            currency: "USD".to_string(),
            travel_tips: vec![],
            days: vec![],
            rating: None,
        };
        let photos = vec![Photo {
            description: "golden hour pier".to_string(),
            location: "Santa Monica".to_string(),
            ai_tags: vec!["beach".to_string()],
            aesthetic_score: 88.0,
            ..Default::default()
        }];

        let mut lib = PromptLibrary::embedded_only();
        let request =
            social_request(&mut lib, &trip, &photos, &UserVoiceProfile::default()).unwrap();
        assert!(request.prompt.contains("Photo 1: golden hour pier"));
        assert!(request.prompt.contains("PHOTOS AVAILABLE"));
    }
}
