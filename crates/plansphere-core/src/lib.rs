//! PlanSphere Core Library
//!
//! Shared functionality for the PlanSphere travel planner:
//! - AI backends (Gemini, mock) behind one trait
//! - Prompt library with customizable templates
//! - Schema contracts and response validation for AI output
//! - Failure-policy-aware concierge service
//! - Session state with write-through persistence
//! - Expense taxonomy, CSV export and import

pub mod ai;
pub mod error;
pub mod export;
pub mod models;
pub mod policy;
pub mod prompts;
pub mod schema;
pub mod service;
pub mod session;
pub mod store;
pub mod task;
pub mod taxonomy;

pub use ai::{
    AiClient, GeminiBackend, GenerationRequest, GenerationResponse, Grounding, ImageAttachment,
    MockBackend, TravelAi,
};
pub use error::{Error, Result};
pub use models::{
    AssistantReply, Budget, ChatMessage, CommunityPost, Expense, ExpenseTag, Itinerary, Language,
    Photo, PhotoInsights, ResolvedDestination, SocialMediaContent, TourGuide, Travelers,
    TripPreferences, UserProfile, UserVoiceProfile,
};
pub use policy::{FailurePolicy, Operation};
pub use prompts::{Prompt, PromptId, PromptLibrary};
pub use service::{Concierge, OFFLINE_MESSAGE};
pub use session::{AppView, Session, Theme};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use task::TaskSlot;
