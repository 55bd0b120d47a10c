//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `plan` - Itinerary planning and management
//! - `chat` - Travel assistant chat
//! - `expenses` - Expense tracking, budget, CSV export/import
//! - `tools` - Currency conversion, destination resolution, guides, posts,
//!   social content, photo captions
//! - `profile` - User profile and status
//!
//! Command functions are generic over the store and the AI backend so tests
//! can run them against an in-memory store and the mock backend.

pub mod chat;
pub mod expenses;
pub mod plan;
pub mod profile;
pub mod tools;

// Re-export command functions for main.rs
pub use chat::*;
pub use expenses::*;
pub use plan::*;
pub use profile::*;
pub use tools::*;

/// Truncate a string to a maximum byte length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max.saturating_sub(3);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
