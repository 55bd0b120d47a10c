//! Prompt template library
//!
//! Templates are loaded with a two-layer resolution:
//! 1. Check for an override in the data dir (~/.local/share/plansphere/prompts/overrides/)
//! 2. Fall back to embedded defaults (compiled into the binary)
//!
//! Field names and structural instructions never vary between languages; only
//! the content-language directive does, so every template keeps its structure
//! contract separate from the `{{language}}` variable.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default prompts (compiled into binary)
mod defaults {
    pub const PLAN_ITINERARY: &str = include_str!("../../../prompts/plan_itinerary.md");
    pub const TRAVEL_ASSISTANT: &str = include_str!("../../../prompts/travel_assistant.md");
    pub const ANALYZE_PHOTO: &str = include_str!("../../../prompts/analyze_photo.md");
    pub const CATEGORIZE_EXPENSE: &str = include_str!("../../../prompts/categorize_expense.md");
    pub const RESOLVE_DESTINATION: &str = include_str!("../../../prompts/resolve_destination.md");
    pub const CONVERT_CURRENCY: &str = include_str!("../../../prompts/convert_currency.md");
    pub const SOCIAL_CONTENT: &str = include_str!("../../../prompts/social_content.md");
    pub const TOUR_GUIDES: &str = include_str!("../../../prompts/tour_guides.md");
    pub const COMMUNITY_POSTS: &str = include_str!("../../../prompts/community_posts.md");
}

/// Known prompt IDs, one per AI-backed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptId {
    PlanItinerary,
    TravelAssistant,
    AnalyzePhoto,
    CategorizeExpense,
    ResolveDestination,
    ConvertCurrency,
    SocialContent,
    TourGuides,
    CommunityPosts,
}

impl PromptId {
    /// Get the string identifier for this prompt
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlanItinerary => "plan_itinerary",
            Self::TravelAssistant => "travel_assistant",
            Self::AnalyzePhoto => "analyze_photo",
            Self::CategorizeExpense => "categorize_expense",
            Self::ResolveDestination => "resolve_destination",
            Self::ConvertCurrency => "convert_currency",
            Self::SocialContent => "social_content",
            Self::TourGuides => "tour_guides",
            Self::CommunityPosts => "community_posts",
        }
    }

    /// Get all known prompt IDs
    pub fn all() -> &'static [PromptId] {
        &[
            Self::PlanItinerary,
            Self::TravelAssistant,
            Self::AnalyzePhoto,
            Self::CategorizeExpense,
            Self::ResolveDestination,
            Self::ConvertCurrency,
            Self::SocialContent,
            Self::TourGuides,
            Self::CommunityPosts,
        ]
    }

    fn default_content(&self) -> &'static str {
        match self {
            Self::PlanItinerary => defaults::PLAN_ITINERARY,
            Self::TravelAssistant => defaults::TRAVEL_ASSISTANT,
            Self::AnalyzePhoto => defaults::ANALYZE_PHOTO,
            Self::CategorizeExpense => defaults::CATEGORIZE_EXPENSE,
            Self::ResolveDestination => defaults::RESOLVE_DESTINATION,
            Self::ConvertCurrency => defaults::CONVERT_CURRENCY,
            Self::SocialContent => defaults::SOCIAL_CONTENT,
            Self::TourGuides => defaults::TOUR_GUIDES,
            Self::CommunityPosts => defaults::COMMUNITY_POSTS,
        }
    }
}

/// Prompt frontmatter metadata
#[derive(Debug, Clone, Deserialize)]
pub struct PromptMetadata {
    /// Unique identifier
    pub id: String,
    /// Version number for tracking changes
    pub version: u32,
}

/// A loaded prompt with metadata and content
#[derive(Debug, Clone)]
pub struct Prompt {
    pub metadata: PromptMetadata,
    pub content: String,
    /// Whether this came from an override file
    pub is_override: bool,
}

impl Prompt {
    /// Render the template with `{{var}}` substitution and `{{#if var}}` blocks.
    ///
    /// Variable substitution happens after conditional resolution, so a block
    /// guarded by an absent or empty variable disappears entirely.
    pub fn render(&self, vars: &HashMap<&str, &str>) -> String {
        let mut result = resolve_conditionals(&self.content, vars);
        for (key, value) in vars {
            let pattern = format!("{{{{{}}}}}", key);
            result = result.replace(&pattern, value);
        }
        result
    }
}

/// Prompt library with override resolution and caching
pub struct PromptLibrary {
    override_dir: Option<PathBuf>,
    cache: HashMap<PromptId, Prompt>,
}

impl PromptLibrary {
    /// Create a library resolving overrides from the default data directory
    pub fn new() -> Self {
        Self {
            override_dir: default_prompts_dir(),
            cache: HashMap::new(),
        }
    }

    /// Create a library with a custom override directory
    pub fn with_override_dir(path: PathBuf) -> Self {
        Self {
            override_dir: Some(path),
            cache: HashMap::new(),
        }
    }

    /// Create a library serving embedded defaults only
    pub fn embedded_only() -> Self {
        Self {
            override_dir: None,
            cache: HashMap::new(),
        }
    }

    /// Get a prompt by ID, loading from override or default
    pub fn get(&mut self, id: PromptId) -> Result<&Prompt> {
        if !self.cache.contains_key(&id) {
            let prompt = self.load(id)?;
            self.cache.insert(id, prompt);
        }
        Ok(self.cache.get(&id).expect("just inserted"))
    }

    fn load(&self, id: PromptId) -> Result<Prompt> {
        if let Some(ref override_dir) = self.override_dir {
            let override_path = override_dir.join(format!("{}.md", id.as_str()));
            if override_path.exists() {
                let content = fs::read_to_string(&override_path).map_err(|e| {
                    Error::InvalidData(format!("Failed to read prompt override: {}", e))
                })?;
                let (metadata, body) = parse_prompt(&content)?;
                return Ok(Prompt {
                    metadata,
                    content: body,
                    is_override: true,
                });
            }
        }

        let (metadata, body) = parse_prompt(id.default_content())?;
        Ok(Prompt {
            metadata,
            content: body,
            is_override: false,
        })
    }

    /// Check if a prompt has an override file
    pub fn has_override(&self, id: PromptId) -> bool {
        self.override_dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.md", id.as_str())).exists())
            .unwrap_or(false)
    }

    /// Clear the cache (useful after editing override files)
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for PromptLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// Default prompt override directory
pub fn default_prompts_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("plansphere").join("prompts").join("overrides"))
}

/// Parse a prompt file into frontmatter metadata and body
fn parse_prompt(content: &str) -> Result<(PromptMetadata, String)> {
    let content = content.trim();

    if !content.starts_with("---") {
        return Err(Error::InvalidData(
            "Prompt must start with YAML frontmatter (---)".into(),
        ));
    }

    let rest = &content[3..];
    let end = rest.find("---").ok_or_else(|| {
        Error::InvalidData("Prompt frontmatter not closed (missing second ---)".into())
    })?;

    let frontmatter = rest[..end].trim();
    let body = rest[end + 3..].trim();

    let metadata: PromptMetadata = serde_yaml::from_str(frontmatter)
        .map_err(|e| Error::InvalidData(format!("Invalid prompt frontmatter: {}", e)))?;

    Ok((metadata, body.to_string()))
}

/// Resolve `{{#if var}}...{{/if}}` blocks: keep the body when the variable is
/// present and non-empty, drop the whole block otherwise.
fn resolve_conditionals(content: &str, vars: &HashMap<&str, &str>) -> String {
    let mut result = content.to_string();

    loop {
        let Some(if_start) = result.find("{{#if ") else {
            break;
        };
        let var_start = if_start + 6;
        let Some(var_len) = result[var_start..].find("}}") else {
            break;
        };
        let var_name = result[var_start..var_start + var_len].to_string();
        let block_start = var_start + var_len + 2;
        let Some(endif_pos) = result[block_start..].find("{{/if}}") else {
            break;
        };
        let block = result[block_start..block_start + endif_pos].to_string();
        let full_end = block_start + endif_pos + 7;

        let keep = vars.get(var_name.as_str()).is_some_and(|v| !v.is_empty());
        let replacement = if keep { block } else { String::new() };
        result = format!("{}{}{}", &result[..if_start], replacement, &result[full_end..]);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prompt() {
        let content = r#"---
id: test_prompt
version: 3
---

Plan a trip to {{destination}}.
"#;
        let (metadata, body) = parse_prompt(content).unwrap();
        assert_eq!(metadata.id, "test_prompt");
        assert_eq!(metadata.version, 3);
        assert!(body.contains("{{destination}}"));
    }

    #[test]
    fn test_render_substitutes_vars() {
        let (metadata, body) = parse_prompt("---\nid: t\nversion: 1\n---\nGo to {{place}} for {{days}} days.").unwrap();
        let prompt = Prompt {
            metadata,
            content: body,
            is_override: false,
        };
        let mut vars = HashMap::new();
        vars.insert("place", "Lisbon");
        vars.insert("days", "4");
        let rendered = prompt.render(&vars);
        assert!(rendered.contains("Go to Lisbon for 4 days."));
    }

    #[test]
    fn test_conditional_blocks() {
        let content = "Start{{#if history}}\nHistory: {{history}}{{/if}}\nEnd";

        let mut vars = HashMap::new();
        vars.insert("history", "User: hi");
        let kept = resolve_conditionals(content, &vars);
        assert!(kept.contains("History: {{history}}"));

        let empty: HashMap<&str, &str> = HashMap::new();
        let dropped = resolve_conditionals(content, &empty);
        assert!(!dropped.contains("History:"));
        assert!(dropped.contains("Start"));
        assert!(dropped.contains("End"));
    }

    #[test]
    fn test_all_embedded_prompts_parse() {
        let mut lib = PromptLibrary::embedded_only();
        for id in PromptId::all() {
            let prompt = lib.get(*id).unwrap();
            assert!(!prompt.is_override);
            assert_eq!(prompt.metadata.id, id.as_str(), "id mismatch for {}", id.as_str());
        }
    }

    #[test]
    fn test_override_resolution() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("convert_currency.md"),
            "---\nid: convert_currency\nversion: 9\n---\nCustom: {{amount}} {{from}} {{to}}",
        )
        .unwrap();

        let mut lib = PromptLibrary::with_override_dir(dir.path().to_path_buf());
        assert!(lib.has_override(PromptId::ConvertCurrency));
        let prompt = lib.get(PromptId::ConvertCurrency).unwrap();
        assert!(prompt.is_override);
        assert_eq!(prompt.metadata.version, 9);
    }
}
