//! Request/response types shared by all AI backends

use std::fmt;

use serde_json::Value;

use crate::models::Source;

/// Grounding tools the remote provider may be asked to enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grounding {
    #[default]
    None,
    /// Live web search grounding (chat assistant)
    WebSearch,
    /// Maps grounding (destination resolution)
    Maps,
}

/// A typed binary attachment.
///
/// Image bytes never get inlined into the instruction text; base64 encoding
/// happens only at the transport edge.
#[derive(Clone)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageAttachment {
    pub fn jpeg(data: Vec<u8>) -> Self {
        Self {
            mime_type: "image/jpeg".to_string(),
            data,
        }
    }
}

impl fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// A fully built model request: instruction text plus generation options.
///
/// Produced by the pure builders in [`crate::ai::requests`]; the network call
/// is a separate concern owned by the backend.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Schema contract passed to the provider when it supports constrained output.
    pub schema: Option<Value>,
    pub image: Option<ImageAttachment>,
    pub temperature: Option<f32>,
    pub grounding: Grounding,
    /// Ask for a JSON body even without a schema contract (social content).
    pub json_response: bool,
}

/// Raw output of a generation call, before any contract validation.
#[derive(Debug, Clone, Default)]
pub struct GenerationResponse {
    pub text: String,
    /// Grounding citations, present only for search/maps-grounded calls.
    pub sources: Vec<Source>,
}
