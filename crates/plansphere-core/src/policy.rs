//! Per-operation failure policies
//!
//! Primary creation flows surface their errors so the caller can retry with
//! full context. Auxiliary conveniences degrade to a neutral default instead,
//! keeping the rest of the session usable.

use tracing::warn;

use crate::error::Error;

/// Every AI-backed operation, named for logging and policy lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PlanItinerary,
    AskAssistant,
    AnalyzePhoto,
    CategorizeExpense,
    ResolveDestination,
    ConvertCurrency,
    SocialContent,
    TourGuides,
    CommunityPosts,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::PlanItinerary => "plan_itinerary",
            Operation::AskAssistant => "ask_assistant",
            Operation::AnalyzePhoto => "analyze_photo",
            Operation::CategorizeExpense => "categorize_expense",
            Operation::ResolveDestination => "resolve_destination",
            Operation::ConvertCurrency => "convert_currency",
            Operation::SocialContent => "social_content",
            Operation::TourGuides => "tour_guides",
            Operation::CommunityPosts => "community_posts",
        }
    }

    /// The failure policy applied to this operation
    pub fn policy(&self) -> FailurePolicy {
        match self {
            Operation::PlanItinerary | Operation::SocialContent | Operation::AnalyzePhoto => {
                FailurePolicy::Propagate
            }
            _ => FailurePolicy::Degrade,
        }
    }
}

/// What happens when an AI-backed operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Return the error to the caller
    Propagate,
    /// Log the error and substitute a neutral default
    Degrade,
}

/// Apply a degrade policy: unwrap the result or fall back to `default`,
/// logging the swallowed error against the operation name.
pub(crate) fn degrade_with<T>(
    operation: Operation,
    result: crate::error::Result<T>,
    default: T,
) -> T {
    debug_assert_eq!(operation.policy(), FailurePolicy::Degrade);
    match result {
        Ok(value) => value,
        Err(error) => {
            log_degraded(operation, &error);
            default
        }
    }
}

fn log_degraded(operation: Operation, error: &Error) {
    warn!(
        operation = operation.as_str(),
        error = %error,
        "operation degraded to default"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_primary_flows_propagate() {
        assert_eq!(Operation::PlanItinerary.policy(), FailurePolicy::Propagate);
        assert_eq!(Operation::SocialContent.policy(), FailurePolicy::Propagate);
        assert_eq!(Operation::AnalyzePhoto.policy(), FailurePolicy::Propagate);
    }

    #[test]
    fn test_auxiliary_flows_degrade() {
        assert_eq!(Operation::AskAssistant.policy(), FailurePolicy::Degrade);
        assert_eq!(Operation::ConvertCurrency.policy(), FailurePolicy::Degrade);
        assert_eq!(Operation::CategorizeExpense.policy(), FailurePolicy::Degrade);
        assert_eq!(Operation::TourGuides.policy(), FailurePolicy::Degrade);
    }

    #[test]
    fn test_degrade_with_substitutes_default() {
        let value = degrade_with(
            Operation::ConvertCurrency,
            Err(Error::Request("down".into())),
            0.0,
        );
        assert_eq!(value, 0.0);

        let value = degrade_with(Operation::ConvertCurrency, Ok(99.5), 0.0);
        assert_eq!(value, 99.5);
    }
}
