//! Session state with write-through persistence
//!
//! The session hydrates from the store at startup and writes every mutation
//! back immediately. Hydration is tolerant: an unreadable entry is dropped
//! with a warning instead of failing the whole session.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{Expense, Itinerary, UserProfile};
use crate::store::{keys, KeyValueStore};

/// Top-level application views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppView {
    #[default]
    Home,
    Planning,
    Itinerary,
    Community,
    Expenses,
    Guides,
    Profile,
    SocialStudio,
}

impl AppView {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppView::Home => "HOME",
            AppView::Planning => "PLANNING",
            AppView::Itinerary => "ITINERARY",
            AppView::Community => "COMMUNITY",
            AppView::Expenses => "EXPENSES",
            AppView::Guides => "GUIDES",
            AppView::Profile => "PROFILE",
            AppView::SocialStudio => "SOCIAL_STUDIO",
        }
    }
}

impl FromStr for AppView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HOME" => Ok(AppView::Home),
            "PLANNING" => Ok(AppView::Planning),
            "ITINERARY" => Ok(AppView::Itinerary),
            "COMMUNITY" => Ok(AppView::Community),
            "EXPENSES" => Ok(AppView::Expenses),
            "GUIDES" => Ok(AppView::Guides),
            "PROFILE" => Ok(AppView::Profile),
            "SOCIAL_STUDIO" => Ok(AppView::SocialStudio),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Hydrated application session over a key-value store
pub struct Session<S: KeyValueStore> {
    store: S,
    pub view: AppView,
    pub theme: Theme,
    pub itinerary: Option<Itinerary>,
    pub expenses: Vec<Expense>,
    pub budget: f64,
    pub profile: UserProfile,
}

impl<S: KeyValueStore> Session<S> {
    /// Hydrate a session from the store, dropping unreadable entries.
    pub fn load(store: S) -> Self {
        let view = read_string(&store, keys::STATE)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let theme = read_string(&store, keys::THEME)
            .and_then(|s| s.parse().ok())
            .unwrap_or_default();
        let itinerary = read_entry(&store, keys::ITINERARY);
        let expenses = read_entry(&store, keys::EXPENSES).unwrap_or_default();
        let budget = read_entry(&store, keys::BUDGET).unwrap_or(0.0);
        let profile = read_entry(&store, keys::PROFILE).unwrap_or_default();

        Self {
            store,
            view,
            theme,
            itinerary,
            expenses,
            budget,
            profile,
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn set_view(&mut self, view: AppView) -> Result<()> {
        self.view = view;
        self.store.set(keys::STATE, Value::String(view.as_str().to_string()))
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.theme = theme;
        self.store.set(keys::THEME, Value::String(theme.as_str().to_string()))
    }

    pub fn set_itinerary(&mut self, itinerary: Itinerary) -> Result<()> {
        write_entry(&mut self.store, keys::ITINERARY, &itinerary)?;
        self.itinerary = Some(itinerary);
        Ok(())
    }

    pub fn clear_itinerary(&mut self) -> Result<()> {
        self.itinerary = None;
        self.store.remove(keys::ITINERARY)
    }

    /// Rate the current itinerary, 1 through 5 stars.
    pub fn rate_itinerary(&mut self, rating: u8) -> Result<()> {
        if !(1..=5).contains(&rating) {
            return Err(Error::InvalidData(format!(
                "rating must be 1-5, got {}",
                rating
            )));
        }
        let mut itinerary = self
            .itinerary
            .take()
            .ok_or_else(|| Error::InvalidData("no itinerary to rate".into()))?;
        itinerary.rating = Some(rating);
        self.set_itinerary(itinerary)
    }

    pub fn add_expense(&mut self, expense: Expense) -> Result<()> {
        self.expenses.push(expense);
        write_entry(&mut self.store, keys::EXPENSES, &self.expenses)
    }

    /// Remove an expense by id; unknown ids are a no-op.
    pub fn remove_expense(&mut self, id: &str) -> Result<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() != before {
            write_entry(&mut self.store, keys::EXPENSES, &self.expenses)?;
        }
        Ok(())
    }

    pub fn replace_expenses(&mut self, expenses: Vec<Expense>) -> Result<()> {
        self.expenses = expenses;
        write_entry(&mut self.store, keys::EXPENSES, &self.expenses)
    }

    pub fn set_budget(&mut self, budget: f64) -> Result<()> {
        if budget < 0.0 {
            return Err(Error::InvalidData("budget cannot be negative".into()));
        }
        self.budget = budget;
        write_entry(&mut self.store, keys::BUDGET, &self.budget)
    }

    pub fn set_profile(&mut self, profile: UserProfile) -> Result<()> {
        write_entry(&mut self.store, keys::PROFILE, &profile)?;
        self.profile = profile;
        Ok(())
    }

    /// Save the current itinerary into the profile's trip list.
    pub fn save_current_trip(&mut self) -> Result<()> {
        let itinerary = self
            .itinerary
            .clone()
            .ok_or_else(|| Error::InvalidData("no itinerary to save".into()))?;
        self.profile.saved_trips.push(itinerary);
        let profile = self.profile.clone();
        write_entry(&mut self.store, keys::PROFILE, &profile)
    }

    /// Total of recorded expenses.
    pub fn spent(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

fn read_string<S: KeyValueStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key)? {
        Value::String(s) => Some(s),
        other => {
            warn!(key, ?other, "expected string entry, ignoring");
            None
        }
    }
}

fn read_entry<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let value = store.get(key)?;
    match serde_json::from_value(value) {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!(key, error = %e, "unreadable store entry, ignoring");
            None
        }
    }
}

fn write_entry<S: KeyValueStore, T: Serialize>(store: &mut S, key: &str, value: &T) -> Result<()> {
    store.set(key, serde_json::to_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayPlan, Itinerary};
    use crate::store::MemoryStore;
    use serde_json::json;

    fn sample_itinerary() -> Itinerary {
        Itinerary {
            title: "Quiet Kyoto".to_string(),
            destination: "Kyoto, Japan".to_string(),
            description: "Temples at dawn".to_string(),
            total_estimated_cost: 800.0,
            currency: "JPY".to_string(),
            travel_tips: vec![],
            days: vec![DayPlan {
                day: 1,
                date: None,
                theme: "Arrival".to_string(),
                activities: vec![],
            }],
            rating: None,
        }
    }

    #[test]
    fn test_session_starts_with_defaults() {
        let session = Session::load(MemoryStore::new());
        assert_eq!(session.view, AppView::Home);
        assert_eq!(session.theme, Theme::Light);
        assert!(session.itinerary.is_none());
        assert_eq!(session.budget, 0.0);
    }

    #[test]
    fn test_mutations_write_through() {
        let mut session = Session::load(MemoryStore::new());
        session.set_view(AppView::Expenses).unwrap();
        session.set_theme(Theme::Dark).unwrap();
        session.set_itinerary(sample_itinerary()).unwrap();
        session.set_budget(2000.0).unwrap();
        session
            .add_expense(Expense::new("Food", "Restaurants", 12.0, "lunch"))
            .unwrap();

        let rehydrated = Session::load(session.into_store());
        assert_eq!(rehydrated.view, AppView::Expenses);
        assert_eq!(rehydrated.theme, Theme::Dark);
        assert_eq!(rehydrated.itinerary.as_ref().unwrap().title, "Quiet Kyoto");
        assert_eq!(rehydrated.budget, 2000.0);
        assert_eq!(rehydrated.expenses.len(), 1);
        assert_eq!(rehydrated.spent(), 12.0);
    }

    #[test]
    fn test_view_names_round_trip() {
        let views = [
            AppView::Home,
            AppView::Planning,
            AppView::Itinerary,
            AppView::Community,
            AppView::Expenses,
            AppView::Guides,
            AppView::Profile,
            AppView::SocialStudio,
        ];
        for view in views {
            assert_eq!(view.as_str().parse::<AppView>().unwrap(), view);
        }
        assert_eq!("PLANNING".parse::<AppView>().unwrap(), AppView::Planning);
        assert_eq!("COMMUNITY".parse::<AppView>().unwrap(), AppView::Community);
        assert_eq!("GUIDES".parse::<AppView>().unwrap(), AppView::Guides);
        assert!("PLANNER".parse::<AppView>().is_err());
    }

    #[test]
    fn test_clear_itinerary_removes_entry() {
        let mut session = Session::load(MemoryStore::new());
        session.set_itinerary(sample_itinerary()).unwrap();
        session.clear_itinerary().unwrap();

        let rehydrated = Session::load(session.into_store());
        assert!(rehydrated.itinerary.is_none());
    }

    #[test]
    fn test_rating_bounds() {
        let mut session = Session::load(MemoryStore::new());
        session.set_itinerary(sample_itinerary()).unwrap();

        assert!(session.rate_itinerary(0).is_err());
        assert!(session.rate_itinerary(6).is_err());
        session.rate_itinerary(5).unwrap();
        assert_eq!(session.itinerary.as_ref().unwrap().rating, Some(5));
    }

    #[test]
    fn test_remove_expense_by_id() {
        let mut session = Session::load(MemoryStore::new());
        let expense = Expense::new("Transport", "Taxi", 23.0, "airport");
        let id = expense.id.clone();
        session.add_expense(expense).unwrap();

        session.remove_expense("not-a-real-id").unwrap();
        assert_eq!(session.expenses.len(), 1);
        session.remove_expense(&id).unwrap();
        assert!(session.expenses.is_empty());
    }

    #[test]
    fn test_corrupt_entry_is_dropped() {
        let mut store = MemoryStore::new();
        store.set(keys::ITINERARY, json!({"days": "not-a-list"})).unwrap();
        store.set(keys::BUDGET, json!(350.0)).unwrap();

        let session = Session::load(store);
        assert!(session.itinerary.is_none());
        assert_eq!(session.budget, 350.0);
    }

    #[test]
    fn test_save_current_trip_appends_to_profile() {
        let mut session = Session::load(MemoryStore::new());
        assert!(session.save_current_trip().is_err());

        session.set_itinerary(sample_itinerary()).unwrap();
        session.save_current_trip().unwrap();

        let rehydrated = Session::load(session.into_store());
        assert_eq!(rehydrated.profile.saved_trips.len(), 1);
    }

    #[test]
    fn test_negative_budget_rejected() {
        let mut session = Session::load(MemoryStore::new());
        assert!(session.set_budget(-1.0).is_err());
    }
}
