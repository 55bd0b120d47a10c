//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands` module.
//!
//! Enum-valued options (budget, travelers, language, tone) are taken as
//! strings and parsed through the core `FromStr` impls so error messages stay
//! consistent with the rest of the stack.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// PlanSphere - AI travel planner
#[derive(Parser)]
#[command(name = "plansphere")]
#[command(about = "AI-powered travel planning from the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session store path (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an itinerary for a trip
    Plan {
        /// Destination, e.g. "Tokyo, Japan"
        destination: String,

        /// Trip length in days
        #[arg(short, long, default_value = "3")]
        duration: u32,

        /// Start date (YYYY-MM-DD); omit for "anytime"
        #[arg(long)]
        start_date: Option<String>,

        /// Budget level: low, medium, high
        #[arg(short, long, default_value = "medium")]
        budget: String,

        /// Travel party: solo, couple, family, friends, seniors
        #[arg(short, long, default_value = "couple")]
        travelers: String,

        /// Output language for itinerary content
        #[arg(short, long, default_value = "english")]
        language: String,

        /// Interests, repeatable (e.g. -i Food -i History)
        #[arg(short, long)]
        interests: Vec<String>,

        /// Resolve the destination to "City, Country" before planning
        #[arg(long)]
        resolve: bool,
    },

    /// Show or manage the current itinerary
    Itinerary {
        #[command(subcommand)]
        action: Option<ItineraryAction>,
    },

    /// Ask the travel assistant a question
    Chat {
        /// The question to ask
        message: String,
    },

    /// Manage trip expenses
    Expense {
        #[command(subcommand)]
        action: Option<ExpenseAction>,
    },

    /// Show or set the trip budget
    Budget {
        /// New budget amount; omit to show the current budget
        amount: Option<f64>,
    },

    /// Convert an amount between currencies
    Convert {
        amount: f64,
        /// Source currency code, e.g. USD
        from: String,
        /// Target currency code, e.g. JPY
        to: String,
    },

    /// Resolve a vague destination query to "City, Country"
    Resolve {
        query: String,
    },

    /// Find local tour guides for a location
    Guides {
        location: String,
    },

    /// Browse community posts about a topic
    Posts {
        topic: String,
    },

    /// Generate social media content for the current itinerary
    Social {
        /// JSON file describing the photo set
        #[arg(long)]
        photos: Option<PathBuf>,

        /// Writing tone: casual, professional, poetic, humorous, energetic
        #[arg(long, default_value = "casual")]
        tone: String,

        /// Audience: friends, travelers, professionals, family
        #[arg(long, default_value = "friends")]
        audience: String,

        /// Emoji density: none, minimal, heavy
        #[arg(long, default_value = "minimal")]
        emoji_style: String,

        /// Hashtags per post
        #[arg(long, default_value = "10")]
        hashtags: u8,
    },

    /// Analyze a photo for caption material
    Caption {
        /// Image file (JPEG)
        image: PathBuf,

        /// Context for the analysis, e.g. the trip destination
        #[arg(short, long, default_value = "")]
        context: String,
    },

    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        action: Option<ProfileAction>,
    },

    /// Show backend status and session summary
    Status,
}

#[derive(Subcommand)]
pub enum ItineraryAction {
    /// Print the current itinerary
    Show,
    /// Rate the current itinerary (1-5 stars)
    Rate { stars: u8 },
    /// Discard the current itinerary
    Clear,
}

#[derive(Subcommand)]
pub enum ExpenseAction {
    /// Record an expense
    Add {
        description: String,
        amount: f64,

        /// Category (defaults to AI suggestion with --auto, else Food)
        #[arg(short, long)]
        category: Option<String>,

        /// Subcategory
        #[arg(short, long)]
        subcategory: Option<String>,

        /// Ask the AI to categorize the expense
        #[arg(long)]
        auto: bool,
    },
    /// List recorded expenses
    List,
    /// Remove an expense by id
    Remove { id: String },
    /// Export expenses as CSV
    Export {
        /// Output file; omit to print to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import expenses from a CSV file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,
    /// Update profile fields
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        home_airport: Option<String>,
    },
    /// Save the current itinerary to the profile's trip list
    SaveTrip,
}
