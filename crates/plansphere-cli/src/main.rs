//! PlanSphere CLI - AI travel planner
//!
//! Usage:
//!   plansphere plan "Tokyo, Japan" -d 5 -i Food -i History
//!   plansphere chat "best month for cherry blossoms?"
//!   plansphere expense add "dinner at the market" 42.5 --auto
//!   plansphere convert 100 USD JPY
//!
//! Backend selection via `PLANSPHERE_BACKEND` (gemini default, mock).

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use plansphere_core::ai::AiClient;
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::FileStore;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let store = match &cli.store {
        Some(path) => FileStore::open(path.clone())?,
        None => FileStore::open_default()?,
    };
    let mut session = Session::load(store);

    match cli.command {
        Commands::Plan {
            destination,
            duration,
            start_date,
            budget,
            travelers,
            language,
            interests,
            resolve,
        } => {
            let concierge = require_ai()?;
            commands::cmd_plan(
                &mut session,
                &concierge,
                &destination,
                duration,
                start_date.as_deref(),
                &budget,
                &travelers,
                &language,
                interests,
                resolve,
            )
            .await
        }
        Commands::Itinerary { action } => match action {
            None | Some(ItineraryAction::Show) => commands::cmd_itinerary_show(&session),
            Some(ItineraryAction::Rate { stars }) => {
                commands::cmd_itinerary_rate(&mut session, stars)
            }
            Some(ItineraryAction::Clear) => commands::cmd_itinerary_clear(&mut session),
        },
        Commands::Chat { message } => {
            let concierge = require_ai()?;
            commands::cmd_chat(&session, &concierge, &message).await
        }
        Commands::Expense { action } => match action {
            None | Some(ExpenseAction::List) => commands::cmd_expense_list(&session),
            Some(ExpenseAction::Add {
                description,
                amount,
                category,
                subcategory,
                auto,
            }) => {
                // the backend is only contacted for --auto categorization
                let concierge = if auto { Some(require_ai()?) } else { None };
                commands::cmd_expense_add(
                    &mut session,
                    concierge.as_ref(),
                    &description,
                    amount,
                    category.as_deref(),
                    subcategory.as_deref(),
                    auto,
                )
                .await
            }
            Some(ExpenseAction::Remove { id }) => commands::cmd_expense_remove(&mut session, &id),
            Some(ExpenseAction::Export { output }) => {
                commands::cmd_expense_export(&session, output.as_deref())
            }
            Some(ExpenseAction::Import { file }) => {
                commands::cmd_expense_import(&mut session, &file)
            }
        },
        Commands::Budget { amount } => commands::cmd_budget(&mut session, amount),
        Commands::Convert { amount, from, to } => {
            commands::cmd_convert(&require_ai()?, amount, &from, &to).await
        }
        Commands::Resolve { query } => commands::cmd_resolve(&require_ai()?, &query).await,
        Commands::Guides { location } => commands::cmd_guides(&require_ai()?, &location).await,
        Commands::Posts { topic } => commands::cmd_posts(&require_ai()?, &topic).await,
        Commands::Social {
            photos,
            tone,
            audience,
            emoji_style,
            hashtags,
        } => {
            let concierge = require_ai()?;
            commands::cmd_social(
                &session,
                &concierge,
                photos.as_deref(),
                &tone,
                &audience,
                &emoji_style,
                hashtags,
            )
            .await
        }
        Commands::Caption { image, context } => {
            commands::cmd_caption(&require_ai()?, &image, &context).await
        }
        Commands::Profile { action } => match action {
            None | Some(ProfileAction::Show) => commands::cmd_profile_show(&session),
            Some(ProfileAction::Edit {
                name,
                email,
                bio,
                home_airport,
            }) => commands::cmd_profile_edit(
                &mut session,
                name.as_deref(),
                email.as_deref(),
                bio.as_deref(),
                home_airport.as_deref(),
            ),
            Some(ProfileAction::SaveTrip) => commands::cmd_profile_save_trip(&mut session),
        },
        Commands::Status => commands::cmd_status(&session, &require_ai()?).await,
    }
}

/// Build the concierge from the environment; session-only commands never call this.
fn require_ai() -> Result<Concierge<AiClient>> {
    Ok(Concierge::new(AiClient::from_env()?))
}
