//! Itinerary planning and management commands

use anyhow::{anyhow, bail, Result};
use plansphere_core::ai::TravelAi;
use plansphere_core::models::{Budget, Language, Travelers, TripPreferences};
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::KeyValueStore;

#[allow(clippy::too_many_arguments)]
pub async fn cmd_plan<S: KeyValueStore, A: TravelAi>(
    session: &mut Session<S>,
    concierge: &Concierge<A>,
    destination: &str,
    duration: u32,
    start_date: Option<&str>,
    budget: &str,
    travelers: &str,
    language: &str,
    interests: Vec<String>,
    resolve: bool,
) -> Result<()> {
    if duration == 0 {
        bail!("duration must be at least 1 day");
    }

    let budget: Budget = budget.parse().map_err(|e: String| anyhow!(e))?;
    let travelers: Travelers = travelers.parse().map_err(|e: String| anyhow!(e))?;
    let language: Language = language.parse().map_err(|e: String| anyhow!(e))?;

    let destination = if resolve {
        let resolved = concierge.resolve_destination(destination).await;
        println!("Resolved destination: {}", resolved.name);
        if let Some(url) = resolved.url {
            println!("  {}", url);
        }
        resolved.name
    } else {
        destination.to_string()
    };

    let prefs = TripPreferences {
        destination,
        start_date: start_date.unwrap_or_default().to_string(),
        duration,
        budget,
        travelers,
        interests,
        language,
    };

    println!(
        "Planning {} days in {}...",
        prefs.duration, prefs.destination
    );
    let itinerary = concierge.plan_trip(&prefs).await?;
    print_itinerary(&itinerary);
    session.set_itinerary(itinerary)?;
    println!("\nItinerary saved to the session.");
    Ok(())
}

pub fn cmd_itinerary_show<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    match &session.itinerary {
        Some(itinerary) => {
            print_itinerary(itinerary);
            Ok(())
        }
        None => bail!("no itinerary in the session; run `plansphere plan` first"),
    }
}

pub fn cmd_itinerary_rate<S: KeyValueStore>(session: &mut Session<S>, stars: u8) -> Result<()> {
    session.rate_itinerary(stars)?;
    println!("Rated the itinerary {} star(s).", stars);
    Ok(())
}

pub fn cmd_itinerary_clear<S: KeyValueStore>(session: &mut Session<S>) -> Result<()> {
    session.clear_itinerary()?;
    println!("Itinerary cleared.");
    Ok(())
}

fn print_itinerary(itinerary: &plansphere_core::models::Itinerary) {
    println!("\n=== {} ===", itinerary.title);
    println!("{}", itinerary.destination);
    println!("{}\n", itinerary.description);
    for day in &itinerary.days {
        match &day.date {
            Some(date) => println!("Day {} ({}) - {}", day.day, date, day.theme),
            None => println!("Day {} - {}", day.day, day.theme),
        }
        for activity in &day.activities {
            println!(
                "  {:<22} {} [{}] (${:.2})",
                activity.time,
                activity.activity,
                activity.activity_type.as_str(),
                activity.estimated_cost
            );
            if !activity.description.is_empty() {
                println!("      {}", activity.description);
            }
        }
        println!();
    }
    if !itinerary.travel_tips.is_empty() {
        println!("Tips:");
        for tip in &itinerary.travel_tips {
            println!("  - {}", tip);
        }
    }
    println!(
        "Estimated total: ${:.2} (local currency: {})",
        itinerary.total_estimated_cost, itinerary.currency
    );
    if let Some(rating) = itinerary.rating {
        println!("Your rating: {}/5", rating);
    }
}
