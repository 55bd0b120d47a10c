//! Profile and status commands

use anyhow::Result;
use plansphere_core::ai::TravelAi;
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::KeyValueStore;

pub fn cmd_profile_show<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    let profile = &session.profile;
    println!("Name:         {}", or_unset(&profile.name));
    println!("Email:        {}", or_unset(&profile.email));
    println!("Bio:          {}", or_unset(&profile.bio));
    println!("Home airport: {}", or_unset(&profile.home_airport));
    if profile.saved_trips.is_empty() {
        println!("Saved trips:  none");
    } else {
        println!("Saved trips:");
        for trip in &profile.saved_trips {
            println!("  - {} ({} days)", trip.title, trip.days.len());
        }
    }
    Ok(())
}

pub fn cmd_profile_edit<S: KeyValueStore>(
    session: &mut Session<S>,
    name: Option<&str>,
    email: Option<&str>,
    bio: Option<&str>,
    home_airport: Option<&str>,
) -> Result<()> {
    let mut profile = session.profile.clone();
    if let Some(name) = name {
        profile.name = name.to_string();
    }
    if let Some(email) = email {
        profile.email = email.to_string();
    }
    if let Some(bio) = bio {
        profile.bio = bio.to_string();
    }
    if let Some(airport) = home_airport {
        profile.home_airport = airport.to_string();
    }
    session.set_profile(profile)?;
    println!("Profile updated.");
    Ok(())
}

pub fn cmd_profile_save_trip<S: KeyValueStore>(session: &mut Session<S>) -> Result<()> {
    session.save_current_trip()?;
    println!(
        "Trip saved. {} trip(s) in the profile.",
        session.profile.saved_trips.len()
    );
    Ok(())
}

pub async fn cmd_status<S: KeyValueStore, A: TravelAi>(
    session: &Session<S>,
    concierge: &Concierge<A>,
) -> Result<()> {
    let healthy = concierge.health_check().await;
    println!(
        "Backend:   {} @ {} ({})",
        concierge.backend().model(),
        concierge.backend().host(),
        if healthy { "reachable" } else { "unreachable" }
    );
    println!("View:      {}", session.view.as_str());
    println!("Theme:     {}", session.theme.as_str());
    match &session.itinerary {
        Some(trip) => println!("Itinerary: {} ({} days)", trip.title, trip.days.len()),
        None => println!("Itinerary: none"),
    }
    println!(
        "Expenses:  {} recorded, {:.2} spent",
        session.expenses.len(),
        session.spent()
    );
    if session.budget > 0.0 {
        println!("Budget:    {:.2}", session.budget);
    }
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(unset)"
    } else {
        value
    }
}
