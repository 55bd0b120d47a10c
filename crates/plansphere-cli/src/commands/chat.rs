//! Travel assistant chat command

use anyhow::Result;
use plansphere_core::ai::TravelAi;
use plansphere_core::models::ChatMessage;
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::KeyValueStore;

pub async fn cmd_chat<S: KeyValueStore, A: TravelAi>(
    session: &Session<S>,
    concierge: &Concierge<A>,
    message: &str,
) -> Result<()> {
    let context = match &session.itinerary {
        Some(itinerary) => itinerary.summary(),
        None => "No trip planned yet.".to_string(),
    };

    // one-shot chat: history lives only within an interactive session
    let history: Vec<ChatMessage> = Vec::new();
    let reply = concierge.ask(message, &context, &history).await;

    println!("{}", reply.text);
    if !reply.sources.is_empty() {
        println!("\nSources:");
        for source in &reply.sources {
            println!("  {} - {}", source.title, source.uri);
        }
    }
    Ok(())
}
