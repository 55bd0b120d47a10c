//! Auxiliary travel tools: currency, destination resolution, guides,
//! community posts, social content and photo captions

use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use plansphere_core::ai::TravelAi;
use plansphere_core::models::{Audience, EmojiStyle, Photo, Tone, UserVoiceProfile};
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::KeyValueStore;

use super::truncate;

pub async fn cmd_convert<A: TravelAi>(
    concierge: &Concierge<A>,
    amount: f64,
    from: &str,
    to: &str,
) -> Result<()> {
    let converted = concierge.convert_currency(amount, from, to).await;
    if converted == 0.0 {
        println!("Conversion unavailable right now.");
    } else {
        println!("{:.2} {} = {:.2} {}", amount, from, converted, to);
    }
    Ok(())
}

pub async fn cmd_resolve<A: TravelAi>(concierge: &Concierge<A>, query: &str) -> Result<()> {
    let resolved = concierge.resolve_destination(query).await;
    println!("{}", resolved.name);
    if let Some(url) = resolved.url {
        println!("{}", url);
    }
    Ok(())
}

pub async fn cmd_guides<A: TravelAi>(concierge: &Concierge<A>, location: &str) -> Result<()> {
    let guides = concierge.find_guides(location).await;
    if guides.is_empty() {
        println!("No guides available for {}.", location);
        return Ok(());
    }
    for guide in &guides {
        println!(
            "{:<20} {:.1}* ${:.0}/hr  {}  [{}]",
            guide.name,
            guide.rating,
            guide.rate_per_hour,
            guide.specialty,
            guide.languages.join(", ")
        );
    }
    Ok(())
}

pub async fn cmd_posts<A: TravelAi>(concierge: &Concierge<A>, topic: &str) -> Result<()> {
    let posts = concierge.community_feed(topic).await;
    if posts.is_empty() {
        println!("No posts about {}.", topic);
        return Ok(());
    }
    for post in &posts {
        println!(
            "@{} ({}) [{} likes]\n  {}\n",
            post.user,
            post.location,
            post.likes,
            truncate(&post.content, 100)
        );
    }
    Ok(())
}

pub async fn cmd_social<S: KeyValueStore, A: TravelAi>(
    session: &Session<S>,
    concierge: &Concierge<A>,
    photos_file: Option<&Path>,
    tone: &str,
    audience: &str,
    emoji_style: &str,
    hashtags: u8,
) -> Result<()> {
    let Some(trip) = &session.itinerary else {
        bail!("no itinerary in the session; run `plansphere plan` first");
    };

    let photos: Vec<Photo> = match photos_file {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("invalid photo set in {}", path.display()))?
        }
        None => Vec::new(),
    };

    let voice = UserVoiceProfile {
        tone: tone.parse::<Tone>().map_err(|e| anyhow!(e))?,
        audience: audience.parse::<Audience>().map_err(|e| anyhow!(e))?,
        emoji_style: emoji_style.parse::<EmojiStyle>().map_err(|e| anyhow!(e))?,
        hashtag_count: hashtags,
    };

    println!("Generating social content for \"{}\"...", trip.title);
    let content = concierge.create_social_content(trip, &photos, &voice).await?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(())
}

pub async fn cmd_caption<A: TravelAi>(
    concierge: &Concierge<A>,
    image: &Path,
    context: &str,
) -> Result<()> {
    let bytes =
        fs::read(image).with_context(|| format!("failed to read {}", image.display()))?;
    let insights = concierge.analyze_photo(&bytes, context).await?;
    println!("{}", insights.caption);
    if !insights.location.is_empty() {
        println!("Location: {}", insights.location);
    }
    if !insights.hashtags.is_empty() {
        println!("{}", insights.hashtags.join(" "));
    }
    Ok(())
}
