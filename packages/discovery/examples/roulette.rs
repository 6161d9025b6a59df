//! Archive roulette - reference wiring of the discovery stack.
//!
//! Discovers a handful of random quality items from the Internet Archive
//! and prints them, the way a presentation layer would consume the
//! library: one session holding the engine, the store, and the current
//! filters.
//!
//! ```bash
//! RUST_LOG=discovery=debug cargo run --example roulette
//! ```

use discovery::{
    ArchiveSearcher, DiscoveryEngine, DiscoverySession, FilterCriteria, MediaType,
    MemoryProfileStore, ProfileStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = DiscoveryEngine::new(ArchiveSearcher::new());
    let session = DiscoverySession::new(engine, MemoryProfileStore::new()).await?;

    // Spin once across everything, then once more scoped to films
    for filters in [
        FilterCriteria::new(),
        FilterCriteria::new().with_media_type(MediaType::Movies),
    ] {
        session.set_filters(filters).await?;

        let item = session.next_item().await?;
        println!("── {} ──", item.title.as_deref().unwrap_or("Untitled"));
        println!("   identifier: {}", item.identifier);
        if let Some(date) = item.date.as_deref().or(item.year.as_deref()) {
            println!("   date:       {date}");
        }
        if let Some(collection) = item.collection.first() {
            println!("   collection: {collection}");
        }
        if let Some(description) = &item.description {
            let short: String = description.chars().take(160).collect();
            println!("   about:      {short}");
        }
        if let Some(thumbnail) = &item.thumbnail {
            println!("   thumbnail:  {thumbnail}");
        }
        println!();
    }

    let history = session.store().history().await?;
    println!("{} item(s) in session history", history.len());

    Ok(())
}
