use sign_srs::*;

use database::SqliteStore;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEMO_USER: &str = "demo";

fn sample_items() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new("hello", "你好").with_category("greetings").with_level("初級"),
        CatalogItem::new("thank-you", "謝謝").with_category("greetings").with_level("初級"),
        CatalogItem::new("sorry", "對不起").with_category("greetings").with_level("中級"),
        CatalogItem::new("water", "水").with_category("daily life").with_level("初級"),
        CatalogItem::new("hospital", "醫院").with_category("places").with_level("高級"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::var("SIGN_SRS_CONFIG") {
        Ok(path) => AppConfig::load(path)?,
        Err(_) => AppConfig::default(),
    };
    let db_path = std::env::var("SIGN_SRS_DB").unwrap_or_else(|_| "sign_srs.sqlite3".to_string());
    let store = Arc::new(SqliteStore::open(&db_path)?);

    if store.item_count()? == 0 {
        for item in sample_items() {
            store.add_item(&item)?;
        }
        let scheduler = Scheduler::with_config(store.clone(), config.scheduler.clone());
        scheduler
            .record_review(DEMO_USER, "hello", Quality::from_answer(true))
            .await?;
        scheduler
            .record_review(DEMO_USER, "water", Quality::from_answer(false))
            .await?;

        let tracker = ProgressTracker::new(store.clone());
        let now = chrono::Utc::now();
        tracker
            .update_status(DEMO_USER, "hello", LearningStatus::Reviewing, now)
            .await?;
        tracker
            .update_status(DEMO_USER, "water", LearningStatus::Learning, now)
            .await?;
        tracker.set_favorite(DEMO_USER, "thank-you", true).await?;

        println!("Sample data created in {}", db_path);
    }

    let scheduler = Scheduler::with_config(store.clone(), config.scheduler);
    let due = scheduler.get_due_items_today(DEMO_USER).await;
    println!("{} items due today", due.len());
    for record in &due {
        println!(
            "  - {} (interval {}d, EF {:.2}, due {})",
            record.item_id,
            record.interval,
            record.easiness_factor,
            record.next_review_at.with_timezone(&chrono::Local).format("%Y-%m-%d")
        );
    }

    let aggregator = Aggregator::with_limits(store.clone(), store, config.recommendations);
    let stats = aggregator
        .compute_stats(DEMO_USER, &ItemFilters::default(), chrono::Local::now())
        .await;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
