use std::env;

use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use affiliate_studio::entities::sea_orm_active_enums::{Niche, StrategyCategory};
use affiliate_studio::store::niche_strategies::{NewStrategy, insert_if_missing};

const STRATEGIES: &[NewStrategy] = &[
    NewStrategy {
        niche: Niche::Manifestation,
        title: "Overlooked frequency hook",
        category: StrategyCategory::Hook,
        description: "Open on a single overlooked detail that reframes why past efforts stalled, then promise a simple shift rather than a miracle.",
        examples: Some("Most people never notice the one habit that quietly blocks their progress."),
        tips: Some("Keep the first sentence under 15 words. Avoid income or outcome guarantees."),
        effectiveness: 9,
    },
    NewStrategy {
        niche: Niche::Manifestation,
        title: "Short-form video on faceless channels",
        category: StrategyCategory::TrafficSource,
        description: "Faceless 30 to 60 second clips with calm narration over ambient visuals perform well on short-form platforms.",
        examples: Some("Morning routine reframe, 'what nobody tells you about intention' series"),
        tips: Some("Post daily for two weeks before judging reach. Pin the tracked link in the profile."),
        effectiveness: 8,
    },
    NewStrategy {
        niche: Niche::Manifestation,
        title: "Self-reflective seekers",
        category: StrategyCategory::AudienceProfile,
        description: "Adults 30 to 55 who already journal or meditate and are looking for a structured routine to stay consistent.",
        examples: None,
        tips: Some("Speak to consistency and clarity, not wealth."),
        effectiveness: 7,
    },
    NewStrategy {
        niche: Niche::Woodworking,
        title: "Finished-project reveal",
        category: StrategyCategory::Hook,
        description: "Lead with the finished piece, then rewind to show it came from a plan a beginner could follow.",
        examples: Some("This bench took one weekend and a plan I almost didn't buy."),
        tips: Some("Show real tools. Viewers distrust polished studio shots."),
        effectiveness: 9,
    },
    NewStrategy {
        niche: Niche::Woodworking,
        title: "Save money on furniture",
        category: StrategyCategory::MarketingAngle,
        description: "Position plans as a way to build sturdy furniture for a fraction of retail cost.",
        examples: Some("Compare a store price tag against lumber cost for the same piece."),
        tips: Some("Use realistic material costs for the viewer's region."),
        effectiveness: 8,
    },
    NewStrategy {
        niche: Niche::Woodworking,
        title: "Step-by-step build walkthroughs",
        category: StrategyCategory::ContentType,
        description: "Long-form build videos and blog posts that follow one plan from cut list to finish.",
        examples: None,
        tips: Some("Link the plan at the cut list stage where intent is highest."),
        effectiveness: 7,
    },
    NewStrategy {
        niche: Niche::Prepping,
        title: "Grid-down scenario question",
        category: StrategyCategory::Hook,
        description: "Ask the viewer what they would do in the first 72 hours without power, then introduce a checklist.",
        examples: Some("If the power went out tonight, how long would your food last?"),
        tips: Some("Stay practical. Fear-heavy copy gets flagged by ad networks."),
        effectiveness: 9,
    },
    NewStrategy {
        niche: Niche::Prepping,
        title: "Family protection",
        category: StrategyCategory::MarketingAngle,
        description: "Frame preparation as responsible care for family rather than as survivalism.",
        examples: Some("A weekend project that keeps your family comfortable through any outage."),
        tips: None,
        effectiveness: 8,
    },
    NewStrategy {
        niche: Niche::Prepping,
        title: "Search and forum traffic",
        category: StrategyCategory::TrafficSource,
        description: "Homesteading forums and search queries around outages and water storage convert well on educational landing pages.",
        examples: None,
        tips: Some("Match the landing page headline to the query wording."),
        effectiveness: 6,
    },
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,affiliate_studio=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let mut inserted = 0;
    for strategy in STRATEGIES {
        if insert_if_missing(&db, strategy).await? {
            tracing::debug!(niche = %strategy.niche, title = strategy.title, "Inserted strategy");
            inserted += 1;
        }
    }

    tracing::info!(
        "Seeded niche strategies: {} inserted, {} already present",
        inserted,
        STRATEGIES.len() - inserted
    );

    Ok(())
}
