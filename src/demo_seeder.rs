use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::db::article_repository::ArticleRepository;
use crate::db::catalog_repository::CatalogRepository;
use crate::db::comment_repository::CommentRepository;
use crate::db::models::{Article, Comment, Formation, SectionInfo};
use crate::error::AppError;

// Demo content is embedded directly into the binary.
const ARTICLES_YAML: &str = include_str!("../demo_data/articles.yaml");
const COMMENTS_YAML: &str = include_str!("../demo_data/comments.yaml");
const SECTION_YAML: &str = include_str!("../demo_data/section.yaml");
const FORMATIONS_YAML: &str = include_str!("../demo_data/formations.yaml");

/// An article as written in the seed file. Counters other than `likes`
/// and the bookkeeping timestamps are filled in at load time.
#[derive(Debug, Deserialize)]
struct SeedArticle {
    id: String,
    title: String,
    excerpt: String,
    content: String,
    author: String,
    published_at: DateTime<Utc>,
    category: String,
    tags: Vec<String>,
    read_time: String,
    #[serde(default)]
    likes: i64,
}

/// The full demonstration data set, ready to insert.
#[derive(Debug, Clone)]
pub struct DemoData {
    pub articles: Vec<Article>,
    pub comments: Vec<Comment>,
    pub section_info: SectionInfo,
    pub formations: Vec<Formation>,
}

/// What a seeding run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held articles; nothing was written.
    Skipped { existing_articles: u64 },
    Seeded {
        articles: usize,
        comments: usize,
        formations: usize,
    },
}

fn parse<T: serde::de::DeserializeOwned>(name: &str, source: &str) -> Result<T, AppError> {
    serde_yaml::from_str(source)
        .map_err(|e| AppError::Internal(format!("Invalid demo data in {name}: {e}")))
}

/// Parse the embedded seed files.
pub fn load_demo_data(now: DateTime<Utc>) -> Result<DemoData, AppError> {
    let articles: Vec<SeedArticle> = parse("articles.yaml", ARTICLES_YAML)?;
    let comments: Vec<Comment> = parse("comments.yaml", COMMENTS_YAML)?;
    let section_info: SectionInfo = parse("section.yaml", SECTION_YAML)?;
    let formations: Vec<Formation> = parse("formations.yaml", FORMATIONS_YAML)?;

    assemble(articles, comments, section_info, formations, now)
}

/// Check cross references and derive each article's `comment_count` from
/// the seeded comments.
fn assemble(
    articles: Vec<SeedArticle>,
    comments: Vec<Comment>,
    section_info: SectionInfo,
    formations: Vec<Formation>,
    now: DateTime<Utc>,
) -> Result<DemoData, AppError> {
    let mut counts: HashMap<&str, i64> =
        articles.iter().map(|a| (a.id.as_str(), 0)).collect();

    for comment in &comments {
        match counts.get_mut(comment.article_id.as_str()) {
            Some(count) => *count += 1,
            None => {
                return Err(AppError::Internal(format!(
                    "Demo comment '{}' references unknown article '{}'",
                    comment.id, comment.article_id
                )))
            }
        }
    }

    let counts: HashMap<String, i64> = counts
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect();

    let articles = articles
        .into_iter()
        .map(|seed| Article {
            comment_count: counts.get(&seed.id).copied().unwrap_or(0),
            id: seed.id,
            title: seed.title,
            excerpt: seed.excerpt,
            content: seed.content,
            author: seed.author,
            published_at: seed.published_at,
            category: seed.category,
            tags: seed.tags,
            read_time: seed.read_time,
            likes: seed.likes,
            created_at: now,
            updated_at: now,
        })
        .collect();

    let formations = formations
        .into_iter()
        .map(|f| Formation {
            level: f.level.to_uppercase(),
            ..f
        })
        .collect();

    Ok(DemoData {
        articles,
        comments,
        section_info,
        formations,
    })
}

/// Populate an empty store with the demonstration content.
///
/// Does nothing when any article already exists. The first failing insert
/// aborts the run and is returned; earlier inserts are not rolled back.
pub async fn seed_demo_data(
    articles: &dyn ArticleRepository,
    comments: &dyn CommentRepository,
    catalog: &dyn CatalogRepository,
) -> Result<SeedOutcome, AppError> {
    let existing_articles = articles.count_all().await?;
    if existing_articles > 0 {
        tracing::info!(
            "Store already holds {} articles, skipping demo data seeding.",
            existing_articles
        );
        return Ok(SeedOutcome::Skipped { existing_articles });
    }

    tracing::info!("Starting demo data seeding...");
    let data = load_demo_data(Utc::now())?;

    articles.insert_many(&data.articles).await?;
    tracing::info!("Inserted {} demo articles.", data.articles.len());

    comments.insert_many(&data.comments).await?;
    tracing::info!("Inserted {} demo comments.", data.comments.len());

    catalog.insert_section_info(&data.section_info).await?;
    catalog.insert_formations(&data.formations).await?;
    tracing::info!(
        "Inserted section info and {} formations.",
        data.formations.len()
    );

    tracing::info!("Demo data seeding completed.");
    Ok(SeedOutcome::Seeded {
        articles: data.articles.len(),
        comments: data.comments.len(),
        formations: data.formations.len(),
    })
}
