use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use surrealdb::sql::Thing;
use time::OffsetDateTime;
use tracing::{debug, instrument};

use crate::constants::BLOG_TABLE;
use crate::db::content_db::ContentDB;
use crate::errors::StoreError;
use crate::models::meta::{IdContainer, PatchPostArgs, SelectByIdArgs, SelectBySlugArgs};
use crate::models::post::{newest_first, MainImage, Post, PostPatch, PostSummary, Slug};
use crate::utils::{post_id_from_thing, post_thing};

/// Everything the gateway and the read endpoints need from the content store.
#[async_trait]
pub trait PostsStore: Send + Sync {
    /// Id of the post whose slug matches exactly, if any.
    async fn select_post_id_by_slug(&self, slug: &str) -> Result<Option<String>, StoreError>;

    async fn select_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError>;

    /// Ordered by `newest_first`.
    async fn select_posts(&self) -> Result<Vec<PostSummary>, StoreError>;

    async fn select_slugs(&self) -> Result<Vec<String>, StoreError>;

    /// Overwrites the provided top-level fields. `patch` must set at least one
    /// field; the gateway rejects empty updates before reaching the store.
    /// Fails with `NotFound` when the post no longer exists; never creates one.
    async fn patch_post(&self, post_id: &str, patch: PostPatch) -> Result<Post, StoreError>;

    /// Fails with `NotFound` when the post no longer exists.
    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError>;
}

// === surreal record shapes === //

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    id: Thing,
    #[serde(default)]
    title: String,
    slug: Slug,
    #[serde(default)]
    author: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    main_image: Option<MainImage>,
    #[serde(default)]
    content: Value,
    #[serde(default, with = "time::serde::rfc3339::option")]
    published_at: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    created_at: Option<OffsetDateTime>,
}

impl From<PostRecord> for Post {
    fn from(r: PostRecord) -> Self {
        Post {
            id: post_id_from_thing(&r.id),
            title: r.title,
            slug: r.slug,
            author: r.author,
            excerpt: r.excerpt,
            main_image: r.main_image,
            content: r.content,
            published_at: r.published_at,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostSummaryRecord {
    id: Thing,
    #[serde(default)]
    title: String,
    slug: Slug,
    #[serde(default)]
    author: String,
    #[serde(default)]
    excerpt: String,
    #[serde(default)]
    main_image: Option<MainImage>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    published_at: Option<OffsetDateTime>,
}

impl From<PostSummaryRecord> for PostSummary {
    fn from(r: PostSummaryRecord) -> Self {
        PostSummary {
            id: post_id_from_thing(&r.id),
            title: r.title,
            slug: r.slug,
            author: r.author,
            excerpt: r.excerpt,
            main_image: r.main_image,
            published_at: r.published_at,
        }
    }
}

/// `SET` assignments for the fields a patch provides. Each one replaces the
/// stored value wholesale; SET never merges into nested objects.
fn set_assignments(patch: &PostPatch) -> String {
    patch
        .field_names()
        .into_iter()
        .map(|f| format!("{f} = ${f}"))
        .collect::<Vec<String>>()
        .join(", ")
}

pub struct PostsRepo {
    reader: ContentDB,
    writer: ContentDB,
}

impl PostsRepo {
    pub fn new(db: ContentDB) -> Self {
        Self {
            reader: db.clone(),
            writer: db,
        }
    }
}

#[async_trait]
impl PostsStore for PostsRepo {
    #[instrument(skip(self))]
    async fn select_post_id_by_slug(&self, slug: &str) -> Result<Option<String>, StoreError> {
        let found = self
            .reader
            .query_single_with_args::<IdContainer, _>(
                &format!(
                    "SELECT id FROM {} WHERE slug.current = $slug LIMIT 1",
                    BLOG_TABLE
                ),
                SelectBySlugArgs {
                    slug: slug.to_string(),
                },
            )
            .await?;

        Ok(found.map(|c| post_id_from_thing(&c.id)))
    }

    #[instrument(skip(self))]
    async fn select_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        let record = self
            .reader
            .query_single_with_args::<PostRecord, _>(
                &format!(
                    "SELECT * FROM {} WHERE slug.current = $slug LIMIT 1",
                    BLOG_TABLE
                ),
                SelectBySlugArgs {
                    slug: slug.to_string(),
                },
            )
            .await?;

        Ok(record.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn select_posts(&self) -> Result<Vec<PostSummary>, StoreError> {
        let records = self
            .reader
            .query_many::<PostSummaryRecord>(&format!(
                r#"
                    SELECT
                        id, title, slug, author, excerpt, mainImage, publishedAt
                    FROM
                        {}
                "#,
                BLOG_TABLE
            ))
            .await?;

        let mut posts: Vec<PostSummary> = records.into_iter().map(PostSummary::from).collect();
        posts.sort_by(newest_first);

        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn select_slugs(&self) -> Result<Vec<String>, StoreError> {
        self.reader
            .query_many::<String>(&format!("SELECT VALUE slug.current FROM {}", BLOG_TABLE))
            .await
    }

    #[instrument(skip(self, patch), fields(fields = ?patch.field_names()))]
    async fn patch_post(&self, post_id: &str, patch: PostPatch) -> Result<Post, StoreError> {
        let id = post_thing(post_id)?;

        let assignments = set_assignments(&patch);

        let fields = match serde_json::to_value(&patch) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => serde_json::Map::new(),
            Err(e) => return Err(StoreError::Upstream(e.to_string())),
        };

        // scoping by WHERE keeps a vanished post from being recreated
        let updated = self
            .writer
            .query_many_with_args::<PostRecord, _>(
                &format!(
                    "UPDATE {} SET {} WHERE id = $id RETURN AFTER",
                    BLOG_TABLE, assignments
                ),
                PatchPostArgs { id, fields },
            )
            .await?;

        debug!("patched {} record(s)", updated.len());

        updated
            .into_iter()
            .next()
            .map(Post::from)
            .ok_or(StoreError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        let id = post_thing(post_id)?;

        let deleted = self
            .writer
            .query_many_with_args::<IdContainer, _>(
                &format!("DELETE {} WHERE id = $id RETURN BEFORE", BLOG_TABLE),
                SelectByIdArgs { id },
            )
            .await?;

        if deleted.is_empty() {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
