use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::errors::StoreError;
use crate::models::post::{newest_first, Post, PostPatch, PostSummary};

use super::r_posts::PostsStore;

/// Process-local posts store keyed by post id.
///
/// Backs the `memory` store mode and the tests. Contents are lost on exit, so
/// the `memory` mode fills it from a seed file of posts at start.
#[derive(Default)]
pub struct MemoryPostsRepo {
    posts: RwLock<HashMap<String, Post>>,
}

impl MemoryPostsRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        Self {
            posts: RwLock::new(posts.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }

    pub fn insert_post(&self, post: Post) -> Result<(), StoreError> {
        let mut posts = self.write()?;
        posts.insert(post.id.clone(), post);
        Ok(())
    }

    /// Inserts every post of a JSON array, returning how many were loaded.
    pub fn seed_from_json(&self, raw: &str) -> Result<usize, StoreError> {
        let posts: Vec<Post> =
            serde_json::from_str(raw).map_err(|e| StoreError::InvalidSeed(e.to_string()))?;

        let count = posts.len();
        for post in posts {
            self.insert_post(post)?;
        }

        Ok(count)
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn seed_from_file(&self, path: impl AsRef<Path>) -> Result<usize, StoreError> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::InvalidSeed(format!("{}: {}", path.as_ref().display(), e))
        })?;

        let count = self.seed_from_json(&raw)?;
        info!("seeded {} posts", count);

        Ok(count)
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, Post>>, StoreError> {
        self.posts
            .read()
            .map_err(|e| StoreError::Upstream(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, Post>>, StoreError> {
        self.posts
            .write()
            .map_err(|e| StoreError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl PostsStore for MemoryPostsRepo {
    #[instrument(skip(self))]
    async fn select_post_id_by_slug(&self, slug: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read()?
            .values()
            .find(|p| p.slug.current == slug)
            .map(|p| p.id.clone()))
    }

    #[instrument(skip(self))]
    async fn select_post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        Ok(self
            .read()?
            .values()
            .find(|p| p.slug.current == slug)
            .cloned())
    }

    #[instrument(skip(self))]
    async fn select_posts(&self) -> Result<Vec<PostSummary>, StoreError> {
        Ok(self
            .read()?
            .values()
            .cloned()
            .map(PostSummary::from)
            .sorted_by(newest_first)
            .collect())
    }

    #[instrument(skip(self))]
    async fn select_slugs(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .read()?
            .values()
            .map(|p| p.slug.current.clone())
            .sorted()
            .collect())
    }

    #[instrument(skip(self, patch))]
    async fn patch_post(&self, post_id: &str, patch: PostPatch) -> Result<Post, StoreError> {
        let mut posts = self.write()?;
        let post = posts.get_mut(post_id).ok_or(StoreError::NotFound)?;

        debug!("patching fields {:?}", patch.field_names());
        patch.apply_to(post);

        Ok(post.clone())
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        match self.write()?.remove(post_id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
