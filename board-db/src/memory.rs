use crate::{
    id::{from_object_id, object_id},
    store::{PostStore, Result},
};
use async_trait::async_trait;
use board_common::model::{
    Id,
    post::{Post, PostFields, PostMarker},
};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;
use tracing::debug;

/// [`PostStore`] living entirely in process memory.
///
/// Ids follow the same [`ObjectId`] scheme as [`crate::client::DbClient`], so the same
/// ids are malformed for both. Posts are listed in insertion order. Everything is lost
/// when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<Vec<(ObjectId, PostFields)>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create_post(&self, fields: &PostFields) -> Result<Id<PostMarker>> {
        let inserted_id = ObjectId::new();
        self.posts.write().await.push((inserted_id, fields.clone()));

        debug!(id = %inserted_id, "Inserted post");
        Ok(from_object_id(inserted_id))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let posts = self
            .posts
            .read()
            .await
            .iter()
            .map(|(id, fields)| Post::new(from_object_id(*id), fields.clone()))
            .collect();

        Ok(posts)
    }

    async fn fetch_post(&self, id: &Id<PostMarker>) -> Result<Option<Post>> {
        let object_id = object_id(id)?;

        let post = self
            .posts
            .read()
            .await
            .iter()
            .find(|(id, _)| *id == object_id)
            .map(|(id, fields)| Post::new(from_object_id(*id), fields.clone()));

        Ok(post)
    }

    async fn replace_post(
        &self,
        id: &Id<PostMarker>,
        fields: &PostFields,
    ) -> Result<Option<Post>> {
        let object_id = object_id(id)?;

        let mut posts = self.posts.write().await;
        let Some((_, stored)) = posts.iter_mut().find(|(id, _)| *id == object_id) else {
            return Ok(None);
        };
        stored.clone_from(fields);

        Ok(Some(Post::new(from_object_id(object_id), fields.clone())))
    }

    async fn delete_post(&self, id: &Id<PostMarker>) -> Result<u64> {
        let object_id = object_id(id)?;

        let mut posts = self.posts.write().await;
        let deleted = match posts.iter().position(|(id, _)| *id == object_id) {
            Some(index) => {
                posts.remove(index);
                1
            }
            None => 0,
        };

        debug!(id = %object_id, deleted, "Deleted post");
        Ok(deleted)
    }
}
