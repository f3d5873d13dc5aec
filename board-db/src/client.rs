use crate::{
    id::{from_object_id, object_id},
    record::{PostRecord, set_fields, valid_posts},
    store::{DbError, PostStore, Result},
};
use async_trait::async_trait;
use board_common::model::{
    Id,
    post::{Post, PostFields, PostMarker},
};
use futures_util::TryStreamExt;
use mongodb::{Client, Collection, Database, bson::doc, options::ReturnDocument};
use tracing::debug;

/// [`PostStore`] backed by one MongoDB collection.
#[derive(Clone, Debug)]
pub struct DbClient {
    posts: Collection<PostRecord>,
}

impl DbClient {
    /// Creates the driver client. The driver connects lazily, so an unreachable server
    /// only surfaces on the first operation.
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self> {
        let client = Client::with_uri_str(uri).await?;

        Ok(Self::new(&client.database(database), collection))
    }

    #[must_use]
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            posts: database.collection(collection),
        }
    }
}

#[async_trait]
impl PostStore for DbClient {
    async fn create_post(&self, fields: &PostFields) -> Result<Id<PostMarker>> {
        let result = self.posts.insert_one(PostRecord::from(fields)).await?;
        let inserted_id = result.inserted_id.as_object_id().ok_or(DbError::MissingId)?;

        debug!(id = %inserted_id, "Inserted post");
        Ok(from_object_id(inserted_id))
    }

    async fn fetch_posts(&self) -> Result<Vec<Post>> {
        let records: Vec<PostRecord> = self.posts.find(doc! {}).await?.try_collect().await?;

        Ok(valid_posts(records))
    }

    async fn fetch_post(&self, id: &Id<PostMarker>) -> Result<Option<Post>> {
        let object_id = object_id(id)?;

        let record = self.posts.find_one(doc! { "_id": object_id }).await?;

        record.map(Post::try_from).transpose()
    }

    async fn replace_post(
        &self,
        id: &Id<PostMarker>,
        fields: &PostFields,
    ) -> Result<Option<Post>> {
        let object_id = object_id(id)?;

        let record = self
            .posts
            .find_one_and_update(doc! { "_id": object_id }, set_fields(fields))
            .return_document(ReturnDocument::After)
            .await?;

        record.map(Post::try_from).transpose()
    }

    async fn delete_post(&self, id: &Id<PostMarker>) -> Result<u64> {
        let object_id = object_id(id)?;

        let result = self.posts.delete_one(doc! { "_id": object_id }).await?;

        debug!(id = %object_id, deleted = result.deleted_count, "Deleted post");
        Ok(result.deleted_count)
    }
}
