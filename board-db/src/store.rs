use crate::id::MalformedIdError;
use async_trait::async_trait;
use board_common::model::{
    Id, ModelValidationError,
    post::{Post, PostFields, PostMarker},
};
use std::fmt::Debug;
use thiserror::Error;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    MalformedId(#[from] MalformedIdError),
    #[error("An object in the database was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("A post document in the database had no ObjectId")]
    MissingId,
    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// One collection of posts.
///
/// Every method issues exactly one store operation. Methods taking an id reject a
/// malformed one with [`DbError::MalformedId`] before querying.
#[async_trait]
pub trait PostStore: Debug + Send + Sync {
    /// Inserts a new post and returns the id the store assigned to it.
    async fn create_post(&self, fields: &PostFields) -> Result<Id<PostMarker>>;

    /// All posts, in the store's natural order.
    async fn fetch_posts(&self) -> Result<Vec<Post>>;

    async fn fetch_post(&self, id: &Id<PostMarker>) -> Result<Option<Post>>;

    /// Overwrites the fields of an existing post and returns it as stored afterwards.
    /// `None` if no post has this id.
    async fn replace_post(
        &self,
        id: &Id<PostMarker>,
        fields: &PostFields,
    ) -> Result<Option<Post>>;

    /// Returns how many posts were removed, so either 0 or 1.
    async fn delete_post(&self, id: &Id<PostMarker>) -> Result<u64>;
}
