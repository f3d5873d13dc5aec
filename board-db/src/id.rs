//! Conversion between wire ids and MongoDB [`ObjectId`]s.
//!
//! Nothing outside this crate ever sees an [`ObjectId`].

use board_common::model::Id;
use mongodb::bson::oid::{self, ObjectId};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Malformed id {id:?}: {source}")]
pub struct MalformedIdError {
    id: String,
    #[source]
    source: oid::Error,
}

impl MalformedIdError {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

pub fn object_id<Marker>(id: &Id<Marker>) -> Result<ObjectId, MalformedIdError> {
    ObjectId::parse_str(id.as_str()).map_err(|source| MalformedIdError {
        id: id.as_str().to_owned(),
        source,
    })
}

#[must_use]
pub fn from_object_id<Marker>(object_id: ObjectId) -> Id<Marker> {
    Id::new(object_id.to_hex())
}
