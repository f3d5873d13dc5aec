use crate::{
    id::from_object_id,
    store::{DbError, Result},
};
use board_common::model::{
    ModelValidationError,
    post::{Post, PostFields, PostTitle},
};
use mongodb::bson::{Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A post document as laid out in the collection.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub(crate) struct PostRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub content: String,
    pub author: String,
}

impl From<&PostFields> for PostRecord {
    fn from(value: &PostFields) -> Self {
        Self {
            id: None,
            title: value.title.get().to_owned(),
            content: value.content.clone(),
            author: value.author.clone(),
        }
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = DbError;

    fn try_from(value: PostRecord) -> Result<Self> {
        let id = value.id.ok_or(DbError::MissingId)?;

        Ok(Self {
            id: from_object_id(id),
            fields: PostFields {
                title: PostTitle::new(value.title).map_err(ModelValidationError::from)?,
                content: value.content,
                author: value.author,
            },
        })
    }
}

/// Converts listed records, leaving out the ones that are not valid posts so one bad
/// document does not fail the whole listing.
pub(crate) fn valid_posts(records: impl IntoIterator<Item = PostRecord>) -> Vec<Post> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id;
            Post::try_from(record)
                .inspect_err(|error| warn!(?id, %error, "Skipping invalid post document"))
                .ok()
        })
        .collect()
}

/// Update document overwriting every field of a post but its id.
pub(crate) fn set_fields(fields: &PostFields) -> Document {
    doc! {
        "$set": {
            "title": fields.title.get(),
            "content": fields.content.as_str(),
            "author": fields.author.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        record::{PostRecord, set_fields, valid_posts},
        store::DbError,
    };
    use board_common::model::post::{Post, PostFields, PostTitle};
    use mongodb::bson::{doc, oid::ObjectId};

    fn fields() -> PostFields {
        PostFields {
            title: PostTitle::new("T".to_owned()).unwrap(),
            content: "C".to_owned(),
            author: "A".to_owned(),
        }
    }

    #[test]
    fn new_records_leave_the_id_to_the_store() {
        let record = PostRecord::from(&fields());

        assert_eq!(record.id, None);
        assert_eq!(
            mongodb::bson::to_document(&record).unwrap(),
            doc! { "title": "T", "content": "C", "author": "A" }
        );
    }

    #[test]
    fn invalid_records_are_data_errors() {
        let without_id = PostRecord::from(&fields());
        assert!(matches!(
            Post::try_from(without_id),
            Err(DbError::MissingId)
        ));

        let empty_title = PostRecord {
            id: Some(ObjectId::new()),
            title: String::new(),
            content: "C".to_owned(),
            author: "A".to_owned(),
        };
        assert!(matches!(Post::try_from(empty_title), Err(DbError::Data(_))));
    }

    #[test]
    fn listing_skips_invalid_records() {
        let valid = PostRecord {
            id: Some(ObjectId::new()),
            ..PostRecord::from(&fields())
        };
        let empty_title = PostRecord {
            id: Some(ObjectId::new()),
            title: String::new(),
            ..PostRecord::from(&fields())
        };
        let without_id = PostRecord::from(&fields());

        let posts = valid_posts([empty_title, valid.clone(), without_id]);

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0], Post::try_from(valid).unwrap());
    }

    #[test]
    fn update_sets_all_fields() {
        assert_eq!(
            set_fields(&fields()),
            doc! { "$set": { "title": "T", "content": "C", "author": "A" } }
        );
    }
}
