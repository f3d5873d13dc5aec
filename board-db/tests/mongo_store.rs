//! Runs against a live MongoDB. Start one and run with
//! `MONGODB_URI=mongodb://localhost:27017 cargo test -p board-db -- --ignored`.

use board_common::model::{
    Id,
    post::{PostFields, PostMarker, PostTitle},
};
use board_db::{
    client::DbClient,
    store::{DbError, PostStore},
};
use mongodb::bson::oid::ObjectId;

async fn connect() -> DbClient {
    let uri =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_owned());
    let collection = format!("posts_test_{}", ObjectId::new().to_hex());

    DbClient::connect(&uri, "board_test_db", &collection)
        .await
        .unwrap()
}

fn fields(title: &str) -> PostFields {
    PostFields {
        title: PostTitle::new(title.to_owned()).unwrap(),
        content: "C".to_owned(),
        author: "A".to_owned(),
    }
}

#[tokio::test]
#[ignore = "needs a running MongoDB"]
async fn post_lifecycle() {
    let store = connect().await;

    let id = store.create_post(&fields("T")).await.unwrap();
    let created = store.fetch_post(&id).await.unwrap().unwrap();
    assert_eq!(created.fields, fields("T"));

    let listed = store.fetch_posts().await.unwrap();
    assert!(listed.contains(&created));

    let replaced = store
        .replace_post(&id, &fields("T2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(replaced.id, id);
    assert_eq!(replaced.fields, fields("T2"));

    assert_eq!(store.delete_post(&id).await.unwrap(), 1);
    assert_eq!(store.delete_post(&id).await.unwrap(), 0);
    assert_eq!(store.fetch_post(&id).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "needs a running MongoDB"]
async fn malformed_and_unknown_ids() {
    let store = connect().await;
    let unknown: Id<PostMarker> = Id::new(ObjectId::new().to_hex());

    assert_eq!(store.fetch_post(&unknown).await.unwrap(), None);
    assert!(matches!(
        store.fetch_post(&Id::from("nope")).await,
        Err(DbError::MalformedId(_))
    ));
}
