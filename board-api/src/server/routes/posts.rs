use crate::server::{
    Result, ServerError, ServerRouter,
    json::{Created, Json},
    routes::Message,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use board_common::model::{
    Id,
    post::{Post, PostFields, PostMarker},
};
use board_db::store::PostStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_get(get_post)
        .typed_put(update_post)
        .typed_delete(delete_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts", rejection(ServerError))]
struct PostsPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/api/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

async fn list_posts(
    PostsPath(): PostsPath,
    State(store): State<Arc<dyn PostStore>>,
) -> Result<Json<Vec<Post>>> {
    let posts = store.fetch_posts().await?;

    Ok(Json(posts))
}

async fn create_post(
    PostsPath(): PostsPath,
    State(store): State<Arc<dyn PostStore>>,
    Json(fields): Json<PostFields>,
) -> Result<Created<Post>> {
    let id = store.create_post(&fields).await?;
    debug!(%id, "Created post");

    Ok(Created(Post::new(id, fields)))
}

async fn get_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<dyn PostStore>>,
) -> Result<Json<Post>> {
    let post = store
        .fetch_post(&id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

async fn update_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<dyn PostStore>>,
    Json(fields): Json<PostFields>,
) -> Result<Json<Post>> {
    let post = store
        .replace_post(&id, &fields)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

async fn delete_post(
    PostPath { id }: PostPath,
    State(store): State<Arc<dyn PostStore>>,
) -> Result<Json<Message>> {
    if store.delete_post(&id).await? == 0 {
        return Err(ServerError::PostByIdNotFound(id));
    }

    Ok(Json(Message::new("Post deleted successfully")))
}
