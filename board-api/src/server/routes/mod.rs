use crate::server::{ServerError, ServerRouter, json::Json};
use axum_extra::routing::{RouterExt, TypedPath};
use serde::{Deserialize, Serialize};

mod posts;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_get(greet).merge(posts::routes())
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct Message {
    message: &'static str,
}

impl Message {
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct RootPath();

async fn greet(RootPath(): RootPath) -> Json<Message> {
    Json(Message::new("Nice 2 meet U :)"))
}
