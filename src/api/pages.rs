use askama::Template;
use axum::{
    extract::{Form, Path, State},
    response::{Html, Redirect},
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;

use super::{AppState, PageError};
use crate::db::NewComment;
use crate::entities::{comments, posts};

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    title: String,
    posts: Vec<posts::Model>,
    year: i32,
}

#[derive(Template)]
#[template(path = "post.html")]
struct PostTemplate {
    title: String,
    post: posts::Model,
    comments: Vec<comments::Model>,
    year: i32,
}

/// `GET /` — all posts, newest first.
pub async fn home(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let posts = state.store().list_posts().await?;

    let page = HomeTemplate {
        title: "Inkpot".to_string(),
        posts,
        year: Utc::now().year(),
    };

    Ok(Html(page.render()?))
}

/// `GET /post/{id}` — one post with its comments in chronological
/// order. 404 when the id does not resolve.
pub async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let post = state.store().get_post(id).await?;
    let comments = state.store().list_comments_for_post(id).await?;

    let page = PostTemplate {
        title: post.title.clone(),
        post,
        comments,
        year: Utc::now().year(),
    };

    Ok(Html(page.render()?))
}

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub post_id: i64,
    pub commenter_name: String,
    pub content: String,
}

/// `POST /comment` — accepts the comment form and redirects back to
/// the post page.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect, PageError> {
    if form.commenter_name.trim().is_empty() || form.content.trim().is_empty() {
        return Err(PageError::Validation(
            "Name and comment are required".to_string(),
        ));
    }

    // Resolve the post first so a stale id renders a 404 page instead
    // of tripping the foreign key.
    let post = state.store().get_post(form.post_id).await?;

    state
        .store()
        .create_comment(NewComment {
            post_id: post.id,
            commenter_name: form.commenter_name,
            content: form.content,
        })
        .await?;

    Ok(Redirect::to(&format!("/post/{}", post.id)))
}
