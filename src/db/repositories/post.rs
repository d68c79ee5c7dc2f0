use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::error::{StoreError, StoreResult};
use crate::entities::{posts, prelude::*};

/// Caller-supplied fields for a new post. Identity and timestamps are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

pub struct PostRepository {
    conn: DatabaseConnection,
}

impl PostRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Persists a new post and returns it with the store-assigned id
    /// and timestamps. Field contents are not validated here.
    pub async fn create(&self, new: NewPost) -> StoreResult<posts::Model> {
        let active = posts::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .map_err(StoreError::persistence("insert post"))
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<posts::Model> {
        Posts::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(StoreError::persistence("load post"))?
            .ok_or_else(|| StoreError::not_found("post", id))
    }

    /// All posts, newest first. Creation timestamps have one-second
    /// resolution, so the id tiebreaks rows created within the same
    /// second.
    pub async fn list_all(&self) -> StoreResult<Vec<posts::Model>> {
        Posts::find()
            .order_by_desc(posts::Column::CreatedAt)
            .order_by_desc(posts::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::persistence("list posts"))
    }

    /// Overwrites title and content of the matching row and refreshes
    /// `updated_at` to the current time.
    pub async fn update(&self, post: &posts::Model) -> StoreResult<()> {
        let result = Posts::update_many()
            .col_expr(posts::Column::Title, Expr::value(post.title.clone()))
            .col_expr(posts::Column::Content, Expr::value(post.content.clone()))
            .col_expr(
                posts::Column::UpdatedAt,
                Expr::current_timestamp().into(),
            )
            .filter(posts::Column::Id.eq(post.id))
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("update post"))?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("post", post.id));
        }

        Ok(())
    }

    /// Idempotent: deleting an id that matches no row is not an error.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        Posts::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("delete post"))?;

        Ok(())
    }
}
