use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::error::{StoreError, StoreResult};
use crate::entities::{comments, prelude::*};

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub commenter_name: String,
    pub content: String,
}

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// A dangling `post_id` is rejected by the schema's foreign key,
    /// not by this method.
    pub async fn create(&self, new: NewComment) -> StoreResult<comments::Model> {
        let active = comments::ActiveModel {
            post_id: Set(new.post_id),
            commenter_name: Set(new.commenter_name),
            content: Set(new.content),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .map_err(StoreError::persistence("insert comment"))
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<comments::Model> {
        Comments::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(StoreError::persistence("load comment"))?
            .ok_or_else(|| StoreError::not_found("comment", id))
    }

    /// Comments for one post in chronological order, id tiebreaking
    /// same-second rows.
    pub async fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<comments::Model>> {
        Comments::find()
            .filter(comments::Column::PostId.eq(post_id))
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::persistence("list comments"))
    }

    pub async fn update(&self, comment: &comments::Model) -> StoreResult<()> {
        let result = Comments::update_many()
            .col_expr(
                comments::Column::CommenterName,
                Expr::value(comment.commenter_name.clone()),
            )
            .col_expr(
                comments::Column::Content,
                Expr::value(comment.content.clone()),
            )
            .filter(comments::Column::Id.eq(comment.id))
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("update comment"))?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("comment", comment.id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        Comments::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("delete comment"))?;

        Ok(())
    }
}
