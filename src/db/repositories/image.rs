use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::db::error::{StoreError, StoreResult};
use crate::entities::{images, prelude::*};

#[derive(Debug, Clone)]
pub struct NewImage {
    pub post_id: i64,
    pub filename: String,
    pub file_path: String,
}

pub struct ImageRepository {
    conn: DatabaseConnection,
}

impl ImageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new: NewImage) -> StoreResult<images::Model> {
        let active = images::ActiveModel {
            post_id: Set(new.post_id),
            filename: Set(new.filename),
            file_path: Set(new.file_path),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .map_err(StoreError::persistence("insert image"))
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<images::Model> {
        Images::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(StoreError::persistence("load image"))?
            .ok_or_else(|| StoreError::not_found("image", id))
    }

    /// Images for one post in insertion order (ascending id).
    pub async fn list_for_post(&self, post_id: i64) -> StoreResult<Vec<images::Model>> {
        Images::find()
            .filter(images::Column::PostId.eq(post_id))
            .order_by_asc(images::Column::Id)
            .all(&self.conn)
            .await
            .map_err(StoreError::persistence("list images"))
    }

    pub async fn update(&self, image: &images::Model) -> StoreResult<()> {
        let result = Images::update_many()
            .col_expr(images::Column::Filename, Expr::value(image.filename.clone()))
            .col_expr(
                images::Column::FilePath,
                Expr::value(image.file_path.clone()),
            )
            .filter(images::Column::Id.eq(image.id))
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("update image"))?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("image", image.id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        Images::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("delete image"))?;

        Ok(())
    }
}
