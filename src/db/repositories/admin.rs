use anyhow::Result;
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::db::error::{StoreError, StoreResult};
use crate::entities::{admins, prelude::*};

/// Caller-supplied fields for a new admin. The password must already
/// be hashed; see [`hash_password`].
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
}

pub struct AdminRepository {
    conn: DatabaseConnection,
}

impl AdminRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// A duplicate username is rejected by the schema's unique
    /// constraint and surfaces as a persistence error.
    pub async fn create(&self, new: NewAdmin) -> StoreResult<admins::Model> {
        let active = admins::ActiveModel {
            username: Set(new.username),
            password_hash: Set(new.password_hash),
            display_name: Set(new.display_name),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .map_err(StoreError::persistence("insert admin"))
    }

    pub async fn get_by_id(&self, id: i64) -> StoreResult<admins::Model> {
        Admins::find_by_id(id)
            .one(&self.conn)
            .await
            .map_err(StoreError::persistence("load admin"))?
            .ok_or_else(|| StoreError::not_found("admin", id))
    }

    /// Admins are looked up by name, not listed; this stands in for a
    /// collection accessor.
    pub async fn get_by_username(&self, username: &str) -> StoreResult<admins::Model> {
        Admins::find()
            .filter(admins::Column::Username.eq(username))
            .one(&self.conn)
            .await
            .map_err(StoreError::persistence("load admin by username"))?
            .ok_or_else(|| StoreError::NotFound {
                entity: "admin",
                key: username.to_string(),
            })
    }

    pub async fn update(&self, admin: &admins::Model) -> StoreResult<()> {
        let result = Admins::update_many()
            .col_expr(
                admins::Column::Username,
                Expr::value(admin.username.clone()),
            )
            .col_expr(
                admins::Column::PasswordHash,
                Expr::value(admin.password_hash.clone()),
            )
            .col_expr(
                admins::Column::DisplayName,
                Expr::value(admin.display_name.clone()),
            )
            .filter(admins::Column::Id.eq(admin.id))
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("update admin"))?;

        if result.rows_affected == 0 {
            return Err(StoreError::not_found("admin", admin.id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        Admins::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(StoreError::persistence("delete admin"))?;

        Ok(())
    }
}

/// Hash a password using Argon2id with default params.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}
