use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::entities::{admins, comments, images, posts};

pub mod error;
pub mod migrator;
pub mod repositories;

pub use error::{StoreError, StoreResult};
pub use repositories::admin::{NewAdmin, hash_password};
pub use repositories::comment::NewComment;
pub use repositories::image::NewImage;
pub use repositories::post::NewPost;

/// Shared handle to the embedded database. Cloning shares the
/// underlying pool; every repository is constructed over the same
/// connection, and teardown belongs to whoever built the `Store`.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    /// Long-running path: opens the pool and applies any pending
    /// migrations without touching existing data.
    pub async fn connect(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = Self::open(db_url, max_connections, min_connections).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    /// One-shot bootstrap path: drops every table and re-applies the
    /// full migration set, yielding a clean store.
    pub async fn provision(db_url: &str) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let conn = Self::open(db_url, 5, 1).await?;

        migrator::Migrator::fresh(&conn).await?;

        info!("Database provisioned from scratch");

        Ok(Self { conn })
    }

    async fn open(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<DatabaseConnection> {
        // A pooled :memory: database would be one database per
        // connection; keep those on a single connection.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        Ok(Database::connect(opt).await?)
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn admin_repo(&self) -> repositories::admin::AdminRepository {
        repositories::admin::AdminRepository::new(self.conn.clone())
    }

    fn post_repo(&self) -> repositories::post::PostRepository {
        repositories::post::PostRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    fn image_repo(&self) -> repositories::image::ImageRepository {
        repositories::image::ImageRepository::new(self.conn.clone())
    }

    pub async fn create_admin(&self, new: NewAdmin) -> StoreResult<admins::Model> {
        self.admin_repo().create(new).await
    }

    pub async fn get_admin(&self, id: i64) -> StoreResult<admins::Model> {
        self.admin_repo().get_by_id(id).await
    }

    pub async fn get_admin_by_username(&self, username: &str) -> StoreResult<admins::Model> {
        self.admin_repo().get_by_username(username).await
    }

    pub async fn update_admin(&self, admin: &admins::Model) -> StoreResult<()> {
        self.admin_repo().update(admin).await
    }

    pub async fn delete_admin(&self, id: i64) -> StoreResult<()> {
        self.admin_repo().delete(id).await
    }

    pub async fn create_post(&self, new: NewPost) -> StoreResult<posts::Model> {
        self.post_repo().create(new).await
    }

    pub async fn get_post(&self, id: i64) -> StoreResult<posts::Model> {
        self.post_repo().get_by_id(id).await
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<posts::Model>> {
        self.post_repo().list_all().await
    }

    pub async fn update_post(&self, post: &posts::Model) -> StoreResult<()> {
        self.post_repo().update(post).await
    }

    pub async fn delete_post(&self, id: i64) -> StoreResult<()> {
        self.post_repo().delete(id).await
    }

    pub async fn create_comment(&self, new: NewComment) -> StoreResult<comments::Model> {
        self.comment_repo().create(new).await
    }

    pub async fn get_comment(&self, id: i64) -> StoreResult<comments::Model> {
        self.comment_repo().get_by_id(id).await
    }

    pub async fn list_comments_for_post(&self, post_id: i64) -> StoreResult<Vec<comments::Model>> {
        self.comment_repo().list_for_post(post_id).await
    }

    pub async fn update_comment(&self, comment: &comments::Model) -> StoreResult<()> {
        self.comment_repo().update(comment).await
    }

    pub async fn delete_comment(&self, id: i64) -> StoreResult<()> {
        self.comment_repo().delete(id).await
    }

    pub async fn create_image(&self, new: NewImage) -> StoreResult<images::Model> {
        self.image_repo().create(new).await
    }

    pub async fn get_image(&self, id: i64) -> StoreResult<images::Model> {
        self.image_repo().get_by_id(id).await
    }

    pub async fn list_images_for_post(&self, post_id: i64) -> StoreResult<Vec<images::Model>> {
        self.image_repo().list_for_post(post_id).await
    }

    pub async fn update_image(&self, image: &images::Model) -> StoreResult<()> {
        self.image_repo().update(image).await
    }

    pub async fn delete_image(&self, id: i64) -> StoreResult<()> {
        self.image_repo().delete(id).await
    }
}
