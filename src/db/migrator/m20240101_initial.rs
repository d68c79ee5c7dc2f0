use sea_orm_migration::prelude::*;

use crate::entities::prelude::*;
use crate::entities::{admins, comments, images, posts};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Tables are built by hand rather than from the entities: the
/// timestamp columns carry a `CURRENT_TIMESTAMP` default assigned by
/// the database, which the entity derive cannot express.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(admins::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(admins::Column::Username)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(admins::Column::PasswordHash).text().not_null())
                    .col(ColumnDef::new(admins::Column::DisplayName).text().not_null())
                    .col(
                        ColumnDef::new(admins::Column::CreatedAt)
                            .text()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(posts::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(posts::Column::Title).text().not_null())
                    .col(ColumnDef::new(posts::Column::Content).text().not_null())
                    .col(
                        ColumnDef::new(posts::Column::CreatedAt)
                            .text()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(posts::Column::UpdatedAt)
                            .text()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(comments::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(comments::Column::PostId).big_integer().not_null())
                    .col(
                        ColumnDef::new(comments::Column::CommenterName)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(comments::Column::Content).text().not_null())
                    .col(
                        ColumnDef::new(comments::Column::CreatedAt)
                            .text()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_post_id")
                            .from(Comments, comments::Column::PostId)
                            .to(Posts, posts::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Images)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(images::Column::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(images::Column::PostId).big_integer().not_null())
                    .col(ColumnDef::new(images::Column::Filename).text().not_null())
                    .col(ColumnDef::new(images::Column::FilePath).text().not_null())
                    .col(
                        ColumnDef::new(images::Column::CreatedAt)
                            .text()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_post_id")
                            .from(Images, images::Column::PostId)
                            .to(Posts, posts::Column::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Images).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins).to_owned())
            .await?;

        Ok(())
    }
}
