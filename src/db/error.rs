use sea_orm::DbErr;
use thiserror::Error;

/// Failure taxonomy for every repository operation: a point lookup
/// that matched no row, or an underlying store fault (connectivity,
/// constraint violation, malformed statement) tagged with the
/// operation that hit it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("{op} failed")]
    Persistence {
        op: &'static str,
        #[source]
        source: DbErr,
    },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            key: id.to_string(),
        }
    }

    pub(crate) fn persistence(op: &'static str) -> impl FnOnce(DbErr) -> Self {
        move |source| Self::Persistence { op, source }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
