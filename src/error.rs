use crate::queries::error::QueryError;
use crate::store::error::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
