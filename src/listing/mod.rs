//! Client-side lead list engine: incremental page accumulation, filtering
//! and selection on top of the record store.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub mod accumulator;
pub mod filter;
pub mod page;
pub mod selection;
pub mod session;
#[cfg(test)]
pub(crate) mod test_support;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("a page is already being loaded")]
    LoadInProgress,

    #[error("every record has been loaded")]
    NothingToLoad,

    #[error(transparent)]
    Store(#[from] RepositoryError),
}
