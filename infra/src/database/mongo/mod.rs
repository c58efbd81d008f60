//! MongoDB implementations of the core repository traits.

mod expense_repository_impl;
mod mail_code_repository_impl;
mod used_token_repository_impl;
mod user_repository_impl;

pub use expense_repository_impl::MongoExpenseRepository;
pub use mail_code_repository_impl::MongoMailCodeRepository;
pub use used_token_repository_impl::MongoUsedRefreshTokenRepository;
pub use user_repository_impl::MongoUserRepository;

pub(crate) use expense_repository_impl::changes_document;
pub(crate) use used_token_repository_impl::expired_filter;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::InfrastructureError;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a failed insert hit a unique index
pub(crate) fn is_duplicate_key(err: &InfrastructureError) -> bool {
    match err {
        InfrastructureError::Database(e) => matches!(
            e.kind.as_ref(),
            ErrorKind::Write(WriteFailure::WriteError(write)) if write.code == DUPLICATE_KEY_CODE
        ),
        _ => false,
    }
}
