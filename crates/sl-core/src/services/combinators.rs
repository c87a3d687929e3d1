use std::future::Future;

use futures::future::{join_all, try_join_all};

use crate::error::Result;

/// Drive a batch of operations concurrently, aborting on the first failure.
///
/// The first error encountered is returned and the remaining operations are
/// dropped; on success every result is yielded in input order. Use for phases
/// that must fully succeed.
pub async fn join_all_or_abort<T, F>(futures: impl IntoIterator<Item = F>) -> Result<Vec<T>>
where
    F: Future<Output = Result<T>>,
{
    try_join_all(futures).await
}

/// Drive a batch of operations concurrently, collecting every outcome.
///
/// No individual failure aborts another operation; the call completes only
/// once all have settled, with outcomes in input order. Use for best-effort
/// phases.
pub async fn settle_all<T, F>(futures: impl IntoIterator<Item = F>) -> Vec<Result<T>>
where
    F: Future<Output = Result<T>>,
{
    join_all(futures).await
}
