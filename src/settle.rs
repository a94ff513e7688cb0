//! Concurrent gather-settle primitive.
//!
//! One batch of independent reads runs to completion as a unit: every
//! future resolves to its own result, the batch itself never fails, and
//! results come back in the order the futures were given. This is the only
//! fan-out shape the inspector uses, for interface probes and field reads
//! alike.

use futures::future::{join_all, BoxFuture};

use crate::reader::FieldResult;

/// Run a fixed batch of reads concurrently and settle every one.
///
/// Results come back in input order; a failure in one slot never cancels
/// or masks the others.
pub async fn settle_all<T, const N: usize>(
    ops: [BoxFuture<'_, FieldResult<T>>; N],
) -> [FieldResult<T>; N] {
    let settled = join_all(ops).await;
    settled
        .try_into()
        .unwrap_or_else(|_| unreachable!("join_all preserves arity"))
}
