use thiserror::Error;

/// Reasons a cache operation was not honored.
///
/// `CapacityZero` and `BudgetExceeded` are ordinary rejections: the caller may retry.
/// `InternalInconsistency` means the recency list and the key index disagree, which is a
/// bug in link maintenance rather than a condition callers are expected to handle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Could not add element: cache capacity is 0")]
    CapacityZero,
    #[error("Maximum number of cache accesses reached ({max_accesses}); cache cleared")]
    BudgetExceeded { max_accesses: usize },
    #[error("Internal inconsistency: {detail}")]
    InternalInconsistency { detail: String },
}

impl CacheError {
    /// True for errors that signal structural corruption rather than a rejected call.
    pub fn is_internal(&self) -> bool {
        matches!(self, CacheError::InternalInconsistency { .. })
    }
}
