//! Driver-wide handling of queries that match nothing.

use crate::matcher::Criteria;
use crate::node::NodeRef;
use crate::result::TocarResult;

/// What a driver does when a query matches nothing.
///
/// Fixed at driver construction and applied to every query, including the
/// query half of convenience mutators. A found element is returned the same
/// way under either policy; only absence differs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Raise a descriptive error naming the failed query.
    #[default]
    RaiseError,
    /// Yield `None` and leave absence handling to the caller.
    ReturnAbsent,
}

impl FailurePolicy {
    /// Apply the policy to a raw match result.
    pub(crate) fn resolve(
        self,
        hit: Option<NodeRef>,
        criteria: &Criteria,
    ) -> TocarResult<Option<NodeRef>> {
        match (self, hit) {
            (_, Some(node)) => Ok(Some(node)),
            (Self::RaiseError, None) => Err(criteria.missing()),
            (Self::ReturnAbsent, None) => Ok(None),
        }
    }
}
