//! Result and error types for Tocar.

use crate::node::ElementKind;
use thiserror::Error;

/// Result type for Tocar operations
pub type TocarResult<T> = Result<T, TocarError>;

/// Errors that can occur in Tocar
#[derive(Debug, Error)]
pub enum TocarError {
    /// A query matched nothing in the current front
    #[error("no {kind} found with {attribute} \"{value}\"")]
    ElementNotFound {
        /// Element kind the query targeted
        kind: ElementKind,
        /// Attribute the query matched against
        attribute: &'static str,
        /// Value the query searched for
        value: String,
    },

    /// A root source could not resolve the requested root
    #[error("no root \"{identifier}\" in resource \"{resource}\"")]
    RootNotFound {
        /// Resource the root was looked up in
        resource: String,
        /// Identifier that failed to resolve
        identifier: String,
    },
}
