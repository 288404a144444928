//! Decoration error types.

/// Errors raised while applying a decorator.
///
/// All failures are synchronous and surface at the registration call that
/// caused them; there is no retry or recovery layer.
#[derive(Debug, thiserror::Error)]
pub enum DecorationError {
    /// The same decorator kind was applied a second time directly to the
    /// identical target/member/parameter site.
    #[error("{decorator} cannot be applied more than once on {site}")]
    DuplicateDecoration {
        /// Diagnostics name of the decorator.
        decorator: String,
        /// Formatted identifier of the decorated site.
        site: String,
    },

    /// A decoration kind left a required hook at its default body.
    #[error("{kind} does not implement {hook}")]
    NotImplemented {
        /// Name of the decoration kind.
        kind: &'static str,
        /// Name of the missing hook.
        hook: &'static str,
    },
}

/// Result alias for decoration operations.
pub type Result<T> = std::result::Result<T, DecorationError>;
