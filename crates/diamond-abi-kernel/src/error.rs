//! Error types for kernel operations.

/// Why a single ABI element could not be read as a [`crate::Fragment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FragmentError {
    /// The element is not a JSON object.
    #[error("fragment is not a JSON object")]
    NotAnObject,

    /// The `type` discriminator is missing or not a string.
    #[error("fragment has no string `type` field")]
    MissingType,

    /// A named kind (`function`, `event`, `error`) carries no usable name.
    #[error("{kind} fragment has no non-empty `name`")]
    MissingName { kind: String },

    /// `inputs` exists but is not an array.
    #[error("{kind} fragment has non-array `inputs`")]
    InputsNotArray { kind: String },

    /// A parameter could not be read.
    #[error("parameter {position}: {reason}")]
    InvalidParam { position: usize, reason: String },
}

/// Errors surfaced by module parsing and aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KernelError {
    /// A module's ABI is not a JSON array.
    #[error("invalid abi for {module}: {reason}")]
    InvalidAbi { module: String, reason: String },

    /// A fragment violates the compiler output contract.
    ///
    /// Fatal for the whole aggregation: a malformed element could corrupt
    /// the signature key space.
    #[error("invalid fragment {index} in {module}: {source}")]
    InvalidFragment {
        module: String,
        index: usize,
        #[source]
        source: FragmentError,
    },

    /// Strict mode only: the same callable signature is exposed twice.
    #[error("duplicate signature `{key}` in {duplicate_owner} (first declared by {first_owner})")]
    DuplicateSignature {
        key: String,
        first_owner: String,
        duplicate_owner: String,
    },
}
