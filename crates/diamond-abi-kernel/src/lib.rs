//! # diamond-abi kernel
//!
//! Merges the public interfaces of independently compiled facets into a
//! single diamond (EIP-2535) interface.
//!
//! The kernel is pure: it does no I/O and holds no state between calls.
//! Loading compiled artifacts and exporting the merged interface live in
//! `diamond-abi-artifacts`.
//!
//! ## Architecture
//!
//! ```text
//! Fragment              ← One ABI element, tagged by kind
//!     │
//! SignatureKey          ← (kind, name, [internal types]) identity
//!     │
//! ModuleDescriptor      ← Fully qualified name + ordered fragments
//!     │
//! aggregate             ← First occurrence wins, fallback owner filter
//!     │
//! MergedInterface       ← Surviving fragments + drop report
//! ```

pub mod aggregate;
pub mod error;
pub mod fragment;
pub mod human;
pub mod module;
pub mod signature;

pub use aggregate::{
    Aggregator, DropReason, DroppedFragment, MergeSummary, MergedEntry, MergedInterface, aggregate,
};
pub use error::{FragmentError, KernelError};
pub use fragment::{Fragment, FragmentKind, NamedFragment, Param, UnnamedFragment};
pub use human::human_readable;
pub use module::ModuleDescriptor;
pub use signature::{SignatureKey, canonical_key};
