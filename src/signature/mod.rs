//! Neighborhood-label signatures.
//!
//! A signature packs one saturating counter per label into a single
//! integer: counter `i` sits at bit offset `i * bits` and holds how many
//! neighbors carry label `i`, clamped to `2^bits - 1`. Refinement rounds then
//! replace labels with the neighbors' own signatures, so round `k`
//! summarizes a neighborhood of radius `k + 1`.
//!
//! Signatures are a filter: if query node `q` can map to data node `d`, then
//! `d`'s signature dominates `q`'s slot by slot, at every round.

pub mod error;
mod histogram;
mod pack;
mod params;
mod refine;

pub use error::SignatureError;
pub use histogram::{label_histogram, resolve_labels};
pub use pack::{pack, unpack, Counters, Signature};
pub use params::{Accumulation, MissingLabel, SignatureParams, SlotLayout};
#[cfg(feature = "rayon")]
pub use refine::generate_signatures_par;
pub use refine::{generate_signatures, Refinement, RefinementState};
