//! imgdupl — perceptual image hashing and Hamming-distance clustering.
//!
//! Two stages live here: a DCT perceptual hasher ([`hash`]) that turns a
//! decoded image into a packed bit-vector fingerprint ([`model::PHash`]),
//! and a parallel clusterizer ([`cluster`]) that groups fingerprints within
//! a Hamming-distance threshold using a long-lived worker pool, mutex/
//! condvar work queues ([`queue`]), and periodic compaction of the working
//! set.

pub mod cluster;
pub mod distance;
pub mod error;
pub mod hash;
pub mod logging;
pub mod model;
pub mod queue;
pub mod store;
pub mod text;
