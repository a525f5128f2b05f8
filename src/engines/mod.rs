//! Speech synthesis engine clients.
//!
//! This module contains clients for external text-to-speech engines.
//!
//! # Available Engines
//!
//! Enable engines via Cargo features:
//! - `mimic3` - Mimic 3 web server (`mimic3-server`, HTTP API)

#[cfg(feature = "mimic3")]
pub mod mimic3;
