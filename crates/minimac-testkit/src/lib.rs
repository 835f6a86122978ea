//! # Mini-MAC Testkit
//!
//! Testing utilities for the Mini-MAC engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Script vectors**: Known signing scripts with deterministic tag
//!   sequences for cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up channels and links
//!
//! ## Script Vectors
//!
//! ```rust
//! use minimac_testkit::vectors::{all_vectors, run_vector};
//!
//! for vector in all_vectors() {
//!     let tags = run_vector(&vector);
//!     println!("{}: {:?}", vector.name, tags);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use minimac_testkit::generators::SessionScript;
//!
//! proptest! {
//!     #[test]
//!     fn link_survives_any_script(script: SessionScript) {
//!         // drive a LinkFixture with script.payloads
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up a lock-step pair:
//!
//! ```rust
//! use minimac_testkit::fixtures::{LinkFixture, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let mut link = LinkFixture::new(&fixture);
//! assert!(link.transmit(&[0x01, 0x02]).is_accepted());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_channel_fixtures, LinkFixture, TestFixture};
pub use generators::SessionScript;
pub use vectors::{all_vectors, run_vector, verify_all_vectors, ScriptVector};
