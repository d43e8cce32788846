//! # Entity-Core Test Suite
//!
//! Unified test crate for cross-layer scenarios:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── choreography.rs   # Multi-lane defer-chain retirement flows
//!     └── concurrency.rs    # Parallel pipelines racing on one service
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ec-tests
//!
//! # By category
//! cargo test -p ec-tests integration::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;

/// Route engine logs into test output when `RUST_LOG` is set.
/// Safe to call from every test; later calls are no-ops.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
