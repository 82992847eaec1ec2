//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//!
//! ## Structure
//!
//! - `emitters/` - Output format emitters (podman-compose, Quadlet, kube)

pub mod emitters;

pub use emitters::{all_emitters, get_emitter, ComposeEmitter, KubeEmitter, QuadletEmitter};
