//! Domain Layer
//!
//! The core of podshift: the canonical deployment model and the rules that
//! rewrite it. Nothing here touches the file system.
//!
//! ## Structure
//!
//! - `entities/` - Document, Service, Change, TranslationResult
//! - `value_objects/` - ports, mounts, restart policies, settings
//! - `ports/` - the `Rule` and `Emitter` traits
//! - `rules/` - the six transformation rules, in execution order
//! - `services/` - dependency graph and rule engine

pub mod entities;
pub mod ports;
pub mod rules;
pub mod services;
pub mod value_objects;
