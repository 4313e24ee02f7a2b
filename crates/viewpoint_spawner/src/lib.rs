//! # Viewpoint Spawner
//!
//! Places a QA test entity a fixed distance in front of the user's viewpoint
//! in a host virtual world.
//!
//! ## Features
//!
//! - **Level placement**: the entity lands on the viewpoint's horizontal
//!   heading, at eye height, whatever the camera pitch
//! - **Injected host**: viewpoint and entity services are traits, with an
//!   in-memory [`host::SandboxHost`] for tests and local runs
//! - **Explicit teardown**: cleanup is registered with a
//!   [`lifecycle::ScriptLifecycle`] and follows a configurable policy
//!
//! ## Quick Start
//!
//! ```rust
//! use viewpoint_spawner::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SpawnerConfig::default();
//!     let mut host = SandboxHost::new();
//!     let mut spawner = PlacementSpawner::new(config.teardown);
//!
//!     ScriptRunner::run(&mut host, &mut spawner)?;
//!     assert_eq!(host.entity_count(), 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod entity;
pub mod foundation;
pub mod host;
pub mod lifecycle;
pub mod placement;
pub mod spawner;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        core::config::{SpawnerConfig, TeardownPolicy},
        entity::{Color, EntityDescriptor, Lifetime, ShapeKind},
        foundation::math::{Quat, QuatExt, Vec3},
        host::{EntityHandle, EntityService, Host, HostError, SandboxHost, ViewpointSource},
        lifecycle::{Script, ScriptError, ScriptLifecycle, ScriptRunner},
        placement::{compute_placement_point, PLACEMENT_DISTANCE},
        spawner::{PlacementSpawner, SpawnCleanup, SpawnerError, SpawnerState},
    };
}
