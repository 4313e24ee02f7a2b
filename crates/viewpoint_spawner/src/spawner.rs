//! Placement spawner
//!
//! Spawns the QA test entity in front of the user's viewpoint and arranges
//! for its teardown.
//!
//! # Flow
//!
//! ```text
//! activate() → read viewpoint → level heading → placement point
//!     |                                              |
//!     |                               EntityDescriptor::test_cylinder
//!     |                                              |
//!     |                                   host.create_entity() → handle
//!     |                                              |
//!     └──────────── lifecycle.on_terminate(SpawnCleanup { handle, policy })
//! ```
//!
//! # Usage
//!
//! ```rust
//! use viewpoint_spawner::prelude::*;
//!
//! let mut host = SandboxHost::new();
//! let mut lifecycle = ScriptLifecycle::new();
//! let mut spawner = PlacementSpawner::new(TeardownPolicy::default());
//!
//! let handle = spawner.activate(&mut host, &mut lifecycle)?;
//! lifecycle.terminate(&mut host);
//!
//! // Deletion is off by default, so the entity outlives the script.
//! assert!(host.contains(handle));
//! # Ok::<(), SpawnerError>(())
//! ```

use thiserror::Error;

use crate::core::config::TeardownPolicy;
use crate::entity::{DescriptorError, EntityDescriptor};
use crate::foundation::math::{Quat, Vec3};
use crate::host::{EntityHandle, EntityService, Host, HostError};
use crate::lifecycle::{Script, ScriptLifecycle};
use crate::placement::compute_placement_point;

/// Errors that can occur while spawning
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpawnerError {
    /// Viewpoint or entity service not reachable
    #[error("Host unavailable: {0}")]
    HostUnavailable(#[from] HostError),

    /// Host reported a viewpoint with NaN or infinite components
    #[error("Invalid viewpoint: position {position:?}, orientation {orientation:?}")]
    InvalidViewpoint {
        /// Reported position
        position: Vec3,
        /// Reported orientation
        orientation: Quat,
    },

    /// Descriptor refused before submission
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    /// Host accepted the request but returned an unusable handle
    #[error("Host returned invalid entity handle {0}")]
    InvalidHandle(EntityHandle),
}

/// Whether the spawner currently holds an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnerState {
    /// Not activated yet
    Inactive,
    /// Holding the handle from the latest activation
    Active(EntityHandle),
}

/// Teardown work for one spawned entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnCleanup {
    /// Entity created by the activation
    pub handle: EntityHandle,
    /// What to do with it
    pub policy: TeardownPolicy,
}

impl SpawnCleanup {
    /// Apply the teardown policy.
    ///
    /// Returns `Ok(true)` when a delete was issued. An entity that is already
    /// gone counts as deleted.
    pub fn run<S: EntityService + ?Sized>(self, host: &mut S) -> Result<bool, HostError> {
        if !self.policy.delete_on_teardown {
            log::info!("Leaving test entity {} in the world", self.handle);
            return Ok(false);
        }

        host.delete_entity(self.handle)?;
        log::info!("Deleted test entity {}", self.handle);
        Ok(true)
    }
}

/// Spawns the QA test entity in front of the viewpoint
#[derive(Debug, Clone)]
pub struct PlacementSpawner {
    policy: TeardownPolicy,
    state: SpawnerState,
    activations: usize,
}

impl PlacementSpawner {
    /// Create an inactive spawner
    pub fn new(policy: TeardownPolicy) -> Self {
        Self {
            policy,
            state: SpawnerState::Inactive,
            activations: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> SpawnerState {
        self.state
    }

    /// Handle from the latest successful activation
    pub fn handle(&self) -> Option<EntityHandle> {
        match self.state {
            SpawnerState::Inactive => None,
            SpawnerState::Active(handle) => Some(handle),
        }
    }

    /// Teardown policy applied to spawned entities
    pub fn policy(&self) -> TeardownPolicy {
        self.policy
    }

    /// Number of successful activations
    pub fn activation_count(&self) -> usize {
        self.activations
    }

    /// Spawn the test entity in front of the viewpoint.
    ///
    /// Every call creates a new entity; the spawner does not deduplicate.
    /// A cleanup for the new entity is registered with `lifecycle`.
    pub fn activate<H: Host>(
        &mut self,
        host: &mut H,
        lifecycle: &mut ScriptLifecycle<H>,
    ) -> Result<EntityHandle, SpawnerError> {
        if let SpawnerState::Active(previous) = self.state {
            log::warn!(
                "Spawner activated again while holding {}; a second entity will be created",
                previous
            );
        }

        let orientation = host.viewpoint_orientation()?;
        let position = host.viewpoint_position()?;
        let finite = position.iter().chain(orientation.coords.iter()).all(|v| v.is_finite());
        if !finite {
            return Err(SpawnerError::InvalidViewpoint { position, orientation });
        }

        let center = compute_placement_point(position, &orientation);
        log::debug!("Viewpoint at {:?}, placing entity at {:?}", position, center);

        let descriptor = EntityDescriptor::test_cylinder(center);
        descriptor.validate()?;

        let handle = host.create_entity(&descriptor)?;
        if handle.is_nil() {
            log::warn!("Host accepted '{}' but returned a nil handle", descriptor.name);
            return Err(SpawnerError::InvalidHandle(handle));
        }

        self.state = SpawnerState::Active(handle);
        self.activations += 1;

        let cleanup = SpawnCleanup { handle, policy: self.policy };
        lifecycle.on_terminate(move |host: &mut H| {
            if let Err(e) = cleanup.run(host) {
                log::warn!("Failed to clean up test entity {}: {}", cleanup.handle, e);
            }
        });

        log::info!("Spawned '{}' ({}) at {:?}", descriptor.name, handle, center);
        Ok(handle)
    }

    /// Teardown for the latest activation, outside of a lifecycle.
    ///
    /// Returns `Ok(false)` when nothing was deleted.
    pub fn cleanup<S: EntityService + ?Sized>(&self, host: &mut S) -> Result<bool, HostError> {
        match self.state {
            SpawnerState::Inactive => Ok(false),
            SpawnerState::Active(handle) => SpawnCleanup { handle, policy: self.policy }.run(host),
        }
    }
}

impl Default for PlacementSpawner {
    fn default() -> Self {
        Self::new(TeardownPolicy::default())
    }
}

impl<H: Host> Script<H> for PlacementSpawner {
    type Error = SpawnerError;

    fn activate(
        &mut self,
        host: &mut H,
        lifecycle: &mut ScriptLifecycle<H>,
    ) -> Result<(), SpawnerError> {
        PlacementSpawner::activate(self, host, lifecycle).map(|_| ())
    }
}
