//! Host capabilities
//!
//! The viewpoint, the avatar position and the world entity store all belong
//! to the host. This module describes what the spawner needs from them as
//! traits, so the placement logic can run against a live host adapter or
//! against [`SandboxHost`] in tests.

mod sandbox;

pub use sandbox::SandboxHost;

use std::fmt;
use thiserror::Error;

use crate::entity::EntityDescriptor;
use crate::foundation::math::{Quat, Vec3};

/// Opaque identifier the host issues for a created entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(u64);

impl EntityHandle {
    /// Handle that never refers to an entity
    pub const NIL: Self = Self(0);

    /// Wrap a raw host identifier
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host identifier
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Whether the host returned the nil handle
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Failures reported by host services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The viewpoint or entity service cannot be reached
    #[error("host service unavailable: {0}")]
    Unavailable(String),

    /// The host refused the request
    #[error("host rejected request: {0}")]
    Rejected(String),
}

/// Current viewpoint of the user
pub trait ViewpointSource {
    /// Facing direction of the camera
    fn viewpoint_orientation(&self) -> Result<Quat, HostError>;

    /// World position of the avatar
    fn viewpoint_position(&self) -> Result<Vec3, HostError>;
}

/// World entity store
pub trait EntityService {
    /// Create an entity and return its handle
    fn create_entity(&mut self, descriptor: &EntityDescriptor) -> Result<EntityHandle, HostError>;

    /// Delete an entity. Deleting an entity that no longer exists succeeds.
    fn delete_entity(&mut self, handle: EntityHandle) -> Result<(), HostError>;
}

/// Everything the spawner consumes from a host
pub trait Host: ViewpointSource + EntityService {}

impl<T: ViewpointSource + EntityService> Host for T {}
