//! In-memory host used by tests and the QA harness

use slotmap::{Key, KeyData, SlotMap};

use super::{EntityHandle, EntityService, HostError, ViewpointSource};
use crate::entity::EntityDescriptor;
use crate::foundation::math::{Quat, Vec3};

slotmap::new_key_type! {
    struct SandboxKey;
}

/// Self-contained world with a settable viewpoint.
///
/// Handles are derived from slot keys, so a deleted entity's handle is never
/// reused for a later one.
#[derive(Debug)]
pub struct SandboxHost {
    orientation: Quat,
    position: Vec3,
    entities: SlotMap<SandboxKey, EntityDescriptor>,
    online: bool,
    issue_nil_handles: bool,
    created_total: usize,
    deleted_total: usize,
}

impl SandboxHost {
    /// Empty world with the viewpoint at the origin facing forward
    pub fn new() -> Self {
        Self {
            orientation: Quat::identity(),
            position: Vec3::zeros(),
            entities: SlotMap::with_key(),
            online: true,
            issue_nil_handles: false,
            created_total: 0,
            deleted_total: 0,
        }
    }

    /// Start with the given viewpoint
    pub fn with_viewpoint(mut self, position: Vec3, orientation: Quat) -> Self {
        self.set_viewpoint(position, orientation);
        self
    }

    /// Move the viewpoint
    pub fn set_viewpoint(&mut self, position: Vec3, orientation: Quat) {
        self.position = position;
        self.orientation = orientation;
    }

    /// Take every service offline (or back online)
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    /// Make entity creation succeed but hand back [`EntityHandle::NIL`]
    pub fn set_issue_nil_handles(&mut self, enabled: bool) {
        self.issue_nil_handles = enabled;
    }

    /// Look up a live entity
    pub fn entity(&self, handle: EntityHandle) -> Option<&EntityDescriptor> {
        self.entities.get(Self::key(handle))
    }

    /// Whether the entity is still in the world
    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.entities.contains_key(Self::key(handle))
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Iterate over live entities
    pub fn entities(&self) -> impl Iterator<Item = (EntityHandle, &EntityDescriptor)> {
        self.entities
            .iter()
            .map(|(key, descriptor)| (EntityHandle::from_raw(key.data().as_ffi()), descriptor))
    }

    /// Entities ever created
    pub fn created_total(&self) -> usize {
        self.created_total
    }

    /// Entities actually removed by a delete request
    pub fn deleted_total(&self) -> usize {
        self.deleted_total
    }

    fn key(handle: EntityHandle) -> SandboxKey {
        SandboxKey::from(KeyData::from_ffi(handle.raw()))
    }

    fn ensure_online(&self) -> Result<(), HostError> {
        if self.online {
            Ok(())
        } else {
            Err(HostError::Unavailable("sandbox host is offline".to_string()))
        }
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewpointSource for SandboxHost {
    fn viewpoint_orientation(&self) -> Result<Quat, HostError> {
        self.ensure_online()?;
        Ok(self.orientation)
    }

    fn viewpoint_position(&self) -> Result<Vec3, HostError> {
        self.ensure_online()?;
        Ok(self.position)
    }
}

impl EntityService for SandboxHost {
    fn create_entity(&mut self, descriptor: &EntityDescriptor) -> Result<EntityHandle, HostError> {
        self.ensure_online()?;
        self.created_total += 1;

        if self.issue_nil_handles {
            log::debug!("Sandbox dropped entity '{}' and issued a nil handle", descriptor.name);
            return Ok(EntityHandle::NIL);
        }

        let key = self.entities.insert(descriptor.clone());
        let handle = EntityHandle::from_raw(key.data().as_ffi());
        log::debug!("Sandbox created entity '{}' as {}", descriptor.name, handle);
        Ok(handle)
    }

    fn delete_entity(&mut self, handle: EntityHandle) -> Result<(), HostError> {
        self.ensure_online()?;

        match self.entities.remove(Self::key(handle)) {
            Some(descriptor) => {
                self.deleted_total += 1;
                log::debug!("Sandbox deleted entity '{}' ({})", descriptor.name, handle);
            }
            None => log::debug!("Sandbox ignored delete of unknown entity {}", handle),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_delete() {
        let mut host = SandboxHost::new();
        let handle = host.create_entity(&EntityDescriptor::test_cylinder(Vec3::zeros())).unwrap();

        assert!(!handle.is_nil());
        assert!(host.contains(handle));
        assert_eq!(host.entity(handle).map(|e| e.name.as_str()), Some("Cusack_Testing"));

        host.delete_entity(handle).unwrap();
        assert!(!host.contains(handle));
        assert_eq!(host.entity_count(), 0);
        assert_eq!(host.deleted_total(), 1);
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut host = SandboxHost::new();
        let handle = host.create_entity(&EntityDescriptor::test_cylinder(Vec3::zeros())).unwrap();
        host.delete_entity(handle).unwrap();

        assert!(host.delete_entity(handle).is_ok());
        assert!(host.delete_entity(EntityHandle::NIL).is_ok());
        assert_eq!(host.deleted_total(), 1);
    }

    #[test]
    fn test_handles_not_reused() {
        let mut host = SandboxHost::new();
        let descriptor = EntityDescriptor::test_cylinder(Vec3::zeros());
        let first = host.create_entity(&descriptor).unwrap();
        host.delete_entity(first).unwrap();
        let second = host.create_entity(&descriptor).unwrap();

        assert_ne!(first, second);
        assert!(!host.contains(first));
        assert!(host.contains(second));
    }

    #[test]
    fn test_offline_host_is_unavailable() {
        let mut host = SandboxHost::new();
        host.set_online(false);

        assert!(matches!(host.viewpoint_position(), Err(HostError::Unavailable(_))));
        assert!(matches!(host.viewpoint_orientation(), Err(HostError::Unavailable(_))));
        let result = host.create_entity(&EntityDescriptor::test_cylinder(Vec3::zeros()));
        assert!(matches!(result, Err(HostError::Unavailable(_))));
        assert_eq!(host.created_total(), 0);
    }

    #[test]
    fn test_nil_handle_mode_creates_nothing() {
        let mut host = SandboxHost::new();
        host.set_issue_nil_handles(true);

        let handle = host.create_entity(&EntityDescriptor::test_cylinder(Vec3::zeros())).unwrap();
        assert!(handle.is_nil());
        assert_eq!(host.entity_count(), 0);
        assert_eq!(host.created_total(), 1);
    }
}
