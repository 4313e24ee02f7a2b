//! Entity property records
//!
//! An [`EntityDescriptor`] is the immutable property record handed to the
//! host when an entity is created. The host owns the resulting entity; this
//! crate only keeps the handle it gets back.

use serde::{Serialize, Deserialize};
use std::fmt;
use thiserror::Error;

use crate::foundation::math::Vec3;

/// Name given to the QA test entity
pub const TEST_ENTITY_NAME: &str = "Cusack_Testing";

/// Color of the QA test entity
pub const TEST_ENTITY_COLOR: Color = Color::new(200, 10, 200);

/// Dimensions of the QA test entity (width, height, depth)
pub const TEST_ENTITY_DIMENSIONS: Vec3 = Vec3::new(2.0, 4.0, 2.0);

/// Primitive shapes the host can render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned box
    Cube,
    /// Sphere
    Sphere,
    /// Cylinder with its axis along X
    CylinderX,
    /// Cylinder with its axis along Y
    CylinderY,
    /// Cylinder with its axis along Z
    CylinderZ,
}

impl ShapeKind {
    /// Name the host uses for this shape
    pub const fn host_name(self) -> &'static str {
        match self {
            Self::Cube => "box",
            Self::Sphere => "sphere",
            Self::CylinderX => "cylinder-x",
            Self::CylinderY => "cylinder-y",
            Self::CylinderZ => "cylinder-z",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Color {
    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// How long the host keeps an entity before removing it on its own
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Lifetime {
    /// Never expires
    Infinite,
    /// Expires after the given number of seconds
    Seconds(f32),
}

impl Lifetime {
    /// Value the host property record uses, where `-1` means infinite
    pub fn host_value(self) -> f32 {
        match self {
            Self::Infinite => -1.0,
            Self::Seconds(seconds) => seconds,
        }
    }

    /// Interpret a host lifetime value; any negative value is infinite
    pub fn from_host_value(value: f32) -> Self {
        if value < 0.0 {
            Self::Infinite
        } else {
            Self::Seconds(value)
        }
    }

    /// Whether the entity is ever removed automatically
    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }
}

/// Reasons a descriptor is refused before it reaches the host
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DescriptorError {
    /// Entity has no name
    #[error("entity name must not be empty")]
    EmptyName,

    /// Position has NaN or infinite components
    #[error("position is not finite: {0:?}")]
    NonFinitePosition(Vec3),

    /// Dimensions are not all positive and finite
    #[error("dimensions must be positive and finite: {0:?}")]
    InvalidDimensions(Vec3),

    /// Finite lifetime that would expire immediately
    #[error("lifetime must be positive: {0}")]
    InvalidLifetime(f32),
}

/// Property record describing an entity to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    /// Display name
    pub name: String,
    /// Primitive shape
    pub shape: ShapeKind,
    /// Surface color
    pub color: Color,
    /// World position of the entity's center
    pub position: Vec3,
    /// Size along X, Y and Z
    pub dimensions: Vec3,
    /// Automatic expiry
    pub lifetime: Lifetime,
}

impl EntityDescriptor {
    /// The QA test cylinder placed at `position`
    pub fn test_cylinder(position: Vec3) -> Self {
        Self {
            name: TEST_ENTITY_NAME.to_string(),
            shape: ShapeKind::CylinderY,
            color: TEST_ENTITY_COLOR,
            position,
            dimensions: TEST_ENTITY_DIMENSIONS,
            lifetime: Lifetime::Infinite,
        }
    }

    /// Check the record before submitting it to the host
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.trim().is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        if !self.position.iter().all(|v| v.is_finite()) {
            return Err(DescriptorError::NonFinitePosition(self.position));
        }

        if !self.dimensions.iter().all(|v| v.is_finite() && *v > 0.0) {
            return Err(DescriptorError::InvalidDimensions(self.dimensions));
        }

        if let Lifetime::Seconds(seconds) = self.lifetime {
            if !(seconds.is_finite() && seconds > 0.0) {
                return Err(DescriptorError::InvalidLifetime(seconds));
            }
        }

        Ok(())
    }
}
