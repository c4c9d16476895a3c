// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pin definitions for node inputs/outputs.
//!
//! A pin is addressed by its index in the owning node's input or output
//! list; there is no separate pin identifier.

use serde::{Deserialize, Serialize};

/// Opaque white, the color fallback when nothing can be resolved
pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Pin direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PinDirection {
    /// Input pin, consumes a value
    Input,
    /// Output pin, produces a value
    Output,
}

/// Declared data type of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinType {
    /// Floating point value
    Float,
    /// Integer value
    Int,
    /// Boolean value
    Bool,
    /// 2D vector
    Vec2,
    /// 3D vector
    Vec3,
    /// 4D vector
    Vec4,
    /// Color (RGBA), stored like `Vec4`
    Color,
    /// String value
    String,
}

impl PinType {
    /// Check if a value of this type can feed a pin of another type
    pub fn can_connect_to(&self, other: &PinType) -> bool {
        if self == other {
            return true;
        }

        match (self, other) {
            // Colors are stored as Vec4
            (Self::Color, Self::Vec4) | (Self::Vec4, Self::Color) => true,
            // Scalars broadcast to vectors
            (Self::Float, Self::Vec2 | Self::Vec3 | Self::Vec4 | Self::Color) => true,
            // Vectors extend
            (Self::Vec2, Self::Vec3 | Self::Vec4) | (Self::Vec3, Self::Vec4) => true,
            // Numeric promotions
            (Self::Int, Self::Float) | (Self::Bool, Self::Int) => true,
            _ => false,
        }
    }
}

/// Value carried by a pin or produced by evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PinValue {
    /// Float
    Float(f32),
    /// Integer
    Int(i32),
    /// Boolean
    Bool(bool),
    /// 2D vector
    Vec2([f32; 2]),
    /// 3D vector
    Vec3([f32; 3]),
    /// 4D vector
    Vec4([f32; 4]),
    /// Color
    Color([f32; 4]),
    /// String
    String(String),
}

impl PinValue {
    /// Zero value for a declared type
    pub fn default_for(pin_type: PinType) -> Self {
        match pin_type {
            PinType::Float => Self::Float(0.0),
            PinType::Int => Self::Int(0),
            PinType::Bool => Self::Bool(false),
            PinType::Vec2 => Self::Vec2([0.0; 2]),
            PinType::Vec3 => Self::Vec3([0.0; 3]),
            PinType::Vec4 => Self::Vec4([0.0; 4]),
            PinType::Color => Self::Color(WHITE),
            PinType::String => Self::String(String::new()),
        }
    }

    /// Get the pin type for this value
    pub fn pin_type(&self) -> PinType {
        match self {
            Self::Float(_) => PinType::Float,
            Self::Int(_) => PinType::Int,
            Self::Bool(_) => PinType::Bool,
            Self::Vec2(_) => PinType::Vec2,
            Self::Vec3(_) => PinType::Vec3,
            Self::Vec4(_) => PinType::Vec4,
            Self::Color(_) => PinType::Color,
            Self::String(_) => PinType::String,
        }
    }

    /// Coerce to a float: scalars convert, vectors yield their first component
    pub fn as_float(&self) -> f32 {
        match self {
            Self::Float(v) => *v,
            Self::Int(v) => *v as f32,
            Self::Bool(v) => bool_to_float(*v),
            Self::Vec2([x, ..])
            | Self::Vec3([x, ..])
            | Self::Vec4([x, ..])
            | Self::Color([x, ..]) => *x,
            Self::String(_) => 0.0,
        }
    }

    /// Coerce to an RGBA tuple: scalars broadcast to `(v, v, v, 1)`,
    /// short vectors are padded, strings fall back to opaque white
    pub fn as_color(&self) -> [f32; 4] {
        match self {
            Self::Float(_) | Self::Int(_) | Self::Bool(_) => {
                let v = self.as_float();
                [v, v, v, 1.0]
            }
            Self::Vec2([x, y]) => [*x, *y, 0.0, 1.0],
            Self::Vec3([x, y, z]) => [*x, *y, *z, 1.0],
            Self::Vec4(c) | Self::Color(c) => *c,
            Self::String(_) => WHITE,
        }
    }

    /// Coerce to a 2D vector: scalars broadcast, longer vectors are truncated
    pub fn as_vec2(&self) -> [f32; 2] {
        match self {
            Self::Float(_) | Self::Int(_) | Self::Bool(_) => {
                let v = self.as_float();
                [v, v]
            }
            Self::Vec2(v) => *v,
            Self::Vec3([x, y, _]) | Self::Vec4([x, y, ..]) | Self::Color([x, y, ..]) => [*x, *y],
            Self::String(_) => [0.0, 0.0],
        }
    }

    /// Borrow the string payload, if any
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

fn bool_to_float(v: bool) -> f32 {
    if v {
        1.0
    } else {
        0.0
    }
}

/// A pin on a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    /// Pin name
    pub name: String,
    /// Declared data type
    pub pin_type: PinType,
    /// Pin direction
    pub direction: PinDirection,
    /// Value used when the pin is unconnected
    pub default_value: PinValue,
}

impl Pin {
    /// Create a new pin
    pub fn new(
        name: impl Into<String>,
        pin_type: PinType,
        direction: PinDirection,
        default_value: PinValue,
    ) -> Self {
        Self {
            name: name.into(),
            pin_type,
            direction,
            default_value,
        }
    }

    /// Create a new input pin with the zero value of its type
    pub fn input(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, pin_type, PinDirection::Input, PinValue::default_for(pin_type))
    }

    /// Create a new output pin with the zero value of its type
    pub fn output(name: impl Into<String>, pin_type: PinType) -> Self {
        Self::new(name, pin_type, PinDirection::Output, PinValue::default_for(pin_type))
    }

    /// Set the default value
    pub fn with_default(mut self, value: PinValue) -> Self {
        self.default_value = value;
        self
    }

    /// Check if this pin may feed `other`: output to input, compatible types
    pub fn can_connect(&self, other: &Pin) -> bool {
        self.direction == PinDirection::Output
            && other.direction == PinDirection::Input
            && self.pin_type.can_connect_to(&other.pin_type)
    }
}
