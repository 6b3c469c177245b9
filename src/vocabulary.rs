//! Spatial and size vocabulary.
//!
//! Authors place media with plain words ("left", "derecha", "huge"). These
//! tables map each word, in either language, onto scene-space vectors. The
//! viewer stands at the origin with eye height 1.6 and looks down -Z.
//!
//! Position and rotation are declared as two separate tables. Rotation is not
//! derived from position.

use crate::descriptor::Vec3;

/// Eye height of the viewer in scene units.
pub const EYE_HEIGHT: f64 = 1.6;

/// Distance from the viewer at which flat media is anchored.
pub const ANCHOR_DISTANCE: f64 = 8.0;

/// A named direction relative to the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Location {
    Right,
    Left,
    Behind,
    #[default]
    Front,
    Above,
    Below,
}

impl Location {
    /// Look up a location word. Matching ignores case.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "right" | "derecha" => Some(Location::Right),
            "left" | "izquierda" => Some(Location::Left),
            "behind" | "atrás" => Some(Location::Behind),
            "front" | "frente" => Some(Location::Front),
            "above" | "arriba" => Some(Location::Above),
            "below" | "abajo" => Some(Location::Below),
            _ => None,
        }
    }

    /// Anchor point for an object with the given on-screen footprint.
    ///
    /// `width` and `height` push the anchor outward by half the footprint so
    /// wide objects do not clip into the viewer's line of sight. Pass zeros
    /// for a point anchor.
    pub fn position(self, width: f64, height: f64) -> Vec3 {
        let x_size = -0.5 * width;
        let y_size = -0.5 * height;
        match self {
            Location::Left => Vec3::new(-ANCHOR_DISTANCE, EYE_HEIGHT + y_size, -x_size),
            Location::Right => Vec3::new(ANCHOR_DISTANCE, EYE_HEIGHT + y_size, -x_size),
            // `+ 0.0` keeps a zero footprint from producing -0.0.
            Location::Above => Vec3::new(x_size + 0.0, 6.0, 0.0),
            Location::Below => Vec3::new(x_size + 0.0, -3.0, 0.0),
            Location::Behind => Vec3::new(-x_size, EYE_HEIGHT + y_size, ANCHOR_DISTANCE),
            Location::Front => Vec3::new(0.0 + x_size, EYE_HEIGHT + y_size, -ANCHOR_DISTANCE),
        }
    }

    /// Euler rotation in degrees that makes an object placed here readable.
    pub fn rotation(self) -> Vec3 {
        match self {
            Location::Left => Vec3::new(0.0, 90.0, 0.0),
            Location::Right => Vec3::new(0.0, -90.0, 0.0),
            Location::Above => Vec3::new(90.0, 0.0, 0.0),
            Location::Below => Vec3::new(-90.0, 0.0, 0.0),
            Location::Behind => Vec3::new(0.0, 180.0, 0.0),
            Location::Front => Vec3::ZERO,
        }
    }
}

/// A named relative size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Tiny,
    Small,
    #[default]
    Normal,
    Large,
    Huge,
}

impl Size {
    /// Look up a size word. Matching ignores case.
    pub fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "tiny" | "diminuto" => Some(Size::Tiny),
            "small" | "pequeño" => Some(Size::Small),
            "large" | "grande" => Some(Size::Large),
            "huge" | "enorme" => Some(Size::Huge),
            _ => None,
        }
    }

    pub fn scale(self) -> Vec3 {
        match self {
            Size::Tiny => Vec3::splat(1.0 / 3.0),
            Size::Small => Vec3::splat(0.5),
            Size::Normal => Vec3::ONE,
            Size::Large => Vec3::splat(2.0),
            Size::Huge => Vec3::splat(3.0),
        }
    }
}
