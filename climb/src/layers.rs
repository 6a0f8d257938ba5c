use std::str::FromStr;

use num_traits::{One, PrimInt};
use serde::{Deserialize, Deserializer, Serialize, de};

/// Trait implemented by layer enums declared with [`define_layer_flags!`].
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
/// You choose the backing integer type via the associated `Storage`.
pub trait LayerBit {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A set of collision layers packed into a primitive integer.
///
/// Colliders carry the bits of the layers they belong to; a sweep only
/// considers colliders whose bits intersect the query mask.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerFlags<T: PrimInt> {
    pub bits: T,
}

impl<T: PrimInt> LayerFlags<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn from_layers<U: LayerBit<Storage = T> + Copy>(layers: &[U]) -> Self {
        let mut flags = Self::empty();
        flags.add_many(layers);
        flags
    }

    pub fn add<U: LayerBit<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits | layer.mask();
    }

    pub fn remove<U: LayerBit<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits & !layer.mask();
    }

    pub fn has<U: LayerBit<Storage = T>>(&self, layer: U) -> bool {
        (self.bits & layer.mask()) != T::zero()
    }

    pub fn add_many<U: LayerBit<Storage = T> + Copy>(&mut self, layers: &[U]) {
        for &layer in layers {
            self.add(layer);
        }
    }

    /// True when the two sets share at least one layer.
    pub fn intersects(&self, other: Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a layer enum and implement `LayerBit` for it.
///
/// Example:
/// ```rust
/// climb::define_layer_flags!(SceneLayer, u32, {
///     Terrain,
///     Props,
/// });
/// ```
#[macro_export]
macro_rules! define_layer_flags {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::layers::LayerBit for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

define_layer_flags!(CollisionLayer, u32, {
    World,
    Climbable,
    Trigger,
    Player,
});

impl CollisionLayer {
    pub const ALL: [CollisionLayer; 4] = [
        CollisionLayer::World,
        CollisionLayer::Climbable,
        CollisionLayer::Trigger,
        CollisionLayer::Player,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CollisionLayer::World => "world",
            CollisionLayer::Climbable => "climbable",
            CollisionLayer::Trigger => "trigger",
            CollisionLayer::Player => "player",
        }
    }
}

impl FromStr for CollisionLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollisionLayer::ALL
            .into_iter()
            .find(|layer| layer.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown collision layer `{s}`"))
    }
}

impl<'de> Deserialize<'de> for CollisionLayer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(de::Error::custom)
    }
}

/// Layer mask used by locomotion sweeps and world colliders.
pub type LayerMask = LayerFlags<u32>;

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        LayerMask::from_layers(&[layer])
    }
}
