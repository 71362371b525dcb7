use serde::{Deserialize, Serialize};

/// Number of items requested from the generation service, always within
/// [`ItemCount::MIN`, `ItemCount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct ItemCount(u32);

impl ItemCount {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;
    pub const DEFAULT: u32 = 5;

    pub fn clamped(n: i64) -> Self {
        Self(n.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for ItemCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl From<i64> for ItemCount {
    fn from(n: i64) -> Self {
        Self::clamped(n)
    }
}

impl From<ItemCount> for u32 {
    fn from(count: ItemCount) -> Self {
        count.0
    }
}
