use crate::Px;

/// Row-count buckets used to pick tuning defaults.
///
/// Larger datasets trade scroll smoothness (overscan) for lower memory and CPU per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DatasetTier {
    /// `<= 100` rows. Virtualization is optional at this size.
    Tiny,
    /// `> 100` rows.
    Small,
    /// `> 1_000` rows.
    Medium,
    /// `> 10_000` rows.
    Large,
    /// `> 50_000` rows.
    VeryLarge,
}

impl DatasetTier {
    pub const SMALL_THRESHOLD: usize = 100;
    pub const MEDIUM_THRESHOLD: usize = 1_000;
    pub const LARGE_THRESHOLD: usize = 10_000;
    pub const VERY_LARGE_THRESHOLD: usize = 50_000;

    pub fn for_row_count(row_count: usize) -> Self {
        if row_count > Self::VERY_LARGE_THRESHOLD {
            Self::VeryLarge
        } else if row_count > Self::LARGE_THRESHOLD {
            Self::Large
        } else if row_count > Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else if row_count > Self::SMALL_THRESHOLD {
            Self::Small
        } else {
            Self::Tiny
        }
    }

    pub fn recommends_virtualization(self) -> bool {
        self != Self::Tiny
    }

    /// Tier defaults, before overrides.
    pub fn config(self) -> VirtualizationConfig {
        let (container_height, estimate_size, overscan) = match self {
            Self::VeryLarge => (800, 40, 3),
            Self::Large => (700, 45, 5),
            Self::Medium => (600, 50, 8),
            Self::Small => (500, 50, 10),
            Self::Tiny => (400, 50, 10),
        };
        VirtualizationConfig {
            container_height,
            estimate_size,
            overscan,
            enable_debug: false,
        }
    }
}

/// Tuning parameters for one virtualized table.
///
/// This is a value object: a new one is derived whenever the row count moves to another
/// [`DatasetTier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualizationConfig {
    /// Height of the scroll container (the viewport), in pixels. Always `>= 1`.
    pub container_height: Px,
    /// Size assumed for rows that have not been measured yet. Always `>= 1`.
    pub estimate_size: Px,
    /// Rows rendered beyond each edge of the viewport.
    pub overscan: usize,
    /// Emits per-scroll window reports (requires the `tracing` feature).
    pub enable_debug: bool,
}

impl Default for VirtualizationConfig {
    fn default() -> Self {
        DatasetTier::Tiny.config()
    }
}

impl VirtualizationConfig {
    /// Clamps out-of-range values to the nearest valid one instead of failing.
    pub fn sanitized(mut self) -> Self {
        self.container_height = self.container_height.max(1);
        self.estimate_size = self.estimate_size.max(1);
        self
    }

    pub fn with_container_height(mut self, container_height: Px) -> Self {
        self.container_height = container_height.max(1);
        self
    }

    pub fn with_estimate_size(mut self, estimate_size: Px) -> Self {
        self.estimate_size = estimate_size.max(1);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_enable_debug(mut self, enable_debug: bool) -> Self {
        self.enable_debug = enable_debug;
        self
    }
}

/// Explicit caller choices. Every `Some` field wins over the tier default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConfigOverrides {
    pub container_height: Option<Px>,
    pub estimate_size: Option<Px>,
    pub overscan: Option<usize>,
    pub enable_debug: Option<bool>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn with_container_height(mut self, container_height: Px) -> Self {
        self.container_height = Some(container_height);
        self
    }

    pub fn with_estimate_size(mut self, estimate_size: Px) -> Self {
        self.estimate_size = Some(estimate_size);
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = Some(overscan);
        self
    }

    pub fn with_enable_debug(mut self, enable_debug: bool) -> Self {
        self.enable_debug = Some(enable_debug);
        self
    }

    fn apply(&self, base: VirtualizationConfig) -> VirtualizationConfig {
        VirtualizationConfig {
            container_height: self.container_height.unwrap_or(base.container_height),
            estimate_size: self.estimate_size.unwrap_or(base.estimate_size),
            overscan: self.overscan.unwrap_or(base.overscan),
            enable_debug: self.enable_debug.unwrap_or(base.enable_debug),
        }
        .sanitized()
    }
}

/// Derives tuning parameters for a table with `row_count` rows.
///
/// Pure and total: identical inputs always give identical configs.
pub fn derive_config(row_count: usize, overrides: &ConfigOverrides) -> VirtualizationConfig {
    let tier = DatasetTier::for_row_count(row_count);
    let config = overrides.apply(tier.config());
    vtrace!(row_count, ?tier, ?config, "derive_config");
    config
}
