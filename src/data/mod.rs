/// Data layer: tables, loading, validation and shaping.
///
/// Architecture:
/// ```text
///  raw.csv      shaping.csv
///     │              │
///     ▼              ▼
///   ┌──────────────────┐
///   │      loader      │  strip comments, parse → Table
///   └──────────────────┘
///            │
///            ▼
///   ┌──────────────────┐
///   │     validate     │  channel label sets must match
///   └──────────────────┘
///            │
///            ▼
///   ┌──────────────────┐
///   │     shaping      │  shaping Table → ShapingSpec
///   └──────────────────┘
///            │
///            ▼
///   ┌──────────────────┐
///   │    transform     │  raw Table × ShapingSpec → processed Table
///   └──────────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod pipeline;
pub mod shaping;
pub mod transform;
pub mod validate;
