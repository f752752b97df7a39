/// Data layer: core types, workbook ingestion, normalization, filtering.
///
/// Architecture:
/// ```text
///  .xlsx bytes
///       │
///       ▼
///  ┌──────────┐
///  │  loader   │  workbook → RawSheet grid
///  └──────────┘
///       │
///       ▼
///  ┌─────────────┐
///  │  normalize   │  skip banners, drop helper cols, resolve schema
///  └─────────────┘
///       │
///       ▼
///  ┌────────────────┐
///  │ NormalizedTable │  named columns, keyed records
///  └────────────────┘
///       │
///       ▼
///  ┌──────────┐       ┌──────────┐
///  │  filter   │──────▶│  merge    │  percentile stages → full-detail join
///  └──────────┘       └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod schema;
