/// Data layer: core types, log parsing, and group selection.
///
/// Architecture:
/// ```text
///  benchmark log (.log / .txt)
///        │
///        ▼
///   ┌──────────┐
///   │  parse    │  classify lines → decode key=values → merge CONFIG+RESULT
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  BenchReport  │  headers, captures, ThreadGroups
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  which thread groups are visible → group indices
///   └──────────┘
/// ```
pub mod model;
pub mod parse;
pub mod select;
