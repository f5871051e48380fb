//! Tilt-angle dataset tooling.
//!
//! ```text
//!   tilt text file
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   data    │  parse records → ParseResult
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │   tilt    │  angle of each dataset vs. the reference
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  scene    │  colours, marker names, rotations → ScenePlan
//!   └──────────┘
//! ```

pub mod color;
pub mod data;
pub mod scene;
pub mod tilt;
