/*!
# Galaxy 3D BVH

Bounding-volume hierarchy for the Galaxy 3D engine's scene queries.

The BVH indexes scene instances (world-space AABB + caller-assigned `u64` ID)
and answers the two per-frame spatial queries of the renderer:

- **Frustum culling**: every instance whose box overlaps a camera frustum
- **Ray casting**: the instance whose box a ray enters first

## Architecture

- **Bvh**: flat, depth-first node array over an instance array; build, update, remove, query
- **BvhConfig**: leaf size and SAH parameters, validated at construction
- **math**: AABB, Ray, Frustum and view-space ViewFrustum
- **MemoryArena**: block-growing bump storage for nodes and instances
- **Engine**: process-wide pluggable logger

The BVH does no locking of its own: mutators take `&mut self`, queries `&self`.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod math;
pub mod utils;
pub mod bvh;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger)
    pub use crate::engine::Engine;

    // Acceleration structure
    pub use crate::bvh::{Bvh, BvhConfig};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Math sub-module
    pub mod math {
        pub use crate::math::*;
    }

    // BVH sub-module with all record types
    pub mod bvh {
        pub use crate::bvh::*;
    }

    // Utilities sub-module
    pub mod utils {
        pub use crate::utils::*;
    }
}

// Re-export math library at crate root
pub use glam;
