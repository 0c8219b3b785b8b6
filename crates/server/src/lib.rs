//! HTTP front end for revkv.
//!
//! Translates requests into calls on the store and store results back into
//! JSON responses:
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | PUT | `/entries/:key?cas=TOKEN` | blind or guarded upsert |
//! | GET | `/entries?page=N` | paginated listing |
//! | GET | `/entries/:key` | fetch |
//! | DELETE | `/entries/:key` | delete |
//! | GET | `/health` | liveness and store size |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod lifecycle;
pub mod router;
pub mod telemetry;

pub use config::{Args, ConfigError, ServerConfig};
pub use error::{ApiError, ServerError};
pub use lifecycle::{serve, serve_until};
pub use router::build_router;
