//! Code generated by `build.rs` from the schemas under `schema/`, compiled
//! against `ecsgen-core`.
//!
//! The generated tree is mounted at `crate::generated`. Its tests check the
//! runtime contract of the generated types: serialization round trips,
//! update application, event delivery, dirty flushing and root dispatch.

include!(concat!(env!("OUT_DIR"), "/schema.rs"));
