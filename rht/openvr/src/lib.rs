//! The slice of the OpenVR driver ABI a SteamVR device driver needs: data layouts, interface
//! versions, Rust traits for both sides of the boundary, and the vtable glue between them.

#[cfg(not(target_pointer_width = "64"))]
compile_error!("SteamVR only loads 64-bit drivers");

mod bridge;
mod driver;
mod host;
mod interfaces;
mod types;

pub use bridge::*;
pub use driver::*;
pub use host::{
    CppInterface, DriverContextVtable, DriverInputVtable, DriverLogVtable, PropertiesVtable,
    ServerDriverHostVtable,
};
pub use interfaces::*;
pub use types::*;
