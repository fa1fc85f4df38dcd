#![cfg_attr(not(any(feature = "std", test)), no_std)]
//! Platform-agnostic parameter service core for embedded network nodes.
//!
//! The application implements `ParamManager` (or uses the bundled
//! `ParamRegistry`), binds it to a `ParamServer` and lets its service layer
//! pump decoded GetSet / ExecuteOpcode requests through `ParamServer::handle`.

// 'alloc' is used for dynamic allocation (names, string values, registry tables)
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod hal;
pub mod value;

// --- Service Layer ---
pub mod manager;
pub mod messages;
pub mod server;

// --- Reference Manager ---
pub mod registry;

// --- Top-level Exports ---
pub use types::{ParamIndex, ParamName};
pub use hal::{ParamError, ParamStorage, ServiceNode, check_status};
pub use value::{NumericValue, ParamBounds, Value};
pub use manager::ParamManager;
pub use messages::{
    ExecuteOpcodeRequest, ExecuteOpcodeResponse, GetSetRequest, GetSetResponse, Opcode,
    ServiceId, ServiceRequest, ServiceResponse,
};
pub use server::ParamServer;
pub use registry::{ParamDescriptor, ParamRegistry, RegistryConfig};
