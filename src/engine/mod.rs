//! Resource-building engine
//!
//! This module provides:
//! - `HyperExpress`, the service that turns domain objects into resources
//! - `RequestScope`, the per-request token context
//! - `ResourceFactory`, the content-type keyed strategy registry
//! - `HyperExpressBuilder` for startup wiring

pub mod builder;
pub mod factory;
pub mod host;
pub mod scope;

pub use builder::HyperExpressBuilder;
pub use factory::ResourceFactory;
pub use host::HyperExpress;
pub use scope::RequestScope;
