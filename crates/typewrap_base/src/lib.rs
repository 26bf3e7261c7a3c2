//! Forwarding-surface generation for C# wrapper types.
//!
//! A wrapper declaration names an underlying type; this crate works out
//! which members, operators, conversions and `object` overrides the wrapper
//! needs to stand in for that type, and renders them as a partial type.

pub mod analyzer;
mod category;
pub mod emit;
pub mod marker;
pub mod model;
pub mod operators;
pub mod plan;
pub mod signature;

pub use analyzer::analyze;
pub use emit::{emit, lower, EmitOptions, Scope};
pub use marker::{Marker, WrapDeclaration};
pub use model::{MemberDescriptor, UnderlyingSurface, WrapSpec};
pub use plan::GenerationPlan;
