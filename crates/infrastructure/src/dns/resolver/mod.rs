pub mod builder;
pub mod core;

pub use builder::ResolverBuilder;
pub use core::IterativeResolver;
