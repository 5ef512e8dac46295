//! Resource implementations

pub mod resource_command;


pub use resource_command::CommandResource;
