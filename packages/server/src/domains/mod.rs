// Entity domains. Each domain contributes a row struct plus the metadata
// that instantiates the generic resource contract in kernel/.

pub mod factory;
pub mod machine;
pub mod worker;

pub use factory::Factory;
pub use machine::Machine;
pub use worker::Worker;
