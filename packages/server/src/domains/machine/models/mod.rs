mod machine;

pub use machine::Machine;
