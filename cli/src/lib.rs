// Library entry for the cli crate. This re-exports the modules so the
// integration tests can drive the same code paths as the binary.

pub mod game;
pub mod setup;
pub mod visualize;
