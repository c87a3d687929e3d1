pub mod combinators;
pub mod config_loader;
pub mod descriptor;
pub mod launcher;
pub mod process;
pub mod readiness;
pub mod supervisor;
