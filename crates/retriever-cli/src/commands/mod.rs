//! Command implementations.

pub mod install;
pub mod run;

pub use self::install::execute_install;
pub use self::run::execute_run;
