mod context;
pub mod init;
pub mod lang;
pub mod locales;
pub mod market;
pub mod page;
pub mod suggest;
pub mod translate;

pub use context::CliContext;
