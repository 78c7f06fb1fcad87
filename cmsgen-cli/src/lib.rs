//! cmsgen - compile a site's CMS content model.
//!
//! The binary loads `.cms/cmsgen.*` through `cmsgen-config`, compiles it with
//! `cmsgen-compiler` and writes `.pages.yml`. This library holds the command
//! implementations so they can be tested without spawning the binary.

pub mod cli;
pub mod compile;
pub mod list;

pub use cli::{Cli, Commands, CompileArgs};
pub use compile::{run_compile, CompileReport, Destination};
