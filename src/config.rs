// ABOUTME: Version and banner constants for the CLI/REPL driver

pub const VERSION: &str = "0.1.0";
pub const WELCOME_MESSAGE: &str = "taulang 0.1.0";
pub const WELCOME_SUBTITLE: &str = "A tree-walking interpreter for a small dynamically-typed language";
