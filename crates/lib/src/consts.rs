//! Well-known names shared across the crate.

/// File extension of compilable juli sources.
pub const SOURCE_EXTENSION: &str = "jl";

/// File extension of compiled object artifacts.
pub const OBJECT_EXTENSION: &str = "o";

/// Configuration file, looked up in the invocation's working directory.
pub const CONFIG_FILE_NAME: &str = "julibuild.toml";

/// Default name of the linked output binary.
pub const DEFAULT_OUTPUT: &str = "a.out";
