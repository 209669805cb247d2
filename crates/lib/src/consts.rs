/// Prefix of every protoc plugin executable (`protoc-gen-<id>`).
pub const PLUGIN_PREFIX: &str = "protoc-gen-";

/// Extension a source file must carry to be accepted by the compiler.
pub const SOURCE_EXTENSION: &str = "proto";

/// Generator names built into protoc; a custom generator may not reuse them.
pub const BUILTIN_GENERATORS: &[&str] = &["java", "javanano", "python", "cpp", "descriptor_set"];

/// Joins a generator parameter to its output directory in `--<id>_out=`.
pub const PARAMETER_SEPARATOR: char = ':';

/// Environment variable consulted when no executable is given explicitly.
pub const PROTOC_ENV: &str = "PROTOC";

pub const DEFAULT_EXECUTABLE: &str = "protoc";

/// Prefix of the temp file holding the argument list.
pub const ARGUMENT_FILE_PREFIX: &str = "protoc";
