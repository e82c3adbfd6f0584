/// Error code registry for datatasks
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Storage errors
/// - 7000-7999: Validation errors
/// - 8000-8999: Parse and render errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_INVALID_TOML: u16 = 1002;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;

    // Storage errors (3000-3999)
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_NOT_FOUND: u16 = 3004;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3005;
    pub const STORAGE_CSV_ERROR: u16 = 3011;

    // Validation errors (7000-7999)
    pub const VALIDATION_INVALID_TYPE: u16 = 7002;
    pub const VALIDATION_OUT_OF_RANGE: u16 = 7003;
    pub const VALIDATION_SHAPE_MISMATCH: u16 = 7006;

    // Parse and render errors (8000-8999)
    pub const PARSE_GENERIC: u16 = 8000;
    pub const PARSE_INVALID_DATE: u16 = 8001;
    pub const RENDER_GENERIC: u16 = 8100;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Invalid TOML syntax in configuration",
        1005 => "Invalid value in configuration",

        3001 => "Storage I/O error",
        3002 => "Storage permission denied",
        3004 => "Storage item not found",
        3005 => "Storage item already exists",
        3011 => "CSV read or write failed",

        7002 => "Value has the wrong type",
        7003 => "Value is out of range",
        7006 => "Input has an inconsistent shape",

        8000 => "Input could not be parsed",
        8001 => "Date string could not be parsed",
        8100 => "Chart rendering failed",

        _ => "Unknown error code",
    }
}
