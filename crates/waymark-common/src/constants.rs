//! Shared constants for Waymark components.

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:10000";

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "config/waymark.toml";

/// Default directory for persisted QR images
pub const DEFAULT_QR_OUTPUT_DIR: &str = "static/qr_codes";

/// Default QR module size in pixels
pub const DEFAULT_QR_MODULE_SIZE: u32 = 10;

/// URL path prefix for location pages
pub const LOCATION_PATH_PREFIX: &str = "/location/";

/// File extension for QR images inside archives and on disk
pub const QR_FILE_EXTENSION: &str = "png";

/// Archive download name prefix: qr_codes_{timestamp}.zip
pub const ARCHIVE_NAME_PREFIX: &str = "qr_codes_";

/// Timestamp format for archive download names
pub const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// User-facing messages
pub mod messages {
    /// Shown when an unlock password does not match
    pub const INCORRECT_PASSWORD: &str = "Incorrect password! Try again.";

    /// Shown when the admin password does not match
    pub const INCORRECT_ADMIN_PASSWORD: &str = "Incorrect admin password.";

    /// Shown when the final answer matches
    pub const HUNT_COMPLETE: &str = "Congratulations! You've completed the treasure hunt!";

    /// Shown when the final answer does not match
    pub const INCORRECT_FINAL_ANSWER: &str = "That's not the final answer. Keep looking!";
}

/// HTML form field names
pub mod fields {
    pub const PASSWORD: &str = "password";
    pub const FINAL_ANSWER: &str = "final_answer";
}
