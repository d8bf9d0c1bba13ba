//! Application-wide constants.

/// The display name of the application.
pub const APP_NAME: &str = "US Map Maker";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "us-map-maker";

/// Suffix appended to exported file names (`<title>-us-map-maker.<ext>`).
pub const FILE_SUFFIX: &str = "us-map-maker";
