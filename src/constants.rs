//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

use std::time::Duration;

/// API base URL used when neither the environment nor the config file set one
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable that overrides the configured API base URL
pub const API_URL_ENV: &str = "BH_INVESTMENT_API_URL";

/// Directory (under the home directory) holding `config.yaml`
pub const CONFIG_DIR_NAME: &str = ".bh-investment";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written by the binary
pub const LOG_FILE_NAME: &str = "bh-investment.log";

/// Business name shown in the navbar and footer
pub const BRAND_NAME: &str = "BH Investment";

/// How long a modal form stays open after a successful submission
pub const MODAL_CLOSE_DELAY: Duration = Duration::from_millis(1500);

/// How long a toast notification stays visible
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 4000;

/// Maximum number of toasts kept at once (oldest dropped first)
pub const MAX_NOTIFICATIONS: usize = 5;

/// Pages remembered for back navigation (oldest dropped first)
pub const MAX_PAGE_HISTORY: usize = 50;

/// Rows a page must be scrolled before the navbar switches to its compact style
pub const NAVBAR_SCROLL_THRESHOLD: u16 = 3;

/// Interval of the app actor's housekeeping tick (toast expiry)
pub const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Status assumed for properties the server sends without one
pub const DEFAULT_PROPERTY_STATUS: &str = "Available";
