use std::time::Duration;

/// Prefix of every generated embed URL
pub const YOUTUBE_EMBED_PREFIX: &str = "https://www.youtube.com/embed/";
/// Marker for the long `watch?v=` share link
pub const YOUTUBE_WATCH_MARKER: &str = "youtube.com/watch?v=";
/// Marker for the `youtu.be/` short link
pub const YOUTUBE_SHORT_MARKER: &str = "youtu.be/";

/// Byte size units, in order of magnitude (each step is 1024x)
pub const FILE_SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
pub const FILE_SIZE_STEP: u64 = 1024;

pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_DAY: i64 = 86_400_000;
/// Past this many days a timestamp is shown as a calendar date instead
pub const RELATIVE_DATE_MAX_DAYS: i64 = 7;

/// How long a toast stays on screen before hiding itself (matches Bootstrap's default)
pub const TOAST_AUTOHIDE_DELAY: Duration = Duration::from_millis(5000);

/// Default quiet period for debounced inputs (search boxes etc.)
pub const DEFAULT_DEBOUNCE_WAIT: Duration = Duration::from_millis(300);

pub mod filename {
    pub mod persistent {
        /// The config file, stored in the config directory
        pub const CONFIG: &str = "config.json";
    }
    /// Name of the directory under the user's config dir
    pub const APP_DIR: &str = "video-profile-utils";
}
