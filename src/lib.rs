//! Helpers for the video profile UI: clock-style durations, YouTube link parsing,
//! toasts, debouncing, clipboard copy, URL validation, byte sizes and relative dates.
//!
//! Platform pieces (toast container, toast animation, clipboard, clock) are traits so
//! everything here can run without a browser.

pub mod config;
pub mod system;
pub mod ui;
pub mod util;

pub use system::{
    clipboard::{Clipboard, ClipboardMessages, CommandClipboard, MemoryClipboard, copy_to_clipboard},
    debouncer::Debouncer,
};
pub use ui::notification::{
    MemoryToastContainer, Notifier, TimedToastWidget, Toast, ToastContainer, ToastKind,
    ToastWidget,
};
pub use util::{
    duration::format_duration,
    file_size::format_file_size,
    locale::Locale,
    relative_date::{Clock, FixedClock, SystemClock, format_date, format_relative},
    url::is_valid_url,
    youtube::{get_youtube_embed_url, get_youtube_video_id},
};
