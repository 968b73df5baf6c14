use constants::{YOUTUBE_EMBED_PREFIX, YOUTUBE_SHORT_MARKER, YOUTUBE_WATCH_MARKER};

/// Extracts the video id from a YouTube share link.
///
/// Two shapes are recognized, in this order:
/// - `https://www.youtube.com/watch?v=VIDEO_ID&...`
/// - `https://youtu.be/VIDEO_ID?...`
///
/// Anything else yields `None`. A recognized link with nothing after the marker
/// yields `Some("")`, which callers should treat as "no id".
pub fn get_youtube_video_id(url: Option<&str>) -> Option<&str> {
    let url = url.filter(|u| !u.is_empty())?;

    if url.contains(YOUTUBE_WATCH_MARKER) {
        url.split("v=").nth(1)?.split('&').next()
    } else if url.contains(YOUTUBE_SHORT_MARKER) {
        url.split(YOUTUBE_SHORT_MARKER).nth(1)?.split('?').next()
    } else {
        None
    }
}

/// Builds the embeddable player URL for a share link, if it has a video id.
pub fn get_youtube_embed_url(url: Option<&str>) -> Option<String> {
    get_youtube_video_id(url)
        .filter(|id| !id.is_empty())
        .map(|id| format!("{YOUTUBE_EMBED_PREFIX}{id}"))
}
