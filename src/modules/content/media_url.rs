//! Classification of admin-supplied video and thumbnail links.
//!
//! Content is pasted in from consumer cloud-storage share links, so nothing
//! here rejects a URL: an unrecognised or unparseable link is passed through
//! unchanged and playback decides whether it works.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::ToSchema;

const YOUTUBE_WARNING: &str =
    "YouTube videos cannot be played directly. Use AWS S3 or direct video URLs.";
const GDRIVE_WARNING: &str =
    "Google Drive streaming can be slow/unreliable. AWS S3 is recommended for videos.";
const YOUTUBE_LOAD_ERROR: &str =
    "YouTube videos cannot be played. Please use AWS S3 or direct video URLs instead.";
const GDRIVE_LOAD_ERROR: &str = "Google Drive video failed to load. Try using AWS S3 for better reliability, or make sure the file is publicly shared.";
const GENERIC_LOAD_ERROR: &str = "Failed to load video.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VideoSource {
    Youtube,
    Gdrive,
    Aws,
    Direct,
}

impl VideoSource {
    pub fn warning(&self) -> Option<&'static str> {
        match self {
            VideoSource::Youtube => Some(YOUTUBE_WARNING),
            VideoSource::Gdrive => Some(GDRIVE_WARNING),
            VideoSource::Aws | VideoSource::Direct => None,
        }
    }

    /// What to show when the player cannot load a video from this source.
    pub fn load_error(&self) -> &'static str {
        match self {
            VideoSource::Youtube => YOUTUBE_LOAD_ERROR,
            VideoSource::Gdrive => GDRIVE_LOAD_ERROR,
            VideoSource::Aws | VideoSource::Direct => GENERIC_LOAD_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedVideo {
    pub source: VideoSource,
    pub playable_url: String,
}

impl NormalizedVideo {
    pub fn warning(&self) -> Option<&'static str> {
        self.source.warning()
    }
}

struct SourceRule {
    source: VideoSource,
    matches: fn(&str) -> bool,
    playable: fn(&str) -> Option<String>,
}

// Evaluated in order, first match wins. `matches` sees the lowercased URL,
// `playable` the trimmed original.
const RULES: &[SourceRule] = &[
    SourceRule {
        source: VideoSource::Youtube,
        matches: |lower| lower.contains("youtu.be/") || lower.contains("youtube.com"),
        playable: |raw| youtube_id(raw).map(|id| format!("https://www.youtube.com/embed/{}", id)),
    },
    SourceRule {
        source: VideoSource::Gdrive,
        matches: |lower| lower.contains("drive.google.com"),
        playable: |raw| {
            drive_file_id(raw).map(|id| format!("https://drive.google.com/uc?export=view&id={}", id))
        },
    },
    SourceRule {
        source: VideoSource::Aws,
        matches: |lower| lower.contains("amazonaws.com") || lower.contains(".s3."),
        playable: |_| None,
    },
];

pub fn normalize_video_url(raw: &str) -> NormalizedVideo {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();

    for rule in RULES {
        if (rule.matches)(&lower) {
            return NormalizedVideo {
                source: rule.source,
                playable_url: (rule.playable)(trimmed).unwrap_or_else(|| trimmed.to_string()),
            };
        }
    }

    NormalizedVideo {
        source: VideoSource::Direct,
        playable_url: trimmed.to_string(),
    }
}

pub fn normalize_thumbnail_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.to_ascii_lowercase().contains("drive.google.com") {
        if let Some(id) = drive_file_id(trimmed) {
            return format!("https://drive.google.com/thumbnail?id={}&sz=w1000", id);
        }
    }

    trimmed.to_string()
}

fn youtube_id(raw: &str) -> Option<String> {
    if let Some(rest) = after_marker(raw, "youtu.be/") {
        let id = rest.split('?').next().unwrap_or_default();
        return non_empty(id);
    }

    query_param(raw, "v")
}

fn drive_file_id(raw: &str) -> Option<String> {
    if let Some(rest) = after_marker(raw, "/file/d/") {
        if let Some(id) = non_empty(rest.split('/').next().unwrap_or_default()) {
            return Some(id);
        }
    }

    if let Some(id) = query_param(raw, "id") {
        return Some(id);
    }

    after_marker(raw, "/open?id=").and_then(|rest| non_empty(rest.split('&').next().unwrap_or_default()))
}

/// Slice following the first case-insensitive occurrence of `marker`.
fn after_marker<'a>(raw: &'a str, marker: &str) -> Option<&'a str> {
    // ASCII lowercasing keeps byte offsets intact.
    let idx = raw.to_ascii_lowercase().find(marker)?;
    Some(&raw[idx + marker.len()..])
}

fn query_param(raw: &str, name: &str) -> Option<String> {
    let (_, query) = raw.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .and_then(|(_, value)| non_empty(&value))
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_url_becomes_embed() {
        let n = normalize_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42");
        assert_eq!(n.source, VideoSource::Youtube);
        assert_eq!(n.playable_url, "https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert!(n.warning().is_some_and(|w| !w.is_empty()));
    }

    #[test]
    fn youtube_short_link_stops_at_query() {
        let n = normalize_video_url("  https://youtu.be/abc123?si=share  ");
        assert_eq!(n.source, VideoSource::Youtube);
        assert_eq!(n.playable_url, "https://www.youtube.com/embed/abc123");
    }

    #[test]
    fn youtube_without_id_passes_through_with_warning() {
        let n = normalize_video_url("https://www.YouTube.com/channel/xyz");
        assert_eq!(n.source, VideoSource::Youtube);
        assert_eq!(n.playable_url, "https://www.YouTube.com/channel/xyz");
        assert!(n.warning().is_some());
    }

    #[test]
    fn drive_patterns_resolve_file_id() {
        let cases = [
            "https://drive.google.com/file/d/ABC123/view?usp=sharing",
            "https://drive.google.com/uc?export=download&id=ABC123",
            "https://drive.google.com/open?id=ABC123",
        ];
        for raw in cases {
            let n = normalize_video_url(raw);
            assert_eq!(n.source, VideoSource::Gdrive, "{raw}");
            assert_eq!(n.playable_url, "https://drive.google.com/uc?export=view&id=ABC123");
            assert!(n.warning().is_some());
        }
    }

    #[test]
    fn drive_without_id_is_left_alone() {
        let raw = "https://drive.google.com/drive/folders";
        let n = normalize_video_url(raw);
        assert_eq!(n.source, VideoSource::Gdrive);
        assert_eq!(n.playable_url, raw);
        assert_eq!(normalize_thumbnail_url(raw), raw);
    }

    #[test]
    fn s3_and_direct_urls_are_untouched() {
        let s3 = normalize_video_url("https://bucket.s3.eu-west-1.amazonaws.com/ep1.mp4");
        assert_eq!(s3.source, VideoSource::Aws);
        assert_eq!(s3.playable_url, "https://bucket.s3.eu-west-1.amazonaws.com/ep1.mp4");
        assert_eq!(s3.warning(), None);

        let direct = normalize_video_url("https://cdn.example.com/movie.mp4");
        assert_eq!(direct.source, VideoSource::Direct);
        assert_eq!(direct.warning(), None);
    }

    #[test]
    fn thumbnail_uses_drive_thumbnail_endpoint() {
        assert_eq!(
            normalize_thumbnail_url("https://drive.google.com/file/d/IMG9/view"),
            "https://drive.google.com/thumbnail?id=IMG9&sz=w1000"
        );
        assert_eq!(
            normalize_thumbnail_url("https://images.example.com/a.jpg"),
            "https://images.example.com/a.jpg"
        );
    }

    #[test]
    fn youtube_wins_over_later_rules() {
        // Contains ".s3." too, but YouTube is checked first.
        let n = normalize_video_url("https://youtube.com/watch?v=x1&ref=my.s3.bucket");
        assert_eq!(n.source, VideoSource::Youtube);
    }
}
