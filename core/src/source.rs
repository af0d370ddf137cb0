//! Classification of user-supplied video links.
//!
//! A raw string is matched against a fixed set of patterns, in order:
//! YouTube links become autoplaying, muted, looping embed URLs; image links are
//! rejected; direct video files and any other `https://` link pass through
//! untouched; everything else is rejected. Nothing here touches the network.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

pub const YOUTUBE_ID_LEN: usize = 11;
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

static YOUTUBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?:youtube\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?)/|\S*?[?&]v=)|youtu\.be/)([a-zA-Z0-9_-]{{{YOUTUBE_ID_LEN}}})"
    ))
    .expect("youtube regex should compile")
});

static IMAGE_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpeg|jpg|gif|png)(\?.*)?$").expect("image regex should compile")
});

static VIDEO_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(mp4|webm|ogg)(\?.*)?$").expect("video regex should compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    YouTubeEmbed,
    DirectVideoFile,
    RemoteGeneric,
    ImageFile,
    Unrecognized,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::YouTubeEmbed => "youtube-embed",
            SourceKind::DirectVideoFile => "direct-video-file",
            SourceKind::RemoteGeneric => "remote-generic",
            SourceKind::ImageFile => "image-file",
            SourceKind::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor {
    pub raw_url: String,
    pub kind: SourceKind,
}

/// How a playable source is put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `<iframe>` pointed at an embed URL.
    Embed,
    /// `<video>` element with a direct file source.
    Video,
}

/// A classified source ready to hand to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayableSource {
    kind: SourceKind,
    url: String,
}

impl PlayableSource {
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn render_mode(&self) -> RenderMode {
        if is_direct_video(&self.url) {
            RenderMode::Video
        } else {
            RenderMode::Embed
        }
    }

    /// `<source type>` for direct files; `None` for embeds.
    pub fn mime_type(&self) -> Option<String> {
        match self.render_mode() {
            RenderMode::Video => video_mime_type(&self.url),
            RenderMode::Embed => None,
        }
    }

    pub fn into_url(self) -> String {
        self.url
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedSource {
    Empty,
    ImageFile,
    Unrecognized,
}

impl fmt::Display for UnsupportedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedSource::Empty => write!(f, "no video url given"),
            UnsupportedSource::ImageFile => write!(f, "url points at an image, not a video"),
            UnsupportedSource::Unrecognized => {
                write!(f, "url is neither a known video link nor https")
            }
        }
    }
}

impl std::error::Error for UnsupportedSource {}

pub fn youtube_video_id(raw: &str) -> Option<&str> {
    YOUTUBE_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str())
}

pub fn youtube_embed_url(video_id: &str) -> String {
    format!("{YOUTUBE_EMBED_BASE}{video_id}?autoplay=1&mute=1&loop=1&playlist={video_id}")
}

pub fn is_image_file(url: &str) -> bool {
    IMAGE_FILE_PATTERN.is_match(url)
}

pub fn is_direct_video(url: &str) -> bool {
    VIDEO_FILE_PATTERN.is_match(url)
}

/// `video/<ext>` from the last extension of the path. The query string is
/// dropped first, so dots inside it never leak into the type.
pub fn video_mime_type(url: &str) -> Option<String> {
    let path = url.split('?').next().unwrap_or_default();
    let (_, extension) = path.rsplit_once('.')?;
    if extension.is_empty() || extension.contains('/') {
        return None;
    }
    Some(format!("video/{}", extension.to_ascii_lowercase()))
}

pub fn classify(raw: &str) -> SourceDescriptor {
    let kind = if raw.is_empty() {
        SourceKind::Unrecognized
    } else if youtube_video_id(raw).is_some() {
        SourceKind::YouTubeEmbed
    } else if is_image_file(raw) {
        SourceKind::ImageFile
    } else if is_direct_video(raw) {
        SourceKind::DirectVideoFile
    } else if raw.starts_with("https://") {
        SourceKind::RemoteGeneric
    } else {
        SourceKind::Unrecognized
    };
    SourceDescriptor {
        raw_url: raw.to_string(),
        kind,
    }
}

pub fn parse_playable(raw: &str) -> Result<PlayableSource, UnsupportedSource> {
    if raw.is_empty() {
        return Err(UnsupportedSource::Empty);
    }
    if let Some(video_id) = youtube_video_id(raw) {
        return Ok(PlayableSource {
            kind: SourceKind::YouTubeEmbed,
            url: youtube_embed_url(video_id),
        });
    }
    let descriptor = classify(raw);
    match descriptor.kind {
        SourceKind::ImageFile => Err(UnsupportedSource::ImageFile),
        SourceKind::Unrecognized => Err(UnsupportedSource::Unrecognized),
        kind => Ok(PlayableSource {
            kind,
            url: descriptor.raw_url,
        }),
    }
}

/// Normalized playable URL, or `None` when the input is not a supported video source.
pub fn playable_url(raw: &str) -> Option<String> {
    parse_playable(raw).ok().map(PlayableSource::into_url)
}
