//! The locally picked wallpaper file.
//!
//! Images are shown from a data URL that arrives asynchronously; videos are
//! shown from an object URL owned by a handle `V`. Whatever handle is replaced
//! or cleared is dropped right away, so a handle that revokes its URL on drop
//! never leaks.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    Image,
    Video,
}

impl MediaCategory {
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(MediaCategory::Image)
        } else if mime.starts_with("video/") {
            Some(MediaCategory::Video)
        } else {
            None
        }
    }
}

pub trait VideoHandle {
    fn url(&self) -> &str;
}

impl VideoHandle for String {
    fn url(&self) -> &str {
        self
    }
}

/// Identifies one image selection; completions carrying an older ticket are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

pub enum LocalAsset<V> {
    None,
    PendingImage(ReadTicket),
    Image { data_url: String },
    Video(V),
    Failed,
}

impl<V> Default for LocalAsset<V> {
    fn default() -> Self {
        LocalAsset::None
    }
}

impl<V> fmt::Debug for LocalAsset<V>
where
    V: VideoHandle,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalAsset::None => f.write_str("None"),
            LocalAsset::PendingImage(ticket) => write!(f, "PendingImage({ticket:?})"),
            LocalAsset::Image { data_url } => write!(f, "Image({} bytes)", data_url.len()),
            LocalAsset::Video(handle) => write!(f, "Video({})", handle.url()),
            LocalAsset::Failed => f.write_str("Failed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectedFile {
    UnsupportedType,
}

impl fmt::Display for RejectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectedFile::UnsupportedType => write!(f, "file is neither an image nor a video"),
        }
    }
}

impl std::error::Error for RejectedFile {}

/// Owns the current local asset and hands out read tickets.
pub struct LocalSelection<V> {
    asset: LocalAsset<V>,
    next_ticket: u64,
}

impl<V> Default for LocalSelection<V> {
    fn default() -> Self {
        Self {
            asset: LocalAsset::None,
            next_ticket: 0,
        }
    }
}

impl<V: VideoHandle> LocalSelection<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn asset(&self) -> &LocalAsset<V> {
        &self.asset
    }

    pub fn image_url(&self) -> Option<&str> {
        match &self.asset {
            LocalAsset::Image { data_url } => Some(data_url.as_str()),
            _ => None,
        }
    }

    pub fn video_url(&self) -> Option<&str> {
        match &self.asset {
            LocalAsset::Video(handle) => Some(handle.url()),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.asset, LocalAsset::Failed)
    }

    /// Starts an image selection; the previous asset is released immediately.
    pub fn begin_image(&mut self) -> ReadTicket {
        let ticket = ReadTicket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);
        self.asset = LocalAsset::PendingImage(ticket);
        ticket
    }

    /// Applies a finished image read. Returns `false` when a newer selection won.
    pub fn complete_image(&mut self, ticket: ReadTicket, data_url: String) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.asset = LocalAsset::Image { data_url };
        true
    }

    pub fn fail_image(&mut self, ticket: ReadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.asset = LocalAsset::Failed;
        true
    }

    pub fn set_video(&mut self, handle: V) {
        self.asset = LocalAsset::Video(handle);
    }

    /// Element-level load error, or a file that could not be turned into a URL.
    pub fn mark_failed(&mut self) {
        self.asset = LocalAsset::Failed;
    }

    pub fn clear(&mut self) {
        self.asset = LocalAsset::None;
    }

    fn is_current(&self, ticket: ReadTicket) -> bool {
        matches!(self.asset, LocalAsset::PendingImage(pending) if pending == ticket)
    }
}
