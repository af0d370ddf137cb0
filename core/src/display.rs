//! UI state for the wallpaper page and the decision of what goes on stage.

use crate::asset::{LocalAsset, LocalSelection, MediaCategory, ReadTicket, RejectedFile, VideoHandle};
use crate::auto_hide::{AutoHide, HideToken};
use crate::player::{Opacity, PlayerState};
use crate::source::{parse_playable, PlayableSource};

pub const UNSUPPORTED_URL_MESSAGE: &str =
    "Unsupported video URL or format. Please use a valid YouTube, .mp4, .webm, or .ogg link.";
pub const LOCAL_LOAD_FAILED_MESSAGE: &str = "Failed to load the selected file.";
pub const PLACEHOLDER_TEXT: &str = "Audio-Visual Wallpaper Display Area";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wallpaper<'a> {
    Image(&'a str),
    Video(&'a str),
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage<'a> {
    Error(&'static str),
    Scene {
        wallpaper: Option<Wallpaper<'a>>,
        foreground: Option<&'a PlayableSource>,
        opacity: Opacity,
    },
    Placeholder(&'static str),
}

impl Stage<'_> {
    pub fn has_content(&self) -> bool {
        matches!(self, Stage::Scene { .. })
    }
}

pub struct DisplayController<V> {
    url_input: String,
    attempted: bool,
    playable: Option<PlayableSource>,
    local: LocalSelection<V>,
    player: PlayerState,
    controls: AutoHide,
}

impl<V> Default for DisplayController<V> {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            attempted: false,
            playable: None,
            local: LocalSelection::default(),
            player: PlayerState::default(),
            controls: AutoHide::default(),
        }
    }
}

impl<V: VideoHandle> DisplayController<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn attempted(&self) -> bool {
        self.attempted
    }

    pub fn playable(&self) -> Option<&PlayableSource> {
        self.playable.as_ref()
    }

    pub fn local(&self) -> &LocalSelection<V> {
        &self.local
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn can_create(&self) -> bool {
        !self.url_input.is_empty()
    }

    pub fn set_url_input(&mut self, value: impl Into<String>) {
        self.url_input = value.into();
        self.attempted = false;
    }

    /// The create/play action. Returns the newly active source, if any.
    pub fn create(&mut self) -> Option<&PlayableSource> {
        self.attempted = true;
        self.playable = if self.url_input.is_empty() {
            None
        } else {
            parse_playable(&self.url_input).ok()
        };
        self.playable.as_ref()
    }

    pub fn route_file(mime: &str) -> Result<MediaCategory, RejectedFile> {
        MediaCategory::from_mime(mime).ok_or(RejectedFile::UnsupportedType)
    }

    pub fn begin_image(&mut self) -> ReadTicket {
        self.local.begin_image()
    }

    pub fn complete_image(&mut self, ticket: ReadTicket, data_url: String) -> bool {
        self.local.complete_image(ticket, data_url)
    }

    pub fn fail_image(&mut self, ticket: ReadTicket) -> bool {
        self.local.fail_image(ticket)
    }

    pub fn set_video(&mut self, handle: V) {
        self.local.set_video(handle);
    }

    pub fn clear_local(&mut self) {
        self.local.clear();
    }

    pub fn mark_local_failed(&mut self) {
        self.local.mark_failed();
    }

    pub fn set_opacity(&mut self, value: f64) {
        self.player.set_opacity(value);
    }

    pub fn toggle_fullscreen(&mut self) -> bool {
        self.player.toggle_fullscreen()
    }

    pub fn pointer_enter(&mut self) {
        self.controls.pointer_enter();
    }

    pub fn pointer_leave(&mut self) -> HideToken {
        self.controls.pointer_leave()
    }

    pub fn expire_controls(&mut self, token: HideToken) -> bool {
        self.controls.expire(token)
    }

    pub fn shows_error(&self) -> bool {
        self.attempted && !self.url_input.is_empty() && self.playable.is_none()
    }

    pub fn stage(&self) -> Stage<'_> {
        if self.shows_error() {
            return Stage::Error(UNSUPPORTED_URL_MESSAGE);
        }
        let wallpaper = match self.local.asset() {
            LocalAsset::Video(handle) => Some(Wallpaper::Video(handle.url())),
            LocalAsset::Image { data_url } => Some(Wallpaper::Image(data_url.as_str())),
            LocalAsset::Failed => Some(Wallpaper::Failed),
            LocalAsset::None | LocalAsset::PendingImage(_) => None,
        };
        let foreground = self.playable.as_ref();
        if wallpaper.is_none() && foreground.is_none() {
            return Stage::Placeholder(PLACEHOLDER_TEXT);
        }
        Stage::Scene {
            wallpaper,
            foreground,
            opacity: self.player.opacity,
        }
    }

    /// While fullscreen the toggle is the only way out, so it is offered even
    /// over an error or the placeholder.
    pub fn fullscreen_control_visible(&self) -> bool {
        self.controls.is_visible() && (self.player.fullscreen || self.stage().has_content())
    }
}
