pub mod asset;
pub mod auto_hide;
pub mod display;
pub mod player;
pub mod source;

pub use asset::{LocalAsset, LocalSelection, MediaCategory, ReadTicket, RejectedFile, VideoHandle};
pub use auto_hide::{AutoHide, HideToken, HIDE_DELAY_MS};
pub use display::{
    DisplayController, Stage, Wallpaper, LOCAL_LOAD_FAILED_MESSAGE, PLACEHOLDER_TEXT,
    UNSUPPORTED_URL_MESSAGE,
};
pub use player::{Opacity, PlayerState, OPACITY_DEFAULT, OPACITY_MAX, OPACITY_MIN, OPACITY_STEP};
pub use source::{
    classify, parse_playable, playable_url, PlayableSource, RenderMode, SourceDescriptor,
    SourceKind, UnsupportedSource,
};
