use web_sys::HtmlMediaElement;
use yew::prelude::*;

use kabegami_core::{Opacity, PlayableSource, RenderMode, Stage, Wallpaper, LOCAL_LOAD_FAILED_MESSAGE};

const EMBED_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";
const EMBED_TITLE: &str = "Wallpaper Video";
const VIDEO_FALLBACK_TEXT: &str = "Your browser does not support the video tag.";

#[derive(Properties, PartialEq)]
pub(crate) struct MutedVideoProps {
    pub(crate) src: AttrValue,
    #[prop_or_default]
    pub(crate) mime: Option<AttrValue>,
    #[prop_or_default]
    pub(crate) class: Classes,
    #[prop_or_default]
    pub(crate) style: Option<AttrValue>,
    #[prop_or_default]
    pub(crate) controls: bool,
    #[prop_or_default]
    pub(crate) onerror: Callback<Event>,
}

/// Looping autoplay video. The `muted` attribute alone does not set the
/// property, and browsers only autoplay muted media.
#[function_component(MutedVideo)]
pub(crate) fn muted_video(props: &MutedVideoProps) -> Html {
    let node = use_node_ref();
    {
        let node = node.clone();
        use_effect_with(props.src.clone(), move |_| {
            if let Some(video) = node.cast::<HtmlMediaElement>() {
                video.set_muted(true);
                let _ = video.play();
            }
            || ()
        });
    }
    let onerror = props.onerror.clone();
    match &props.mime {
        Some(mime) => html! {
            <video
                ref={node}
                class={props.class.clone()}
                style={props.style.clone()}
                controls={props.controls}
                autoplay={true}
                muted={true}
                loop={true}
                playsinline={true}
                {onerror}
            >
                <source src={props.src.clone()} type={mime.clone()} />
                { VIDEO_FALLBACK_TEXT }
            </video>
        },
        None => html! {
            <video
                ref={node}
                class={props.class.clone()}
                style={props.style.clone()}
                src={props.src.clone()}
                controls={props.controls}
                autoplay={true}
                muted={true}
                loop={true}
                playsinline={true}
                {onerror}
            />
        },
    }
}

pub(crate) fn render_stage(stage: &Stage<'_>, on_media_error: &Callback<Event>) -> Html {
    match stage {
        Stage::Error(message) => html! {
            <p class="stage-message stage-error">{ *message }</p>
        },
        Stage::Placeholder(text) => html! {
            <p class="stage-message stage-placeholder">{ *text }</p>
        },
        Stage::Scene {
            wallpaper,
            foreground,
            opacity,
        } => {
            let wallpaper = match wallpaper {
                Some(wallpaper) => render_wallpaper(*wallpaper, on_media_error),
                None => html! {},
            };
            let foreground = match foreground {
                Some(source) => render_foreground(source, *opacity),
                None => html! {},
            };
            html! {
                <>
                    { wallpaper }
                    { foreground }
                </>
            }
        }
    }
}

fn render_wallpaper(wallpaper: Wallpaper<'_>, on_media_error: &Callback<Event>) -> Html {
    match wallpaper {
        Wallpaper::Image(url) => html! {
            <img
                class="wallpaper wallpaper-image"
                src={url.to_string()}
                alt=""
                onerror={on_media_error.clone()}
            />
        },
        Wallpaper::Video(url) => html! {
            <MutedVideo
                key={url.to_string()}
                src={AttrValue::from(url.to_string())}
                class={classes!("wallpaper", "wallpaper-video")}
                onerror={on_media_error.clone()}
            />
        },
        Wallpaper::Failed => html! {
            <p class="stage-message stage-error">{ LOCAL_LOAD_FAILED_MESSAGE }</p>
        },
    }
}

fn render_foreground(source: &PlayableSource, opacity: Opacity) -> Html {
    let style = format!("opacity: {};", opacity.css_value());
    let url = source.url().to_string();
    match source.render_mode() {
        RenderMode::Embed => html! {
            <iframe
                key={url.clone()}
                class="player-frame"
                src={url}
                title={EMBED_TITLE}
                frameborder="0"
                allow={EMBED_ALLOW}
                allowfullscreen={true}
                {style}
            />
        },
        RenderMode::Video => html! {
            <MutedVideo
                key={url.clone()}
                src={AttrValue::from(url.clone())}
                mime={source.mime_type().map(AttrValue::from)}
                class={classes!("player-video")}
                style={AttrValue::from(style)}
                controls={true}
            />
        },
    }
}
