use std::rc::Rc;

use gloo::file::callbacks::FileReader;
use web_sys::{Event, HtmlInputElement, InputEvent, MouseEvent};
use yew::prelude::*;

use kabegami_core::{
    DisplayController, MediaCategory, PlayableSource, HIDE_DELAY_MS, OPACITY_MAX, OPACITY_MIN,
    OPACITY_STEP,
};

use crate::app_router;
use crate::controls_timer::ControlsTimer;
use crate::local_media::{self, ObjectUrl};
use crate::stage_view;

type Controller = DisplayController<ObjectUrl>;

const APP_ROOT_ID: &str = "app";
const URL_PLACEHOLDER: &str = "e.g., YouTube, Vimeo, .mp4, .webm";
const FILE_ACCEPT: &str = "image/*,video/*";

fn initial_controller() -> Controller {
    let config = app_router::init_config();
    let mut controller = Controller::new();
    if let Some(opacity) = config.opacity {
        controller.set_opacity(opacity);
    }
    if let Some(url) = config.url {
        controller.set_url_input(url);
        match controller.create().map(PlayableSource::url).map(str::to_string) {
            Some(url) => gloo::console::log!("wallpaper from query", url),
            None => gloo::console::warn!("unsupported url in query", controller.url_input().to_string()),
        }
    }
    if config.fullscreen {
        controller.toggle_fullscreen();
    }
    controller
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let controller = use_mut_ref(initial_controller);
    let ui_revision = use_state(|| 0u32);
    let pending_read = use_mut_ref(|| None::<FileReader>);
    let hide_timer = use_mut_ref(ControlsTimer::new);

    let refresh: Rc<dyn Fn()> = {
        let ui_revision = ui_revision.clone();
        Rc::new(move || ui_revision.set(ui_revision.wrapping_add(1)))
    };

    {
        let hide_timer = hide_timer.clone();
        let pending_read = pending_read.clone();
        use_effect_with((), move |_| {
            move || {
                hide_timer.borrow_mut().cancel();
                pending_read.borrow_mut().take();
            }
        });
    }

    let on_url_input = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            controller.borrow_mut().set_url_input(input.value());
            refresh();
        })
    };

    let on_create = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            {
                let mut controller = controller.borrow_mut();
                let created = controller.create().map(PlayableSource::url).map(str::to_string);
                match created {
                    Some(url) => gloo::console::log!("wallpaper source", url),
                    None if controller.shows_error() => gloo::console::warn!(
                        "unsupported video url",
                        controller.url_input().to_string()
                    ),
                    None => gloo::console::log!("wallpaper source cleared"),
                }
            }
            refresh();
        })
    };

    let on_file_change = {
        let controller = controller.clone();
        let pending_read = pending_read.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(file) = local_media::first_selected_file(&input) else {
                pending_read.borrow_mut().take();
                controller.borrow_mut().clear_local();
                refresh();
                return;
            };
            let category = match Controller::route_file(&file.type_()) {
                Ok(category) => category,
                Err(err) => {
                    gloo::console::warn!(
                        "ignoring local file",
                        local_media::describe_file(&file),
                        err.to_string()
                    );
                    return;
                }
            };
            gloo::console::log!("local wallpaper", local_media::describe_file(&file));
            match category {
                MediaCategory::Image => {
                    let ticket = controller.borrow_mut().begin_image();
                    let controller = controller.clone();
                    let refresh = refresh.clone();
                    let reader = local_media::read_image_data_url(file, move |result| {
                        let applied = match result {
                            Ok(data_url) => controller.borrow_mut().complete_image(ticket, data_url),
                            Err(message) => {
                                gloo::console::warn!(message);
                                controller.borrow_mut().fail_image(ticket)
                            }
                        };
                        if applied {
                            refresh();
                        }
                    });
                    *pending_read.borrow_mut() = Some(reader);
                }
                MediaCategory::Video => {
                    pending_read.borrow_mut().take();
                    match ObjectUrl::from_blob(&file) {
                        Ok(url) => controller.borrow_mut().set_video(url),
                        Err(message) => {
                            gloo::console::warn!(message);
                            controller.borrow_mut().mark_local_failed();
                        }
                    }
                }
            }
            refresh();
        })
    };

    let on_media_error = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: Event| {
            gloo::console::warn!("local wallpaper failed to load");
            controller.borrow_mut().mark_local_failed();
            refresh();
        })
    };

    let on_opacity_input = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            if let Ok(value) = input.value().parse::<f64>() {
                controller.borrow_mut().set_opacity(value);
                refresh();
            }
        })
    };

    let on_toggle_fullscreen = {
        let controller = controller.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            controller.borrow_mut().toggle_fullscreen();
            refresh();
        })
    };

    let on_pointer_enter = {
        let controller = controller.clone();
        let hide_timer = hide_timer.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            hide_timer.borrow_mut().cancel();
            controller.borrow_mut().pointer_enter();
            refresh();
        })
    };

    let on_pointer_leave = {
        let controller = controller.clone();
        let hide_timer = hide_timer.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            let token = controller.borrow_mut().pointer_leave();
            let controller = controller.clone();
            let refresh = refresh.clone();
            hide_timer.borrow_mut().arm(HIDE_DELAY_MS, move || {
                if controller.borrow_mut().expire_controls(token) {
                    refresh();
                }
            });
        })
    };

    let view = controller.borrow();
    let player = view.player();
    let fullscreen = player.fullscreen;
    let opacity = player.opacity;
    let stage = view.stage();

    let fullscreen_button = if view.fullscreen_control_visible() {
        let label = player.fullscreen_label();
        html! {
            <button
                class={classes!(
                    "fullscreen-toggle",
                    if fullscreen { "on-dark" } else { "on-light" }
                )}
                aria-label={label}
                title={label}
                onclick={on_toggle_fullscreen}
            >
                { if fullscreen { "⤡" } else { "⤢" } }
            </button>
        }
    } else {
        html! {}
    };

    html! {
        <div class="page">
            <header class="page-header">
                <h1>{ "🎧 Cool Audio Player" }</h1>
                <p class="tagline">
                    { "Turn any video into an immersive, visually engaging wallpaper experience." }
                </p>
            </header>
            <main class="page-main">
                <section class="panel">
                    <h2>{ "1. Enter Video URL" }</h2>
                    <input
                        id="video-url"
                        type="text"
                        placeholder={URL_PLACEHOLDER}
                        value={view.url_input().to_string()}
                        oninput={on_url_input}
                    />
                    <h2>{ "2. Select Background Image or Video" }</h2>
                    <input
                        id="wallpaper-file"
                        type="file"
                        accept={FILE_ACCEPT}
                        onchange={on_file_change}
                    />
                    <button
                        id="create-wallpaper"
                        class="primary"
                        onclick={on_create}
                        disabled={!view.can_create()}
                    >
                        { "Create Wallpaper" }
                    </button>
                    <div class="control">
                        <label for="opacity-slider">
                            { format!("Player Opacity: {opacity}") }
                        </label>
                        <input
                            id="opacity-slider"
                            type="range"
                            min={OPACITY_MIN.to_string()}
                            max={OPACITY_MAX.to_string()}
                            step={OPACITY_STEP.to_string()}
                            value={opacity.value().to_string()}
                            oninput={on_opacity_input}
                        />
                    </div>
                </section>
                <div
                    id="player"
                    class={classes!("player", fullscreen.then_some("player-fullscreen"))}
                    onmouseenter={on_pointer_enter}
                    onmouseleave={on_pointer_leave}
                >
                    { fullscreen_button }
                    { stage_view::render_stage(&stage, &on_media_error) }
                </div>
            </main>
            <footer class="page-footer">
                <p>{ "© 2025 Cool Audio Player. Built with Rust and Yew." }</p>
            </footer>
        </div>
    }
}

pub(crate) fn run() {
    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(APP_ROOT_ID));
    match root {
        Some(root) => {
            let _app_handle = yew::Renderer::<App>::with_root(root).render();
        }
        None => {
            gloo::console::warn!("missing #app root, rendering into body");
            let _app_handle = yew::Renderer::<App>::new().render();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use js_sys::Date;
    use kabegami_core::{LOCAL_LOAD_FAILED_MESSAGE, PLACEHOLDER_TEXT, UNSUPPORTED_URL_MESSAGE};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{DataTransfer, Element, EventInit, File, FilePropertyBag, HtmlElement};

    /// 1x1 transparent GIF.
    const PIXEL_GIF: [u8; 43] = [
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
        0x00, 0xFF, 0xFF, 0xFF, 0x21, 0xF9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
        0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3B,
    ];

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(id: &str) -> Element {
        set_panic_hook();
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        root.set_id(id);
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let _app_handle = yew::Renderer::<App>::with_root(root.clone()).render();
        root
    }

    async fn wait_for<F>(what: &str, mut ready: F)
    where
        F: FnMut() -> bool,
    {
        let start = Date::now();
        while !ready() {
            if Date::now() - start > 2000.0 {
                panic!("timed out waiting for {what}");
            }
            TimeoutFuture::new(10).await;
        }
    }

    fn query(root: &Element, selector: &str) -> Option<Element> {
        root.query_selector(selector).ok().flatten()
    }

    fn type_url(root: &Element, value: &str) {
        let input: HtmlInputElement = query(root, "#video-url")
            .expect("url input")
            .dyn_into()
            .expect("input element");
        input.set_value(value);
        dispatch(&input, "input");
    }

    fn click(root: &Element, selector: &str) {
        let element: HtmlElement = query(root, selector)
            .expect("clickable element")
            .dyn_into()
            .expect("html element");
        element.click();
    }

    fn dispatch(target: &Element, kind: &str) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict(kind, &init).expect("event");
        target.dispatch_event(&event).expect("dispatch event");
    }

    fn hover(root: &Element, kind: &str) {
        let player = query(root, "#player").expect("player");
        let event = MouseEvent::new(kind).expect("mouse event");
        player.dispatch_event(&event).expect("dispatch mouse event");
    }

    fn make_file(name: &str, mime: &str, bytes: &[u8]) -> File {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes).buffer());
        let options = FilePropertyBag::new();
        options.set_type(mime);
        File::new_with_u8_array_sequence_and_options(&parts, name, &options).expect("create file")
    }

    /// Replaces the picker's selection and fires `change`; `None` clears it.
    fn pick_file(root: &Element, file: Option<File>) {
        let element = query(root, "#wallpaper-file").expect("file input");
        let input: HtmlInputElement = element.clone().dyn_into().expect("input element");
        let transfer = DataTransfer::new().expect("data transfer");
        if let Some(file) = file {
            transfer.items().add_with_file(&file).expect("add file");
        }
        input.set_files(transfer.files().as_ref());
        dispatch(&element, "change");
    }

    fn wallpaper_image_src(root: &Element) -> Option<String> {
        query(root, "img.wallpaper-image").and_then(|img| img.get_attribute("src"))
    }

    fn stage_text(root: &Element) -> String {
        query(root, "#player")
            .and_then(|player| player.text_content())
            .unwrap_or_default()
    }

    #[wasm_bindgen_test(async)]
    async fn starts_with_placeholder_and_disabled_create() {
        let root = mount("app-test-placeholder");
        wait_for("player", || query(&root, "#player").is_some()).await;
        assert!(stage_text(&root).contains(PLACEHOLDER_TEXT));
        let button = query(&root, "#create-wallpaper").expect("create button");
        assert!(button.has_attribute("disabled"));
        let label = query(&root, "label[for=opacity-slider]")
            .and_then(|label| label.text_content())
            .unwrap_or_default();
        assert_eq!(label, "Player Opacity: 75%");
    }

    #[wasm_bindgen_test(async)]
    async fn youtube_link_renders_embed_iframe() {
        let root = mount("app-test-youtube");
        wait_for("url input", || query(&root, "#video-url").is_some()).await;
        type_url(&root, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        wait_for("enabled create", || {
            query(&root, "#create-wallpaper")
                .map(|button| !button.has_attribute("disabled"))
                .unwrap_or(false)
        })
        .await;
        click(&root, "#create-wallpaper");
        wait_for("iframe", || query(&root, "iframe.player-frame").is_some()).await;
        let iframe = query(&root, "iframe.player-frame").expect("iframe");
        assert_eq!(
            iframe.get_attribute("src").as_deref(),
            Some(
                "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&mute=1&loop=1&playlist=dQw4w9WgXcQ"
            )
        );
        assert_eq!(iframe.get_attribute("style").as_deref(), Some("opacity: 0.75;"));
    }

    #[wasm_bindgen_test(async)]
    async fn direct_file_renders_video_with_source_type() {
        let root = mount("app-test-direct");
        wait_for("url input", || query(&root, "#video-url").is_some()).await;
        type_url(&root, "https://cdn.example.com/loop.webm?v=2");
        wait_for("enabled create", || {
            query(&root, "#create-wallpaper")
                .map(|button| !button.has_attribute("disabled"))
                .unwrap_or(false)
        })
        .await;
        click(&root, "#create-wallpaper");
        wait_for("video source", || query(&root, "video.player-video source").is_some()).await;
        let source = query(&root, "video.player-video source").expect("source");
        assert_eq!(source.get_attribute("type").as_deref(), Some("video/webm"));
        assert!(query(&root, "iframe").is_none());
    }

    #[wasm_bindgen_test(async)]
    async fn unsupported_link_shows_error_message() {
        let root = mount("app-test-unsupported");
        wait_for("url input", || query(&root, "#video-url").is_some()).await;
        type_url(&root, "https://example.com/photo.jpg");
        wait_for("enabled create", || {
            query(&root, "#create-wallpaper")
                .map(|button| !button.has_attribute("disabled"))
                .unwrap_or(false)
        })
        .await;
        click(&root, "#create-wallpaper");
        wait_for("error", || query(&root, ".stage-error").is_some()).await;
        assert!(stage_text(&root).contains(UNSUPPORTED_URL_MESSAGE));

        type_url(&root, "https://example.com/photo.jp");
        wait_for("error cleared", || query(&root, ".stage-error").is_none()).await;
        assert!(stage_text(&root).contains(PLACEHOLDER_TEXT));
    }

    #[wasm_bindgen_test(async)]
    async fn picker_alternates_image_and_video_wallpaper() {
        let root = mount("app-test-picker");
        wait_for("file input", || query(&root, "#wallpaper-file").is_some()).await;

        pick_file(&root, Some(make_file("pixel.gif", "image/gif", &PIXEL_GIF)));
        wait_for("image wallpaper", || wallpaper_image_src(&root).is_some()).await;
        let src = wallpaper_image_src(&root).unwrap_or_default();
        assert!(src.starts_with("data:image/gif;base64,"), "got {src}");
        assert!(!stage_text(&root).contains(PLACEHOLDER_TEXT));

        pick_file(&root, Some(make_file("loop.webm", "video/webm", &[0x1A, 0x45, 0xDF, 0xA3])));
        // The bytes are not a playable stream, so the element may report a load
        // error right after it appears.
        wait_for("video wallpaper", || {
            query(&root, "img.wallpaper-image").is_none()
                && (query(&root, "video.wallpaper-video").is_some()
                    || stage_text(&root).contains(LOCAL_LOAD_FAILED_MESSAGE))
        })
        .await;
        if let Some(video) = query(&root, "video.wallpaper-video") {
            let src = video.get_attribute("src").unwrap_or_default();
            assert!(src.starts_with("blob:"), "got {src}");
        }

        pick_file(&root, Some(make_file("pixel.gif", "image/gif", &PIXEL_GIF)));
        wait_for("image wallpaper again", || wallpaper_image_src(&root).is_some()).await;
        assert!(query(&root, "video.wallpaper-video").is_none());
        assert!(!stage_text(&root).contains(LOCAL_LOAD_FAILED_MESSAGE));
    }

    #[wasm_bindgen_test(async)]
    async fn picker_ignores_non_media_and_clears_on_empty_selection() {
        let root = mount("app-test-picker-clear");
        wait_for("file input", || query(&root, "#wallpaper-file").is_some()).await;

        pick_file(&root, Some(make_file("pixel.gif", "image/gif", &PIXEL_GIF)));
        wait_for("image wallpaper", || wallpaper_image_src(&root).is_some()).await;
        let shown = wallpaper_image_src(&root);

        pick_file(&root, Some(make_file("notes.txt", "text/plain", b"hello")));
        TimeoutFuture::new(100).await;
        assert_eq!(wallpaper_image_src(&root), shown);

        pick_file(&root, None);
        wait_for("placeholder", || stage_text(&root).contains(PLACEHOLDER_TEXT)).await;
        assert!(query(&root, "img.wallpaper-image").is_none());
    }

    #[wasm_bindgen_test(async)]
    async fn hover_shows_toggle_and_click_enters_fullscreen() {
        let root = mount("app-test-fullscreen");
        wait_for("url input", || query(&root, "#video-url").is_some()).await;
        type_url(&root, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        wait_for("enabled create", || {
            query(&root, "#create-wallpaper")
                .map(|button| !button.has_attribute("disabled"))
                .unwrap_or(false)
        })
        .await;
        click(&root, "#create-wallpaper");
        wait_for("iframe", || query(&root, "iframe.player-frame").is_some()).await;
        assert!(query(&root, ".fullscreen-toggle").is_none());

        hover(&root, "mouseenter");
        wait_for("toggle", || query(&root, ".fullscreen-toggle").is_some()).await;
        let toggle = query(&root, ".fullscreen-toggle").expect("toggle");
        assert_eq!(toggle.get_attribute("aria-label").as_deref(), Some("Enter Fullscreen"));

        click(&root, ".fullscreen-toggle");
        wait_for("fullscreen", || {
            query(&root, "#player.player-fullscreen").is_some()
        })
        .await;
        let toggle = query(&root, ".fullscreen-toggle").expect("toggle");
        assert_eq!(toggle.get_attribute("aria-label").as_deref(), Some("Exit Fullscreen"));

        hover(&root, "mouseleave");
        TimeoutFuture::new(HIDE_DELAY_MS - 1_000).await;
        assert!(query(&root, ".fullscreen-toggle").is_some());
        TimeoutFuture::new(1_500).await;
        assert!(query(&root, ".fullscreen-toggle").is_none());
        assert!(query(&root, "#player.player-fullscreen").is_some());
    }
}
