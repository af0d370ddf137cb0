mod app_router;
mod controls_timer;
mod local_media;
mod stage_view;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    yew_app::run();
}
