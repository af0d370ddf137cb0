use std::cell::OnceCell;

use web_sys::UrlSearchParams;

/// Startup options taken from the page query string,
/// e.g. `?url=https://youtu.be/dQw4w9WgXcQ&opacity=0.5&fullscreen`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct InitConfig {
    pub(crate) url: Option<String>,
    pub(crate) opacity: Option<f64>,
    pub(crate) fullscreen: bool,
}

thread_local! {
    static INIT_CONFIG: OnceCell<InitConfig> = const { OnceCell::new() };
}

/// Parsed once per page load.
pub(crate) fn init_config() -> InitConfig {
    INIT_CONFIG.with(|slot| slot.get_or_init(load_init_config).clone())
}

pub(crate) fn load_init_config() -> InitConfig {
    let Some(window) = web_sys::window() else {
        return InitConfig::default();
    };
    let search = window.location().search().unwrap_or_default();
    parse_init_config(&search)
}

pub(crate) fn parse_init_config(search: &str) -> InitConfig {
    let search = search.trim();
    if search.is_empty() || search == "?" {
        return InitConfig::default();
    }
    let Ok(params) = UrlSearchParams::new_with_str(search) else {
        gloo::console::warn!("ignoring unreadable query string", search.to_string());
        return InitConfig::default();
    };
    let url = params
        .get("url")
        .or_else(|| params.get("src"))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let opacity = params.get("opacity").and_then(|raw| {
        let parsed = parse_opacity(&raw);
        if parsed.is_none() {
            gloo::console::warn!("ignoring opacity outside 0..1", raw);
        }
        parsed
    });
    let fullscreen = match params.get("fullscreen") {
        Some(raw) => parse_flag(&raw).unwrap_or_else(|| {
            gloo::console::warn!("ignoring fullscreen flag", raw);
            false
        }),
        None => false,
    };
    InitConfig {
        url,
        opacity,
        fullscreen,
    }
}

fn parse_opacity(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    (0.0..=1.0).contains(&value).then_some(value)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
