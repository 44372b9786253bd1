use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
const THEME_ATTRIBUTE: &str = "data-theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Unset or unknown attribute values read as `System`.
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::System,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "☀",
            Self::Dark => "☾",
            Self::System => "◐",
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn document_theme(_fallback: Theme) -> Theme {
    let value = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .and_then(|root| root.get_attribute(THEME_ATTRIBUTE));
    Theme::from_attribute(value.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn document_theme(fallback: Theme) -> Theme {
    fallback
}

#[cfg(target_arch = "wasm32")]
fn apply_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    let _ = root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_theme(_theme: Theme) {}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_signal(|| document_theme(Theme::System));
    let current = theme();

    rsx! {
        button {
            id: "theme-toggle",
            r#type: "button",
            class: "theme-toggle",
            aria_label: "Switch theme (current: {current.as_str()})",
            title: "Theme: {current.as_str()}",
            onclick: move |_| {
                let next = document_theme(theme()).next();
                apply_theme(next);
                tracing::debug!("theme: {}", next.as_str());
                theme.set(next);
            },
            "{current.icon()}"
        }
    }
}
