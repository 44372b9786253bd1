use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;

const COVER_MS: u32 = 750;
const UNCOVER_MS: u32 = 600;

/// Overlay shown while jumping between in-page sections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransitionState {
    active: bool,
    epoch: u64,
}

impl TransitionState {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn begin(&mut self) -> u64 {
        self.epoch += 1;
        self.active = true;
        self.epoch
    }

    /// Clears the overlay unless a newer jump started in the meantime.
    pub fn finish(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.active = false;
        true
    }
}

pub fn section_anchor(href: &str) -> Option<&str> {
    href.starts_with('#').then_some(href)
}

#[cfg(target_arch = "wasm32")]
fn set_location_hash(anchor: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_hash(anchor);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn set_location_hash(_anchor: &str) {}

#[component]
pub fn SectionLink(href: String, class: Option<String>, children: Element) -> Element {
    let mut transition = use_context::<Signal<TransitionState>>();
    let class = class.unwrap_or_default();
    let target = href.clone();

    rsx! {
        a {
            href: "{href}",
            class: "{class}",
            onclick: move |event| {
                let Some(anchor) = section_anchor(&target) else {
                    return;
                };
                event.prevent_default();
                let anchor = anchor.to_string();
                let epoch = transition.write().begin();
                tracing::debug!("transition: {anchor}");
                spawn(async move {
                    TimeoutFuture::new(COVER_MS).await;
                    set_location_hash(&anchor);
                    TimeoutFuture::new(UNCOVER_MS).await;
                    transition.write().finish(epoch);
                });
            },
            {children}
        }
    }
}

#[component]
pub fn SectionTransitionOverlay() -> Element {
    let transition = use_context::<Signal<TransitionState>>();
    let suffix = if transition().is_active() { " active" } else { "" };

    rsx! {
        div { class: "section-transition{suffix}" }
        div { class: "loading-spinner{suffix}" }
    }
}
