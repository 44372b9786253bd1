use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

const STEP_PX: f64 = 400.0;
const END_PADDING_PX: f64 = 40.0;

#[cfg(target_arch = "wasm32")]
struct ResizeListener {
    closure: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackWidths {
    pub content: f64,
    pub container: f64,
}

impl TrackWidths {
    /// Most negative offset that still shows the end of the track. Never above 0.
    pub fn min_offset(&self) -> f64 {
        let bound = -(self.content - self.container + END_PADDING_PX);
        bound.min(0.0)
    }
}

/// Horizontal translation of the project track, always within `[min_offset, 0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarouselOffset {
    position: f64,
}

impl CarouselOffset {
    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn next(&mut self, widths: TrackWidths) {
        self.position = (self.position - STEP_PX).max(widths.min_offset());
    }

    pub fn previous(&mut self) {
        self.position = (self.position + STEP_PX).min(0.0);
    }

    pub fn reset(&mut self) {
        self.position = 0.0;
    }

    pub fn transform(&self) -> String {
        format!("translateX({}px)", self.position)
    }
}

#[cfg(target_arch = "wasm32")]
fn measure_track(track: &web_sys::HtmlElement) -> Option<TrackWidths> {
    let parent = track.parent_element()?.dyn_into::<web_sys::HtmlElement>().ok()?;
    Some(TrackWidths {
        content: f64::from(track.offset_width()),
        container: f64::from(parent.offset_width()),
    })
}

#[component]
pub fn Carousel(children: Element) -> Element {
    let mut offset = use_signal(CarouselOffset::default);
    #[cfg(target_arch = "wasm32")]
    let mut track = use_signal(|| None::<web_sys::HtmlElement>);
    #[cfg(not(target_arch = "wasm32"))]
    let _track = ();
    #[cfg(target_arch = "wasm32")]
    let mut resize_listener = use_signal(|| None::<ResizeListener>);
    #[cfg(not(target_arch = "wasm32"))]
    let _resize_listener = ();

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            use wasm_bindgen::closure::Closure;

            if resize_listener.peek().is_some() {
                return;
            }
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut on_resize_offset = offset;
            let closure = Rc::new(Closure::wrap(Box::new(move |_event: web_sys::Event| {
                on_resize_offset.write().reset();
            }) as Box<dyn FnMut(_)>));
            let _ = window.add_event_listener_with_callback(
                "resize",
                closure.as_ref().as_ref().unchecked_ref(),
            );
            resize_listener.set(Some(ResizeListener { closure }));
        });

        let resize_listener = resize_listener;
        use_drop(move || {
            if let Some(listener) = resize_listener.read().as_ref() {
                if let Some(window) = web_sys::window() {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        listener.closure.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let transform = offset.read().transform();

    rsx! {
        div { class: "carousel-wrapper",
            button {
                r#type: "button",
                class: "carousel-btn prev-btn",
                aria_label: "Previous projects",
                onclick: move |_| {
                    tracing::debug!("carousel: previous");
                    offset.write().previous();
                },
                "❮"
            }
            div { class: "carousel-viewport",
                div {
                    class: "project-carousel",
                    style: "transform: {transform}",
                    onmounted: move |_event| {
                        #[cfg(target_arch = "wasm32")]
                        {
                            let element = _event.data.as_ref().as_web_event();
                            if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                                track.set(Some(node));
                            }
                        }
                    },
                    {children}
                }
            }
            button {
                r#type: "button",
                class: "carousel-btn next-btn",
                aria_label: "Next projects",
                onclick: move |_| {
                    tracing::debug!("carousel: next");
                    #[cfg(target_arch = "wasm32")]
                    {
                        let Some(widths) = track.read().as_ref().and_then(measure_track) else {
                            return;
                        };
                        offset.write().next(widths);
                    }
                },
                "❯"
            }
        }
    }
}
