//! Viewport-triggered presentation classes.
//!
//! Four observers watch different parts of the page. The first time an
//! element intersects, its observer plans one or more [`RevealStep`]s and the
//! browser glue applies them, optionally after a delay. Classes are only ever
//! added, so an element scrolling back into view is left alone.

use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{JsCast, JsValue};

pub const ANIMATE_ON_SCROLL_CLASS: &str = "animate-on-scroll";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealEffect {
    Visible,
    /// Each entry in a callback batch waits `step_ms * index`.
    Cascade { step_ms: u32 },
    About {
        paragraph_base_ms: u32,
        paragraph_step_ms: u32,
        image_delay_ms: u32,
    },
    TitleReveal,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealObserver {
    pub name: &'static str,
    pub selector: &'static str,
    pub threshold: f64,
    pub root_margin: &'static str,
    pub effect: RevealEffect,
}

pub const OBSERVERS: [RevealObserver; 4] = [
    RevealObserver {
        name: "general",
        selector: ".section-title, .about-content, .project-card",
        threshold: 0.1,
        root_margin: "0px",
        effect: RevealEffect::Visible,
    },
    RevealObserver {
        name: "cascade",
        selector: ".project-card",
        threshold: 0.2,
        root_margin: "0px 0px -10% 0px",
        effect: RevealEffect::Cascade { step_ms: 150 },
    },
    RevealObserver {
        name: "about",
        selector: ".about-content, .about-image, .about-text",
        threshold: 0.3,
        root_margin: "0px 0px -15% 0px",
        effect: RevealEffect::About {
            paragraph_base_ms: 300,
            paragraph_step_ms: 200,
            image_delay_ms: 200,
        },
    },
    RevealObserver {
        name: "title",
        selector: ".section-title",
        threshold: 0.5,
        root_margin: "0px 0px -10% 0px",
        effect: RevealEffect::TitleReveal,
    },
];

/// What the glue found out about an intersecting element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetTraits {
    pub is_project_card: bool,
    pub is_about_content: bool,
    pub paragraph_count: usize,
    pub has_about_image: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTarget {
    Entry,
    Paragraph(usize),
    AboutImage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RevealStep {
    pub target: RevealTarget,
    pub delay_ms: u32,
    pub classes: Vec<&'static str>,
}

impl RevealStep {
    fn now(target: RevealTarget, classes: Vec<&'static str>) -> Self {
        Self {
            target,
            delay_ms: 0,
            classes,
        }
    }
}

impl RevealObserver {
    pub fn plan(&self, batch_index: usize, traits: &TargetTraits) -> Vec<RevealStep> {
        match self.effect {
            RevealEffect::Visible => vec![RevealStep::now(RevealTarget::Entry, vec!["visible"])],
            RevealEffect::Cascade { step_ms } => {
                let mut classes = vec!["visible"];
                if traits.is_project_card {
                    classes.push("pop-in");
                }
                vec![RevealStep {
                    target: RevealTarget::Entry,
                    delay_ms: step_ms.saturating_mul(batch_index as u32),
                    classes,
                }]
            }
            RevealEffect::About {
                paragraph_base_ms,
                paragraph_step_ms,
                image_delay_ms,
            } => {
                let mut steps = vec![RevealStep::now(RevealTarget::Entry, vec!["visible"])];
                if !traits.is_about_content {
                    return steps;
                }
                steps.extend((0..traits.paragraph_count).map(|idx| RevealStep {
                    target: RevealTarget::Paragraph(idx),
                    delay_ms: paragraph_base_ms.saturating_add(paragraph_step_ms.saturating_mul(idx as u32)),
                    classes: vec!["fade-in"],
                }));
                if traits.has_about_image {
                    steps.push(RevealStep {
                        target: RevealTarget::AboutImage,
                        delay_ms: image_delay_ms,
                        classes: vec!["slide-in"],
                    });
                }
                steps
            }
            RevealEffect::TitleReveal => vec![RevealStep::now(
                RevealTarget::Entry,
                vec!["visible", "title-reveal"],
            )],
        }
    }
}

/// Remembers which elements an observer has already revealed.
#[derive(Clone, Debug)]
pub struct RevealLedger<K> {
    seen: Vec<K>,
}

impl<K> Default for RevealLedger<K> {
    fn default() -> Self {
        Self { seen: Vec::new() }
    }
}

impl<K: PartialEq + Clone> RevealLedger<K> {
    pub fn first_sighting(&mut self, key: &K) -> bool {
        if self.seen.contains(key) {
            return false;
        }
        self.seen.push(key.clone());
        true
    }

    /// Drops keys for targets that left the page.
    pub fn retain(&mut self, keep: impl FnMut(&K) -> bool) {
        self.seen.retain(keep);
    }
}

#[cfg(target_arch = "wasm32")]
struct ObserverHandle {
    settings: RevealObserver,
    observer: web_sys::IntersectionObserver,
    watched: Vec<web_sys::Element>,
    ledger: Rc<RefCell<RevealLedger<web_sys::Element>>>,
    _closure: Rc<wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>>,
}

#[cfg(target_arch = "wasm32")]
fn inspect(target: &web_sys::Element) -> TargetTraits {
    let classes = target.class_list();
    TargetTraits {
        is_project_card: classes.contains("project-card"),
        is_about_content: classes.contains("about-content"),
        paragraph_count: target
            .query_selector_all("p")
            .map(|list| list.length() as usize)
            .unwrap_or(0),
        has_about_image: matches!(target.query_selector(".about-image"), Ok(Some(_))),
    }
}

#[cfg(target_arch = "wasm32")]
fn resolve_target(entry: &web_sys::Element, target: RevealTarget) -> Option<web_sys::Element> {
    match target {
        RevealTarget::Entry => Some(entry.clone()),
        RevealTarget::Paragraph(idx) => entry
            .query_selector_all("p")
            .ok()?
            .item(idx as u32)?
            .dyn_into::<web_sys::Element>()
            .ok(),
        RevealTarget::AboutImage => entry.query_selector(".about-image").ok()?,
    }
}

#[cfg(target_arch = "wasm32")]
fn add_classes(element: &web_sys::Element, classes: &[&'static str]) {
    let list = element.class_list();
    for class in classes {
        let _ = list.add_1(class);
    }
}

#[cfg(target_arch = "wasm32")]
fn apply_step(entry: &web_sys::Element, step: RevealStep) {
    let Some(element) = resolve_target(entry, step.target) else {
        return;
    };
    if let RevealTarget::Paragraph(idx) = step.target {
        if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
            let _ = html.style().set_property("--i", &idx.to_string());
        }
    }
    if step.delay_ms == 0 {
        add_classes(&element, &step.classes);
        return;
    }
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(step.delay_ms).await;
        add_classes(&element, &step.classes);
    });
}

#[cfg(target_arch = "wasm32")]
fn create_observer(settings: RevealObserver) -> Option<ObserverHandle> {
    use wasm_bindgen::closure::Closure;

    let ledger = Rc::new(RefCell::new(RevealLedger::<web_sys::Element>::default()));
    let sightings = ledger.clone();
    let closure = Rc::new(Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
            for (index, entry) in entries.iter().enumerate() {
                let entry: web_sys::IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if !sightings.borrow_mut().first_sighting(&target) {
                    continue;
                }
                for step in settings.plan(index, &inspect(&target)) {
                    apply_step(&target, step);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>));

    let options = web_sys::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(settings.threshold));
    options.set_root_margin(settings.root_margin);
    let observer = web_sys::IntersectionObserver::new_with_options(
        closure.as_ref().as_ref().unchecked_ref(),
        &options,
    )
    .ok()?;
    tracing::debug!("scroll-reveal: {} observer ready", settings.name);
    Some(ObserverHandle {
        settings,
        observer,
        watched: Vec::new(),
        ledger,
        _closure: closure,
    })
}

#[cfg(target_arch = "wasm32")]
fn watch_new_targets(handle: &mut ObserverHandle, document: &web_sys::Document) {
    let observer = &handle.observer;
    handle.watched.retain(|element| {
        if element.is_connected() {
            return true;
        }
        observer.unobserve(element);
        false
    });
    handle.ledger.borrow_mut().retain(|element| element.is_connected());

    let Ok(nodes) = document.query_selector_all(handle.settings.selector) else {
        return;
    };
    for index in 0..nodes.length() {
        let Some(element) = nodes
            .item(index)
            .and_then(|node| node.dyn_into::<web_sys::Element>().ok())
        else {
            continue;
        };
        if handle.watched.contains(&element) {
            continue;
        }
        let _ = element.class_list().add_1(ANIMATE_ON_SCROLL_CLASS);
        handle.observer.observe(&element);
        handle.watched.push(element);
    }
}

/// Installs the observers once and re-scans for targets whenever `revision` changes.
pub fn use_scroll_reveal(revision: impl Fn() -> u64 + 'static) {
    #[cfg(target_arch = "wasm32")]
    let mut handles = use_signal(Vec::<ObserverHandle>::new);

    use_effect(move || {
        let revision = revision();
        #[cfg(target_arch = "wasm32")]
        {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            if handles.peek().is_empty() {
                let created: Vec<ObserverHandle> =
                    OBSERVERS.iter().copied().filter_map(create_observer).collect();
                handles.set(created);
            }
            tracing::debug!("scroll-reveal: scanning targets (revision {revision})");
            for handle in handles.write().iter_mut() {
                watch_new_targets(handle, &document);
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = revision;
    });

    #[cfg(target_arch = "wasm32")]
    use_drop(move || {
        for handle in handles.read().iter() {
            handle.observer.disconnect();
        }
    });
}
