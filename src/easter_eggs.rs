use dioxus::prelude::*;
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

pub const KONAMI_SEQUENCE: [&str; 10] = [
    "ArrowUp",
    "ArrowUp",
    "ArrowDown",
    "ArrowDown",
    "ArrowLeft",
    "ArrowRight",
    "ArrowLeft",
    "ArrowRight",
    "b",
    "a",
];

const CLICK_BURST_TARGET: u32 = 5;
const CLICK_IDLE_MS: u32 = 2000;
const KONAMI_EFFECT_MS: u32 = 5000;
const PROFILE_EFFECT_MS: u32 = 4000;
const INTRO_SETTLE_MS: u32 = 1200;
const CONFETTI_PIECES: usize = 100;
#[cfg(target_arch = "wasm32")]
const VICTORY_SOUND_URL: &str = "https://assets.mixkit.co/active_storage/sfx/168/168.wav";
#[cfg(target_arch = "wasm32")]
const RAINBOW_ANIMATION: &str = "rainbow-background 5s infinite";
const SPEECH_BUBBLE_TEXT: &str = "Thanks for checking out my profile! 🎉";

const CONFETTI_COLORS: [&str; 16] = [
    "#f44336", "#e91e63", "#9c27b0", "#673ab7", "#3f51b5", "#2196f3", "#03a9f4", "#00bcd4",
    "#009688", "#4CAF50", "#8BC34A", "#CDDC39", "#FFEB3B", "#FFC107", "#FF9800", "#FF5722",
];

const RAINBOW_KEYFRAMES: &str = "@keyframes rainbow-background { \
0% { background-color: red; } 14% { background-color: orange; } \
28% { background-color: yellow; } 42% { background-color: green; } \
57% { background-color: blue; } 71% { background-color: indigo; } \
85% { background-color: violet; } 100% { background-color: red; } }";

const PROFILE_KEYFRAMES: &str = "@keyframes spin { 0% { transform: rotate(0deg); } 100% { transform: rotate(360deg); } } \
@keyframes fade-in-out { \
0% { opacity: 0; transform: translateX(-50%) translateY(20px); } \
20% { opacity: 1; transform: translateX(-50%) translateY(0); } \
80% { opacity: 1; transform: translateX(-50%) translateY(0); } \
100% { opacity: 0; transform: translateX(-50%) translateY(-20px); } }";

const CONFETTI_CONTAINER_STYLE: &str =
    "position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none; z-index: 9999;";

const SPEECH_BUBBLE_STYLE: &str = "position: absolute; top: -60px; left: 50%; transform: translateX(-50%); \
background: var(--canvas-color, white); color: var(--text-color, black); padding: 15px; \
border-radius: 20px; box-shadow: 0 5px 15px rgba(0,0,0,0.2); z-index: 1000; \
animation: fade-in-out 4s forwards; min-width: 200px; text-align: center; \
border: 1px solid rgba(0,0,0,0.1);";

const SPEECH_BUBBLE_ARROW_STYLE: &str = "position: absolute; bottom: -10px; left: 50%; \
transform: translateX(-50%); width: 0; height: 0; border-left: 10px solid transparent; \
border-right: 10px solid transparent; border-top: 10px solid var(--canvas-color, white);";

#[cfg(target_arch = "wasm32")]
struct KeyListener {
    closure: Rc<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::Event)>>,
}

/// Tracks progress through [`KONAMI_SEQUENCE`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KonamiDetector {
    progress: usize,
}

impl KonamiDetector {
    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Returns true when `key` completes the sequence.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key != KONAMI_SEQUENCE[self.progress] {
            self.progress = 0;
            return false;
        }
        self.progress += 1;
        if self.progress == KONAMI_SEQUENCE.len() {
            self.progress = 0;
            return true;
        }
        false
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub triggered: bool,
    pub epoch: u64,
}

/// Counts rapid clicks. Every click restarts the idle window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickBurst {
    count: u32,
    epoch: u64,
}

impl ClickBurst {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn on_click(&mut self) -> ClickOutcome {
        self.epoch += 1;
        self.count += 1;
        let triggered = self.count == CLICK_BURST_TARGET;
        if triggered {
            self.count = 0;
        }
        ClickOutcome {
            triggered,
            epoch: self.epoch,
        }
    }

    /// Called when the idle timer started by click `epoch` fires.
    pub fn on_idle(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.count = 0;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub color: &'static str,
    pub width: f64,
    pub height: f64,
    pub round: bool,
    pub left_vw: f64,
    pub duration_s: f64,
}

impl ConfettiPiece {
    pub fn random(rng: &mut impl FnMut() -> f64) -> Self {
        let slot = (rng() * CONFETTI_COLORS.len() as f64) as usize;
        Self {
            color: CONFETTI_COLORS[slot.min(CONFETTI_COLORS.len() - 1)],
            width: rng() * 10.0 + 5.0,
            height: rng() * 10.0 + 5.0,
            round: rng() > 0.5,
            left_vw: rng() * 100.0,
            duration_s: rng() * 3.0 + 2.0,
        }
    }

    pub fn style(&self) -> String {
        let radius = if self.round { "50%" } else { "0" };
        format!(
            "position: absolute; width: {:.1}px; height: {:.1}px; background-color: {}; \
border-radius: {radius}; top: -20px; left: {:.2}vw; animation: confetti-fall {:.2}s linear forwards;",
            self.width, self.height, self.color, self.left_vw, self.duration_s,
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiBurst {
    pub pieces: Vec<ConfettiPiece>,
    pub spin_deg: f64,
}

impl ConfettiBurst {
    pub fn random(mut rng: impl FnMut() -> f64) -> Self {
        let pieces = (0..CONFETTI_PIECES)
            .map(|_| ConfettiPiece::random(&mut rng))
            .collect();
        Self {
            pieces,
            spin_deg: rng() * 720.0 - 360.0,
        }
    }

    pub fn keyframes(&self) -> String {
        format!(
            "@keyframes confetti-fall {{ 0% {{ transform: translateY(0) rotate(0deg); opacity: 1; }} \
100% {{ transform: translateY(100vh) rotate({:.0}deg); opacity: 0; }} }}",
            self.spin_deg,
        )
    }
}

#[cfg(target_arch = "wasm32")]
fn random_unit() -> f64 {
    js_sys::Math::random()
}

#[cfg(not(target_arch = "wasm32"))]
fn random_unit() -> f64 {
    0.5
}

#[cfg(target_arch = "wasm32")]
fn set_rainbow(active: bool) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
        .and_then(|root| root.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let value = if active { RAINBOW_ANIMATION } else { "" };
    let _ = root.style().set_property("animation", value);
}

#[cfg(not(target_arch = "wasm32"))]
fn set_rainbow(_active: bool) {}

#[cfg(target_arch = "wasm32")]
fn play_victory_sound() {
    let audio = match web_sys::HtmlAudioElement::new_with_src(VICTORY_SOUND_URL) {
        Ok(audio) => audio,
        Err(err) => {
            tracing::info!("Audio could not be played: {err:?}");
            return;
        }
    };
    audio.set_volume(0.5);
    match audio.play() {
        Ok(promise) => {
            spawn(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::info!("Audio could not be played: {err:?}");
                }
            });
        }
        Err(err) => tracing::info!("Audio could not be played: {err:?}"),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn play_victory_sound() {}

#[component]
pub fn KonamiEasterEgg() -> Element {
    let mut trigger = use_signal(|| 0u64);
    let mut handled = use_signal(|| 0u64);
    let mut burst = use_signal(|| None::<ConfettiBurst>);
    #[cfg(target_arch = "wasm32")]
    let mut key_listener = use_signal(|| None::<KeyListener>);
    #[cfg(not(target_arch = "wasm32"))]
    let _key_listener = ();

    #[cfg(target_arch = "wasm32")]
    {
        use_effect(move || {
            use wasm_bindgen::closure::Closure;

            if key_listener.peek().is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            let mut detector = KonamiDetector::default();
            let mut on_key_trigger = trigger;
            let closure = Rc::new(Closure::wrap(Box::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if detector.on_key(&event.key()) {
                    *on_key_trigger.write() += 1;
                }
            }) as Box<dyn FnMut(_)>));
            let _ = document.add_event_listener_with_callback(
                "keydown",
                closure.as_ref().as_ref().unchecked_ref(),
            );
            key_listener.set(Some(KeyListener { closure }));
        });

        let key_listener = key_listener;
        use_drop(move || {
            if let Some(listener) = key_listener.read().as_ref() {
                if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                    let _ = document.remove_event_listener_with_callback(
                        "keydown",
                        listener.closure.as_ref().as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    use_effect(move || {
        let fired = trigger();
        if fired == *handled.peek() {
            return;
        }
        handled.set(fired);
        tracing::info!("Konami Code activated!");
        burst.set(Some(ConfettiBurst::random(random_unit)));
        play_victory_sound();
        set_rainbow(true);
        spawn(async move {
            TimeoutFuture::new(KONAMI_EFFECT_MS).await;
            if *trigger.peek() != fired {
                return;
            }
            burst.set(None);
            set_rainbow(false);
        });
    });

    let Some(active) = burst() else {
        return rsx! {};
    };

    rsx! {
        style { id: "konami-style", "{RAINBOW_KEYFRAMES} {active.keyframes()}" }
        div { class: "confetti-container", style: CONFETTI_CONTAINER_STYLE, aria_hidden: "true",
            for (index, piece) in active.pieces.iter().enumerate() {
                div { key: "{index}", style: "{piece.style()}" }
            }
        }
    }
}

/// Intro portrait: settles into its idle animation after start-up and hides
/// the click-burst easter egg.
#[component]
pub fn ProfileImage(src: String, alt: String) -> Element {
    let mut clicks = use_signal(ClickBurst::default);
    let mut settled = use_signal(|| false);
    let mut effect_epoch = use_signal(|| 0u64);
    let mut celebrating = use_signal(|| false);

    use_hook(move || {
        spawn(async move {
            TimeoutFuture::new(INTRO_SETTLE_MS).await;
            settled.set(true);
        })
    });

    let container_class = if settled() { "intro-image animated" } else { "intro-image" };
    let image_style = if celebrating() { "animation: spin 1s linear infinite" } else { "" };

    rsx! {
        div { class: "{container_class}", style: "position: relative",
            img {
                src: "{src}",
                alt: "{alt}",
                style: "{image_style}",
                onclick: move |_| {
                    let outcome = clicks.write().on_click();
                    if outcome.triggered {
                        tracing::debug!("profile: easter egg");
                        let epoch = *effect_epoch.peek() + 1;
                        effect_epoch.set(epoch);
                        celebrating.set(true);
                        spawn(async move {
                            TimeoutFuture::new(PROFILE_EFFECT_MS).await;
                            if *effect_epoch.peek() == epoch {
                                celebrating.set(false);
                            }
                        });
                    }
                    spawn(async move {
                        TimeoutFuture::new(CLICK_IDLE_MS).await;
                        clicks.write().on_idle(outcome.epoch);
                    });
                },
            }
            if celebrating() {
                style { id: "easter-egg-styles", "{PROFILE_KEYFRAMES}" }
                div { class: "speech-bubble", style: SPEECH_BUBBLE_STYLE,
                    "{SPEECH_BUBBLE_TEXT}"
                    div { style: SPEECH_BUBBLE_ARROW_STYLE }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn full_sequence_triggers_once_and_resets() {
        let mut detector = KonamiDetector::default();
        let fired: Vec<bool> = KONAMI_SEQUENCE.iter().map(|key| detector.on_key(key)).collect();
        assert_eq!(fired.iter().filter(|hit| **hit).count(), 1);
        assert_eq!(fired.last(), Some(&true));
        assert_eq!(detector.progress(), 0);
    }

    #[test]
    fn wrong_key_mid_sequence_resets_progress() {
        let mut detector = KonamiDetector::default();
        for key in &KONAMI_SEQUENCE[..4] {
            detector.on_key(key);
        }
        assert_eq!(detector.progress(), 4);
        assert!(!detector.on_key("x"));
        assert_eq!(detector.progress(), 0);

        let fired = KONAMI_SEQUENCE.iter().filter(|key| detector.on_key(key)).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn mismatching_key_is_not_retested_against_start() {
        let mut detector = KonamiDetector::default();
        detector.on_key("ArrowUp");
        detector.on_key("ArrowUp");
        // A third ArrowUp breaks the run and does not count as a fresh first step.
        detector.on_key("ArrowUp");
        assert_eq!(detector.progress(), 0);
    }

    #[test]
    fn uppercase_letters_do_not_match() {
        let mut detector = KonamiDetector::default();
        for key in &KONAMI_SEQUENCE[..8] {
            detector.on_key(key);
        }
        assert!(!detector.on_key("B"));
        assert_eq!(detector.progress(), 0);
    }

    #[test]
    fn five_rapid_clicks_trigger_once() {
        let mut burst = ClickBurst::default();
        let outcomes: Vec<ClickOutcome> = (0..5).map(|_| burst.on_click()).collect();
        let triggered: Vec<bool> = outcomes.iter().map(|outcome| outcome.triggered).collect();
        assert_eq!(triggered, vec![false, false, false, false, true]);
        assert_eq!(burst.count(), 0);

        let sixth = burst.on_click();
        assert!(!sixth.triggered);
        assert_eq!(burst.count(), 1);
    }

    #[test]
    fn idle_timer_only_resets_for_latest_click() {
        let mut burst = ClickBurst::default();
        let first = burst.on_click();
        let second = burst.on_click();

        assert!(!burst.on_idle(first.epoch));
        assert_eq!(burst.count(), 2);

        assert!(burst.on_idle(second.epoch));
        assert_eq!(burst.count(), 0);
    }

    #[test]
    fn idle_gap_breaks_the_burst() {
        let mut burst = ClickBurst::default();
        let mut last = burst.on_click();
        for _ in 0..3 {
            last = burst.on_click();
        }
        burst.on_idle(last.epoch);
        assert!(!burst.on_click().triggered);
    }

    #[test]
    fn confetti_pieces_stay_in_range() {
        let mut seed = 42u64;
        let burst = ConfettiBurst::random(move || {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
            (seed >> 11) as f64 / (1u64 << 53) as f64
        });
        assert_eq!(burst.pieces.len(), 100);
        for piece in &burst.pieces {
            assert!((5.0..15.0).contains(&piece.width));
            assert!((5.0..15.0).contains(&piece.height));
            assert!((0.0..100.0).contains(&piece.left_vw));
            assert!((2.0..5.0).contains(&piece.duration_s));
            assert!(CONFETTI_COLORS.contains(&piece.color));
        }
        assert!((-360.0..360.0).contains(&burst.spin_deg));
    }

    #[test]
    fn confetti_color_index_is_clamped() {
        let piece = ConfettiPiece::random(&mut || 0.999_999_999);
        assert_eq!(piece.color, "#FF5722");
        assert!(piece.style().contains("border-radius: 50%"));
    }

    fn css_rule<'a>(stylesheet: &'a str, selector: &str) -> &'a str {
        let start = stylesheet
            .find(&format!("\n{selector} {{"))
            .unwrap_or_else(|| panic!("no `{selector}` rule"));
        let rule = &stylesheet[start..];
        &rule[..rule.find('}').unwrap()]
    }

    #[test]
    fn rainbow_background_is_not_covered_by_body() {
        let stylesheet = include_str!("../assets/main.css");
        assert!(RAINBOW_KEYFRAMES.contains("background-color"));

        let root = css_rule(stylesheet, "html");
        assert!(root.contains("background-color: var(--canvas-color)"), "{root}");

        let body = css_rule(stylesheet, "body");
        assert!(body.contains("background: transparent"), "{body}");
        assert!(!body.contains("--canvas-color"), "{body}");
    }
}
