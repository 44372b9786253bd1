use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};

use crate::carousel::Carousel;
use crate::config::{use_runtime_config, RuntimeConfig};
use crate::contact::ContactForm;
use crate::data_client::{fetch_projects, fetch_skills};
use crate::easter_eggs::{KonamiEasterEgg, ProfileImage};
use crate::hooks::use_fetched_list;
use crate::render::{ProjectList, SkillList};
use crate::scroll_reveal::use_scroll_reveal;
use crate::theme::ThemeToggle;
use crate::transitions::{SectionLink, SectionTransitionOverlay, TransitionState};

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FAVICON: Asset = asset!("/assets/favicon.svg");

const NAV_SECTIONS: [(&str, &str); 5] = [
    ("#home", "Home"),
    ("#about", "About"),
    ("#skills", "Skills"),
    ("#projects", "Projects"),
    ("#contact", "Contact"),
];

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let Some(config) = config_resource() else {
        return rsx! {
            document::Title { "Portfolio" }
            div { class: "page loading",
                div { class: "loading-spinner active" }
            }
        };
    };

    use_context_provider(|| config);

    rsx! {
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Meta { name: "description", content: "Projects, skills and contact details." }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn Home() -> Element {
    let config = use_context::<RuntimeConfig>();
    let transition = use_signal(TransitionState::default);
    use_context_provider(|| transition);

    let projects = use_fetched_list("projects", {
        let url = config.projects_endpoint.clone();
        move || async move { fetch_projects(&url).await }
    });
    let skills = use_fetched_list("skills", {
        let url = config.skills_endpoint.clone();
        move || async move { fetch_skills(&url).await }
    });
    use_scroll_reveal(move || projects.read().revision());

    let project_items = projects.read().items().map(<[_]>::to_vec);
    let skill_items = skills.read().items().map(<[_]>::to_vec);

    rsx! {
        document::Title { "Portfolio" }
        header { class: "site-header",
            nav { class: "site-nav", aria_label: "Sections",
                for (href, label) in NAV_SECTIONS {
                    SectionLink { key: "{href}", href: href.to_string(), class: Some("nav-link".to_string()), "{label}" }
                }
            }
            ThemeToggle {}
        }
        main { class: "portfolio",
            section { id: "home", class: "intro",
                div { class: "intro-text",
                    h1 { "Hi, welcome to my portfolio." }
                    p { "I build web applications, back ends and the occasional side project." }
                    SectionLink { href: "#contact".to_string(), class: Some("btn".to_string()), "Get in touch" }
                }
                ProfileImage { src: config.profile_image.clone(), alt: "Profile photo".to_string() }
            }
            section { id: "about", class: "about",
                h2 { class: "section-title", "About Me" }
                div { class: "about-content",
                    div { class: "about-image",
                        img { src: "{config.profile_image}", alt: "About me" }
                    }
                    div { class: "about-text",
                        p { "I enjoy turning rough ideas into software people can use." }
                        p { "Most of my work sits between the browser and the database." }
                        p { "When I am not coding I am usually reading about how other people code." }
                    }
                }
            }
            section { id: "skills", class: "skills",
                h2 { class: "section-title", "Skills" }
                SkillList { skills: skill_items }
            }
            section { id: "projects", class: "projects",
                h2 { class: "section-title", "Projects" }
                Carousel {
                    ProjectList { projects: project_items, placeholder: config.placeholder_image.clone() }
                }
            }
            section { id: "contact", class: "contact",
                h2 { class: "section-title", "Contact" }
                ContactForm {}
            }
        }
        footer { class: "site-footer",
            p { "Built with Rust and Dioxus." }
        }
        SectionTransitionOverlay {}
        KonamiEasterEgg {}
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Not found" }
        main { class: "portfolio not-found",
            h1 { class: "section-title", "Nothing at /{path}" }
            Link { to: Route::Home {}, class: "btn", "Back to the portfolio" }
        }
    }
}
