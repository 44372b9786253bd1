use dioxus::prelude::*;

use crate::models::{Project, Skill};

/// Image source that swaps to the placeholder on the first load error only.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSource {
    primary: String,
    fell_back: bool,
}

impl ImageSource {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fell_back: false,
        }
    }

    pub fn src<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.fell_back {
            placeholder
        } else {
            self.primary.as_str()
        }
    }

    /// Returns true when this error caused the swap.
    pub fn fail(&mut self) -> bool {
        if self.fell_back {
            return false;
        }
        self.fell_back = true;
        true
    }
}

pub fn skill_label(skill: &Skill) -> String {
    format!("{}.", skill.title)
}

#[component]
pub fn ProjectList(projects: Option<Vec<Project>>, placeholder: String) -> Element {
    let cards = match projects {
        Some(projects) => rsx! {
            for (index, project) in projects.into_iter().enumerate() {
                ProjectCard {
                    key: "{index}",
                    project,
                    index,
                    placeholder: placeholder.clone(),
                }
            }
        },
        None => rsx! {
            div { class: "project-card project-card-placeholder",
                div { class: "project-info",
                    h3 { "Projects" }
                    p { "Projects are on their way." }
                }
            }
        },
    };

    rsx! {
        div { id: "project-container", class: "project-container", {cards} }
    }
}

#[component]
pub fn ProjectCard(project: Project, index: usize, placeholder: String) -> Element {
    let mut image = use_signal(|| ImageSource::new(project.image.clone()));
    let src = image.read().src(&placeholder).to_string();

    rsx! {
        div { class: "project-card", style: "--i: {index}",
            div { class: "project-image",
                img {
                    src: "{src}",
                    alt: "{project.title}",
                    onerror: move |_| {
                        if image.write().fail() {
                            tracing::debug!("projects: image failed, using placeholder");
                        }
                    },
                }
            }
            div { class: "project-info",
                h3 { "{project.title}" }
                p { "{project.description}" }
                a {
                    href: "{project.github_link}",
                    class: "btn",
                    target: "_blank",
                    rel: "noopener noreferrer",
                    "View on GitHub"
                }
            }
        }
    }
}

#[component]
pub fn SkillList(skills: Option<Vec<Skill>>) -> Element {
    match skills {
        Some(skills) => {
            let count = skills.len();
            rsx! {
                ul { id: "skill-list", class: "skill-list", style: "--count: {count}",
                    for (index, skill) in skills.iter().enumerate() {
                        li {
                            key: "{index}",
                            style: "--i: {index}",
                            title: skill.description.clone(),
                            "{skill_label(skill)}"
                        }
                    }
                }
            }
        }
        None => rsx! {
            ul { id: "skill-list", class: "skill-list",
                li { class: "skill-placeholder", "Skills are loading." }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn image_falls_back_exactly_once() {
        let mut image = ImageSource::new("/media/a.png");
        assert_eq!(image.src("/placeholder.jpg"), "/media/a.png");

        assert!(image.fail());
        assert_eq!(image.src("/placeholder.jpg"), "/placeholder.jpg");

        assert!(!image.fail());
        assert_eq!(image.src("/placeholder.jpg"), "/placeholder.jpg");
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn project(title: &str) -> Project {
        Project {
            title: title.into(),
            description: format!("{title} description"),
            image: format!("/media/{title}.png"),
            github_link: format!("https://github.com/example/{title}"),
        }
    }

    fn skill(title: &str, description: Option<&str>) -> Skill {
        Skill {
            title: title.into(),
            description: description.map(Into::into),
        }
    }

    #[test]
    fn skill_list_renders_one_item_per_record_in_order() {
        fn app() -> Element {
            rsx! {
                SkillList {
                    skills: Some(vec![
                        skill("Rust", Some("Systems programming")),
                        skill("Go", None),
                        skill("SQL", None),
                    ]),
                }
            }
        }
        let html = render(app);

        assert_eq!(html.matches("<li").count(), 3);
        assert!(html.contains("style=\"--count: 3\""));
        for index in 0..3 {
            assert!(html.contains(&format!("style=\"--i: {index}\"")), "{html}");
        }
        let positions: Vec<usize> = ["Rust.", "Go.", "SQL."]
            .iter()
            .map(|label| html.find(label).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{html}");
        assert_eq!(html.matches("title=").count(), 1);
        assert!(html.contains("title=\"Systems programming\""));
        assert!(!html.contains("skill-placeholder"));
    }

    #[test]
    fn skill_list_without_data_shows_placeholder_item() {
        fn app() -> Element {
            rsx! { SkillList { skills: None } }
        }
        let html = render(app);

        assert_eq!(html.matches("<li").count(), 1);
        assert!(html.contains("skill-placeholder"));
        assert!(!html.contains("--count"));
    }

    #[test]
    fn project_list_renders_cards_in_order_with_github_links() {
        fn app() -> Element {
            rsx! {
                ProjectList {
                    projects: Some(vec![project("alpha"), project("beta")]),
                    placeholder: "/placeholder.jpg".to_string(),
                }
            }
        }
        let html = render(app);

        assert_eq!(html.matches("class=\"project-card\"").count(), 2);
        assert!(html.contains("style=\"--i: 0\""));
        assert!(html.contains("style=\"--i: 1\""));
        let alpha = html.find("alpha description").unwrap();
        let beta = html.find("beta description").unwrap();
        assert!(alpha < beta, "{html}");

        assert_eq!(html.matches("View on GitHub").count(), 2);
        assert_eq!(html.matches("target=\"_blank\"").count(), 2);
        assert!(html.contains("href=\"https://github.com/example/alpha\""));
        assert!(html.contains("src=\"/media/alpha.png\""));
        assert!(!html.contains("project-card-placeholder"));
    }

    #[test]
    fn project_list_without_data_shows_placeholder_card() {
        fn app() -> Element {
            rsx! { ProjectList { projects: None, placeholder: "/placeholder.jpg".to_string() } }
        }
        let html = render(app);

        assert!(html.contains("id=\"project-container\""));
        assert!(html.contains("project-card-placeholder"));
        assert!(!html.contains("View on GitHub"));
    }

    #[test]
    fn skill_label_appends_period() {
        let skill = Skill {
            title: "Rust".into(),
            description: Some("ignored".into()),
        };
        assert_eq!(skill_label(&skill), "Rust.");
    }
}
