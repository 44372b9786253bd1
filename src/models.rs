use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: String,
    pub github_link: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Skill {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SkillsResponse {
    #[serde(default)]
    pub skills: Vec<Skill>,
}

/// Body of a contact form submission, built from the field values at submit time.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ContactErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_projects_key_reads_as_empty() {
        let payload: ProjectsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.projects, Vec::new());
    }

    #[test]
    fn skills_accept_backend_description() {
        let payload: SkillsResponse = serde_json::from_str(
            r#"{"skills":[{"title":"Rust","description":"systems"},{"title":"SQL"}]}"#,
        )
        .unwrap();
        assert_eq!(payload.skills.len(), 2);
        assert_eq!(payload.skills[0].description.as_deref(), Some("systems"));
        assert_eq!(payload.skills[1].description, None);
    }

    #[test]
    fn submission_serializes_three_fields() {
        let submission = ContactSubmission {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hello".into(),
        };
        assert_eq!(
            serde_json::to_string(&submission).unwrap(),
            r#"{"name":"Ada","email":"ada@example.com","message":"Hello"}"#,
        );
    }
}
