use dioxus::prelude::*;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub projects_endpoint: String,
    pub skills_endpoint: String,
    pub contact_endpoint: String,
    pub placeholder_image: String,
    pub profile_image: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            projects_endpoint: "/projects/".to_string(),
            skills_endpoint: "/skills/".to_string(),
            contact_endpoint: "/submit-contact/".to_string(),
            placeholder_image: "/static/images/project-placeholder.jpg".to_string(),
            profile_image: "/static/images/profile.jpg".to_string(),
        }
    }
}

pub fn use_runtime_config() -> Resource<RuntimeConfig> {
    use_resource(|| async move { load_runtime_config().await })
}

async fn load_runtime_config() -> RuntimeConfig {
    match fetch_runtime_config().await {
        Ok(config) => config,
        Err(message) => {
            tracing::warn!("config: {message}; using defaults");
            RuntimeConfig::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Result<RuntimeConfig, String> {
    let defaults = RuntimeConfig::default();
    Ok(RuntimeConfig {
        projects_endpoint: env_or("PROJECTS_ENDPOINT", defaults.projects_endpoint),
        skills_endpoint: env_or("SKILLS_ENDPOINT", defaults.skills_endpoint),
        contact_endpoint: env_or("CONTACT_ENDPOINT", defaults.contact_endpoint),
        placeholder_image: env_or("PLACEHOLDER_IMAGE", defaults.placeholder_image),
        profile_image: env_or("PROFILE_IMAGE", defaults.profile_image),
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_config_keeps_default_paths() {
        let config: RuntimeConfig =
            serde_json::from_str(r#"{"projects_endpoint":"/api/projects/"}"#).unwrap();
        assert_eq!(config.projects_endpoint, "/api/projects/");
        assert_eq!(config.skills_endpoint, "/skills/");
        assert_eq!(config.contact_endpoint, "/submit-contact/");
    }

    #[test]
    fn defaults_match_backend_routes() {
        let config = RuntimeConfig::default();
        assert_eq!(config.projects_endpoint, "/projects/");
        assert_eq!(config.placeholder_image, "/static/images/project-placeholder.jpg");
    }
}
