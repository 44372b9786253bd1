use gloo_net::http::Request;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::models::{Project, ProjectsResponse, Skill, SkillsResponse};

pub async fn fetch_projects(url: &str) -> Result<Vec<Project>, FetchError> {
    let payload = get_json::<ProjectsResponse>(url).await?;
    Ok(payload.projects)
}

pub async fn fetch_skills(url: &str) -> Result<Vec<Skill>, FetchError> {
    let payload = get_json::<SkillsResponse>(url).await?;
    Ok(payload.skills)
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|err| FetchError::Network(err.to_string()))?;
    if !response.ok() {
        return Err(FetchError::Status(response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|err| FetchError::Decode(err.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub enum ListState<T> {
    Placeholder,
    Loaded(Vec<T>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SlotUpdate {
    Rendered(usize),
    Empty,
    Failed(FetchError),
}

/// Holds one rendered list.
///
/// Only a non-empty successful response replaces the content. Empty responses
/// and failures leave whatever was there before.
#[derive(Clone, Debug, PartialEq)]
pub struct ListSlot<T> {
    revision: u64,
    state: ListState<T>,
}

impl<T> Default for ListSlot<T> {
    fn default() -> Self {
        Self {
            revision: 0,
            state: ListState::Placeholder,
        }
    }
}

impl<T> ListSlot<T> {
    pub fn apply(&mut self, result: Result<Vec<T>, FetchError>) -> SlotUpdate {
        match result {
            Ok(records) if records.is_empty() => SlotUpdate::Empty,
            Ok(records) => {
                let count = records.len();
                self.state = ListState::Loaded(records);
                self.revision += 1;
                SlotUpdate::Rendered(count)
            }
            Err(err) => SlotUpdate::Failed(err),
        }
    }

    pub fn items(&self) -> Option<&[T]> {
        match &self.state {
            ListState::Placeholder => None,
            ListState::Loaded(records) => Some(records.as_slice()),
        }
    }

    /// Bumped each time the rendered content changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
