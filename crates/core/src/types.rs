use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// A classroom activity built around one scene of the film.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub scene: String,
    pub description: String,
    pub educational_goal: String,
}

/// The structured analysis returned for one film.
///
/// Every non-`Option` field is required on the wire; decoding fails instead of
/// filling in defaults, so a value of this type is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhilosophicalAnalysis {
    pub movie_title: String,
    pub synopsis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
    pub philosophical_themes: Vec<String>,
    pub related_authors: Vec<String>,
    pub analysis: String,
    pub activities: Vec<Activity>,
}

impl PhilosophicalAnalysis {
    /// Decode and validate the provider's JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        let mut analysis: PhilosophicalAnalysis = serde_json::from_str(body.trim())?;

        if analysis.movie_title.trim().is_empty() {
            return Err(AnalysisError::InvalidField {
                field: "movieTitle",
                reason: "must not be empty".to_string(),
            });
        }

        analysis.poster_url = non_blank(analysis.poster_url);
        analysis.trailer_url = non_blank(analysis.trailer_url);

        Ok(analysis)
    }
}

fn non_blank(url: Option<String>) -> Option<String> {
    url.filter(|u| !u.trim().is_empty())
}
