use serde_json::{Value, json};

/// Top-level fields the provider must always return.
pub const REQUIRED_FIELDS: [&str; 6] = [
    "movieTitle",
    "synopsis",
    "philosophicalThemes",
    "relatedAuthors",
    "analysis",
    "activities",
];

/// Response schema declared to the provider, in its OpenAPI subset.
///
/// Mirrors [`crate::types::PhilosophicalAnalysis`]: the same required set,
/// `posterUrl`/`trailerUrl` optional.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "movieTitle": { "type": "STRING" },
            "synopsis": { "type": "STRING" },
            "posterUrl": {
                "type": "STRING",
                "description": "Direct URL of the official movie poster image."
            },
            "trailerUrl": {
                "type": "STRING",
                "description": "YouTube URL of the official movie trailer found via search."
            },
            "philosophicalThemes": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "relatedAuthors": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "analysis": {
                "type": "STRING",
                "description": "Deep philosophical analysis connecting the movie to the authors."
            },
            "activities": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "scene": {
                            "type": "STRING",
                            "description": "Description of the specific scene."
                        },
                        "description": {
                            "type": "STRING",
                            "description": "The activity instructions."
                        },
                        "educationalGoal": { "type": "STRING" }
                    },
                    "required": ["scene", "description", "educationalGoal"]
                }
            }
        },
        "required": REQUIRED_FIELDS,
    })
}
