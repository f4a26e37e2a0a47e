use std::sync::LazyLock;

use regex::Regex;

use crate::types::PhilosophicalAnalysis;

static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("valid YouTube pattern")
});

/// Embeddable player URL for a YouTube link, `None` for anything else.
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let caps = YOUTUBE_ID.captures(url.trim())?;
    let id = caps.get(2)?.as_str();
    (id.len() == 11).then(|| format!("https://www.youtube.com/embed/{}", id))
}

/// Short blurb for sharing an analysis.
pub fn share_text(analysis: &PhilosophicalAnalysis) -> String {
    format!(
        "🎬 Análisis Filosófico de \"{}\"\n\n🧠 Temas: {}\n\nDescubre más en CineSofía.",
        analysis.movie_title,
        analysis.philosophical_themes.join(", ")
    )
}

/// Format an analysis as human-readable markdown
pub fn format_analysis_readable(analysis: &PhilosophicalAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", analysis.movie_title));

    if !analysis.philosophical_themes.is_empty() {
        let themes: Vec<String> = analysis
            .philosophical_themes
            .iter()
            .map(|t| format!("[{}]", t.to_uppercase()))
            .collect();
        output.push_str(&themes.join(" "));
        output.push_str("\n\n");
    }

    match &analysis.poster_url {
        Some(url) => output.push_str(&format!("**Póster:** {}\n", url)),
        None => output.push_str("**Póster:** no disponible\n"),
    }
    if let Some(embed) = analysis.trailer_url.as_deref().and_then(youtube_embed_url) {
        output.push_str(&format!("**Tráiler oficial:** {}\n", embed));
    }
    output.push('\n');

    output.push_str("## Sinopsis\n\n");
    output.push_str(&analysis.synopsis);
    output.push_str("\n\n");

    output.push_str("## Autores relacionados\n\n");
    for author in &analysis.related_authors {
        output.push_str(&format!("• {}\n", author));
    }
    output.push('\n');

    output.push_str("## Análisis filosófico\n\n");
    output.push_str(&analysis.analysis);
    output.push_str("\n\n");

    if !analysis.activities.is_empty() {
        output.push_str("## Actividades en el aula\n\n");
        for (i, activity) in analysis.activities.iter().enumerate() {
            output.push_str(&format!("### {}. {}\n\n", i + 1, activity.scene));
            output.push_str(&format!("{}\n\n", activity.description));
            output.push_str(&format!("*Objetivo:* {}\n\n", activity.educational_goal));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Activity;

    fn sample() -> PhilosophicalAnalysis {
        PhilosophicalAnalysis {
            movie_title: "The Matrix".into(),
            synopsis: "Neo despierta.".into(),
            poster_url: None,
            trailer_url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            philosophical_themes: vec!["Realidad".into(), "Libertad".into()],
            related_authors: vec!["Platón".into(), "Descartes".into()],
            analysis: "La caverna reaparece.".into(),
            activities: vec![Activity {
                scene: "La píldora roja".into(),
                description: "Debate en parejas.".into(),
                educational_goal: "Pensar la elección.".into(),
            }],
        }
    }

    #[test]
    fn embed_url_from_common_youtube_forms() {
        let expected = Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string());
        assert_eq!(youtube_embed_url("https://youtu.be/dQw4w9WgXcQ"), expected);
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"),
            expected
        );
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"),
            expected
        );
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ"),
            expected
        );
    }

    #[test]
    fn non_youtube_links_have_no_embed() {
        assert_eq!(youtube_embed_url("https://vimeo.com/12345"), None);
        assert_eq!(youtube_embed_url("https://youtu.be/short"), None);
        assert_eq!(youtube_embed_url(""), None);
    }

    #[test]
    fn share_text_lists_themes() {
        let text = share_text(&sample());
        assert!(text.contains("\"The Matrix\""));
        assert!(text.contains("Temas: Realidad, Libertad"));
        assert!(text.ends_with("Descubre más en CineSofía."));
    }

    #[test]
    fn readable_report_degrades_without_poster() {
        let report = format_analysis_readable(&sample());
        assert!(report.starts_with("# The Matrix\n"));
        assert!(report.contains("**Póster:** no disponible"));
        assert!(report.contains("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(report.contains("### 1. La píldora roja"));
        assert!(report.contains("• Descartes"));
    }

    #[test]
    fn readable_report_hides_unembeddable_trailer() {
        let mut analysis = sample();
        analysis.trailer_url = Some("https://vimeo.com/12345".into());
        let report = format_analysis_readable(&analysis);
        assert!(!report.contains("Tráiler"));
        assert!(!report.contains("vimeo"));
    }
}
