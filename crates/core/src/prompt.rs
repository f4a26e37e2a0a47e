//! Instructions sent to the model for each kind of submission.

static ANALYSIS_INSTRUCTIONS: &str = r#"Genera una sinopsis breve de la película.
Busca y devuelve la URL directa de la imagen del póster oficial.
Busca y devuelve el enlace de YouTube del tráiler oficial.
Relaciona la película con autores filosóficos relevantes y propón los temas filosóficos que aborda.
Redacta un análisis filosófico profundo y académico que conecte la película con esos autores.
Diseña actividades escolares basadas en escenas concretas, cada una con su objetivo educativo.
El tono debe ser educativo pero cautivador."#;

static IDENTIFY_FILM: &str = r#"Identifica la película que aparece en la imagen. Si la imagen es una escena o un fotograma, identifica la película a la que pertenece.
Después, analiza la película identificada desde una perspectiva filosófica profunda y académica."#;

/// Prompt for a search by title.
pub fn title_prompt(title: &str) -> String {
    format!(
        "Analiza la película \"{}\" desde una perspectiva filosófica profunda y académica.\n{}",
        title.trim(),
        ANALYSIS_INSTRUCTIONS
    )
}

/// Prompt accompanying an uploaded screenshot or poster.
pub fn image_prompt() -> String {
    format!("{}\n{}", IDENTIFY_FILM, ANALYSIS_INSTRUCTIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_prompt_quotes_trimmed_title() {
        let prompt = title_prompt("  The Matrix ");
        assert!(prompt.starts_with("Analiza la película \"The Matrix\""));
        assert!(prompt.contains("póster oficial"));
        assert!(prompt.contains("tráiler oficial"));
    }

    #[test]
    fn image_prompt_identifies_before_analyzing() {
        let prompt = image_prompt();
        let identify = prompt.find("Identifica la película").unwrap();
        let synopsis = prompt.find("sinopsis").unwrap();
        assert!(identify < synopsis);
        assert!(prompt.ends_with(ANALYSIS_INSTRUCTIONS));
    }
}
