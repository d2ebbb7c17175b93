//! Short guidance derived from aggregate alignment scores.

use std::collections::BTreeMap;

use crate::taxonomy::{Theme, CPF_NAME};

/// Theme averages below this get a theme-specific suggestion.
const THEME_IMPROVEMENT_THRESHOLD: f64 = 0.5;

/// How the messages refer to the framework and the standards behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameworkWording {
    pub framework: String,
    pub standards: String,
}

impl FrameworkWording {
    /// Wording for a taxonomy by name. The built-in CPF keeps its own phrasing;
    /// any other taxonomy is referred to by its name.
    pub fn for_taxonomy(name: &str) -> Self {
        if name == CPF_NAME {
            Self {
                framework: "CPF framework".into(),
                standards: "Canadian standards".into(),
            }
        } else {
            Self {
                framework: name.to_string(),
                standards: format!("the standards of {name}"),
            }
        }
    }
}

impl Default for FrameworkWording {
    fn default() -> Self {
        Self::for_taxonomy(CPF_NAME)
    }
}

fn overall_message(wording: &FrameworkWording, overall_alignment: f64) -> String {
    let framework = &wording.framework;
    if overall_alignment >= 0.8 {
        format!(
            "Excellent alignment with {framework}! Your PLOs demonstrate strong coverage of knowledge, skills, and values."
        )
    } else if overall_alignment >= 0.6 {
        format!(
            "Good alignment with {framework}. Consider strengthening areas with lower scores."
        )
    } else if overall_alignment >= 0.4 {
        format!(
            "Moderate alignment with {framework}. Focus on improving coverage of underrepresented themes."
        )
    } else {
        format!(
            "Limited alignment with {framework}. Consider reviewing and revising PLOs to better align with {}.",
            wording.standards
        )
    }
}

fn theme_suggestion(theme: Theme) -> &'static str {
    match theme {
        Theme::Knowledge => "Consider strengthening Knowledge PLOs to better cover core biological concepts and scientific understanding.",
        Theme::Skills => "Enhance Skills PLOs to include more emphasis on experimental design, data analysis, and communication.",
        Theme::Values => "Develop Values PLOs to address ethical responsibility, societal impact, and professional development.",
    }
}

/// Build the recommendation list: one overall band message, then one
/// suggestion per weak theme in Knowledge, Skills, Values order.
pub fn generate(
    wording: &FrameworkWording,
    theme_averages: &BTreeMap<Theme, f64>,
    overall_alignment: f64,
) -> Vec<String> {
    let mut recommendations = vec![overall_message(wording, overall_alignment)];

    for theme in Theme::ALL {
        if let Some(&average) = theme_averages.get(&theme)
            && average < THEME_IMPROVEMENT_THRESHOLD
        {
            recommendations.push(theme_suggestion(theme).to_string());
        }
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpf() -> FrameworkWording {
        FrameworkWording::default()
    }

    fn averages(k: f64, s: f64, v: f64) -> BTreeMap<Theme, f64> {
        BTreeMap::from([
            (Theme::Knowledge, k),
            (Theme::Skills, s),
            (Theme::Values, v),
        ])
    }

    #[test]
    fn test_overall_bands() {
        let strong = averages(0.9, 0.9, 0.9);
        assert!(generate(&cpf(), &strong, 0.85)[0].starts_with("Excellent"));
        assert!(generate(&cpf(), &strong, 0.8)[0].starts_with("Excellent"));
        assert!(generate(&cpf(), &strong, 0.6)[0].starts_with("Good"));
        assert!(generate(&cpf(), &strong, 0.55)[0].starts_with("Moderate"));
        assert!(generate(&cpf(), &strong, 0.4)[0].starts_with("Moderate"));
        assert!(generate(&cpf(), &strong, 0.39)[0].starts_with("Limited"));
    }

    #[test]
    fn test_no_theme_suggestions_when_all_strong() {
        let recs = generate(&cpf(), &averages(0.5, 0.7, 0.9), 0.7);
        assert_eq!(recs.len(), 1);
    }

    #[test]
    fn test_values_suggestion_appended() {
        let recs = generate(&cpf(), &averages(0.6, 0.6, 0.3), 0.55);
        assert_eq!(recs.len(), 2);
        assert!(recs[0].starts_with("Moderate"));
        assert!(recs[1].contains("ethical responsibility"));
        assert!(recs[1].contains("societal impact"));
    }

    #[test]
    fn test_theme_suggestions_follow_theme_order() {
        let recs = generate(&cpf(), &averages(0.1, 0.2, 0.3), 0.2);
        assert_eq!(recs.len(), 4);
        assert!(recs[1].contains("core biological concepts"));
        assert!(recs[2].contains("experimental design"));
        assert!(recs[3].contains("ethical responsibility"));
    }

    #[test]
    fn test_builtin_wording() {
        let recs = generate(&cpf(), &averages(0.9, 0.9, 0.9), 0.85);
        assert_eq!(
            recs[0],
            "Excellent alignment with CPF framework! Your PLOs demonstrate strong coverage of knowledge, skills, and values."
        );
        let recs = generate(&cpf(), &averages(0.9, 0.9, 0.9), 0.1);
        assert_eq!(
            recs[0],
            "Limited alignment with CPF framework. Consider reviewing and revising PLOs to better align with Canadian standards."
        );
    }

    #[test]
    fn test_custom_taxonomy_wording() {
        let wording = FrameworkWording::for_taxonomy("Mini Framework");
        let recs = generate(&wording, &averages(0.9, 0.9, 0.9), 0.1);
        assert_eq!(
            recs[0],
            "Limited alignment with Mini Framework. Consider reviewing and revising PLOs to better align with the standards of Mini Framework."
        );
    }

    #[test]
    fn test_theme_suggestion_text() {
        let recs = generate(&cpf(), &averages(0.9, 0.9, 0.3), 0.7);
        assert_eq!(
            recs[1],
            "Develop Values PLOs to address ethical responsibility, societal impact, and professional development."
        );
    }

    #[test]
    fn test_deterministic() {
        let avg = averages(0.45, 0.65, 0.2);
        assert_eq!(generate(&cpf(), &avg, 0.5), generate(&cpf(), &avg, 0.5));
    }
}
