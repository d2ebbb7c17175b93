//! Reference taxonomy: the fixed catalogue of reference outcome statements.
//!
//! The catalogue is authored as theme → heading → statements and flattened once
//! into an indexed arena. The flattened order is the row order of every
//! crosswalk matrix built from it and never changes after construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::TaxonomyError;

/// Top-level grouping of reference statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Theme {
    Knowledge,
    Skills,
    Values,
}

impl Theme {
    /// All themes in reporting order.
    pub const ALL: [Theme; 3] = [Theme::Knowledge, Theme::Skills, Theme::Values];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Knowledge => "Knowledge",
            Theme::Skills => "Skills",
            Theme::Values => "Values",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knowledge" => Ok(Theme::Knowledge),
            "skills" => Ok(Theme::Skills),
            "values" => Ok(Theme::Values),
            _ => Err(TaxonomyError::UnknownTheme {
                theme: s.to_string(),
            }),
        }
    }
}

/// One reference outcome statement with its position in the hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStatement {
    pub theme: Theme,
    pub heading: String,
    pub text: String,
}

/// Nested, human-authored form of a taxonomy. This is the on-disk TOML layout
/// and the shape returned when listing the framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    pub name: String,
    #[serde(default)]
    pub themes: Vec<ThemeSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSection {
    pub theme: String,
    #[serde(default)]
    pub headings: Vec<HeadingSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingSection {
    pub heading: String,
    #[serde(default)]
    pub statements: Vec<String>,
}

/// Flattened, immutable reference taxonomy.
///
/// `statements` is the arena; `section_of[i]` points statement `i` at its
/// `(theme, heading)` entry in `sections`.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    name: String,
    statements: Vec<ReferenceStatement>,
    sections: Vec<(Theme, String)>,
    section_of: Vec<usize>,
}

impl Taxonomy {
    /// The built-in Canadian Program Framework for biology programs.
    pub fn builtin() -> Self {
        let mut builder = Builder::new(CPF_NAME);
        for (theme, heading, texts) in CPF_SECTIONS {
            builder.section(*theme, heading, texts.iter().map(|t| t.to_string()));
        }
        builder.finish()
    }

    /// Build a taxonomy from its nested document form.
    pub fn from_document(doc: TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let mut builder = Builder::new(&doc.name);
        for section in doc.themes {
            let theme: Theme = section.theme.parse()?;
            for heading in section.headings {
                builder.section(theme, &heading.heading, heading.statements);
            }
        }
        let taxonomy = builder.finish();
        if taxonomy.is_empty() {
            return Err(TaxonomyError::Empty { name: doc.name });
        }
        Ok(taxonomy)
    }

    /// Parse a taxonomy from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, TaxonomyError> {
        let doc: TaxonomyDocument = toml::from_str(content).map_err(|e| TaxonomyError::Parse {
            message: e.to_string(),
        })?;
        Self::from_document(doc)
    }

    /// Load a taxonomy from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let content = std::fs::read_to_string(path).map_err(|_| TaxonomyError::FileNotFound {
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reference statements in flattened order.
    pub fn statements(&self) -> &[ReferenceStatement] {
        &self.statements
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceStatement> {
        self.statements.get(index)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of reference statements per theme. Themes without statements are
    /// absent from the map.
    pub fn theme_counts(&self) -> BTreeMap<Theme, usize> {
        let mut counts = BTreeMap::new();
        for statement in &self.statements {
            *counts.entry(statement.theme).or_insert(0) += 1;
        }
        counts
    }

    /// Rebuild the nested theme → heading → statements view, preserving order.
    pub fn to_document(&self) -> TaxonomyDocument {
        let mut themes: Vec<ThemeSection> = Vec::new();
        let mut headings: Vec<HeadingSection> = self
            .sections
            .iter()
            .map(|(_, heading)| HeadingSection {
                heading: heading.clone(),
                statements: Vec::new(),
            })
            .collect();
        for (statement, &section) in self.statements.iter().zip(&self.section_of) {
            headings[section].statements.push(statement.text.clone());
        }

        for ((theme, _), heading) in self.sections.iter().zip(headings) {
            match themes.last_mut() {
                Some(last) if last.theme == theme.as_str() => last.headings.push(heading),
                _ => themes.push(ThemeSection {
                    theme: theme.to_string(),
                    headings: vec![heading],
                }),
            }
        }

        TaxonomyDocument {
            name: self.name.clone(),
            themes,
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

struct Builder {
    taxonomy: Taxonomy,
}

impl Builder {
    fn new(name: &str) -> Self {
        Self {
            taxonomy: Taxonomy {
                name: name.to_string(),
                statements: Vec::new(),
                sections: Vec::new(),
                section_of: Vec::new(),
            },
        }
    }

    fn section(&mut self, theme: Theme, heading: &str, texts: impl IntoIterator<Item = String>) {
        let t = &mut self.taxonomy;
        let section = t.sections.len();
        t.sections.push((theme, heading.to_string()));
        for text in texts {
            t.statements.push(ReferenceStatement {
                theme,
                heading: heading.to_string(),
                text,
            });
            t.section_of.push(section);
        }
    }

    fn finish(self) -> Taxonomy {
        self.taxonomy
    }
}

/// Name of the built-in framework.
pub const CPF_NAME: &str = "Canadian Program Framework (CPF)";

type Section = (Theme, &'static str, &'static [&'static str]);

const CPF_SECTIONS: &[Section] = &[
    (
        Theme::Knowledge,
        "Foundational Knowledge & Concepts",
        &[
            "Demonstrate an understanding of five core concepts: evolution, structure and function, information flow, exchange, and storage, pathways and transformations of energy, and systems as they pertain to biological organisms and ecosystems.",
            "Demonstrate an understanding of key concepts, theories, and interdisciplinary connections in biology, including genetics, cell and molecular biology, physiology, ecology, and evolutionary biology.",
            "Understand how structure and function are correlated at all levels of biological organization.",
            "Understand how interactions between organisms and their environment drive the dynamics of individuals, populations, communities, and ecosystems.",
            "Distinguish between elements of experimental design, including research questions/objectives, hypotheses, methodology, data and results, and conclusions.",
            "Describe the peer review process for academic publication.",
            "Differentiate between the formats in which scientists disseminate knowledge.",
            "Identify the appropriate tools and methods associated with sub-disciplines in biology, ranging from microbiology to the study of the biosphere.",
            "Demonstrate an understanding of how history has shaped biology and biological research, and communication of the sciences.",
        ],
    ),
    (
        Theme::Knowledge,
        "Knowledge Expansion",
        &[
            "Understand contemporary biological issues regarding environment, health, economy, and society.",
            "Demonstrate knowledge of ethical, economic, commercial, and social implications of scientific research and technological innovation.",
            "Describe the role and responsibilities of biologists in society.",
            "Recognize the limitations of technology and how it can impact our ability to explore reality and modify biological theories.",
            "Identify biological assumptions in society and the resulting challenges due to the inherent complexity of biological systems.",
            "Understand the consequences of organism interactions in natural populations, communities, and ecosystems.",
            "Understand how technological innovation impacts the process and communication of scientific information, and how it affects the role of scientists in the community.",
        ],
    ),
    (
        Theme::Knowledge,
        "Integration of Knowledge",
        &[
            "Integrate knowledge of biological systems at all levels, from genes to ecosystems, using cellular, physiological, ecological, and evolutionary principles and history.",
            "Explain how biology builds upon other academic disciplines and facilitates understanding of other sciences and humanities.",
            "Understand the interconnectedness and interdependencies of biological processes (systems biology) at the cellular, organism, and ecosystem levels.",
        ],
    ),
    (
        Theme::Skills,
        "Communication",
        &[
            "Effectively communicate complex biological concepts to diverse audiences using oral, visual, and written formats.",
            "Appraise audiences and tailor information dissemination accordingly.",
            "Discuss and reflect on biological findings and their impact on society.",
            "Critically appraise scientific literature and communicate the limitations of data when formulating conclusions.",
            "Correctly cite and reference sources in written work.",
            "Illustrate how biology relates to current events, global issues, and other scientific disciplines.",
        ],
    ),
    (
        Theme::Skills,
        "Application and Critical Thinking",
        &[
            "Utilize interdisciplinary approaches to identify and address biological problems within societal and environmental contexts.",
            "Apply foundational knowledge and concepts to analyze biological solutions and develop innovative solutions at various levels of organization.",
            "Evaluate gaps in biological knowledge and engage in critical analysis of pertinent topics within the field.",
            "Synthesize and interpret biological information using appropriate methods such as graphs, figures, diagrams, or statistical analyses.",
            "Recognize the limits of current biological knowledge and evaluate new and emerging concepts in the field.",
            "Utilize innovative technology to explore and expand knowledge of biology.",
            "Evaluate information from diverse media sources to form informed opinions on politicized biological issues.",
            "Critically analyze the social and political factors that shape scientific research and its applications.",
        ],
    ),
    (
        Theme::Skills,
        "Research and Laboratory Techniques",
        &[
            "Demonstrate proficiency in applying the scientific method to develop and test hypotheses, as well as in collecting, analyzing, and interpreting data.",
            "Gain hands-on experience in laboratory and/or field settings, exploring areas relevant to biological sciences.",
            "Utilize standard laboratory and field sampling techniques, tools, calculations, and statistical methods.",
            "Maintain proper research records and apply effective data management techniques.",
        ],
    ),
    (
        Theme::Skills,
        "Teamwork",
        &[
            "Collaborate effectively in a team setting, demonstrating both leadership and participation skills.",
            "Apply efficient time management and collaboration strategies to produce high-quality projects.",
            "Participate constructively in group activities and peer reviews.",
            "Respectfully collaborate with interdisciplinary teams of colleagues and community members to share biological knowledge.",
            "Consider diverse perspectives and respect contributions of others.",
        ],
    ),
    (
        Theme::Values,
        "Professional and Ethical Behaviour",
        &[
            "Act with scientific, academic, and professional integrity and ethics.",
            "Differentiate between ethical and unethical animal practices when designing biological experiments, and judge which procedures are appropriate according to government protocols.",
            "Adhere to professional standards regarding data use and ownership, privacy, intellectual property, and artificial intelligence use.",
            "Contribute to building a safe, supportive, and professional learning environment.",
        ],
    ),
    (
        Theme::Values,
        "Societal Importance",
        &[
            "Analyze and critically evaluate the societal importance of biological sciences, including the relevance to human welfare, conservation, and sustainability.",
            "Develop personal beliefs and values regarding biological issues in society, and initiate action in support of these values.",
            "Recognize and understand sustainability challenges from a scientific perspective and the need for multiple perspectives, such as those found within indigenous systems, to achieve a sustainable future.",
        ],
    ),
    (
        Theme::Values,
        "Commitment to Lifelong Learning",
        &[
            "Demonstrate self-direction and motivation towards learning.",
            "Identify personal interests and develop a plan for a career in biology.",
            "Develop a comprehensive understanding of oneself as a learner and apply appropriate learning strategies to various situations.",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shape() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.name(), "Canadian Program Framework (CPF)");
        assert_eq!(taxonomy.len(), 52);

        let counts = taxonomy.theme_counts();
        assert_eq!(counts[&Theme::Knowledge], 19);
        assert_eq!(counts[&Theme::Skills], 23);
        assert_eq!(counts[&Theme::Values], 10);
    }

    #[test]
    fn test_builtin_flattened_order_is_stable() {
        let a = Taxonomy::builtin();
        let b = Taxonomy::builtin();
        assert_eq!(a.statements(), b.statements());

        let first = a.get(0).unwrap();
        assert_eq!(first.theme, Theme::Knowledge);
        assert_eq!(first.heading, "Foundational Knowledge & Concepts");
        let last = a.get(a.len() - 1).unwrap();
        assert_eq!(last.theme, Theme::Values);
        assert_eq!(last.heading, "Commitment to Lifelong Learning");
        assert!(a.get(a.len()).is_none());
    }

    #[test]
    fn test_theme_parse() {
        assert_eq!("skills".parse::<Theme>().unwrap(), Theme::Skills);
        assert_eq!(" Values ".parse::<Theme>().unwrap(), Theme::Values);
        assert!(matches!(
            "Attitudes".parse::<Theme>(),
            Err(TaxonomyError::UnknownTheme { .. })
        ));
    }

    #[test]
    fn test_from_toml_str() {
        let content = r#"
name = "Mini"

[[themes]]
theme = "Knowledge"

[[themes.headings]]
heading = "Core"
statements = ["Explain cell structure.", "Describe evolution."]

[[themes]]
theme = "Values"

[[themes.headings]]
heading = "Ethics"
statements = ["Act with integrity."]
"#;
        let taxonomy = Taxonomy::from_toml_str(content).unwrap();
        assert_eq!(taxonomy.name(), "Mini");
        assert_eq!(taxonomy.len(), 3);
        assert_eq!(taxonomy.get(2).unwrap().theme, Theme::Values);
        assert_eq!(taxonomy.get(2).unwrap().heading, "Ethics");
        assert!(!taxonomy.theme_counts().contains_key(&Theme::Skills));
    }

    #[test]
    fn test_from_toml_rejects_unknown_theme() {
        let content = r#"
name = "Bad"
[[themes]]
theme = "Attitudes"
[[themes.headings]]
heading = "X"
statements = ["Something."]
"#;
        let err = Taxonomy::from_toml_str(content).unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownTheme { .. }));
    }

    #[test]
    fn test_from_toml_rejects_empty() {
        let err = Taxonomy::from_toml_str("name = \"Blank\"").unwrap_err();
        assert!(matches!(err, TaxonomyError::Empty { .. }));
    }

    #[test]
    fn test_from_toml_parse_error() {
        let err = Taxonomy::from_toml_str("name = ").unwrap_err();
        assert!(matches!(err, TaxonomyError::Parse { .. }));
    }

    #[test]
    fn test_from_path_missing() {
        let err = Taxonomy::from_path(Path::new("/nonexistent/taxonomy.toml")).unwrap_err();
        assert!(matches!(err, TaxonomyError::FileNotFound { .. }));
    }

    #[test]
    fn test_document_round_trip_preserves_order() {
        let taxonomy = Taxonomy::builtin();
        let doc = taxonomy.to_document();
        assert_eq!(doc.themes.len(), 3);
        assert_eq!(doc.themes[0].theme, "Knowledge");
        assert_eq!(doc.themes[1].headings.len(), 4);

        let rebuilt = Taxonomy::from_document(doc).unwrap();
        assert_eq!(rebuilt.statements(), taxonomy.statements());
    }
}
