//! CLI subcommand handlers.

use crate::Commands;
use crate::ConfigAction;
use crosswalk_core::config::{load_config, workspace_config_path};
use crosswalk_core::export::{export_with, ExportFormat};
use crosswalk_core::{Comparator, ComparisonReport, CrosswalkConfig, Taxonomy};
use std::path::{Path, PathBuf};

const WRAP_WIDTH: usize = 88;

/// Handle a CLI subcommand.
pub fn handle_command(command: Commands, workspace: &Path) -> anyhow::Result<()> {
    match command {
        Commands::Compare {
            input,
            statements,
            format,
            output,
            lexical,
        } => handle_compare(
            workspace,
            input.as_deref(),
            statements,
            format.as_deref(),
            output.as_deref(),
            lexical,
        ),
        Commands::Similarity {
            institutional,
            reference,
            lexical,
        } => handle_similarity(workspace, &institutional, &reference, lexical),
        Commands::Framework { json } => handle_framework(workspace, json),
        Commands::Config { action } => handle_config(action, workspace),
    }
}

fn load(workspace: &Path, force_lexical: bool) -> anyhow::Result<CrosswalkConfig> {
    let mut config = load_config(Some(workspace), None)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    if force_lexical {
        config.similarity.provider = "lexical".into();
    }
    Ok(config)
}

fn handle_compare(
    workspace: &Path,
    input: Option<&Path>,
    inline: Vec<String>,
    format: Option<&str>,
    output: Option<&Path>,
    force_lexical: bool,
) -> anyhow::Result<()> {
    let config = load(workspace, force_lexical)?;

    let mut statements = match input {
        Some(path) if path == Path::new("-") => {
            parse_statements(&std::io::read_to_string(std::io::stdin())?)
        }
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
            parse_statements(&content)
        }
        None => Vec::new(),
    };
    statements.extend(parse_statements(&inline.join("\n")));

    if statements.is_empty() {
        anyhow::bail!("No statements provided. Pass a file, '-' for stdin, or --statement TEXT");
    }

    let comparator = Comparator::from_config(&config)?;
    let report = comparator.compare(&statements);

    // An output path without an explicit format falls back to the configured one.
    let format = match (format, output) {
        (Some(f), _) => Some(f.parse::<ExportFormat>()?),
        (None, Some(_)) => Some(config.export.format.parse::<ExportFormat>()?),
        (None, None) => None,
    };

    match format {
        Some(format) => {
            let rendered = export_with(&report, format, &config.export.term_delimiter)?;
            match output {
                Some(path) => {
                    std::fs::write(path, rendered)?;
                    println!("Exported {} report to: {}", format, path.display());
                }
                None => print!("{}", rendered),
            }
        }
        None => print!("{}", render_summary(&report)),
    }
    Ok(())
}

fn handle_similarity(
    workspace: &Path,
    institutional: &str,
    reference: &str,
    force_lexical: bool,
) -> anyhow::Result<()> {
    let config = load(workspace, force_lexical)?;
    let comparator = Comparator::from_config(&config)?;
    let score = comparator.score_pair(institutional, reference);

    println!("Similarity mode:     {}", comparator.mode());
    println!("Similarity:          {:.3}", score.similarity);
    println!(
        "Alignment:           {} ({:.1}, {})",
        score.alignment_type,
        score.alignment_score,
        score.alignment_type.color()
    );
    println!("Shared terms:        {}", join_or_none(score.shared_terms.iter()));
    println!(
        "Institutional tags:  {}",
        join_or_none(score.institutional_cognitive_tags.tagged_levels().iter())
    );
    println!(
        "Reference tags:      {}",
        join_or_none(score.reference_cognitive_tags.tagged_levels().iter())
    );
    println!("Cognitive alignment: {}", score.cognitive_alignment);
    Ok(())
}

fn handle_framework(workspace: &Path, json: bool) -> anyhow::Result<()> {
    let config = load(workspace, false)?;
    let taxonomy = match &config.taxonomy.path {
        Some(path) => Taxonomy::from_path(path)?,
        None => Taxonomy::builtin(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&taxonomy.to_document())?);
    } else {
        print!("{}", render_framework(&taxonomy));
    }
    Ok(())
}

fn handle_config(action: ConfigAction, workspace: &Path) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path: PathBuf = workspace_config_path(workspace);
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }

            let toml_str = toml::to_string_pretty(&CrosswalkConfig::default())?;
            std::fs::write(&config_path, &toml_str)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            let config = load(workspace, false)?;
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

/// One statement per line, trimmed. Blank lines and `nan` placeholders left by
/// spreadsheet exports are dropped.
fn parse_statements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.eq_ignore_ascii_case("nan"))
        .map(String::from)
        .collect()
}

fn join_or_none<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    let joined: Vec<String> = items.map(|i| i.to_string()).collect();
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined.join(", ")
    }
}

fn wrap(text: &str, initial: &str, subsequent: &str) -> String {
    let options = textwrap::Options::new(WRAP_WIDTH)
        .initial_indent(initial)
        .subsequent_indent(subsequent);
    textwrap::fill(text, options)
}

/// Human-readable report summary.
fn render_summary(report: &ComparisonReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    out.push_str(&format!("Framework:           {}\n", report.framework));
    out.push_str(&format!("Similarity mode:     {}\n", summary.similarity_mode));
    out.push_str(&format!(
        "Statements analyzed: {}\n",
        summary.total_statements_analyzed
    ));
    out.push_str(&format!(
        "Overall alignment:   {:.3}\n",
        summary.overall_alignment
    ));

    out.push_str("\nTheme averages:\n");
    for (theme, avg) in &summary.theme_averages {
        out.push_str(&format!("  {:<10} {:.3}\n", theme.as_str(), avg));
    }
    if let Some(theme) = summary.strongest_theme {
        out.push_str(&format!("Strongest theme: {}\n", theme));
    }
    if let Some(theme) = summary.weakest_theme {
        out.push_str(&format!("Weakest theme:   {}\n", theme));
    }

    let tiers = report.tier_counts();
    out.push_str(&format!(
        "Crosswalk pairs: {} Full, {} Partial, {} None\n",
        tiers.get("Full").copied().unwrap_or(0),
        tiers.get("Partial").copied().unwrap_or(0),
        tiers.get("None").copied().unwrap_or(0),
    ));

    out.push_str("\nBest matches:\n");
    for (n, (statement, best)) in report.best_matches().enumerate() {
        out.push_str(&wrap(statement, &format!("{:>3}. ", n + 1), "     "));
        out.push('\n');
        if let Some(m) = best {
            out.push_str(&format!(
                "     -> [{} {:.3}] {} / {}\n",
                m.alignment_type, m.raw_similarity, m.reference.theme, m.reference.heading
            ));
            out.push_str(&wrap(&m.reference.text, "        ", "        "));
            out.push('\n');
        }
    }

    out.push_str("\nRecommendations:\n");
    for rec in &report.recommendations {
        out.push_str(&wrap(rec, "  - ", "    "));
        out.push('\n');
    }
    out
}

/// Outline of a taxonomy: theme, heading, then its statements.
fn render_framework(taxonomy: &Taxonomy) -> String {
    let document = taxonomy.to_document();
    let mut out = format!("{} ({} statements)\n", document.name, taxonomy.len());
    for theme in &document.themes {
        out.push_str(&format!("\n{}\n", theme.theme));
        for heading in &theme.headings {
            out.push_str(&format!("  {}\n", heading.heading));
            for statement in &heading.statements {
                out.push_str(&wrap(statement, "    - ", "      "));
                out.push('\n');
            }
        }
    }
    out
}
