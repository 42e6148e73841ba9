//! Step catalog generation
//!
//! Scans step definition sources for `#[given]`, `#[when]` and `#[then]`
//! attributes and renders their doc comments as a Markdown reference.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{debug, info};

use crate::common::{Error, Result};

const STEP_ATTRIBUTE: &str =
    r#"^#\[(given|when|then)\(\s*(?:(?:expr|regex)\s*=\s*)?"((?:[^"\\]|\\.)*)"\s*\)\]"#;

/// Step keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Keyword {
    Given,
    When,
    Then,
}

impl Keyword {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "given" => Some(Keyword::Given),
            "when" => Some(Keyword::When),
            "then" => Some(Keyword::Then),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Keyword::Given => "Given",
            Keyword::When => "When",
            Keyword::Then => "Then",
        }
    }
}

/// One documented step definition
#[derive(Debug, Clone, PartialEq)]
pub struct StepDoc {
    pub keyword: Keyword,
    pub pattern: String,
    pub description: String,
    pub examples: Vec<String>,
    pub source: PathBuf,
}

/// Extracts step definitions from source text
pub struct StepScanner {
    attribute: Regex,
}

impl StepScanner {
    pub fn new() -> Result<Self> {
        let attribute = Regex::new(STEP_ATTRIBUTE)
            .map_err(|e| Error::Config(format!("invalid step pattern: {}", e)))?;
        Ok(Self { attribute })
    }

    /// Find step definitions in one file's contents
    pub fn scan_source(&self, source: &str, path: &Path) -> Vec<StepDoc> {
        let mut steps = Vec::new();
        let mut docs: Vec<String> = Vec::new();

        for line in source.lines() {
            let line = line.trim();

            if let Some(doc) = line.strip_prefix("///") {
                docs.push(doc.strip_prefix(' ').unwrap_or(doc).to_string());
                continue;
            }

            if let Some(caps) = self.attribute.captures(line) {
                if let Some(keyword) = Keyword::parse(&caps[1]) {
                    let (description, examples) = split_docs(&docs);
                    steps.push(StepDoc {
                        keyword,
                        pattern: caps[2].replace("\\\"", "\""),
                        description,
                        examples,
                        source: path.to_path_buf(),
                    });
                }
                docs.clear();
                continue;
            }

            // other attributes may sit between the docs and the step attribute
            if !line.starts_with("#[") {
                docs.clear();
            }
        }

        steps
    }

    /// Recursively scan a directory of `.rs` files
    pub fn scan_dir(&self, dir: &Path) -> Result<Vec<StepDoc>> {
        let mut files = Vec::new();
        collect_sources(dir, &mut files)?;
        files.sort();

        let mut steps = Vec::new();
        for file in &files {
            let source = std::fs::read_to_string(file).map_err(|e| Error::FileRead {
                path: file.display().to_string(),
                error: e.to_string(),
            })?;
            let found = self.scan_source(&source, file);
            debug!(file = %file.display(), count = found.len(), "Scanned step definitions");
            steps.extend(found);
        }
        Ok(steps)
    }
}

fn collect_sources(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_sources(&path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    Ok(())
}

/// Split doc lines into the description and the `# Examples` section
///
/// Code fences are dropped. Inside the examples section every line that
/// starts with a Gherkin keyword opens a new example; other lines (tables,
/// doc strings) are appended to the current one.
fn split_docs(lines: &[String]) -> (String, Vec<String>) {
    let mut description = Vec::new();
    let mut examples: Vec<String> = Vec::new();
    let mut in_examples = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("# examples") {
            in_examples = true;
            continue;
        }
        if trimmed.starts_with("```") {
            continue;
        }

        if !in_examples {
            description.push(trimmed);
            continue;
        }

        let starts_example = ["Given ", "When ", "Then ", "And ", "But "]
            .iter()
            .any(|k| trimmed.starts_with(k));
        match examples.last_mut() {
            Some(current) if !starts_example => {
                if !trimmed.is_empty() {
                    current.push('\n');
                    current.push_str(line);
                }
            }
            _ if trimmed.is_empty() => {}
            _ => examples.push(trimmed.to_string()),
        }
    }

    let description = description.join(" ").trim().to_string();
    (description, examples)
}

/// Render a Markdown catalog grouped by keyword
pub fn render_markdown(steps: &[StepDoc]) -> String {
    let mut out = String::from("# Step Definitions\n\n");
    out.push_str("Generated by `apibdd steps`. Do not edit by hand.\n");

    for keyword in [Keyword::Given, Keyword::When, Keyword::Then] {
        let group: Vec<_> = steps.iter().filter(|s| s.keyword == keyword).collect();
        if group.is_empty() {
            continue;
        }

        let _ = write!(out, "\n## {}\n", keyword.title());
        for step in group {
            let _ = write!(out, "\n### `{} {}`\n\n", keyword.title(), step.pattern);
            if !step.description.is_empty() {
                let _ = writeln!(out, "{}\n", step.description);
            }
            if !step.examples.is_empty() {
                out.push_str("```gherkin\n");
                for example in &step.examples {
                    let _ = writeln!(out, "{}", example);
                }
                out.push_str("```\n\n");
            }
            let _ = writeln!(out, "_Defined in `{}`_", step.source.display());
        }
    }

    out
}

/// Scan `source_dir` and write the catalog to `output`
///
/// Returns the number of documented steps.
pub fn generate(source_dir: &Path, output: &Path) -> Result<usize> {
    let scanner = StepScanner::new()?;
    let steps = scanner.scan_dir(source_dir)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, render_markdown(&steps))?;

    info!(count = steps.len(), output = %output.display(), "Step catalog written");
    Ok(steps.len())
}
