use crate::{models::Project, Error, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}

impl ExportFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            "md" | "markdown" => Some(ExportFormat::Markdown),
            _ => None,
        }
    }
}

/// Writes the gallery list out for reuse elsewhere
pub struct Exporter;

impl Exporter {
    /// Export projects, picking the format from the file extension
    pub fn export_to_file<P: AsRef<Path>>(projects: &[Project], path: P) -> Result<()> {
        let path = path.as_ref();

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .ok_or_else(|| {
                Error::ExportError(
                    "Could not determine export format from extension. Use .json, .csv, or .md"
                        .to_string(),
                )
            })?;

        Self::export_to_file_with_format(projects, path, format)
    }

    pub fn export_to_file_with_format<P: AsRef<Path>>(
        projects: &[Project],
        path: P,
        format: ExportFormat,
    ) -> Result<()> {
        let content = match format {
            ExportFormat::Json => Self::to_json(projects)?,
            ExportFormat::Csv => Self::to_csv(projects),
            ExportFormat::Markdown => Self::to_markdown(projects),
        };

        let mut file = File::create(path)
            .map_err(|e| Error::ExportError(format!("Failed to create file: {}", e)))?;

        file.write_all(content.as_bytes())
            .map_err(|e| Error::ExportError(format!("Failed to write file: {}", e)))?;

        Ok(())
    }

    /// Same shape as the web gallery's data file
    pub fn to_json(projects: &[Project]) -> Result<String> {
        Ok(serde_json::to_string_pretty(projects)?)
    }

    pub fn to_csv(projects: &[Project]) -> String {
        let mut output =
            String::from("ID,Title,Category,Source,Technologies,Stars,Updated,Code,Demo\n");

        for project in projects {
            output.push_str(&format!(
                "{},{},{},{},{},{},{},{},{}\n",
                Self::escape_csv(&project.id),
                Self::escape_csv(&project.title),
                Self::escape_csv(project.category.label()),
                project.source,
                Self::escape_csv(&project.technologies.join("; ")),
                project.stars.map(|s| s.to_string()).unwrap_or_default(),
                project
                    .updated_at
                    .map(|at| at.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
                Self::escape_csv(project.github_url.as_deref().unwrap_or("")),
                Self::escape_csv(project.demo_url.as_deref().unwrap_or("")),
            ));
        }

        output
    }

    /// Projects grouped under their category headings
    pub fn to_markdown(projects: &[Project]) -> String {
        let mut output = String::new();

        output.push_str("# Projects\n\n");
        output.push_str(&format!("Total projects: {}\n\n", projects.len()));

        let mut by_category: BTreeMap<_, Vec<&Project>> = BTreeMap::new();
        for project in projects {
            by_category.entry(project.category).or_default().push(project);
        }

        for (category, entries) in by_category {
            output.push_str(&format!("## {}\n\n", category));

            for project in entries {
                match project.github_url.as_deref() {
                    Some(url) => output.push_str(&format!("### [{}]({})\n\n", project.title, url)),
                    None => output.push_str(&format!("### {}\n\n", project.title)),
                }

                if !project.description.is_empty() {
                    output.push_str(&format!("{}\n\n", project.description));
                }

                if !project.technologies.is_empty() {
                    let tags: Vec<String> = project
                        .technologies
                        .iter()
                        .map(|t| format!("`{}`", t))
                        .collect();
                    output.push_str(&format!("**Tech:** {}\n\n", tags.join(", ")));
                }

                if let Some(demo) = &project.demo_url {
                    output.push_str(&format!("**Live demo:** {}\n\n", demo));
                }
                if let Some(stars) = project.stars {
                    output.push_str(&format!("**Stars:** {}\n\n", stars));
                }
            }
        }

        output
    }

    fn escape_csv(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ProjectSource};

    fn create_test_project() -> Project {
        Project {
            id: "gh-7-ledger".to_string(),
            title: "Ledger, Lite".to_string(),
            description: "Tiny \"double entry\" book".to_string(),
            technologies: vec!["Rust".to_string(), "cli".to_string()],
            image: String::new(),
            github_url: Some("https://github.com/sdnssr1/ledger".to_string()),
            demo_url: None,
            stars: Some(4),
            updated_at: None,
            category: Category::Utilities,
            source: ProjectSource::GitHub,
        }
    }

    #[test]
    fn test_export_format_detection() {
        assert_eq!(ExportFormat::from_extension("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_extension("csv"), Some(ExportFormat::Csv));
        assert_eq!(
            ExportFormat::from_extension("markdown"),
            Some(ExportFormat::Markdown)
        );
        assert_eq!(ExportFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = Exporter::to_json(&[create_test_project()]).unwrap();
        assert!(json.contains("\"githubUrl\""));
        assert!(json.contains("\"category\": \"Utilities\""));
    }

    #[test]
    fn test_csv_escapes_fields() {
        let csv = Exporter::to_csv(&[create_test_project()]);
        assert!(csv.starts_with("ID,Title,Category"));
        assert!(csv.contains("\"Ledger, Lite\""));
        assert!(csv.contains(",github,Rust; cli,4,,"));
    }

    #[test]
    fn test_csv_quotes_urls_with_commas() {
        let mut project = create_test_project();
        project.demo_url = Some("https://example.com/?tags=a,b".to_string());

        let csv = Exporter::to_csv(&[project]);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.ends_with(",https://github.com/sdnssr1/ledger,\"https://example.com/?tags=a,b\""));
    }

    #[test]
    fn test_markdown_groups_by_category() {
        let md = Exporter::to_markdown(&[create_test_project()]);
        assert!(md.contains("## Utilities"));
        assert!(md.contains("### [Ledger, Lite](https://github.com/sdnssr1/ledger)"));
        assert!(md.contains("`Rust`, `cli`"));
    }

    #[test]
    fn test_export_to_file_detects_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        Exporter::export_to_file(&[create_test_project()], &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("gh-7-ledger"));

        let bad = dir.path().join("projects.txt");
        assert!(matches!(
            Exporter::export_to_file(&[], &bad),
            Err(Error::ExportError(_))
        ));
    }
}
