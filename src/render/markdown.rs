use std::path::Path;

use chrono::{SecondsFormat, Utc};

use super::sink::write_atomic;
use super::{render_plan, PresentationAdapter};
use crate::catalog::Severity;
use crate::error::Result;
use crate::plan::{Block, FactRow, RenderPlan};

/// Markdown formatter for render plans
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    image_base: String,
    frontmatter: bool,
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new("images")
    }
}

impl MarkdownFormatter {
    /// `image_base` prefixes every image link (a directory or URL path).
    pub fn new(image_base: impl Into<String>) -> Self {
        Self {
            image_base: image_base.into().trim_end_matches('/').to_string(),
            frontmatter: true,
        }
    }

    /// Omit the YAML frontmatter (for embedding in another page).
    pub fn body_only(mut self) -> Self {
        self.frontmatter = false;
        self
    }

    /// Format plan as markdown
    pub fn format(&self, plan: &RenderPlan) -> Result<String> {
        let mut md = String::with_capacity(16 * 1024);

        if self.frontmatter {
            md.push_str("---\n");
            md.push_str(&format!("title: {}\n", yaml_string(&plan.metadata.title)));
            md.push_str(&format!("author: {}\n", yaml_string(&plan.metadata.author)));
            md.push_str(&format!("subject: {}\n", yaml_string(&plan.metadata.subject)));
            md.push_str(&format!(
                "generated: {}\n",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
            md.push_str("---\n\n");
        }

        let body = render_plan(
            plan,
            MarkdownWriter { md: String::new(), image_base: &self.image_base },
        )?;
        md.push_str(&body);
        Ok(md)
    }

    /// Format `plan` and write it to `path`. The file appears complete or
    /// not at all.
    pub fn write_to_path(&self, plan: &RenderPlan, path: &Path) -> Result<()> {
        let markdown = self.format(plan)?;
        write_atomic(path, markdown.as_bytes())
    }
}

struct MarkdownWriter<'a> {
    md: String,
    image_base: &'a str,
}

impl PresentationAdapter for MarkdownWriter<'_> {
    type Output = String;

    fn render(&mut self, block: &Block) -> Result<()> {
        let md = &mut self.md;
        match block {
            Block::Cover { title, subtitle, source_line, description, highlight } => {
                md.push_str(&format!("# {}\n\n", title));
                md.push_str(&format!("**{}**\n\n", subtitle.to_uppercase()));
                md.push_str(&format!("*{}*\n\n", source_line));
                md.push_str(&format!("{}\n\n", description));
                md.push_str(&format!("**{}**\n\n", highlight));
            }
            Block::TableOfContents { heading, entries } => {
                md.push_str(&format!("## {}\n\n", heading));
                for entry in entries {
                    let indent = "  ".repeat(entry.level.saturating_sub(1) as usize);
                    md.push_str(&format!("{}- {}\n", indent, list_text(entry.text)));
                }
                md.push('\n');
            }
            Block::SectionHeading { text } => md.push_str(&format!("## {}\n\n", text)),
            Block::SubsectionHeading { text } => md.push_str(&format!("### {}\n\n", text)),
            Block::ConditionHeading { name, .. } => md.push_str(&format!("#### {}\n\n", name)),
            Block::Paragraph { text, .. } => md.push_str(&format!("{}\n\n", text)),
            Block::Callout { label, text } => {
                md.push_str(&format!("> **{}** {}\n\n", label, text))
            }
            Block::Image { image } => md.push_str(&format!(
                "![{}]({}/{})\n\n",
                image.image_ref, self.image_base, image.image_ref
            )),
            Block::Caption { text } => md.push_str(&format!("*{}*\n\n", text)),
            Block::FactTable { headers, rows, .. } => {
                push_header(md, headers);
                for row in rows {
                    md.push_str(&format!(
                        "| {} | {} |\n",
                        cell(&row.label),
                        fact_value(row)
                    ));
                }
                md.push('\n');
            }
            Block::ReferenceTable { headers, rows, .. } => {
                push_header(md, headers);
                for row in rows {
                    let cells: Vec<String> = row
                        .cells
                        .iter()
                        .enumerate()
                        .map(|(i, c)| match row.severity {
                            // the leading column names the row; the rest is the advice
                            Severity::Warning if i > 0 => format!("**{}**", cell(c)),
                            _ => cell(c),
                        })
                        .collect();
                    md.push_str(&format!("| {} |\n", cells.join(" | ")));
                }
                md.push('\n');
            }
            Block::PageBreak => md.push_str("---\n\n"),
        }
        Ok(())
    }

    fn finish(self) -> Result<String> {
        Ok(self.md)
    }
}

fn push_header(md: &mut String, headers: &[String]) {
    let names: Vec<String> = headers.iter().map(|h| cell(h)).collect();
    md.push_str(&format!("| {} |\n", names.join(" | ")));
    md.push_str(&format!("|{}\n", " --- |".repeat(headers.len())));
}

fn fact_value(row: &FactRow) -> String {
    match row.severity {
        Severity::Warning => format!("**{}**", cell(&row.value)),
        Severity::Normal => cell(&row.value),
    }
}

/// Escape a leading "7." so list items keep their own numbering instead of
/// opening a nested ordered list.
fn list_text(text: &str) -> String {
    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    match text[digits..].strip_prefix(". ") {
        Some(rest) if digits > 0 => format!("{}\\. {}", &text[..digits], rest),
        _ => text.to_string(),
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn yaml_string(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
