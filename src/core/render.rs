//! Record rendering: jsonl, json, grouped markdown, raw keys

use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::io::Write;

use crate::core::model::{Record, RecordKind, RecordSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One JSON record per line
    #[default]
    Jsonl,
    /// A single JSON array
    Json,
    /// Markdown grouped by record kind
    Markdown,
    /// Keys only, falling back to names
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "jsonl" => Self::Jsonl,
            "json" => Self::Json,
            "md" | "markdown" => Self::Markdown,
            "raw" => Self::Raw,
            other => return Err(format!("unknown format {:?} (expected jsonl, json, md or raw)", other)),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    /// Indent JSON output
    pub pretty: bool,
    /// ANSI styling in markdown output
    pub color: bool,
}

/// Markdown section order
const SECTIONS: [(RecordKind, &str); 5] = [
    (RecordKind::Icon, "Icons"),
    (RecordKind::Selection, "Selections"),
    (RecordKind::Item, "Items"),
    (RecordKind::Action, "Actions"),
    (RecordKind::Run, "Runs"),
];

pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self::with_config(RenderConfig {
            format,
            ..RenderConfig::default()
        })
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn render(&self, records: &RecordSet) -> String {
        let items = &records.items;
        match self.config.format {
            OutputFormat::Jsonl => {
                let separator = if self.config.pretty { "\n\n" } else { "\n" };
                items
                    .iter()
                    .filter_map(|record| self.to_json(record))
                    .collect::<Vec<_>>()
                    .join(separator)
            }
            OutputFormat::Json => self.to_json(items).unwrap_or_else(|| "[]".to_string()),
            OutputFormat::Markdown => self.markdown(items),
            OutputFormat::Raw => items
                .iter()
                .filter_map(|record| record.key.as_deref().or(record.name.as_deref()))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Write the rendered records plus a trailing newline; nothing when empty
    pub fn render_to<W: Write>(&self, records: &RecordSet, mut writer: W) -> std::io::Result<()> {
        let output = self.render(records);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Option<String> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.ok()
    }

    fn markdown(&self, items: &[Record]) -> String {
        let mut output = String::new();
        for (kind, title) in SECTIONS {
            let mut section = items.iter().filter(|r| r.kind == kind).peekable();
            if section.peek().is_none() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", self.style(title, |s| s.bold())));
            for record in section {
                output.push('-');
                if let Some(key) = &record.key {
                    output.push_str(&format!(" `{}`", self.style(key, |s| s.cyan())));
                }
                if let Some(name) = &record.name {
                    output.push_str(&format!(" {}", name));
                }
                if let Some(icon) = &record.icon {
                    output.push_str(&format!(" ({})", self.style(icon, |s| s.dimmed())));
                }
                output.push('\n');
            }
            output.push('\n');
        }
        output
    }

    fn style(&self, text: &str, paint: fn(&str) -> ColoredString) -> String {
        if self.config.color {
            paint(text).to_string()
        } else {
            text.to_string()
        }
    }
}
