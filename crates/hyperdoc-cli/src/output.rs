//! Output formatting and writing utilities
//!
//! Results are written to stdout in the selected format; status messages
//! go to a separate stream (stderr) so piped documents stay clean.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use hyperdoc_core::{Document, Operation, ResolvedSchema};
use serde::Serialize;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for documents
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a built document
    fn format_document(&self, document: &Document, use_color: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_document(&self, document: &Document, use_color: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_document_human(document, use_color)),
            _ => self.format(document),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
    messages: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer on stdout, with messages on stderr
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writers(
            format,
            use_color,
            quiet,
            Box::new(io::stdout()),
            Box::new(io::stderr()),
        )
    }

    /// Create an output writer with custom streams
    pub fn with_writers(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
        messages: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
            messages,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    fn message(&mut self, content: &str) -> Result<()> {
        writeln!(self.messages, "{}", content)?;
        self.messages.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.message(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.message(&message.green().to_string())
        } else {
            self.message(message)
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.write_formatted(&formatted)
    }

    /// Write a document in the configured format
    pub fn document(&mut self, document: &Document) -> Result<()> {
        let formatted = self.format.format_document(document, self.use_color)?;
        self.write_formatted(&formatted)
    }

    fn write_formatted(&mut self, formatted: &str) -> Result<()> {
        // YAML output already ends with a newline
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }
}

fn heading(text: &str, use_color: bool) -> String {
    if use_color {
        format!("═══ {} ═══", text).bright_blue().to_string()
    } else {
        format!("=== {} ===", text)
    }
}

/// Format a document for human reading
fn format_document_human(document: &Document, use_color: bool) -> String {
    let mut output = String::new();

    let title = document.title.as_deref().unwrap_or("Untitled API");
    output.push_str(&heading(title, use_color));
    output.push('\n');

    if let Some(description) = &document.description {
        output.push_str(description);
        output.push('\n');
    }
    match (&document.url, &document.href) {
        (Some(url), _) => output.push_str(&format!("Base URL: {}\n", url)),
        (None, Some(href)) => output.push_str(&format!(
            "Base URL: {} (relative, host {})\n",
            href,
            document.host()
        )),
        (None, None) => output.push_str(&format!("Host: {} (no base URL)\n", document.host())),
    }

    if !document.properties.is_empty() {
        output.push('\n');
        output.push_str(&heading("Properties", use_color));
        output.push('\n');
        for (name, schema) in &document.properties {
            push_property(&mut output, name, schema, 1);
        }
    }

    output.push('\n');
    output.push_str(&heading(
        &format!("Operations ({})", document.operations.len()),
        use_color,
    ));
    output.push('\n');
    for operation in &document.operations {
        push_operation(&mut output, operation, use_color);
    }

    output
}

fn describe_type(schema: &ResolvedSchema) -> String {
    let mut kind = if schema.ref_label.is_empty() {
        schema.types.join("|")
    } else {
        schema.ref_label.clone()
    };
    if kind.is_empty() {
        kind.push_str("any");
    }
    if schema.recursive {
        kind.push_str(" (recursive)");
    }
    kind
}

fn push_property(output: &mut String, name: &str, schema: &ResolvedSchema, depth: usize) {
    let indent = "  ".repeat(depth);
    output.push_str(&format!("{}{}: {}", indent, name, describe_type(schema)));
    if let Some(description) = &schema.description {
        output.push_str(&format!(" - {}", description));
    }
    output.push('\n');

    for (child_name, child) in &schema.properties {
        push_property(output, child_name, child, depth + 1);
    }
}

fn push_operation(output: &mut String, operation: &Operation, use_color: bool) {
    let method = if use_color {
        operation.method.bold().to_string()
    } else {
        operation.method.clone()
    };
    output.push_str(&format!("  {} {}", method, operation.href));
    if !operation.rel.is_empty() {
        output.push_str(&format!(" [{}]", operation.rel));
    }
    output.push_str(&format!(
        " -> {} {}",
        operation.response.status_code, operation.response.reason_phrase
    ));
    output.push('\n');

    if !operation.description.is_empty() {
        output.push_str(&format!("      {}\n", operation.description));
    }
    if let Some(schema) = &operation.schema {
        output.push_str(&format!("      request: {}\n", describe_type(schema)));
    }
    if let Some(schema) = &operation.target_schema {
        output.push_str(&format!("      response: {}\n", describe_type(schema)));
    }
}


#[cfg(test)]
mod tests;
