use super::view_formatters::{Renderable, Section, TableBlock};
use colored::*;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_view(&mut self, view: &dyn Renderable) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_view(&mut self, view: &dyn Renderable) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&view.to_json()?)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_view(&mut self, view: &dyn Renderable) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", view.heading())?;
        writeln!(self.writer)?;
        for section in view.sections() {
            self.write_section(&section)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_section(&mut self, section: &Section) -> anyhow::Result<()> {
        writeln!(self.writer, "## {}", section.title)?;
        writeln!(self.writer)?;
        for note in &section.notes {
            writeln!(self.writer, "{note}")?;
            writeln!(self.writer)?;
        }
        if let Some(table) = &section.table {
            self.write_table(table)?;
        }
        Ok(())
    }

    fn write_table(&mut self, table: &TableBlock) -> anyhow::Result<()> {
        writeln!(self.writer, "| {} |", escape_cells(&table.headers).join(" | "))?;
        writeln!(
            self.writer,
            "|{}|",
            vec!["---"; table.headers.len()].join("|")
        )?;
        for row in &table.rows {
            writeln!(self.writer, "| {} |", escape_cells(row).join(" | "))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

fn escape_cells(cells: &[String]) -> Vec<String> {
    cells.iter().map(|cell| cell.replace('|', "\\|")).collect()
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_view(&mut self, view: &dyn Renderable) -> anyhow::Result<()> {
        let heading = view.heading();
        writeln!(self.writer, "{}", heading.bold().yellow())?;
        writeln!(self.writer, "{}", "=".repeat(heading.chars().count()).yellow())?;
        writeln!(self.writer)?;

        for section in view.sections() {
            writeln!(self.writer, "{}", section.title.bold())?;
            for note in &section.notes {
                writeln!(self.writer, "  {}", note.dimmed())?;
            }
            if let Some(block) = &section.table {
                writeln!(self.writer, "{}", terminal_table(block))?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn terminal_table(block: &TableBlock) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(block.headers.clone());
    for row in &block.rows {
        table.add_row(row.clone());
    }
    table
}

pub fn create_writer<'a, W: Write + 'a>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Role;
    use crate::views::HallOfFameView;

    fn empty_hall() -> HallOfFameView {
        HallOfFameView {
            role: Role::Actress,
            decade: 1990,
            podium: 3,
            popular: vec![],
            acclaimed: vec![],
            fell_back: true,
        }
    }

    fn render(format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        create_writer(format, &mut buffer)
            .write_view(&empty_hall())
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_json_writer_emits_view_fields() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value["role"], "actress");
        assert_eq!(value["decade"], 1990);
        assert_eq!(value["fell_back"], true);
    }

    #[test]
    fn test_markdown_writer_sections_and_placeholders() {
        let out = render(OutputFormat::Markdown);
        assert!(out.starts_with("# Hall of fame: Actress (1990s)"));
        assert!(out.contains("## Most popular"));
        assert!(out.contains("No crew profiles for this role and decade."));
    }

    #[test]
    fn test_markdown_table_escapes_pipes() {
        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer)
            .write_table(&TableBlock {
                headers: vec!["a".into()],
                rows: vec![vec!["x | y".into()]],
            })
            .unwrap();
        let out = String::from_utf8(buffer).unwrap();
        assert!(out.contains("| x \\| y |"));
    }

    #[test]
    fn test_terminal_writer_prints_heading() {
        colored::control::set_override(false);
        let out = render(OutputFormat::Terminal);
        assert!(out.contains("Hall of fame: Actress (1990s)"));
        assert!(out.contains("Most acclaimed"));
    }
}
