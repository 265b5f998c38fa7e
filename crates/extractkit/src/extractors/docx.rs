//! DOCX raw text extraction
//!
//! Formatting and styles are discarded. Each paragraph, including the ones
//! inside table cells, becomes one block; blocks are separated by blank
//! lines.

use crate::error::ExtractError;
use crate::types::FileKind;
use docx_rs::{
    DocumentChild, InsertChild, MoveToChild, Paragraph, ParagraphChild, Run, RunChild,
    StructuredDataTag, StructuredDataTagChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

/// Extract raw text from DOCX bytes
///
/// Content controls and tracked insertions count as document text; tracked
/// deletions do not.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| ExtractError::parse(FileKind::Docx, format!("Failed to read DOCX: {}", e)))?;

    let mut blocks = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => blocks.push(paragraph_text(p)),
            DocumentChild::Table(t) => table_text(t, &mut blocks),
            DocumentChild::StructuredDataTag(tag) => tag_blocks(tag, &mut blocks),
            _ => {}
        }
    }

    Ok(blocks.join("\n\n").trim().to_string())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&paragraph.children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, out),
            ParagraphChild::Insert(insert) => {
                for child in &insert.children {
                    if let InsertChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::MoveTo(move_to) => {
                for child in &move_to.children {
                    if let MoveToChild::Run(run) = child {
                        push_run(run, out);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, out),
            ParagraphChild::StructuredDataTag(tag) => push_inline_tag(tag, out),
            _ => {}
        }
    }
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

/// Content control inside a paragraph
fn push_inline_tag(tag: &StructuredDataTag, out: &mut String) {
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => push_run(run, out),
            StructuredDataTagChild::Paragraph(p) => push_paragraph_children(&p.children, out),
            StructuredDataTagChild::StructuredDataTag(nested) => push_inline_tag(nested, out),
            _ => {}
        }
    }
}

/// Content control at block level; loose runs form one block
fn tag_blocks(tag: &StructuredDataTag, blocks: &mut Vec<String>) {
    let mut runs = String::new();
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => {
                push_run(run, &mut runs);
            }
            StructuredDataTagChild::Paragraph(p) => {
                flush_runs(&mut runs, blocks);
                blocks.push(paragraph_text(p));
            }
            StructuredDataTagChild::Table(t) => {
                flush_runs(&mut runs, blocks);
                table_text(t, blocks);
            }
            StructuredDataTagChild::StructuredDataTag(nested) => {
                flush_runs(&mut runs, blocks);
                tag_blocks(nested, blocks);
            }
            _ => {}
        }
    }
    flush_runs(&mut runs, blocks);
}

fn flush_runs(runs: &mut String, blocks: &mut Vec<String>) {
    if !runs.is_empty() {
        blocks.push(std::mem::take(runs));
    }
}

fn table_text(table: &Table, blocks: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => blocks.push(paragraph_text(p)),
                    TableCellContent::Table(nested) => table_text(nested, blocks),
                    TableCellContent::StructuredDataTag(tag) => tag_blocks(tag, blocks),
                    _ => {}
                }
            }
        }
    }
}
