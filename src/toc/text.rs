//! Splitting a chapter-entry cell into its lines.

use super::SELECTORS;
use crate::error::{Column, EntryParseError};
use scraper::ElementRef;
use scraper::node::Node;

/// Splits a cell into trimmed lines at each `<br>`.
///
/// Always returns at least one slot: an absent or blank cell yields `[None]`
/// so that column alignment still counts it. Inline markup inside a line is
/// reduced to its text.
///
/// A `<br>` nested inside another tag of the cell is reported as
/// [`EntryParseError::NestedBreak`]; [`flatten_lines`] still reads such a cell.
pub fn extract_texts(
    cell: Option<ElementRef<'_>>,
    column: Column,
) -> Result<Vec<Option<String>>, EntryParseError> {
    let Some(cell) = cell else {
        return Ok(vec![None]);
    };

    let nested = cell
        .select(&SELECTORS.line_break)
        .any(|br| br.parent().is_none_or(|parent| parent.id() != cell.id()));
    if nested {
        return Err(EntryParseError::NestedBreak { column });
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for child in cell.children() {
        match child.value() {
            Node::Element(element) if element.name() == "br" => {
                lines.push(std::mem::take(&mut current));
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    current.extend(element.text());
                }
            }
            Node::Text(text) => current.push_str(text),
            _ => {}
        }
    }
    lines.push(current);

    Ok(finish_lines(lines))
}

/// Splits a cell at every `<br>` in document order, however deeply nested.
///
/// Line boundaries may cut through inline markup; each piece keeps only its
/// text.
pub fn flatten_lines(cell: ElementRef<'_>) -> Vec<Option<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for node in cell.descendants() {
        match node.value() {
            Node::Element(element) if element.name() == "br" => {
                lines.push(std::mem::take(&mut current));
            }
            Node::Text(text) => current.push_str(text),
            _ => {}
        }
    }
    lines.push(current);

    finish_lines(lines)
}

/// Trims lines and drops empty ones, falling back to the `[None]` sentinel.
fn finish_lines(lines: Vec<String>) -> Vec<Option<String>> {
    let texts: Vec<Option<String>> = lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| Some(line.to_string()))
        .collect();

    if texts.is_empty() {
        vec![None]
    } else {
        texts
    }
}
