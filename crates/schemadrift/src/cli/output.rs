//! Output formatting utilities for CLI commands.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use schemadrift_protocol::CanonicalKind;

/// Print a table with headers and rows
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

/// Color for canonical kind indicators
pub fn color_for_kind(kind: CanonicalKind) -> Color {
    match kind {
        CanonicalKind::String => Color::Green,
        CanonicalKind::Number => Color::Cyan,
        CanonicalKind::Boolean => Color::Magenta,
        CanonicalKind::Array | CanonicalKind::Map => Color::Yellow,
        CanonicalKind::Timestamp => Color::Blue,
        CanonicalKind::Reference => Color::White,
        CanonicalKind::Null | CanonicalKind::Unknown => Color::Grey,
    }
}

/// Format `matched/total` with a percentage, omitting the percentage when
/// the denominator is zero.
pub fn format_ratio(matched: u64, total: u64) -> String {
    if total == 0 {
        format!("{}/{}", matched, total)
    } else {
        format!(
            "{}/{} ({:.1}%)",
            matched,
            total,
            matched as f64 * 100.0 / total as f64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(2, 3), "2/3 (66.7%)");
        assert_eq!(format_ratio(0, 0), "0/0");
        assert_eq!(format_ratio(5, 5), "5/5 (100.0%)");
    }
}
