//! Text preview of a sequenced grid for log output

use crate::color::palette::Palette;
use crate::io::collection::Item;
use crate::io::configuration::PREVIEW_LABEL_WIDTH;

/// Separator between cells of a preview row
const CELL_SEPARATOR: &str = " │ ";

/// Label cut to `width` characters and padded to exactly that width
pub fn fit_label(label: &str, width: usize) -> String {
    let truncated: String = label.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn dominant_cell(palette: &Palette) -> String {
    palette
        .dominant()
        .map_or_else(String::new, ToString::to_string)
}

fn hue_cell(palette: &Palette) -> String {
    let hues: Vec<String> = palette
        .colors()
        .iter()
        .map(|color| format!("{:>3}", color.hue().round() as u32))
        .collect();
    format!("H:{}", hues.join(","))
}

/// Render the grid row by row
///
/// Each row yields three lines: item labels, the dominant color of each cell
/// and the hues of each palette. Returns no lines when `columns` is zero.
pub fn render_preview(entries: &[(Item, Palette)], columns: usize) -> Vec<String> {
    if columns == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for (row, cells) in entries.chunks(columns).enumerate() {
        let labels: Vec<String> = cells
            .iter()
            .map(|(item, _)| fit_label(&item.label(), PREVIEW_LABEL_WIDTH))
            .collect();
        let dominants: Vec<String> = cells.iter().map(|(_, p)| dominant_cell(p)).collect();
        let hues: Vec<String> = cells.iter().map(|(_, p)| hue_cell(p)).collect();

        lines.push(format!("Row {:>2}: {}", row + 1, labels.join(CELL_SEPARATOR)));
        lines.push(format!("        {}", dominants.join(CELL_SEPARATOR)));
        lines.push(format!("        {}", hues.join(CELL_SEPARATOR)));
    }
    lines
}
