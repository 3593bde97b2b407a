use super::axes::Axes;
use super::item::Item;
use crate::core::{Cell, CellStyle, Grid};
use unicode_width::UnicodeWidthStr;

/// Legend overlay, anchored to the upper-right corner of the data box.
///
/// Rebuilt from the registry on every frame.
pub fn draw_legend<'a>(axes: &Axes, grid: &mut Grid, items: impl Iterator<Item = &'a Item>) {
    let entries: Vec<&Item> = items.filter(|item| item.legend_label().is_some()).collect();
    if entries.is_empty() {
        return;
    }

    let text_width = entries
        .iter()
        .filter_map(|item| item.legend_label())
        .map(|label| label.width())
        .max()
        .unwrap_or(0);
    // "│ ● label │"
    let box_w = text_width + 6;
    let box_h = entries.len() + 2;

    let area = axes.plot_area();
    if box_w > area.width || box_h > area.height {
        return;
    }
    let left = area.right() - box_w;
    let top = area.y;
    let right = left + box_w - 1;
    let bottom = top + box_h - 1;

    let frame = CellStyle::default();
    for y in top..=bottom {
        for x in left..=right {
            let c = match (x, y) {
                (x, y) if x == left && y == top => '╭',
                (x, y) if x == right && y == top => '╮',
                (x, y) if x == left && y == bottom => '╰',
                (x, y) if x == right && y == bottom => '╯',
                (_, y) if y == top || y == bottom => '─',
                (x, _) if x == left || x == right => '│',
                _ => ' ',
            };
            grid.set_clipped(x, y, Cell::new(c).with_style(frame));
        }
    }

    for (row, item) in entries.iter().enumerate() {
        let y = top + 1 + row;
        let blank = Cell::default();
        grid.set_clipped(left + 2, y, Cell::new(item.legend_glyph()).with_style(item.ink(&blank)));
        if let Some(label) = item.legend_label() {
            grid.put_str(left + 4, y, label, frame);
        }
    }
}
