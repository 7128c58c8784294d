//! Legend panel drawn to the right of the plot, vertically centered.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::types::{ChartLine, LineDash};
use crate::error::ChartError;

// Layout constants
const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 4;
const PAD_X: i32 = 6;
const SAMPLE_W: i32 = 24;
const SAMPLE_TO_TEXT_GAP: i32 = 8;

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

/// Total height of the legend block for `n` entries.
pub fn legend_block_height_px(n: usize) -> i32 {
    if n == 0 {
        return 0;
    }
    n as i32 * LINE_H + (n as i32 - 1) * ROW_GAP
}

/// Draw one row per line: a stroke sample in the line's color and dash, then its label.
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    lines: &[ChartLine],
) -> Result<(), ChartError> {
    legend_area.fill(&WHITE).map_err(ChartError::render)?;

    let (w_u32, h_u32) = legend_area.dim_in_pixel();
    let (w, h) = (w_u32 as i32, h_u32 as i32);

    let text_x = PAD_X + SAMPLE_W + SAMPLE_TO_TEXT_GAP;
    let max_text_w = (w - text_x - PAD_X).max(40) as u32;
    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    // Center the block vertically; clip at the top if it is taller than the panel.
    let mut y = ((h - legend_block_height_px(lines.len())) / 2).max(PAD_X);

    for line in lines {
        let center_y = y + LINE_H / 2;
        draw_line_sample(
            legend_area,
            PAD_X,
            PAD_X + SAMPLE_W,
            center_y,
            line.color,
            line.dash,
        )?;
        let label = truncate_to_width(&line.label, FONT_PX, max_text_w);
        legend_area
            .draw(&Text::new(label, (text_x, center_y), label_style.clone()))
            .map_err(ChartError::render)?;
        y += LINE_H + ROW_GAP;
    }
    Ok(())
}

fn draw_line_sample<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    start_x: i32,
    end_x: i32,
    y: i32,
    color: RGBColor,
    dash: LineDash,
) -> Result<(), ChartError> {
    let style = color.stroke_width(2);
    match dash {
        LineDash::Solid => {
            legend_area
                .draw(&PathElement::new(vec![(start_x, y), (end_x, y)], style))
                .map_err(ChartError::render)?;
        }
        LineDash::Dashed => {
            let segment_len = 5;
            let gap_len = 3;
            let mut x = start_x;
            while x < end_x {
                let segment_end = (x + segment_len).min(end_x);
                legend_area
                    .draw(&PathElement::new(vec![(x, y), (segment_end, y)], style))
                    .map_err(ChartError::render)?;
                x = segment_end + gap_len;
            }
        }
    }
    Ok(())
}
