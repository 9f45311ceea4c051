use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::ev::{chance_at_least, log_value_range, CurvePoint};
use crate::report::format_usd;

use super::theme::Palette;

const Y_LABEL_WIDTH: u16 = 5;

/// Survival curve with a log10 value axis and a marker at the pack price.
pub struct TailCurveChart<'a> {
    curve: &'a [CurvePoint],
    price_usd: f64,
    palette: Palette,
}

impl<'a> TailCurveChart<'a> {
    pub fn new(curve: &'a [CurvePoint], price_usd: f64, palette: Palette) -> Self {
        Self {
            curve,
            price_usd,
            palette,
        }
    }
}

impl Widget for TailCurveChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" P(card ≥ value)  [log value axis] ")
            .borders(Borders::ALL)
            .border_style(self.palette.border());
        let inner = block.inner(area);
        block.render(area, buf);

        if self.curve.is_empty() || inner.height < 3 || inner.width < Y_LABEL_WIDTH + 4 {
            return;
        }
        let Some((lo, hi)) = log_value_range(self.curve, self.price_usd) else {
            return;
        };

        let chart_height = inner.height.saturating_sub(1) as usize; // bottom row for x labels
        let plot_x = inner.x + Y_LABEL_WIDTH;
        let plot_width = (inner.width - Y_LABEL_WIDTH) as usize;
        let span = (plot_width.saturating_sub(1)).max(1) as f64;
        let row_for = |pct: f64| -> u16 {
            let frac = (pct / 100.0).clamp(0.0, 1.0);
            let from_top = ((1.0 - frac) * (chart_height - 1) as f64).round() as usize;
            inner.y + from_top.min(chart_height - 1) as u16
        };

        // Pack price marker
        let price_col = ((self.price_usd.log10() - lo) / (hi - lo) * span).round();
        if price_col >= 0.0 && (price_col as usize) < plot_width {
            let x = plot_x + price_col as u16;
            for row in 0..chart_height {
                buf.set_string(x, inner.y + row as u16, "│", Style::default().fg(self.palette.accent));
            }
        }

        for col in 0..plot_width {
            let log_value = lo + (col as f64 / span) * (hi - lo);
            // Nudge down so rounding in 10^log10(x) never skips the point at x.
            let value = 10f64.powf(log_value) * (1.0 - 1e-9);
            let pct = chance_at_least(self.curve, value);
            if pct <= 0.0 {
                continue;
            }
            buf.set_string(
                plot_x + col as u16,
                row_for(pct),
                "•",
                Style::default().fg(self.palette.curve),
            );
        }

        // Axis labels
        let label_style = self.palette.label();
        buf.set_string(inner.x, inner.y, "100%", label_style);
        buf.set_string(inner.x, inner.y + (chart_height - 1) as u16, "  0%", label_style);
        let label_y = inner.y + inner.height - 1;
        let min_label = format_usd(10f64.powf(lo));
        let max_label = format_usd(10f64.powf(hi));
        buf.set_string(plot_x, label_y, &min_label, label_style);
        let max_x = (plot_x + plot_width as u16).saturating_sub(max_label.chars().count() as u16);
        if max_x > plot_x + min_label.chars().count() as u16 {
            buf.set_string(max_x, label_y, &max_label, label_style);
        }
    }
}
