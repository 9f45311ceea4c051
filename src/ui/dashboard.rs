use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::ev::chance_at_least;
use crate::pipeline::TierReport;
use crate::preferences::Theme;
use crate::report::{format_pct, format_usd};

use super::theme::Palette;

pub struct MetricsPanel<'a> {
    report: &'a TierReport,
    palette: Palette,
}

impl<'a> MetricsPanel<'a> {
    pub fn new(report: &'a TierReport, palette: Palette) -> Self {
        Self { report, palette }
    }
}

impl Widget for MetricsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let m = &self.report.analysis.metrics;
        let scale = &self.report.analysis.scale;
        let double_up = chance_at_least(&self.report.analysis.curve, m.cost_of_pack * 2.0);

        let row = |label: &'static str, value: String, style: Style| {
            Line::from(vec![
                Span::styled(format!("{:<14}", label), p.label()),
                Span::styled(value, style),
            ])
        };

        let lines = vec![
            row("Expected:", format_usd(m.expected_value), p.text().add_modifier(Modifier::BOLD)),
            row("Median:", format_usd(m.median_value), p.text()),
            row("Pack cost:", format_usd(m.cost_of_pack), p.text()),
            row("Profit:", format_usd(m.profit), p.signed(m.profit)),
            row("EV %:", format_pct(m.ev_percent), p.text()),
            row("Profit %:", format_pct(m.profit_percent), p.signed(m.profit_percent)),
            row("Median %:", format_pct(m.median_percent), p.signed(m.median_percent)),
            row("Odds > cost:", format_pct(m.odds_over_cost), Style::default().fg(p.accent)),
            row("Odds > 2x:", format_pct(double_up), p.text()),
            row(
                "Prob scale:",
                format!("{} ({})", scale.value, scale.encoding),
                p.label(),
            ),
        ];

        let block = Block::default()
            .title(format!(" {} ", self.report.tier))
            .borders(Borders::ALL)
            .border_style(p.border());

        Paragraph::new(lines).block(block).render(area, buf);
    }
}

/// Cards in source order: name, FMV and pull chance.
pub struct CardTable<'a> {
    report: &'a TierReport,
    scroll: usize,
    palette: Palette,
}

impl<'a> CardTable<'a> {
    pub fn new(report: &'a TierReport, scroll: usize, palette: Palette) -> Self {
        Self {
            report,
            scroll,
            palette,
        }
    }
}

impl Widget for CardTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let scale = &self.report.analysis.scale;
        let price = self.report.quote.price_usd;

        let header = Row::new(vec!["Card", "Details", "FMV", "Pull %"])
            .style(Style::default().fg(p.accent).add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .report
            .cards
            .iter()
            .skip(self.scroll)
            .map(|card| {
                let fmv_style = if card.fmv >= price {
                    Style::default().fg(p.positive)
                } else {
                    p.text()
                };
                Row::new(vec![
                    Cell::from(card.title().to_string()).style(p.text()),
                    Cell::from(card.metadata.subtitle()).style(p.label()),
                    Cell::from(format_usd(card.fmv)).style(fmv_style),
                    Cell::from(format!("{:.4}%", scale.apply(card.probability) * 100.0))
                        .style(p.text()),
                ])
            })
            .collect();

        let block = Block::default()
            .title(format!(
                " Cards ({}/{}) ",
                self.scroll.min(self.report.cards.len()),
                self.report.cards.len()
            ))
            .borders(Borders::ALL)
            .border_style(p.border());

        Table::new(
            rows,
            [
                Constraint::Min(20),
                Constraint::Min(16),
                Constraint::Length(12),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .render(area, buf);
    }
}

pub struct TierTabs<'a> {
    pub tiers: &'a [(&'a str, bool)],
    pub selected: usize,
    pub palette: Palette,
}

impl Widget for TierTabs<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let mut spans = vec![Span::styled(" Tiers: ", p.label())];
        for (i, (name, ok)) in self.tiers.iter().enumerate() {
            let mut style = if *ok {
                p.text()
            } else {
                Style::default().fg(p.negative)
            };
            if i == self.selected {
                style = style.fg(p.highlight).add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {} ", name), style));
            spans.push(Span::raw(" "));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

pub struct StatusBar<'a> {
    pub status: &'a str,
    pub theme: Theme,
    pub last_refresh: Option<&'a str>,
    pub palette: Palette,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let p = self.palette;
        let line = Line::from(vec![
            Span::styled(
                " gacha-ev ",
                Style::default().fg(p.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled("| ", p.label()),
            Span::styled(self.status, Style::default().fg(p.highlight)),
            Span::styled(" | ", p.label()),
            Span::styled(format!("theme: {}", self.theme.as_str()), p.label()),
            Span::styled(" | ", p.label()),
            Span::styled(
                format!("updated: {}", self.last_refresh.unwrap_or("---")),
                p.label(),
            ),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

pub struct KeybindBar {
    pub palette: Palette,
}

impl Widget for KeybindBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key = Style::default().fg(self.palette.accent);
        let text = self.palette.label();
        let line = Line::from(vec![
            Span::styled(" [Q]", key),
            Span::styled("uit  ", text),
            Span::styled("[←/→]", key),
            Span::styled(" tier  ", text),
            Span::styled("[↑/↓]", key),
            Span::styled(" scroll  ", text),
            Span::styled("[R]", key),
            Span::styled("efresh  ", text),
            Span::styled("[T]", key),
            Span::styled("heme  ", text),
        ]);

        buf.set_line(area.x, area.y, &line, area.width);
    }
}
