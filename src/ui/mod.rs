pub mod chart;
pub mod dashboard;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::pipeline::{TierOutcome, TierReport};
use crate::preferences::Theme;

use chart::TailCurveChart;
use dashboard::{CardTable, KeybindBar, MetricsPanel, StatusBar, TierTabs};
use theme::Palette;

#[derive(Debug)]
pub enum TierView {
    Ready(Box<TierReport>),
    Failed { tier: String, error: String },
}

impl TierView {
    pub fn tier(&self) -> &str {
        match self {
            Self::Ready(report) => &report.tier,
            Self::Failed { tier, .. } => tier,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl From<TierOutcome> for TierView {
    fn from(outcome: TierOutcome) -> Self {
        match outcome.result {
            Ok(report) => Self::Ready(Box::new(report)),
            Err(err) => Self::Failed {
                tier: outcome.tier,
                error: format!("{:#}", err),
            },
        }
    }
}

pub struct AppState {
    pub tiers: Vec<TierView>,
    pub selected: usize,
    pub card_scroll: usize,
    pub theme: Theme,
    pub status: String,
    pub last_refresh: Option<String>,
}

impl AppState {
    pub fn new(theme: Theme) -> Self {
        Self {
            tiers: Vec::new(),
            selected: 0,
            card_scroll: 0,
            theme,
            status: "loading".to_string(),
            last_refresh: None,
        }
    }

    /// Replace all tiers with a fresh run, keeping the selection on the same
    /// tier name when it is still present.
    pub fn apply_outcomes(&mut self, outcomes: Vec<TierOutcome>, refreshed_at: &str) {
        let previous = self.selected_view().map(|v| v.tier().to_string());
        self.tiers = outcomes.into_iter().map(TierView::from).collect();
        self.selected = previous
            .and_then(|name| self.tiers.iter().position(|v| v.tier() == name))
            .unwrap_or(0);
        self.card_scroll = 0;

        let failed = self.tiers.iter().filter(|v| !v.is_ready()).count();
        self.status = if self.tiers.is_empty() {
            "no tiers".to_string()
        } else if failed == 0 {
            format!("{} tiers", self.tiers.len())
        } else {
            format!("{} tiers, {} failed", self.tiers.len(), failed)
        };
        self.last_refresh = Some(refreshed_at.to_string());
    }

    pub fn set_error(&mut self, message: &str) {
        self.status = format!("error: {}", message);
    }

    pub fn selected_view(&self) -> Option<&TierView> {
        self.tiers.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.tiers.is_empty() {
            self.selected = (self.selected + 1) % self.tiers.len();
            self.card_scroll = 0;
        }
    }

    pub fn select_prev(&mut self) {
        if !self.tiers.is_empty() {
            self.selected = (self.selected + self.tiers.len() - 1) % self.tiers.len();
            self.card_scroll = 0;
        }
    }

    pub fn scroll_cards(&mut self, delta: isize) {
        let max = match self.selected_view() {
            Some(TierView::Ready(report)) => report.cards.len().saturating_sub(1),
            _ => 0,
        };
        self.card_scroll = self.card_scroll.saturating_add_signed(delta).min(max);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let palette = Palette::for_theme(state.theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg)),
        frame.area(),
    );

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Length(1),  // tier tabs
            Constraint::Length(14), // metrics + curve
            Constraint::Min(6),     // card table
            Constraint::Length(1),  // keybinds
        ])
        .split(frame.area());

    frame.render_widget(
        StatusBar {
            status: &state.status,
            theme: state.theme,
            last_refresh: state.last_refresh.as_deref(),
            palette,
        },
        outer[0],
    );

    let tabs: Vec<(&str, bool)> = state
        .tiers
        .iter()
        .map(|v| (v.tier(), v.is_ready()))
        .collect();
    frame.render_widget(
        TierTabs {
            tiers: &tabs,
            selected: state.selected,
            palette,
        },
        outer[1],
    );

    match state.selected_view() {
        Some(TierView::Ready(report)) => {
            let main_area = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(36), Constraint::Min(30)])
                .split(outer[2]);
            frame.render_widget(MetricsPanel::new(report, palette), main_area[0]);
            frame.render_widget(
                TailCurveChart::new(&report.analysis.curve, report.quote.price_usd, palette),
                main_area[1],
            );
            frame.render_widget(CardTable::new(report, state.card_scroll, palette), outer[3]);
        }
        Some(TierView::Failed { tier, error }) => {
            let block = Block::default()
                .title(format!(" {} (failed) ", tier))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.negative));
            frame.render_widget(
                Paragraph::new(error.as_str())
                    .style(palette.text())
                    .wrap(Wrap { trim: true })
                    .block(block),
                outer[2],
            );
        }
        None => {
            frame.render_widget(
                Paragraph::new("No tier data yet.")
                    .style(palette.label())
                    .block(Block::default().borders(Borders::ALL)),
                outer[2],
            );
        }
    }

    frame.render_widget(KeybindBar { palette }, outer[4]);
}
