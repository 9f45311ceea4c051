use std::fmt::Write as _;

use crate::ev::log_value_range;
use crate::pipeline::{TierOutcome, TierReport};

/// `$12.34`, or `-$12.34` for negatives.
pub fn format_usd(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", value.abs())
    } else {
        format!("${:.2}", value)
    }
}

pub fn format_pct(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_tier_block(report: &TierReport) -> String {
    let m = &report.analysis.metrics;
    let rows = [
        ("Expected card value", format_usd(m.expected_value)),
        ("Median card value", format_usd(m.median_value)),
        ("Pack cost", format_usd(m.cost_of_pack)),
        ("Expected profit", format_usd(m.profit)),
        ("EV %", format_pct(m.ev_percent)),
        ("Profit %", format_pct(m.profit_percent)),
        ("Odds over cost", format_pct(m.odds_over_cost)),
    ];

    let mut out = format!("=== {} ===\n", report.tier);
    for (label, value) in rows {
        let _ = writeln!(out, "{:<21}{}", format!("{}:", label), value);
    }
    out
}

pub fn format_failure(tier: &str, message: &str) -> String {
    format!("=== {} ===\nFAILED: {}\n", tier, message)
}

/// Text for every outcome, separated by blank lines, plus the failure count.
pub fn render_report(outcomes: &[TierOutcome]) -> (String, usize) {
    let mut failed = 0;
    let blocks: Vec<String> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(report) => format_tier_block(report),
            Err(err) => {
                failed += 1;
                format_failure(&outcome.tier, &format!("{:#}", err))
            }
        })
        .collect();
    (blocks.join("\n"), failed)
}

const SVG_WIDTH: f64 = 520.0;
const SVG_HEIGHT: f64 = 220.0;
const SVG_PAD: f64 = 32.0;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Step-shaped SVG of the tail curve on a log10 value axis, with a dashed
/// line at the pack price.
pub fn tail_curve_svg(report: &TierReport) -> String {
    let curve = &report.analysis.curve;
    let price = report.quote.price_usd;
    let Some((lo, hi)) = log_value_range(curve, price) else {
        return String::new();
    };
    let plot_w = SVG_WIDTH - 2.0 * SVG_PAD;
    let plot_h = SVG_HEIGHT - 2.0 * SVG_PAD;
    let sx = |v: f64| SVG_PAD + (v.log10() - lo) / (hi - lo) * plot_w;
    let sy = |pct: f64| SVG_HEIGHT - SVG_PAD - pct.clamp(0.0, 100.0) / 100.0 * plot_h;

    let mut path = String::new();
    for (i, point) in curve.iter().enumerate() {
        let (x, y) = (sx(point.x), sy(point.y));
        if i == 0 {
            let _ = write!(path, "M{:.1},{:.1}", x, y);
        } else {
            let _ = write!(path, " V{:.1} H{:.1}", y, x);
        }
    }
    let _ = write!(path, " V{:.1} H{:.1}", sy(0.0), SVG_PAD + plot_w);

    let price_x = sx(price);
    format!(
        concat!(
            "<svg class=\"curve\" viewBox=\"0 0 {w} {h}\" width=\"{w}\" height=\"{h}\">",
            "<rect x=\"{pad}\" y=\"{pad}\" width=\"{pw}\" height=\"{ph}\" fill=\"none\" stroke=\"#999\"/>",
            "<line x1=\"{px:.1}\" y1=\"{pad}\" x2=\"{px:.1}\" y2=\"{bottom}\" stroke=\"#d90\" stroke-dasharray=\"4 3\"/>",
            "<path d=\"{path}\" fill=\"none\" stroke=\"#29c\" stroke-width=\"2\"/>",
            "<text x=\"2\" y=\"{pad}\" font-size=\"10\">100%</text>",
            "<text x=\"2\" y=\"{bottom}\" font-size=\"10\">0%</text>",
            "<text x=\"{pad}\" y=\"{label_y}\" font-size=\"10\">{min_label}</text>",
            "<text x=\"{right}\" y=\"{label_y}\" font-size=\"10\" text-anchor=\"end\">{max_label} (log)</text>",
            "</svg>"
        ),
        w = SVG_WIDTH,
        h = SVG_HEIGHT,
        pad = SVG_PAD,
        pw = plot_w,
        ph = plot_h,
        px = price_x,
        bottom = SVG_HEIGHT - SVG_PAD,
        path = path,
        label_y = SVG_HEIGHT - SVG_PAD + 14.0,
        right = SVG_PAD + plot_w,
        min_label = format_usd(10f64.powf(lo)),
        max_label = format_usd(10f64.powf(hi)),
    )
}

fn tier_section_html(report: &TierReport) -> String {
    let m = &report.analysis.metrics;
    let scale = &report.analysis.scale;
    let mut out = format!("<section><h2>{}</h2>", escape_html(&report.tier));

    out.push_str("<table class=\"metrics\">");
    let rows = [
        ("Expected card value", format_usd(m.expected_value)),
        ("Median card value", format_usd(m.median_value)),
        ("Pack cost", format_usd(m.cost_of_pack)),
        ("Expected profit", format_usd(m.profit)),
        ("EV %", format_pct(m.ev_percent)),
        ("Profit %", format_pct(m.profit_percent)),
        ("Median %", format_pct(m.median_percent)),
        ("Odds over cost", format_pct(m.odds_over_cost)),
    ];
    for (label, value) in rows {
        let _ = write!(out, "<tr><th>{}</th><td>{}</td></tr>", label, value);
    }
    out.push_str("</table>");

    out.push_str(&tail_curve_svg(report));

    out.push_str("<table class=\"cards\"><tr><th>Card</th><th>FMV</th><th>Pull %</th></tr>");
    for card in &report.cards {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{:.4}%</td></tr>",
            escape_html(card.title()),
            format_usd(card.fmv),
            scale.apply(card.probability) * 100.0
        );
    }
    out.push_str("</table></section>");
    out
}

/// Standalone HTML page for every outcome, failures included.
pub fn render_html(outcomes: &[TierOutcome], generated_at: &str) -> String {
    let mut body = String::new();
    for outcome in outcomes {
        match &outcome.result {
            Ok(report) => body.push_str(&tier_section_html(report)),
            Err(err) => {
                let _ = write!(
                    body,
                    "<section class=\"failed\"><h2>{}</h2><p>{}</p></section>",
                    escape_html(&outcome.tier),
                    escape_html(&format!("{:#}", err))
                );
            }
        }
    }
    format!(
        concat!(
            "<!doctype html><html><head><meta charset=\"utf-8\"><title>Pack EV report</title>",
            "<style>body{{font-family:sans-serif;margin:2em}}table{{border-collapse:collapse;margin:1em 0}}",
            "th,td{{padding:2px 10px;text-align:left}}.failed{{color:#b00}}</style></head>",
            "<body><h1>Pack EV report</h1><p>Generated {}</p>{}</body></html>"
        ),
        escape_html(generated_at),
        body
    )
}
