use anyhow::anyhow;
use gacha_ev::ev::analyze;
use gacha_ev::model::{Card, PriceQuote};
use gacha_ev::pipeline::{TierOutcome, TierReport};
use gacha_ev::report::{
    escape_html, format_pct, format_tier_block, format_usd, render_html, render_report,
    tail_curve_svg,
};

fn starter_report() -> TierReport {
    let cards = vec![
        Card::new(1.0, 0.5).with_title("Common <foil>"),
        Card::new(10.0, 0.3),
        Card::new(100.0, 0.2),
    ];
    let analysis = analyze(&cards, 5.0).unwrap();
    TierReport {
        tier: "Starter".to_string(),
        quote: PriceQuote::new("Starter", 5.0),
        cards,
        analysis,
    }
}

#[test]
fn money_and_percent_use_two_decimals() {
    assert_eq!(format_usd(23.5), "$23.50");
    assert_eq!(format_usd(-3.204), "-$3.20");
    assert_eq!(format_pct(470.0), "470.00%");
}

#[test]
fn tier_block_lists_every_metric() {
    let text = format_tier_block(&starter_report());
    assert!(text.starts_with("=== Starter ===\n"));
    assert!(text.contains("Expected card value: $23.50"));
    assert!(text.contains("Median card value:   $1.00"));
    assert!(text.contains("Pack cost:           $5.00"));
    assert!(text.contains("Expected profit:     $18.50"));
    assert!(text.contains("EV %:                470.00%"));
    assert!(text.contains("Profit %:            370.00%"));
    assert!(text.contains("Odds over cost:      50.00%"));
}

#[test]
fn render_report_counts_failures() {
    let outcomes = vec![
        TierOutcome {
            tier: "Starter".to_string(),
            result: Ok(starter_report()),
        },
        TierOutcome {
            tier: "Premium".to_string(),
            result: Err(anyhow!("source unavailable")),
        },
    ];
    let (text, failed) = render_report(&outcomes);
    assert_eq!(failed, 1);
    assert!(text.contains("=== Premium ===\nFAILED: source unavailable"));
    assert!(text.contains("Expected card value: $23.50"));
}

#[test]
fn html_escapes_card_titles_and_embeds_curve() {
    let outcomes = vec![TierOutcome {
        tier: "Starter".to_string(),
        result: Ok(starter_report()),
    }];
    let html = render_html(&outcomes, "2026-01-01 00:00:00");
    assert!(html.contains("<h2>Starter</h2>"));
    assert!(html.contains("Common &lt;foil&gt;"));
    assert!(html.contains("<svg"));
    assert!(html.contains("50.0000%"));
    assert_eq!(escape_html("a&\"b'"), "a&amp;&quot;b&#39;");
}

#[test]
fn svg_path_starts_at_full_mass() {
    let svg = tail_curve_svg(&starter_report());
    // 100% maps to the top padding row.
    assert!(svg.contains("d=\"M32.0,32.0"), "{svg}");
}
