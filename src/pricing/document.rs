//! Client-facing renderings of a quote: the line-item rows, the plain-text
//! summary for the clipboard, and a standalone print-ready HTML document.
//! All amounts come from one [`breakdown`] pass so the three outputs can
//! never disagree with the calculator.

use crate::models::{Frequency, Quote, QuoteStatus};
use crate::pricing::engine::{
    breakdown, calc_recurring, display_rate, PriceBreakdown, PricingConfig, ADDON_PRICE,
};

/// Currency formatting, fixed to en-GB: `£` plus comma-grouped thousands.
pub fn format_gbp(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-£{grouped}")
    } else {
        format!("£{grouped}")
    }
}

/// "7 Aug 2026" from an RFC 3339 timestamp; unparseable input is shown as-is.
pub fn format_date(iso: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(iso) {
        Ok(dt) => dt.format("%-d %b %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

fn format_discount_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn status_color(status: QuoteStatus) -> &'static str {
    match status {
        QuoteStatus::Draft => "#888",
        QuoteStatus::Sent => "#c9a96e",
        QuoteStatus::Accepted => "#6ec96e",
        QuoteStatus::Declined => "#c96e6e",
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Full service names, in calculation order. Empty for landing pages.
pub fn service_names(quote: &Quote) -> Vec<&'static str> {
    let mut names = Vec::new();
    if !quote.is_landing_page {
        if quote.include_design {
            names.push("Design");
        }
        if quote.include_dev {
            names.push("Development");
        }
        if quote.include_copy {
            names.push("Copywriting");
        }
    }
    names
}

fn service_names_short(quote: &Quote) -> Vec<&'static str> {
    service_names(quote)
        .into_iter()
        .map(|n| match n {
            "Development" => "Dev",
            "Copywriting" => "Copy",
            other => other,
        })
        .collect()
}

fn plugin_label(name: &str, frequency: Frequency) -> String {
    let name = if name.is_empty() { "Plugin/Service" } else { name };
    match frequency {
        Frequency::OneTime => format!("{name} (Plugin/Service)"),
        Frequency::Monthly => format!("{name} (Plugin/Service) - Monthly"),
        Frequency::Annual => format!("{name} (Plugin/Service) - Annual"),
    }
}

/// One row of the printable line-item table.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Item { label: String, amount: String },
    Divider,
}

/// Table rows in calculation order: services/pages, blog, shop, custom post
/// types, plugins, then subtotal/PM/contingency when internal costs are
/// surfaced, then the discount. The total and recurring costs live outside
/// the table.
pub fn quote_rows(quote: &Quote, cfg: &PricingConfig) -> Vec<Row> {
    let b = breakdown(quote, cfg);
    let rate = display_rate(quote, cfg);
    let mut rows = Vec::new();

    if quote.is_landing_page {
        rows.push(Row::Item {
            label: "Landing Page Offer".to_string(),
            amount: format_gbp(cfg.landing_page_price),
        });
    } else {
        for service in service_names(quote) {
            rows.push(Row::Item {
                label: format!(
                    "{service} ({} pages \u{d7} {})",
                    quote.pages,
                    format_gbp(rate)
                ),
                amount: format_gbp(quote.pages * rate),
            });
        }
    }
    if quote.add_blog {
        rows.push(Row::Item {
            label: "Blog (Index + Archive)".to_string(),
            amount: format_gbp(ADDON_PRICE),
        });
    }
    if quote.add_shop {
        rows.push(Row::Item {
            label: "Shop".to_string(),
            amount: format_gbp(ADDON_PRICE),
        });
    }
    for cpt in &quote.custom_post_types {
        let name = if cpt.name.is_empty() {
            "Custom Post Type"
        } else {
            cpt.name.as_str()
        };
        rows.push(Row::Item {
            label: format!("{name} (Index + Archive)"),
            amount: format_gbp(ADDON_PRICE),
        });
    }
    for plugin in &quote.plugins {
        rows.push(Row::Item {
            label: plugin_label(&plugin.name, plugin.frequency),
            amount: format_gbp(plugin.cost),
        });
    }

    rows.push(Row::Divider);

    if cfg.show_internal_costs {
        rows.push(Row::Item {
            label: "Subtotal".to_string(),
            amount: format_gbp(b.subtotal),
        });
        if quote.include_pm {
            rows.push(Row::Item {
                label: "Project Management (20%)".to_string(),
                amount: format_gbp(b.pm_cost),
            });
        }
        if quote.include_contingency {
            rows.push(Row::Item {
                label: "Contingency (20%)".to_string(),
                amount: format_gbp(b.contingency_cost),
            });
        }
    }
    if b.discount_amount > 0 {
        rows.push(Row::Item {
            label: discount_label(quote),
            amount: format!("\u{2212}{}", format_gbp(b.discount_amount)),
        });
    }

    rows
}

fn discount_label(quote: &Quote) -> String {
    match quote.discount_type {
        crate::models::DiscountType::Percent => format!(
            "Discount ({}%)",
            format_discount_value(quote.discount_value)
        ),
        crate::models::DiscountType::Fixed => "Discount".to_string(),
    }
}

/// Plain-text estimate for the clipboard.
pub fn quote_text(quote: &Quote, cfg: &PricingConfig) -> String {
    let b: PriceBreakdown = breakdown(quote, cfg);
    let rate = display_rate(quote, cfg);
    let recurring = calc_recurring(quote);

    let mut lines: Vec<String> = vec!["Web Design Estimate".to_string()];
    if !quote.client_name.is_empty() {
        lines.push(format!("Client: {}", quote.client_name));
    }
    if !quote.project_name.is_empty() {
        lines.push(format!("Project: {}", quote.project_name));
    }
    lines.push(String::new());

    if quote.is_landing_page {
        lines.push(format!(
            "Landing Page Offer: {}",
            format_gbp(cfg.landing_page_price)
        ));
    } else {
        lines.push(format!("{} Pages", quote.pages));
        lines.push(format!(
            "Services: {} @ {}/page each",
            service_names_short(quote).join(", "),
            format_gbp(rate)
        ));
        lines.push(format!(
            "Page Total: {}",
            format_gbp(quote.pages * b.service_count * rate)
        ));
    }
    if quote.add_blog {
        lines.push(format!("Blog (Index + Archive): {}", format_gbp(b.blog_cost)));
    }
    if quote.add_shop {
        lines.push(format!("Shop: {}", format_gbp(b.shop_cost)));
    }
    for cpt in &quote.custom_post_types {
        let name = if cpt.name.is_empty() {
            "Custom Post Type"
        } else {
            cpt.name.as_str()
        };
        lines.push(format!("{name} (Index + Archive): {}", format_gbp(ADDON_PRICE)));
    }
    for plugin in &quote.plugins {
        lines.push(format!(
            "{}: {}",
            plugin_label(&plugin.name, plugin.frequency),
            format_gbp(plugin.cost)
        ));
    }

    if cfg.show_internal_costs {
        lines.push(format!("Subtotal: {}", format_gbp(b.subtotal)));
        lines.push(String::new());
        if quote.include_pm {
            lines.push(format!(
                "Project Management (20%): {}",
                format_gbp(b.pm_cost)
            ));
        }
        if quote.include_contingency {
            lines.push(format!("Contingency (20%): {}", format_gbp(b.contingency_cost)));
        }
    }
    if b.discount_amount > 0 {
        lines.push(format!(
            "{}: -{}",
            discount_label(quote),
            format_gbp(b.discount_amount)
        ));
    }
    lines.push(String::new());
    lines.push(format!("Total: {}", format_gbp(b.total)));

    if recurring.monthly > 0 || recurring.annual > 0 {
        lines.push(String::new());
        lines.push("Recurring Costs:".to_string());
        if recurring.monthly > 0 {
            lines.push(format!("Monthly: {}/mo", format_gbp(recurring.monthly)));
        }
        if recurring.annual > 0 {
            lines.push(format!("Annual: {}/yr", format_gbp(recurring.annual)));
        }
    }

    lines.join("\n")
}

/// Standalone HTML document for "PDF" export: the browser's print dialog does
/// the rest (there is no real PDF generation).
pub fn print_document(quote: &Quote, cfg: &PricingConfig) -> String {
    let b = breakdown(quote, cfg);
    let recurring = calc_recurring(quote);

    let table_rows: String = quote_rows(quote, cfg)
        .into_iter()
        .map(|row| match row {
            Row::Divider => {
                r#"<tr><td colspan="2" style="border-bottom:1px solid #ddd;padding:8px 0"></td></tr>"#
                    .to_string()
            }
            Row::Item { label, amount } => format!(
                r#"<tr><td style="padding:8px 0;color:#555">{}</td><td style="padding:8px 0;text-align:right;font-weight:600">{}</td></tr>"#,
                escape_html(&label),
                amount
            ),
        })
        .collect();

    let mut recurring_html = String::new();
    if recurring.monthly > 0 || recurring.annual > 0 {
        recurring_html.push_str(
            r#"<div style="margin-top:32px;padding:20px;background:#f8f7f5;border-radius:8px"><div style="font-size:12px;text-transform:uppercase;letter-spacing:1px;color:#888;margin-bottom:12px;font-weight:600">Recurring Costs</div>"#,
        );
        if recurring.monthly > 0 {
            recurring_html.push_str(&format!(
                r#"<div style="display:flex;justify-content:space-between;margin-bottom:8px;font-size:14px"><span>Monthly</span><span style="font-weight:600">{}/mo</span></div>"#,
                format_gbp(recurring.monthly)
            ));
        }
        if recurring.annual > 0 {
            recurring_html.push_str(&format!(
                r#"<div style="display:flex;justify-content:space-between;font-size:14px"><span>Annual</span><span style="font-weight:600">{}/yr</span></div>"#,
                format_gbp(recurring.annual)
            ));
        }
        recurring_html.push_str("</div>");
    }

    let title = if quote.project_name.is_empty() {
        "Project Quote"
    } else {
        quote.project_name.as_str()
    };
    let client_html = if quote.client_name.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="meta">Prepared for {}</div>"#,
            escape_html(&quote.client_name)
        )
    };
    let notes_html = if quote.notes.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="notes"><strong>Notes</strong><br>{}</div>"#,
            escape_html(&quote.notes).replace('\n', "<br>")
        )
    };
    let color = status_color(quote.status);

    format!(
        r#"<!DOCTYPE html><html><head><meta charset="utf-8"><title>Quote</title><style>@import url("https://fonts.googleapis.com/css2?family=DM+Sans:wght@400;500;600;700&family=Playfair+Display:ital,wght@0,400;0,700;1,400&display=swap");body{{font-family:"DM Sans",sans-serif;padding:60px;color:#333;max-width:700px;margin:0 auto}}h1{{font-family:"Playfair Display",serif;font-weight:400;font-size:28px;margin:0 0 4px}}table{{width:100%;border-collapse:collapse;margin:24px 0}}.total{{font-family:"Playfair Display",serif;font-size:36px;font-weight:700;text-align:right;padding-top:16px;border-top:2px solid #333}}.meta{{color:#888;font-size:13px;margin-bottom:4px}}.status{{display:inline-block;padding:4px 14px;border-radius:99px;font-size:12px;font-weight:600;margin-top:8px}}.notes{{margin-top:24px;padding:16px;background:#f8f7f5;border-radius:8px;font-size:13px;color:#666;line-height:1.6}}@media print{{body{{padding:40px}}}}</style></head><body><div style="margin-bottom:32px"><h1>{title}</h1>{client}<div class="meta">{date}</div><div class="status" style="background:{color}22;color:{color}">{status}</div></div><table>{rows}</table><div class="total">{total}</div>{recurring}{notes}<script>window.onload=function(){{window.print()}}</script></body></html>"#,
        title = escape_html(title),
        client = client_html,
        date = format_date(&quote.created_at),
        color = color,
        status = quote.status.as_str(),
        rows = table_rows,
        total = format_gbp(b.total),
        recurring = recurring_html,
        notes = notes_html,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiscountType, Plugin};

    fn sample_quote() -> Quote {
        Quote {
            id: "q-1".to_string(),
            client_name: "Acme Ltd".to_string(),
            project_name: "Relaunch".to_string(),
            pages: 5,
            include_design: true,
            include_dev: true,
            include_pm: true,
            include_contingency: true,
            created_at: "2025-03-10T12:00:00Z".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn formats_currency_with_thousands_groups() {
        assert_eq!(format_gbp(0), "£0");
        assert_eq!(format_gbp(700), "£700");
        assert_eq!(format_gbp(1750), "£1,750");
        assert_eq!(format_gbp(1234567), "£1,234,567");
    }

    #[test]
    fn text_summary_hides_internal_costs_in_the_rate() {
        let cfg = PricingConfig::default();
        let text = quote_text(&sample_quote(), &cfg);

        assert!(text.starts_with("Web Design Estimate"));
        assert!(text.contains("Client: Acme Ltd"));
        // 175 x 1.2 x 1.2 = 252: overheads folded into the shown rate
        assert!(text.contains("Services: Design, Dev @ £252/page each"));
        assert!(!text.contains("Project Management"));
        assert!(text.contains("Total: £2,450"));
    }

    #[test]
    fn text_summary_lists_overheads_when_surfaced() {
        let cfg = PricingConfig {
            show_internal_costs: true,
            ..PricingConfig::default()
        };
        let text = quote_text(&sample_quote(), &cfg);

        assert!(text.contains("Services: Design, Dev @ £175/page each"));
        assert!(text.contains("Subtotal: £1,750"));
        assert!(text.contains("Project Management (20%): £350"));
        assert!(text.contains("Contingency (20%): £350"));
    }

    #[test]
    fn rows_follow_the_calculation_order() {
        let quote = Quote {
            add_blog: true,
            plugins: vec![Plugin {
                name: "SEO Suite".to_string(),
                cost: 100,
                frequency: crate::models::Frequency::Monthly,
                ..Default::default()
            }],
            discount_type: DiscountType::Percent,
            discount_value: 10.0,
            ..sample_quote()
        };
        let rows = quote_rows(&quote, &PricingConfig::default());

        let labels: Vec<String> = rows
            .iter()
            .filter_map(|r| match r {
                Row::Item { label, .. } => Some(label.clone()),
                Row::Divider => None,
            })
            .collect();
        assert_eq!(labels[0], "Design (5 pages × £252)");
        assert_eq!(labels[1], "Development (5 pages × £252)");
        assert_eq!(labels[2], "Blog (Index + Archive)");
        assert_eq!(labels[3], "SEO Suite (Plugin/Service) - Monthly");
        assert_eq!(labels[4], "Discount (10%)");
    }

    #[test]
    fn print_document_is_standalone_html() {
        let doc = print_document(&sample_quote(), &PricingConfig::default());
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<h1>Relaunch</h1>"));
        assert!(doc.contains("Prepared for Acme Ltd"));
        assert!(doc.contains("10 Mar 2025"));
        assert!(doc.contains("window.print()"));
    }

    #[test]
    fn landing_page_text_uses_the_flat_offer() {
        let quote = Quote {
            is_landing_page: true,
            ..sample_quote()
        };
        let text = quote_text(&quote, &PricingConfig::default());
        assert!(text.contains("Landing Page Offer: £700"));
        assert!(!text.contains("Pages\n"));
        assert!(text.contains("Total: £980"));
    }
}
