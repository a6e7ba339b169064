// 🖼️ HTML Rendering - Funders dashboard page
// Every piece of upstream text goes through `escape_html`.

use crate::config::Settings;
use crate::dashboard::Dashboard;
use crate::money::{format_amount, Money};
use crate::period::{Period, Scale};
use crate::projection::MembershipRow;
use chrono::{DateTime, Utc};

/// Shown in place of the table body when there are no memberships
pub const NO_DATA: &str = "No data.";

const PLACEHOLDER: &str = r#"<span class="placeholder">…</span>"#;

const STYLE: &str = r#"
body { font-family: Inter, Helvetica, Arial, sans-serif; margin: 0; background: #f7f8fa; color: #323334; }
.summary { display: flex; gap: 40px; background: #fff; padding: 40px 40px 56px; }
.summary .intro { flex: 0 1 550px; border-right: 2px solid #d9d9d9; padding-right: 40px; }
.summary h1 { font-size: 40px; font-weight: 300; margin: 0 0 16px; }
.summary .label { text-transform: uppercase; font-size: 18px; margin: 0 0 16px; }
.summary .total { font-size: 28px; font-weight: 500; margin: 0 0 16px; }
main { max-width: 1280px; margin: 48px auto; background: #fff; padding: 24px 32px; border-radius: 16px; }
.filters { display: flex; gap: 16px; align-items: center; margin-bottom: 48px; }
.filters a.active { font-weight: 600; }
table { width: 100%; border-collapse: collapse; }
th { padding-bottom: 32px; font-size: 12px; font-weight: 500; line-height: 16px; color: #4d4f51; }
td { text-align: center; font-size: 16px; line-height: 18px; padding: 16px 0; border-top: 1px solid #eaeaec; }
td img, td .avatar { width: 40px; height: 40px; border-radius: 8px; }
.delta { font-size: 14px; margin-left: 8px; }
.placeholder { color: #b4b4b4; }
"#;

/// Escape text for use in HTML content and attribute values
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

fn amount_or_placeholder(money: &Option<Money>) -> String {
    match money {
        Some(money) => escape_html(&format_amount(money)),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_bound(bound: Option<DateTime<Utc>>) -> String {
    bound
        .map(|b| b.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "all".to_string())
}

fn format_period(period: &Period) -> String {
    format!("{} → {}", format_bound(period.start), format_bound(period.end))
}

// ============================================================================
// PAGE
// ============================================================================

/// Render the full dashboard page
pub fn render_dashboard(dashboard: &Dashboard, settings: &Settings) -> String {
    let name = escape_html(&dashboard.name);
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{} · Funders dashboard</title>\n", name));
    html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));

    // Summary header
    html.push_str("<header class=\"summary\">\n<div class=\"intro\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", name));
    html.push_str("<p>Follow up on the projects you contribute to, and manage your contribution portfolio with simplicity and transparency.</p>\n");
    html.push_str("</div>\n<div class=\"funded\">\n<p class=\"label\">Amount funded</p>\n");
    html.push_str(&format!(
        "<p class=\"total\">{}</p>\n",
        amount_or_placeholder(&dashboard.total_spent)
    ));
    html.push_str(&format!(
        "<p>To {} Collectives</p>\n</div>\n</header>\n",
        dashboard.collective_count()
    ));

    html.push_str("<main>\n");
    html.push_str(&render_filters(dashboard));
    html.push_str(&format!(
        "<p class=\"period\">Period: {} (compared with {})</p>\n",
        escape_html(&format_period(&dashboard.windows.current)),
        escape_html(&format_period(&dashboard.windows.previous))
    ));

    html.push_str(&render_table(&dashboard.rows, settings));

    if !dashboard.has_data() {
        html.push_str(&format!("<p class=\"no-data\">{}</p>\n", NO_DATA));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_filters(dashboard: &Dashboard) -> String {
    let params = &dashboard.params;
    let using_period = params.period_expression().is_some();
    let mut html = String::from("<nav class=\"filters\">\n");

    for scale in [Scale::Month, Scale::Year] {
        let active = !using_period && params.scale() == scale;
        let mut href = format!("?scale={}", scale.as_str());
        if let Some(limit) = &params.limit {
            href.push_str(&format!("&limit={}", urlencoding::encode(limit)));
        }
        html.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>\n",
            escape_html(&href),
            if active { " class=\"active\"" } else { "" },
            match scale {
                Scale::Month => "Past month",
                Scale::Year => "Past year",
            }
        ));
    }

    html.push_str("<form method=\"get\">\n");
    html.push_str(&format!(
        "<input type=\"text\" name=\"period\" placeholder=\"2024-01-01→2024-12-31\" value=\"{}\">\n",
        escape_html(params.period_expression().unwrap_or(""))
    ));
    html.push_str("<button type=\"submit\">Apply</button>\n</form>\n</nav>\n");
    html
}

fn render_table(rows: &[MembershipRow], settings: &Settings) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>");
    for title in [
        "Logo",
        "Collective",
        "Contributed",
        "Received",
        "Spent",
        "Recurring contributions",
        "Current Balance",
    ] {
        html.push_str(&format!("<th>{}</th>", title));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str(&render_row(row, settings));
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

fn render_delta(delta: Option<String>) -> String {
    match delta {
        Some(delta) => format!("<span class=\"delta\">{}</span>", escape_html(&delta)),
        None => String::new(),
    }
}

fn render_row(row: &MembershipRow, settings: &Settings) -> String {
    let name = escape_html(&row.account.name);

    let avatar = match &row.account.image_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\" width=\"40\" height=\"40\">",
            escape_html(url),
            name
        ),
        None => format!(
            "<span class=\"avatar\">{}</span>",
            escape_html(&row.account.name.chars().next().unwrap_or('?').to_string())
        ),
    };

    format!(
        concat!(
            "<tr class=\"membership\" data-id=\"{id}\">",
            "<td>{avatar}</td>",
            "<td><a href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{name}</a></td>",
            "<td>{contributed}</td>",
            "<td>{received}{received_delta}</td>",
            "<td>{spent}{spent_delta}</td>",
            "<td>{recurring}</td>",
            "<td>{balance}</td>",
            "</tr>\n"
        ),
        id = escape_html(&row.membership_id),
        avatar = avatar,
        href = escape_html(&settings.profile_url(&row.account.slug)),
        name = name,
        contributed = amount_or_placeholder(&row.contributed),
        received = amount_or_placeholder(&row.received),
        received_delta = render_delta(row.received_delta()),
        spent = amount_or_placeholder(&row.spent),
        spent_delta = render_delta(row.spent_delta()),
        recurring = amount_or_placeholder(&row.recurring),
        balance = amount_or_placeholder(&row.balance),
    )
}

/// Minimal error page used when a dashboard cannot be built
pub fn render_error_page(title: &str, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<p>{message}</p>\n</body>\n</html>\n",
        title = escape_html(title),
        message = escape_html(message),
    )
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DashboardParams;
    use crate::period::resolve_interval;
    use crate::projection::TargetAccount;
    use rust_decimal_macros::dec;

    fn row(id: &str, slug: &str) -> MembershipRow {
        MembershipRow {
            membership_id: id.to_string(),
            account: TargetAccount {
                slug: slug.to_string(),
                name: format!("{} <collective>", slug),
                image_url: Some("https://images.example/a.png".to_string()),
            },
            contributed: Some(Money::new(dec!(500), "USD")),
            received: Some(Money::new(dec!(150), "USD")),
            received_previous: Some(Money::new(dec!(100), "USD")),
            spent: Some(Money::new(dec!(100), "USD")),
            spent_previous: Some(Money::new(dec!(150), "USD")),
            recurring: Some(Money::new(dec!(20), "USD")),
            balance: None,
        }
    }

    fn dashboard(rows: Vec<MembershipRow>) -> Dashboard {
        Dashboard {
            slug: "alice".to_string(),
            name: "Alice & Co".to_string(),
            total_spent: Some(Money::new(dec!(1234.5), "USD")),
            windows: resolve_interval("2024-01-01→2024-01-31"),
            params: DashboardParams::default(),
            has_memberships: !rows.is_empty(),
            rows,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_rows_and_deltas() {
        let html = render_dashboard(
            &dashboard(vec![row("m1", "webpack"), row("m2", "babel")]),
            &Settings::default(),
        );

        assert_eq!(html.matches("<tr class=\"membership\"").count(), 2);
        assert!(html.contains("href=\"https://opencollective.com/webpack\""));
        assert!(html.contains("webpack &lt;collective&gt;"));
        assert!(html.contains("<span class=\"delta\">+50 %</span>"));
        assert!(html.contains("<span class=\"delta\">-33 %</span>"));
        assert!(html.contains("$1,234.50"));
        assert!(html.contains("To 2 Collectives"));
        assert!(html.contains("Alice &amp; Co"));
        assert!(html.contains(PLACEHOLDER));
        assert!(!html.contains(NO_DATA));
    }

    #[test]
    fn test_render_no_data() {
        let html = render_dashboard(&dashboard(vec![]), &Settings::default());

        assert!(html.contains(NO_DATA));
        assert_eq!(html.matches("<tr class=\"membership\"").count(), 0);
        assert!(html.contains("To 0 Collectives"));
    }

    #[test]
    fn test_render_skipped_edges_are_not_no_data() {
        let mut page = dashboard(vec![]);
        page.has_memberships = true;
        let html = render_dashboard(&page, &Settings::default());

        assert!(!html.contains(NO_DATA));
        assert_eq!(html.matches("<tr class=\"membership\"").count(), 0);
    }

    #[test]
    fn test_render_period_and_filters() {
        let html = render_dashboard(&dashboard(vec![]), &Settings::default());

        assert!(html.contains("2024-01-01 → 2024-01-31"));
        assert!(html.contains("2023-12-02 → 2024-01-01"));
        assert!(html.contains("href=\"?scale=month\""));
        assert!(html.contains("href=\"?scale=year\" class=\"active\""));
    }

    #[test]
    fn test_render_error_page() {
        let html = render_error_page("Not found", "No account <ghost>");
        assert!(html.contains("<h1>Not found</h1>"));
        assert!(html.contains("No account &lt;ghost&gt;"));
    }
}
