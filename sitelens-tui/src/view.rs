use crate::dashboard::{Dashboard, Screen};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Wrap},
};
use sitelens_core::audit::LOADING_STEPS;
use sitelens_core::display::{
    check_mark, format_timestamp, rating_label, security_header_rows, seo_meta_rows,
    seo_structure_rows, MetricKind, ScoreBand, RECOMMENDATIONS_TIP,
};
use sitelens_scanner::{AuditReport, Category, Rating};
use std::rc::Rc;

const INPUT_PLACEHOLDER: &str = "example.com or https://example.com";

// The loading panel is a static picture: three steps done, the fourth active.
const LOADING_ACTIVE_STEP: usize = 3;
const LOADING_GAUGE_PERCENT: u16 = 60;

fn band_color(score: u8) -> Color {
    match ScoreBand::from_score(score) {
        ScoreBand::Good => Color::Green,
        ScoreBand::Fair => Color::Yellow,
        ScoreBand::Poor => Color::Red,
    }
}

fn rating_color(rating: Rating) -> Color {
    match rating {
        Rating::Good => Color::Green,
        Rating::NeedsImprovement => Color::Yellow,
        Rating::Poor => Color::Red,
    }
}

fn screen_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(3), // URL input
            Constraint::Length(1), // Error / status line
            Constraint::Min(8),    // Body
            Constraint::Length(1), // Hints bar
        ])
        .split(area)
}

fn results_chunks(body: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary
            Constraint::Length(3), // Score cards
            Constraint::Min(5),    // Detail panel
        ])
        .split(body)
}

fn card_chunks(row: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(row)
}

/// The category whose score card covers `(column, row)` on the results
/// screen, for a terminal of size `area`.
pub fn tab_at(area: Rect, column: u16, row: u16) -> Option<Category> {
    let body = screen_chunks(area)[3];
    let cards = card_chunks(results_chunks(body)[1]);
    Category::ALL
        .into_iter()
        .zip(cards.iter())
        .find(|(_, card)| card.contains(Position::new(column, row)))
        .map(|(category, _)| category)
}

/// Cursor column for the URL box, kept inside the box.
fn cursor_column(inner: Rect, input: &str) -> u16 {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    inner.x + typed.min(inner.width.saturating_sub(1))
}

/// Draw the whole dashboard for the current state.
pub fn render(f: &mut Frame, dashboard: &Dashboard) {
    let chunks = screen_chunks(f.area());

    render_title(f, chunks[0]);
    render_form(f, chunks[1], dashboard);
    render_message(f, chunks[2], dashboard);

    match dashboard.screen() {
        Screen::Empty => render_empty(f, chunks[3]),
        Screen::Loading => render_loading(f, chunks[3]),
        Screen::Results => {
            if let Some(report) = dashboard.report() {
                render_results(f, chunks[3], report, dashboard.active_tab());
            }
        }
    }

    render_hints(f, chunks[4], dashboard.screen());
}

fn render_title(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "Website Audit Tool",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Performance, security, SEO and accessibility in one pass",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn render_form(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let border_color = if dashboard.error().is_some() {
        Color::Red
    } else if dashboard.is_loading() {
        Color::DarkGray
    } else {
        Color::Cyan
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Website URL ")
        .border_style(Style::default().fg(border_color));

    let content = if dashboard.input().is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(dashboard.input(), Style::default().fg(Color::Yellow))
    };

    let inner = block.inner(area);
    f.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if !dashboard.is_loading() {
        f.set_cursor_position((cursor_column(inner, dashboard.input()), inner.y));
    }
}

fn render_message(f: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let line = if let Some(error) = dashboard.error() {
        Line::from(Span::styled(
            format!(" ✗ {}", error),
            Style::default().fg(Color::Red),
        ))
    } else if let Some(status) = dashboard.status() {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ready to Analyze",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter a website URL above to get started with your comprehensive audit",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_loading(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Running Comprehensive Audit ")
        .border_style(Style::default().fg(Color::Blue));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LOADING_STEPS.len() as u16 + 2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mut lines = vec![
        Line::from(Span::styled(
            "This may take a few moments as we analyze your website thoroughly",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    for (index, step) in LOADING_STEPS.iter().enumerate() {
        let (marker, style) = if index < LOADING_ACTIVE_STEP {
            ("●", Style::default().fg(Color::Blue))
        } else if index == LOADING_ACTIVE_STEP {
            (
                "◉",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(vec![
            Span::styled(marker, style),
            Span::raw(" "),
            Span::styled(*step, style),
        ]));
    }

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        chunks[0],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .percent(LOADING_GAUGE_PERCENT)
        .label("");
    f.render_widget(gauge, chunks[1]);
}

fn render_results(f: &mut Frame, area: Rect, report: &AuditReport, active: Category) {
    let chunks = results_chunks(area);

    render_summary(f, chunks[0], report);
    render_score_cards(f, chunks[1], report, active);
    render_detail(f, chunks[2], report, active);
}

fn render_summary(f: &mut Frame, area: Rect, report: &AuditReport) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Audit Complete ")
        .border_style(Style::default().fg(Color::Green));

    let overall_color = band_color(report.overall.score);
    let text = vec![
        Line::from(vec![
            Span::styled(report.url.as_str(), Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            Span::styled(
                format_timestamp(&report.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(vec![
            Span::raw("Overall "),
            Span::styled(
                report.overall.score.to_string(),
                Style::default().fg(overall_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  Grade "),
            Span::styled(
                report.overall.grade.as_str(),
                Style::default().fg(overall_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  Issues {}", report.total_issues())),
        ]),
    ];

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn render_score_cards(f: &mut Frame, area: Rect, report: &AuditReport, active: Category) {
    let cards = card_chunks(area);

    for (category, card) in Category::ALL.into_iter().zip(cards.iter()) {
        let score = report.score(category);
        let selected = category == active;

        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} {} ", category.icon(), category.label()));
        block = if selected {
            block
                .border_type(BorderType::Thick)
                .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        } else {
            block.border_style(Style::default().fg(Color::DarkGray))
        };

        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(band_color(score)).bg(Color::Black))
            .percent(u16::from(score))
            .label(score.to_string());
        f.render_widget(gauge, *card);
    }
}

/// Lines for the detail panel of one category.
pub fn detail_lines(report: &AuditReport, category: Category) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    match category {
        Category::Performance => {
            lines.push(Line::from(Span::styled("Performance Metrics", heading)));
            for kind in MetricKind::ALL {
                let metric = kind.pick(&report.performance.metrics);
                lines.push(Line::from(vec![
                    Span::raw(format!("  {:<26}", kind.label())),
                    Span::styled(
                        format!("{:>8}  ", kind.format_value(metric.value)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        rating_label(metric.rating),
                        Style::default().fg(rating_color(metric.rating)),
                    ),
                ]));
                lines.push(Line::from(Span::styled(
                    format!("    {}", kind.description()),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        Category::Security => {
            lines.push(Line::from(Span::styled("Security Analysis", heading)));
            lines.push(Line::from(format!(
                "  SSL Certificate: {} (Grade {})",
                report.security.ssl.status, report.security.ssl.grade
            )));
            lines.push(Line::from("  Security Headers:"));
            for (label, present) in security_header_rows(&report.security.headers) {
                lines.push(check_line(label, present));
            }
        }
        Category::Seo => {
            lines.push(Line::from(Span::styled("SEO Analysis", heading)));
            lines.push(Line::from("  Meta Elements:"));
            for (label, present) in seo_meta_rows(&report.seo.meta) {
                lines.push(check_line(label, present));
            }
            lines.push(Line::from("  Page Structure:"));
            for (label, present) in seo_structure_rows(&report.seo.structure) {
                lines.push(check_line(label, present));
            }
        }
        Category::Accessibility => {
            lines.push(Line::from(Span::styled("Accessibility Analysis", heading)));
            lines.push(Line::from(format!(
                "  WCAG Compliance: Level {}",
                report.accessibility.wcag.level
            )));
            lines.push(Line::from(format!(
                "  Compliance Score: {}%",
                report.accessibility.wcag.compliance
            )));
        }
    }

    let issues = report.issues(category);
    if !issues.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Issues Found", heading)));
        for issue in issues {
            lines.push(Line::from(Span::styled(
                format!("  ✗ {}", issue),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recommendations", heading)));
    for (idx, recommendation) in report.recommendations(category).iter().enumerate() {
        lines.push(Line::from(format!("  {}. {}", idx + 1, recommendation)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", RECOMMENDATIONS_TIP),
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

fn check_line(label: &'static str, present: bool) -> Line<'static> {
    let color = if present { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::raw("    "),
        Span::styled(check_mark(present), Style::default().fg(color)),
        Span::raw(format!(" {}", label)),
    ])
}

fn render_detail(f: &mut Frame, area: Rect, report: &AuditReport, category: Category) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            " {} {} ({}) ",
            category.icon(),
            category.label(),
            report.score(category)
        ))
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(detail_lines(report, category))
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_hints(f: &mut Frame, area: Rect, screen: Screen) {
    let key = Style::default().fg(Color::Black).bg(Color::Gray);

    let mut spans = vec![
        Span::styled(" Enter ", key),
        Span::raw(" Audit  "),
    ];
    if screen == Screen::Results {
        spans.extend([
            Span::styled(" ←/→ ", key),
            Span::raw(" Tabs  "),
            Span::styled(" F1-F4 ", key),
            Span::raw(" Jump  "),
            Span::styled(" Ctrl+R ", key),
            Span::raw(" Re-audit  "),
            Span::styled(" Ctrl+E ", key),
            Span::raw(" Export  "),
        ]);
    }
    spans.extend([Span::styled(" Esc ", key), Span::raw(" Quit")]);

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::Black).fg(Color::Gray));
    f.render_widget(paragraph, area);
}
