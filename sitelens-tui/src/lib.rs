use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use sitelens_scanner::error::Result as ScanResult;
use sitelens_scanner::{AuditReport, Category, MockAuditor, PendingAudit};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

pub mod dashboard;
pub mod view;

pub use dashboard::{Dashboard, Screen};

/// Outcome of a spawned audit, sent back to the UI thread.
#[derive(Debug)]
pub struct AuditMessage {
    pub token: Uuid,
    pub result: ScanResult<AuditReport>,
}

/// Run the interactive dashboard until the user quits.
///
/// Blocking; call it from a thread that may block (e.g. `spawn_blocking`).
/// Audits are driven on `runtime`.
pub fn run(auditor: MockAuditor, runtime: Handle) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut dashboard = Dashboard::new(auditor);
    let result = run_app(&mut terminal, &mut dashboard, &runtime);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    dashboard: &mut Dashboard,
    runtime: &Handle,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AuditMessage>();

    loop {
        // Apply finished audits without blocking
        while let Ok(msg) = rx.try_recv() {
            dashboard.finish(msg.token, msg.result);
        }

        terminal.draw(|f| view::render(f, dashboard))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(pending) = handle_key(dashboard, key) {
                        spawn_audit(runtime, pending, tx.clone());
                    }
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    handle_mouse(dashboard, mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if dashboard.should_quit() {
            break;
        }
    }

    Ok(())
}

fn spawn_audit(runtime: &Handle, pending: PendingAudit, tx: mpsc::UnboundedSender<AuditMessage>) {
    let token = pending.token();
    runtime.spawn(async move {
        let result = pending.run().await;
        if tx.send(AuditMessage { token, result }).is_err() {
            warn!("Dashboard closed before audit {} reported back", token);
        }
    });
}

/// Translate one key press into a dashboard transition. Returns an audit to
/// drive when the key started one.
pub fn handle_key(dashboard: &mut Dashboard, key: KeyEvent) -> Option<PendingAudit> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => dashboard.quit(),
        KeyCode::Char('c') if ctrl => dashboard.quit(),
        KeyCode::Char('r') if ctrl => return dashboard.reaudit(Utc::now()),
        KeyCode::Char('e') if ctrl => {
            dashboard.export(Path::new("."));
        }
        KeyCode::Char(c) if !ctrl => dashboard.push_char(c),
        KeyCode::Backspace => dashboard.backspace(),
        KeyCode::Enter => return dashboard.submit(Utc::now()),
        KeyCode::Right | KeyCode::Tab => dashboard.next_tab(),
        KeyCode::Left | KeyCode::BackTab => dashboard.previous_tab(),
        KeyCode::F(n @ 1..=4) => dashboard.select_tab(Category::ALL[usize::from(n) - 1]),
        _ => {}
    }
    None
}

/// A left click on a score card selects its category.
pub fn handle_mouse(dashboard: &mut Dashboard, mouse: MouseEvent, area: Rect) {
    if dashboard.screen() != Screen::Results {
        return;
    }
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind
        && let Some(category) = view::tab_at(area, mouse.column, mouse.row)
    {
        dashboard.select_tab(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(MockAuditor::new().with_latency(Duration::ZERO))
    }

    #[test]
    fn test_typing_and_enter_starts_audit() {
        let mut dashboard = dashboard();
        for c in "example.com".chars() {
            assert!(handle_key(&mut dashboard, press(KeyCode::Char(c))).is_none());
        }
        assert_eq!(dashboard.input(), "example.com");

        let pending = handle_key(&mut dashboard, press(KeyCode::Enter));
        assert!(pending.is_some());
        assert!(dashboard.is_loading());
    }

    #[test]
    fn test_enter_on_empty_input_reports_error() {
        let mut dashboard = dashboard();
        assert!(handle_key(&mut dashboard, press(KeyCode::Enter)).is_none());
        assert!(dashboard.error().is_some());
    }

    #[test]
    fn test_tab_keys() {
        let mut dashboard = dashboard();
        handle_key(&mut dashboard, press(KeyCode::Right));
        assert_eq!(dashboard.active_tab(), Category::Security);
        handle_key(&mut dashboard, press(KeyCode::F(4)));
        assert_eq!(dashboard.active_tab(), Category::Accessibility);
        handle_key(&mut dashboard, press(KeyCode::Left));
        assert_eq!(dashboard.active_tab(), Category::Seo);
    }

    #[test]
    fn test_control_keys_do_not_type() {
        let mut dashboard = dashboard();
        assert!(handle_key(&mut dashboard, ctrl('r')).is_none());
        assert_eq!(dashboard.input(), "");

        handle_key(&mut dashboard, ctrl('c'));
        assert!(dashboard.should_quit());
    }

    #[test]
    fn test_escape_quits() {
        let mut dashboard = dashboard();
        handle_key(&mut dashboard, press(KeyCode::Esc));
        assert!(dashboard.should_quit());
    }

    fn left_click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test]
    async fn test_clicking_score_card_selects_tab() {
        let mut dashboard = dashboard();
        for c in "example.com".chars() {
            handle_key(&mut dashboard, press(KeyCode::Char(c)));
        }
        let pending = handle_key(&mut dashboard, press(KeyCode::Enter)).unwrap();
        let token = pending.token();
        dashboard.finish(token, pending.run().await);

        let area = Rect::new(0, 0, 110, 40);
        handle_mouse(&mut dashboard, left_click(60, 11), area);
        assert_eq!(dashboard.active_tab(), Category::Seo);

        // Clicks outside the card row leave the tab alone
        handle_mouse(&mut dashboard, left_click(60, 25), area);
        assert_eq!(dashboard.active_tab(), Category::Seo);
    }

    #[test]
    fn test_clicks_ignored_without_results() {
        let mut dashboard = dashboard();
        handle_mouse(&mut dashboard, left_click(60, 11), Rect::new(0, 0, 110, 40));
        assert_eq!(dashboard.active_tab(), Category::Performance);
    }

    #[tokio::test]
    async fn test_spawned_audit_reports_back() {
        let mut dashboard = dashboard();
        for c in "example.com".chars() {
            handle_key(&mut dashboard, press(KeyCode::Char(c)));
        }
        let pending = handle_key(&mut dashboard, press(KeyCode::Enter)).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_audit(&Handle::current(), pending, tx);

        let msg = rx.recv().await.unwrap();
        assert!(dashboard.finish(msg.token, msg.result));
        assert_eq!(dashboard.screen(), Screen::Results);
    }
}
