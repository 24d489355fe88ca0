pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::advisor::{ConfiguredAdvisor, Recommendation};
use event::{Event, EventHandler};

type AdviceHandle = tokio::task::JoinHandle<Result<anyhow::Result<Recommendation>, tokio::time::error::Elapsed>>;

pub async fn run_tui(mut app: App, advisor: Arc<ConfiguredAdvisor>) -> anyhow::Result<()> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250); // 250ms tick for flash expiry

    // At most one advisor call in flight at a time
    let mut pending_advice: Option<AdviceHandle> = None;

    loop {
        terminal.draw(|frame| ui::draw(frame, &mut app))?;

        match events.next().await {
            Event::Key(key) => {
                if let Some(request) = handle_key_event(&mut app, key) {
                    let advisor = Arc::clone(&advisor);
                    pending_advice = Some(tokio::spawn(async move {
                        tokio::time::timeout(Duration::from_secs(20), advisor.advise(&request))
                            .await
                    }));
                }
            }
            Event::Tick => {
                app.update_flash();
            }
        }

        // Check if a background advisor call has completed
        if let Some(handle) = &mut pending_advice {
            if handle.is_finished() {
                let handle = pending_advice.take();
                if let Some(handle) = handle {
                    match handle.await {
                        Ok(Ok(Ok(advice))) => app.set_advice(advice),
                        Ok(Ok(Err(e))) => app.advice_failed(format!("{:#}", e)),
                        Ok(Err(_elapsed)) => {
                            app.advice_failed("timed out after 20s".to_string())
                        }
                        Err(e) => app.advice_failed(format!("task panicked: {}", e)),
                    }
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    ratatui::restore();

    Ok(())
}

/// Dispatch a key press against the current input mode. Returns a
/// negotiation request when the user confirmed the negotiate popup.
fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<crate::advisor::NegotiationRequest> {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Navigation
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),

                // Weight criterion selection
                KeyCode::Tab => app.cycle_criterion(),
                KeyCode::Char('1') => app.select_criterion(app::Criterion::Cost),
                KeyCode::Char('2') => app.select_criterion(app::Criterion::Quality),
                KeyCode::Char('3') => app.select_criterion(app::Criterion::Delivery),
                KeyCode::Char('4') => app.select_criterion(app::Criterion::Risk),

                // Weight adjustment
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                    app.adjust_weight(1.0)
                }
                KeyCode::Char('-') | KeyCode::Left => app.adjust_weight(-1.0),

                // Scenario controls
                KeyCode::Char('D') => app.adjust_demand(1),
                KeyCode::Char('d') => app.adjust_demand(-1),
                KeyCode::Char('X') => app.adjust_disruption(1.0),
                KeyCode::Char('x') => app.adjust_disruption(-1.0),

                // Fresh disruption forecast
                KeyCode::Char('f') => app.redraw_forecast(),

                // Negotiate with selected supplier
                KeyCode::Char('n') => {
                    if app.is_advising {
                        app.show_flash("Advisor call already in progress".to_string());
                    } else {
                        app.start_negotiate_input();
                    }
                }

                // Purchase order for selected supplier
                KeyCode::Char('p') => app.show_po(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => {}
            }
        }
        app::InputMode::NegotiateInput => {
            match key.code {
                KeyCode::Enter => return app.confirm_negotiate_input(),
                KeyCode::Esc => app.cancel_negotiate_input(),

                KeyCode::Backspace => {
                    app.negotiate_input.pop();
                }

                // Digits, decimal points and separators only
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' || c == ' ' => {
                    app.negotiate_input.push(c);
                }

                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::Advice => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.dismiss_advice(),
            _ => {}
        },
        app::InputMode::PoView => match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('p') => {
                app.dismiss_po()
            }
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
    None
}
