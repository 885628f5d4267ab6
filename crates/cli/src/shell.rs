use anyhow::Result;
use casequery_protocol::Jurisdiction;
use casequery_suggest::{example_queries, NavKey};
use console::{style, Key, Term};
use tokio::sync::mpsc;

use crate::controller::{InputController, KeyEffect};
use crate::render::{jurisdiction_label, render_frame, Frame};

const HELP_LINE: &str =
    "↑/↓ select · Enter search · Esc close · Tab jurisdiction · ^E example · ^C quit";
const CTRL_D: char = '\u{4}';
const CTRL_E: char = '\u{5}';

/// Interactive loop: keystrokes in, redraw on every suggestion or phase change.
pub async fn run_shell(
    mut controller: InputController,
    jurisdictions: Vec<Jurisdiction>,
) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        anyhow::bail!("The interactive shell needs a terminal; use `casequery search` instead");
    }

    let mut keys = spawn_key_reader(term.clone());
    let mut suggestions = controller.subscribe_suggestions();
    let mut phases = controller.subscribe_phases();

    let mut drawn = redraw(&term, &controller, &jurisdictions, 0)?;

    loop {
        tokio::select! {
            key = keys.recv() => {
                let Some(key) = key else { break };
                match key {
                    Key::CtrlC | Key::Char(CTRL_D) => break,
                    Key::Char(CTRL_E) => {
                        controller.cycle_example();
                    }
                    Key::ArrowDown => {
                        controller.on_key_event(NavKey::Down);
                    }
                    Key::ArrowUp => {
                        controller.on_key_event(NavKey::Up);
                    }
                    Key::Escape => {
                        controller.on_key_event(NavKey::Escape);
                    }
                    Key::Enter => {
                        if controller.on_key_event(NavKey::Enter) == KeyEffect::Submit {
                            let pending = controller.begin_submit();
                            tokio::spawn(pending.run());
                        }
                    }
                    Key::Tab => {
                        let current = controller.query().jurisdiction();
                        if let Some(next) = next_jurisdiction(&jurisdictions, current) {
                            let value = next.value.clone();
                            controller.set_jurisdiction(value);
                        }
                    }
                    Key::Backspace => {
                        let mut text = controller.query().text().to_string();
                        text.pop();
                        controller.on_input_change(text);
                    }
                    Key::Char(c) if !c.is_control() => {
                        let mut text = controller.query().text().to_string();
                        text.push(c);
                        controller.on_input_change(text);
                    }
                    _ => continue,
                }
            }
            changed = suggestions.changed() => {
                if changed.is_err() {
                    break;
                }
                suggestions.borrow_and_update();
            }
            changed = phases.changed() => {
                if changed.is_err() {
                    break;
                }
                phases.borrow_and_update();
            }
        }
        drawn = redraw(&term, &controller, &jurisdictions, drawn)?;
    }

    term.clear_last_lines(drawn)?;
    term.show_cursor()?;
    Ok(())
}

/// Entry after `current` in the list, wrapping. A value missing from the
/// list moves to the first entry.
fn next_jurisdiction<'a>(list: &'a [Jurisdiction], current: &str) -> Option<&'a Jurisdiction> {
    let next = list
        .iter()
        .position(|j| j.value == current)
        .map_or(0, |index| index + 1);
    list.get(next % list.len().max(1))
}

/// `Term::read_key` blocks, so keys are read on a plain thread. It is left
/// detached; it ends with the process.
fn spawn_key_reader(term: Term) -> mpsc::Receiver<Key> {
    let (tx, rx) = mpsc::channel(64);
    std::thread::spawn(move || loop {
        match term.read_key() {
            Ok(key) => {
                if tx.blocking_send(key).is_err() {
                    break;
                }
            }
            Err(err) => {
                log::warn!("Key reader stopped: {err}");
                break;
            }
        }
    });
    rx
}

fn redraw(
    term: &Term,
    controller: &InputController,
    jurisdictions: &[Jurisdiction],
    previous: usize,
) -> Result<usize> {
    let suggestions = controller.suggestions();
    let phases = controller.orchestrator().snapshot();

    let lines = render_frame(&Frame {
        query: controller.query(),
        jurisdiction_label: jurisdiction_label(jurisdictions, controller.query().jurisdiction()),
        suggestions: &suggestions,
        examples: example_queries(),
        phases: &phases,
    });

    term.clear_last_lines(previous)?;
    term.write_line(&style("Case Law Search").bold().to_string())?;
    term.write_line(&style(HELP_LINE).dim().to_string())?;
    for line in &lines {
        term.write_line(line)?;
    }
    Ok(lines.len() + 2)
}
