//! `timetrack events`: list the canonical events hosts may send.

use std::fmt::Write;
use timetrack_protocol::SignalEvent;

pub fn run() {
    print!("{}", render());
}

fn render() -> String {
    let width = SignalEvent::ALL
        .iter()
        .map(|event| event.as_str().len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for event in SignalEvent::ALL {
        let (condition, value) = event.target();
        let _ = writeln!(out, "{:<width$} -> {} = {}", event.as_str(), condition, value);
    }
    out
}
