use colored::*;
use console::Term;
use netinv_common::models::device::DiscoveredDevice;
use netinv_core::apply::{Confirmer, Decision};

use crate::terminal::{colors, format, print};

/// Asks on the controlling terminal. Read failures count as "quit".
pub struct TerminalConfirmer {
    term: Term,
}

impl TerminalConfirmer {
    pub fn new() -> Self {
        Self { term: Term::stdout() }
    }
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm(&mut self, device: &DiscoveredDevice, index: usize, total: usize, allow_all: bool) -> Decision {
        print::blank();
        print::tree_head(index, &format!("{} of {total}: {}", index, device.display_name()));
        print::as_tree_one_level(format::device_to_details(device));

        let question = format!(
            "{} Register this device? {} ",
            "?".color(colors::ACCENT).bold(),
            choices(allow_all).color(colors::SEPARATOR)
        );

        loop {
            if self.term.write_str(&question).is_err() {
                return Decision::Quit;
            }
            let Ok(line) = self.term.read_line() else {
                return Decision::Quit;
            };
            match parse_decision(&line, allow_all) {
                Some(decision) => return decision,
                None => {
                    let _ = self.term.write_line(&format!("{}", retry_hint(allow_all).yellow()));
                }
            }
        }
    }
}

/// Answer legend shown after the question. Upper case marks the default.
fn choices(allow_all: bool) -> &'static str {
    if allow_all { "[Y/n/a/q]" } else { "[Y/n/q]" }
}

fn retry_hint(allow_all: bool) -> &'static str {
    if allow_all {
        "Please answer y, n, a or q."
    } else {
        "Please answer y, n or q."
    }
}

/// An empty answer takes the default, "yes".
pub fn parse_decision(answer: &str, allow_all: bool) -> Option<Decision> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" => Some(Decision::Accept),
        "n" | "no" => Some(Decision::Skip),
        "q" | "quit" => Some(Decision::Quit),
        "a" | "all" if allow_all => Some(Decision::AcceptAll),
        _ => None,
    }
}
