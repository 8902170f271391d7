//! CLI output formatting utilities.
//!
//! Colored status lines for the terminal; colors drop out automatically
//! when the stream is not a terminal.

use owo_colors::{OwoColorize, Stream};

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const STEP: &str = "::";
}

pub fn print_step(message: &str) {
  println!(
    "{} {}",
    symbols::STEP.if_supports_color(Stream::Stdout, |s| s.cyan()),
    message
  );
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message
  );
}
