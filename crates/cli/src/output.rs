//! Terminal and JSON rendering for the bundle commands.
//!
//! Status lines go to stdout (warnings to stderr) with colors only when the
//! stream supports them. `--output json` bypasses all of this and prints the
//! library's serializable reports.

use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use ncnn_bundle_lib::build::BuildStep;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

/// Size of pruned install-tree content, in binary units.
pub fn format_bytes(bytes: u64) -> String {
  const UNITS: [&str; 3] = ["KB", "MB", "GB"];

  let mut value = bytes as f64;
  let mut unit = None;
  for next in UNITS {
    if value < 1024.0 {
      break;
    }
    value /= 1024.0;
    unit = Some(next);
  }

  match unit {
    Some(unit) => format!("{value:.1} {unit}"),
    None => format!("{bytes} B"),
  }
}

/// Wall-clock time of a packaging run. Native builds take minutes, so anything
/// past a minute drops the sub-second part.
pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  match secs {
    0 => format!("{}ms", duration.as_millis()),
    1..=59 => format!("{:.2}s", duration.as_secs_f64()),
    _ => format!("{}m {}s", secs / 60, secs % 60),
  }
}

pub fn print_success(message: &str) {
  let mark = symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green());
  println!("{mark} {message}");
}

pub fn print_warning(message: &str) {
  let mark = symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow());
  eprintln!("{mark} {}", message.if_supports_color(Stream::Stderr, |s| s.yellow()));
}

pub fn print_info(message: &str) {
  let mark = symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue());
  println!("{mark} {message}");
}

pub fn print_stat(label: &str, value: &str) {
  println!("  {}: {value}", label.if_supports_color(Stream::Stdout, |s| s.dimmed()));
}

fn print_item(value: &dyn Display) {
  let arrow = symbols::ARROW.if_supports_color(Stream::Stdout, |s| s.dimmed());
  println!("    {arrow} {value}");
}

/// A labelled list with its length, one entry per line.
pub fn print_list<T: Display>(label: &str, items: &[T]) {
  print_stat(label, &items.len().to_string());
  for item in items {
    print_item(item);
  }
}

/// Artifact file names under `label`, as copied into the package `bin/`.
pub fn print_artifacts<P: AsRef<Path>>(label: &str, paths: &[P]) {
  let names: Vec<String> = paths
    .iter()
    .filter_map(|p| p.as_ref().file_name())
    .map(|n| n.to_string_lossy().into_owned())
    .collect();
  print_list(label, &names);
}

/// Planned build steps, each prefixed with its stage.
pub fn print_steps(steps: &[BuildStep]) {
  let lines: Vec<String> = steps.iter().map(step_line).collect();
  print_list("Commands", &lines);
}

fn step_line(step: &BuildStep) -> String {
  format!("[{}] {}", step.stage, step.command)
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{json}");
  Ok(())
}
