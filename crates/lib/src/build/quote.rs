//! Quoting values for the shell a build step is handed to.
//!
//! Every path and directive value that ends up in command text goes through
//! [`ShellFlavor::quote`], so a project checked out under `a&b` or `it's` is
//! still a single word to the shell.

use std::borrow::Cow;
use std::fmt;

use super::BuildError;

/// Characters `cmd.exe` interprets outside double quotes.
const CMD_SPECIAL: &[char] = &['&', '|', '<', '>', '^', '(', ')', '!', ';', ',', '=', '\''];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
  /// `/bin/sh -c`
  Posix,
  /// `cmd.exe /C`
  Cmd,
}

impl ShellFlavor {
  /// Quote `value` so the shell passes it through as one literal argument.
  ///
  /// Values that need no quoting are returned unchanged.
  pub fn quote<'a>(self, value: &'a str) -> Result<Cow<'a, str>, BuildError> {
    match self {
      Self::Posix => shlex::try_quote(value).map_err(|_| self.unquotable(value, "contains a NUL byte")),
      Self::Cmd => quote_cmd(value).map_err(|reason| self.unquotable(value, reason)),
    }
  }

  fn unquotable(self, value: &str, reason: &'static str) -> BuildError {
    BuildError::Unquotable {
      value: value.to_string(),
      shell: self,
      reason,
    }
  }
}

impl fmt::Display for ShellFlavor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Posix => write!(f, "sh"),
      Self::Cmd => write!(f, "cmd.exe"),
    }
  }
}

/// Double quotes make `cmd.exe` metacharacters literal. `"` cannot be escaped
/// inside them and `%` still expands there, so both are refused.
fn quote_cmd(value: &str) -> Result<Cow<'_, str>, &'static str> {
  if value.contains('\0') {
    return Err("contains a NUL byte");
  }
  if value.contains('"') {
    return Err("contains a double quote");
  }
  if value.contains('%') {
    return Err("contains `%`, which cmd.exe expands even inside quotes");
  }

  if value.is_empty() || value.contains(char::is_whitespace) || value.contains(CMD_SPECIAL) {
    Ok(Cow::Owned(format!("\"{}\"", value)))
  } else {
    Ok(Cow::Borrowed(value))
  }
}
