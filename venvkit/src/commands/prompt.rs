//! Interactive confirmation for destructive operations.

use std::io::{self, IsTerminal, Write};

/// Ask a yes/no question on stderr. `assume_yes` answers yes without asking;
/// a non-interactive stdin answers no.
pub fn confirm(question: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        eprintln!("{} [y/N] (stdin is not a terminal; pass --yes to confirm)", question);
        return Ok(false);
    }
    eprint!("{} [y/N] ", question);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
