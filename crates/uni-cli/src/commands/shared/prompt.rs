use std::io::{BufRead, Write};

use anyhow::Context;

use crate::ui;

/// Ask on stderr, read one line from stdin. End of input reads as empty.
pub fn read_line(question: &str) -> anyhow::Result<String> {
    eprint!("{question}");
    std::io::stderr().flush().ok();
    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read from stdin")?;
    Ok(answer.trim_end_matches(['\r', '\n']).to_string())
}

/// `y` / `yes` in any case; anything else, including no answer, is a no.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// y/N confirmation. Without a terminal on stdin, or when stdin cannot be
/// read, the answer is no.
pub fn confirm(question: &str) -> bool {
    if !ui::prefs().interactive {
        tracing::warn!("stdin is not a terminal; pass --yes to confirm");
        return false;
    }
    match read_line(&format!("{question} [y/N] ")) {
        Ok(answer) => is_yes(&answer),
        Err(error) => {
            tracing::warn!(%error, "confirmation unavailable; declining");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::is_yes;

    #[rstest]
    #[case("y", true)]
    #[case("YES", true)]
    #[case(" yes ", true)]
    #[case("", false)]
    #[case("n", false)]
    #[case("yep", false)]
    fn yes_answers(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_yes(answer), expected);
    }
}
