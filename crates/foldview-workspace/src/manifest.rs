//! `use` directive scanner for workspace manifests.
//!
//! The manifest grammar is line-oriented: `//` starts a line comment, and
//! members are declared either as `use <path>` or inside a parenthesized
//! `use (...)` block that may open and close on any line. The scanner is
//! an explicit two-state machine over trimmed lines; lines that match no
//! directive shape are skipped without error.

/// Scanner state across a line scan.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ScanState {
    Outside,
    InsideUseBlock,
}

/// Extract the raw member-path tokens from manifest text, in source order.
///
/// Tokens taken from inline or block lists keep any surrounding quotes
/// (stripped during resolution); a single `use "..."` directive or a
/// quoted block line is unquoted here since the quotes delimit the token.
/// Empty tokens are never emitted.
#[must_use]
pub fn parse_use_directives(text: &str) -> Vec<String> {
    let mut state = ScanState::Outside;
    let mut tokens: Vec<String> = Vec::new();

    for raw_line in text.lines() {
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        match state {
            ScanState::Outside => {
                // Inline list with both parens on one line: `use (./a ./b)`
                if line.starts_with("use ") && line.contains('(') && line.contains(')') {
                    if let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) {
                        if open < close {
                            for token in line[open + 1..close].split_whitespace() {
                                tokens.push(token.to_string());
                            }
                        }
                    }
                    continue;
                }

                // Block opener, possibly with a same-line tail: `use (` / `use ( ./a`
                if line == "use(" || line.starts_with("use (") {
                    state = ScanState::InsideUseBlock;
                    if let Some(open) = line.find('(') {
                        let after = line[open + 1..].trim();
                        if !after.is_empty() {
                            let tail = after.split(')').next().unwrap_or(after).trim();
                            for token in tail.split_whitespace() {
                                tokens.push(token.to_string());
                            }
                            if after.contains(')') {
                                state = ScanState::Outside;
                            }
                        }
                    }
                    continue;
                }

                // Single directive: `use ./a` or `use "./my dir"`
                if let Some(rest) = line.strip_prefix("use ") {
                    if let Some(token) = extract_token(rest.trim()) {
                        tokens.push(token.to_string());
                    }
                    continue;
                }

                tracing::trace!("skipping unrecognized manifest line: {line}");
            }
            ScanState::InsideUseBlock => {
                if line.starts_with(')') {
                    state = ScanState::Outside;
                    continue;
                }
                if let Some(token) = extract_token(line) {
                    tokens.push(token.to_string());
                }
            }
        }
    }

    tokens
}

/// Everything from the first `//` onward is a comment.
fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(before, _)| before)
}

/// A quoted token runs to the next `"` (or end of line if unterminated);
/// a bare token runs to the first whitespace.
fn extract_token(rest: &str) -> Option<&str> {
    let token = if let Some(quoted) = rest.strip_prefix('"') {
        quoted.split('"').next().unwrap_or(quoted)
    } else {
        rest.split_whitespace().next().unwrap_or("")
    };
    (!token.is_empty()).then_some(token)
}
