//! Rewrites `trojan://` subscription lines into the `forward=trojan://` form.
//!
//! Lines that do not start with `trojan://` (after trimming) pass through
//! untouched, in their original untrimmed form. Lines that start with the
//! prefix but do not fit `trojan://<cred>@<host>:<port>?<params>` are replaced
//! by [`MALFORMED_PREFIX`] followed by the trimmed line. Nothing here fails:
//! every input line yields exactly one output line.

use crate::domain::model::{LineKind, RewriteOutcome, RewrittenLine, TrojanLink};
use regex::Regex;
use std::sync::OnceLock;

pub const TROJAN_PREFIX: &str = "trojan://";
pub const MALFORMED_PREFIX: &str = "格式错误: ";

const REMARK_DELIMITER: char = '#';

// Anchored at the start only; the params group takes the rest of the body.
fn trojan_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^trojan://([^@]+)@([^:]+):(\d+)\?(.*)").expect("trojan pattern is valid")
    })
}

// Unicode whitespace plus the ASCII separators U+001C..U+001F.
fn is_blank(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank)
}

pub fn classify(line: &str) -> LineKind {
    if trim_blank(line).starts_with(TROJAN_PREFIX) {
        LineKind::Rewritable
    } else {
        LineKind::Passthrough
    }
}

/// Splits at the first `#`. The remark keeps the `#` and is empty when absent.
pub fn split_remark(line: &str) -> (&str, &str) {
    match line.find(REMARK_DELIMITER) {
        Some(idx) => line.split_at(idx),
        None => (line, ""),
    }
}

pub fn parse_link(body: &str) -> Option<TrojanLink<'_>> {
    let caps = trojan_pattern().captures(body)?;
    Some(TrojanLink {
        credential: caps.get(1)?.as_str(),
        host: caps.get(2)?.as_str(),
        port: caps.get(3)?.as_str(),
        params: caps.get(4)?.as_str(),
    })
}

impl TrojanLink<'_> {
    pub fn to_forward(&self) -> String {
        format!(
            "forward=trojan://{}@{}:{}?serverName={}&skipVerify=true",
            self.credential, self.host, self.port, self.host
        )
    }
}

/// Converts an already trimmed `trojan://` line.
pub fn convert_line(line: &str) -> RewrittenLine {
    let (body, remark) = split_remark(line);
    match parse_link(body) {
        Some(link) => {
            if !link.params.is_empty() {
                tracing::trace!(host = link.host, params = link.params, "dropping link parameters");
            }
            RewrittenLine::Forward(link.to_forward() + remark)
        }
        None => {
            tracing::debug!("malformed trojan line: {}", line);
            RewrittenLine::Malformed(format!("{}{}", MALFORMED_PREFIX, line))
        }
    }
}

pub fn rewrite_lines(text: &str) -> RewriteOutcome {
    let lines = trim_blank(text)
        .split('\n')
        .map(|line| match classify(line) {
            LineKind::Rewritable => convert_line(trim_blank(line)),
            LineKind::Passthrough => RewrittenLine::Passthrough(line.to_string()),
        })
        .collect();

    RewriteOutcome { lines }
}

pub fn rewrite(text: &str) -> String {
    rewrite_lines(text).to_text()
}
