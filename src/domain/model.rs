use std::fmt;

/// How a single input line is treated by the rewriter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Rewritable,
    Passthrough,
}

/// Fields captured from a `trojan://` link body.
///
/// `params` is everything after the `?`. It is captured but not carried into
/// the forward form; only `host` is reused there as `serverName`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrojanLink<'a> {
    pub credential: &'a str,
    pub host: &'a str,
    pub port: &'a str,
    pub params: &'a str,
}

/// Result of processing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewrittenLine {
    Forward(String),
    Malformed(String),
    Passthrough(String),
}

impl RewrittenLine {
    pub fn as_str(&self) -> &str {
        match self {
            RewrittenLine::Forward(s)
            | RewrittenLine::Malformed(s)
            | RewrittenLine::Passthrough(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub lines: Vec<RewrittenLine>,
}

impl RewriteOutcome {
    pub fn forwarded(&self) -> usize {
        self.count(|l| matches!(l, RewrittenLine::Forward(_)))
    }

    pub fn malformed(&self) -> usize {
        self.count(|l| matches!(l, RewrittenLine::Malformed(_)))
    }

    pub fn passthrough(&self) -> usize {
        self.count(|l| matches!(l, RewrittenLine::Passthrough(_)))
    }

    fn count(&self, pred: impl Fn(&RewrittenLine) -> bool) -> usize {
        self.lines.iter().filter(|l| pred(*l)).count()
    }

    /// Joins the lines back with `\n`, in input order.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(RewrittenLine::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("UTF-8"),
            TextEncoding::Latin1 => f.write_str("Latin-1"),
        }
    }
}

/// Payload text together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}
