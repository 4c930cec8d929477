//! The extraction automaton.
//!
//! Each state owns its successor, and [`ScanState::advance`] consumes the
//! current state and returns the next one. There is no shared mutable
//! state and no identity comparison: a pipeline is just a nested value.
//!
//! ```text
//! NameAnchor ──full match──▶ successor
//! BalancedBlock ──unmatched close──▶ successor (receives captured text)
//! CommentSkip ──"*/"──▶ successor
//! NameExtraction ──'/'──▶ CommentSkip ──▶ NameExtraction
//!                ──'(' '{'──▶ BalancedBlock ──▶ NameExtraction (text dropped)
//! HoldValue (terminal)
//! ```

/// The quote character a [`ScanState::BalancedBlock`] is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Single,
    Double,
}

impl Quote {
    fn opened_by(c: char) -> Option<Self> {
        match c {
            '\'' => Some(Self::Single),
            '"' => Some(Self::Double),
            _ => None,
        }
    }

    fn closes(self, c: char) -> bool {
        matches!((self, c), (Self::Single, '\'') | (Self::Double, '"'))
    }
}

/// One state of the extraction automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Waits for `literal` to appear.
    ///
    /// A mismatching character resets progress to zero without being
    /// re-tested against the start of the literal, so a self-overlapping
    /// literal (`"aab"` in `"aaab"`) can be missed.
    NameAnchor {
        literal: Vec<char>,
        progress: usize,
        successor: Box<ScanState>,
    },

    /// Captures text up to the `close` that balances an already consumed
    /// `open`. Delimiters inside quoted literals are not counted.
    ///
    /// A backslash escapes only the single character after it, and only
    /// inside a quoted literal. Outside quotes it is plain text, so it
    /// cannot keep a following quote from opening a literal.
    BalancedBlock {
        open: char,
        close: char,
        depth: usize,
        quote: Option<Quote>,
        escaped: bool,
        captured: String,
        successor: Box<ScanState>,
    },

    /// Entered after a `/`; skips everything up to the next `*/`.
    ///
    /// Every `/` is assumed to open a block comment: `//` line comments
    /// and stray slashes are not recognized.
    CommentSkip { armed: bool, successor: Box<ScanState> },

    /// Terminal state holding the text its predecessor handed over.
    HoldValue(Option<String>),

    /// Splits text into top-level comma-separated bare names.
    NameExtraction { names: Vec<String>, current: String },
}

impl ScanState {
    /// A state that waits for `literal`, then continues as `successor`.
    /// An empty literal matches immediately.
    pub fn anchor(literal: &str, successor: ScanState) -> Self {
        if literal.is_empty() {
            return successor;
        }
        Self::NameAnchor {
            literal: literal.chars().collect(),
            progress: 0,
            successor: Box::new(successor),
        }
    }

    /// A block capture whose opening delimiter has already been consumed.
    pub fn block(open: char, close: char, successor: ScanState) -> Self {
        Self::BalancedBlock {
            open,
            close,
            depth: 0,
            quote: None,
            escaped: false,
            captured: String::new(),
            successor: Box::new(successor),
        }
    }

    pub fn comment(successor: ScanState) -> Self {
        Self::CommentSkip {
            armed: false,
            successor: Box::new(successor),
        }
    }

    pub fn hold() -> Self {
        Self::HoldValue(None)
    }

    pub fn names() -> Self {
        Self::NameExtraction {
            names: Vec::new(),
            current: String::new(),
        }
    }

    /// Human-readable state name, used in diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::NameAnchor { .. } => "anchor",
            Self::BalancedBlock { .. } => "block",
            Self::CommentSkip { .. } => "comment",
            Self::HoldValue(_) => "held value",
            Self::NameExtraction { .. } => "name list",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::HoldValue(_))
    }

    /// Consumes one character and returns the next state.
    pub fn advance(self, c: char) -> ScanState {
        match self {
            Self::NameAnchor {
                literal,
                mut progress,
                successor,
            } => {
                if literal.get(progress) == Some(&c) {
                    progress += 1;
                    if progress == literal.len() {
                        return *successor;
                    }
                } else {
                    progress = 0;
                }
                Self::NameAnchor {
                    literal,
                    progress,
                    successor,
                }
            }

            Self::BalancedBlock {
                open,
                close,
                mut depth,
                mut quote,
                mut escaped,
                mut captured,
                successor,
            } => {
                if quote.is_none() {
                    if c == open {
                        depth += 1;
                    } else if c == close {
                        if depth == 0 {
                            return successor.receive(captured);
                        }
                        depth -= 1;
                    }
                }
                captured.push(c);

                match quote {
                    None => quote = Quote::opened_by(c),
                    Some(_) if escaped => escaped = false,
                    Some(_) if c == '\\' => escaped = true,
                    Some(q) if q.closes(c) => quote = None,
                    Some(_) => {}
                }

                Self::BalancedBlock {
                    open,
                    close,
                    depth,
                    quote,
                    escaped,
                    captured,
                    successor,
                }
            }

            Self::CommentSkip { armed, successor } => match c {
                '*' => Self::CommentSkip {
                    armed: true,
                    successor,
                },
                '/' if armed => *successor,
                _ => Self::CommentSkip {
                    armed: false,
                    successor,
                },
            },

            Self::HoldValue(value) => Self::HoldValue(value),

            Self::NameExtraction {
                mut names,
                mut current,
            } => {
                if c.is_whitespace() {
                    return Self::NameExtraction { names, current };
                }
                match c {
                    ',' => {
                        names.push(std::mem::take(&mut current));
                        Self::NameExtraction { names, current }
                    }
                    '/' => Self::comment(Self::NameExtraction { names, current }),
                    '(' => Self::block('(', ')', Self::NameExtraction { names, current }),
                    '{' => Self::block('{', '}', Self::NameExtraction { names, current }),
                    _ => {
                        current.push(c);
                        Self::NameExtraction { names, current }
                    }
                }
            }
        }
    }

    /// Hands a finished block's text to this state.
    ///
    /// A holder keeps it; a name list drops it, which is how payloads
    /// like `Circle(f32)` are reduced to `Circle`.
    fn receive(self, captured: String) -> ScanState {
        match self {
            Self::HoldValue(_) => Self::HoldValue(Some(captured)),
            other => other,
        }
    }

    /// Feeds every character of `text`, stopping early at a terminal state.
    pub fn run(self, text: &str) -> ScanState {
        let mut state = self;
        for c in text.chars() {
            if state.is_terminal() {
                break;
            }
            state = state.advance(c);
        }
        state
    }
}
