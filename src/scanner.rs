//! Per-line markup state machine used by the context resolver
//!
//! A line is read left to right through a handful of states (text, `<`, tag
//! name, attribute area, quoted value, closing tag). Outside a tag, a quoted
//! value after `=` is taken as an attribute continued from an earlier line. The summary records what
//! is still open when the line ends. The scanner never looks at other lines;
//! multi-line tags are handled by the resolver walking upward.

/// An opening tag that has not been closed by `>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenTag {
    pub name: String,
    /// Character column of the `<`
    pub column: usize,
}

/// What a single line leaves open at its end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSummary {
    /// Rightmost opening tag still unclosed at the end of the line
    pub open_tag: Option<OpenTag>,
    /// The line ends right after `<` or in the middle of a tag name
    pub typing_name: bool,
    /// A `>` was seen, closing a tag or ending one begun on an earlier line
    pub boundary: bool,
    /// The line ends inside `</name`
    pub in_closing_tag: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Text,
    /// Just read `<`
    Open { column: usize },
    TagName { column: usize, name: String },
    /// Attribute area of an opening tag
    InTag,
    Quoted(char),
    ClosingTag,
    /// `=` seen outside a tag
    TextAssign,
    /// Quoted value of an attribute whose tag opened on an earlier line
    ContinuedValue(char),
}

pub(crate) fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Run the state machine over one line of text
pub fn scan_line(text: &str) -> LineSummary {
    let mut summary = LineSummary::default();
    let mut state = State::Text;

    for (column, c) in text.chars().enumerate() {
        state = match state {
            State::Text => match c {
                '<' => State::Open { column },
                '>' => {
                    summary.boundary = true;
                    State::Text
                }
                '=' => State::TextAssign,
                _ => State::Text,
            },
            State::TextAssign => match c {
                '"' | '\'' => State::ContinuedValue(c),
                '<' => State::Open { column },
                '>' => {
                    summary.boundary = true;
                    State::Text
                }
                '=' => State::TextAssign,
                c if c.is_whitespace() => State::TextAssign,
                _ => State::Text,
            },
            // `>` inside the value is not a tag boundary
            State::ContinuedValue(quote) => {
                if c == quote {
                    State::Text
                } else {
                    State::ContinuedValue(quote)
                }
            }
            State::Open { column: start } => match c {
                c if is_name_char(c) => State::TagName {
                    column: start,
                    name: c.to_string(),
                },
                '/' => State::ClosingTag,
                '<' => State::Open { column },
                '>' => {
                    summary.boundary = true;
                    State::Text
                }
                // `<!--`, `<?xml`, `< ` are not tags
                _ => State::Text,
            },
            State::TagName { column: start, mut name } => match c {
                c if is_name_char(c) => {
                    name.push(c);
                    State::TagName { column: start, name }
                }
                '>' => {
                    summary.boundary = true;
                    summary.open_tag = None;
                    State::Text
                }
                '<' => {
                    summary.open_tag = None;
                    State::Open { column }
                }
                '"' | '\'' => {
                    summary.open_tag = Some(OpenTag { name, column: start });
                    State::Quoted(c)
                }
                _ => {
                    summary.open_tag = Some(OpenTag { name, column: start });
                    State::InTag
                }
            },
            State::InTag => match c {
                '"' | '\'' => State::Quoted(c),
                '>' => {
                    summary.boundary = true;
                    summary.open_tag = None;
                    State::Text
                }
                // A new tag inside an unclosed one abandons it
                '<' => {
                    summary.open_tag = None;
                    State::Open { column }
                }
                _ => State::InTag,
            },
            State::Quoted(quote) => {
                if c == quote {
                    State::InTag
                } else {
                    State::Quoted(quote)
                }
            }
            State::ClosingTag => match c {
                '>' => {
                    summary.boundary = true;
                    State::Text
                }
                '<' => State::Open { column },
                _ => State::ClosingTag,
            },
        };
    }

    match state {
        State::Open { .. } => summary.typing_name = true,
        State::TagName { column, name } => {
            summary.typing_name = true;
            summary.open_tag = Some(OpenTag { name, column });
        }
        State::ClosingTag => summary.in_closing_tag = true,
        State::Text
        | State::InTag
        | State::Quoted(_)
        | State::TextAssign
        | State::ContinuedValue(_) => {}
    }

    summary
}
