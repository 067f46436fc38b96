//! Syntax parser for snapshot files.
//!
//! Parses source text directly into the tree in
//! [`parser_types`](super::parser_types). Whitespace and `//` comments may
//! appear between any two tokens. Parsing stops at the first syntax error,
//! which is converted into a [`Diagnostic`].

use std::fmt;

use winnow::{
    Parser as _,
    ascii::{float, multispace1},
    combinator::{alt, cut_err, eof, not, opt, preceded, repeat, separated, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{none_of, one_of, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    parser_types::{AutomatonDecl, Document, EdgeDecl, NodeDecl, Statement, TableDecl},
    span::{Span, Spanned},
};

/// What the parser was looking for when it failed.
///
/// Attached to winnow errors via `.context()`; the innermost context
/// becomes the diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expected {
    /// A keyword or multi-character operator.
    Token(&'static str),
    /// A single punctuation character.
    Char(char),
    /// A described construct such as "item set id".
    Item(&'static str),
    /// The closing quote of a string literal.
    StringEnd,
    /// A valid character after `\` in a string literal.
    Escape,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(token) => write!(f, "`{token}`"),
            Expected::Char(c) => write!(f, "`{c}`"),
            Expected::Item(item) => f.write_str(item),
            Expected::StringEnd => f.write_str("closing `\"`"),
            Expected::Escape => f.write_str("escape character"),
        }
    }
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<Expected>>;

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

/// Parse a `//` comment up to the end of the line
fn line_comment(input: &mut Input<'_>) -> IResult<()> {
    ("//", take_while(0.., |c: char| c != '\n'))
        .void()
        .parse_next(input)
}

/// Skip any mix of whitespace and comments
fn ws(input: &mut Input<'_>) -> IResult<()> {
    repeat(0.., alt((multispace1.void(), line_comment))).parse_next(input)
}

/// Parse a keyword with word boundary checking
fn keyword<'a>(word: &'static str) -> impl FnMut(&mut Input<'a>) -> IResult<()> {
    move |input: &mut Input<'a>| {
        preceded(ws, terminated(word, not(one_of(is_ident_char))))
            .void()
            .context(Expected::Token(word))
            .parse_next(input)
    }
}

/// Parse a single punctuation character
fn punct<'a>(c: char) -> impl FnMut(&mut Input<'a>) -> IResult<char> {
    move |input: &mut Input<'a>| preceded(ws, c).context(Expected::Char(c)).parse_next(input)
}

fn arrow(input: &mut Input<'_>) -> IResult<()> {
    preceded(ws, "->")
        .void()
        .context(Expected::Token("->"))
        .parse_next(input)
}

fn identifier<'a>(input: &mut Input<'a>) -> IResult<Spanned<&'a str>> {
    preceded(ws, take_while(1.., is_ident_char).with_span())
        .map(|(name, range)| Spanned::new(name, Span::new(range)))
        .parse_next(input)
}

fn item_set_id<'a>(input: &mut Input<'a>) -> IResult<Spanned<&'a str>> {
    identifier
        .context(Expected::Item("item set id"))
        .parse_next(input)
}

fn number(input: &mut Input<'_>) -> IResult<Spanned<f32>> {
    preceded(ws, float.with_span())
        .map(|(value, range)| Spanned::new(value, Span::new(range)))
        .context(Expected::Item("number"))
        .parse_next(input)
}

/// Parse an escape sequence after a backslash
fn string_escape(input: &mut Input<'_>) -> IResult<char> {
    preceded(
        '\\',
        cut_err(one_of(['n', 't', '"', '\\'])).context(Expected::Escape),
    )
    .map(|c| match c {
        'n' => '\n',
        't' => '\t',
        other => other,
    })
    .parse_next(input)
}

fn string_content(input: &mut Input<'_>) -> IResult<String> {
    repeat(0.., alt((string_escape, none_of(['"', '\\', '\n', '\r']))))
        .fold(String::new, |mut acc, ch| {
            acc.push(ch);
            acc
        })
        .parse_next(input)
}

/// Parse a double-quoted string literal on a single line
fn string_literal(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    preceded(
        ws,
        preceded(
            '"',
            cut_err(terminated(string_content, '"')).context(Expected::StringEnd),
        )
        .with_span(),
    )
    .map(|(value, range)| Spanned::new(value, Span::new(range)))
    .context(Expected::Item("string literal"))
    .parse_next(input)
}

/// `grammar "<name>";`
fn grammar_decl(input: &mut Input<'_>) -> IResult<Spanned<String>> {
    keyword("grammar").parse_next(input)?;
    cut_err(terminated(string_literal, punct(';'))).parse_next(input)
}

fn node_body<'a>(input: &mut Input<'a>) -> IResult<NodeDecl<'a>> {
    let id = item_set_id.parse_next(input)?;
    keyword("at").parse_next(input)?;
    punct('(').parse_next(input)?;
    let x = number.parse_next(input)?;
    punct(',').parse_next(input)?;
    let y = number.parse_next(input)?;
    punct(')').parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    punct(';').parse_next(input)?;

    Ok(NodeDecl { id, x, y, label })
}

/// `node <id> at (<x>, <y>) "<items>";`
fn node_decl<'a>(input: &mut Input<'a>) -> IResult<NodeDecl<'a>> {
    keyword("node").parse_next(input)?;
    cut_err(node_body).parse_next(input)
}

fn edge_body<'a>(input: &mut Input<'a>) -> IResult<EdgeDecl<'a>> {
    let first = identifier
        .context(Expected::Item("transition or item set id"))
        .parse_next(input)?;

    // `edge e1: I0 -> I1 ...` names the transition explicitly
    let (id, source) = match opt(punct(':')).parse_next(input)? {
        Some(_) => (Some(first), item_set_id.parse_next(input)?),
        None => (None, first),
    };

    arrow.parse_next(input)?;
    let target = item_set_id.parse_next(input)?;
    keyword("on").parse_next(input)?;
    let label = string_literal.parse_next(input)?;
    punct(';').parse_next(input)?;

    Ok(EdgeDecl {
        id,
        source,
        target,
        label,
    })
}

/// `edge [<id>:] <source> -> <target> on "<symbol>";`
fn edge_decl<'a>(input: &mut Input<'a>) -> IResult<EdgeDecl<'a>> {
    keyword("edge").parse_next(input)?;
    cut_err(edge_body).parse_next(input)
}

fn row_body(input: &mut Input<'_>) -> IResult<Spanned<Vec<String>>> {
    let cells: Vec<Spanned<String>> =
        separated(1.., string_literal, punct(',')).parse_next(input)?;
    punct(';').parse_next(input)?;

    let span = match (cells.first(), cells.last()) {
        (Some(first), Some(last)) => first.span().union(last.span()),
        _ => Span::default(),
    };
    let cells = cells.into_iter().map(Spanned::into_inner).collect();
    Ok(Spanned::new(cells, span))
}

/// `row "<cell>", "<cell>", ...;`
fn table_row(input: &mut Input<'_>) -> IResult<Spanned<Vec<String>>> {
    keyword("row").parse_next(input)?;
    cut_err(row_body).parse_next(input)
}

fn table_body(input: &mut Input<'_>) -> IResult<Vec<Spanned<Vec<String>>>> {
    punct('{').parse_next(input)?;
    let rows = repeat(0.., table_row).parse_next(input)?;
    preceded(ws, '}')
        .context(Expected::Item("`row` or `}`"))
        .parse_next(input)?;
    Ok(rows)
}

/// `table { row ...; ... }`
fn table_decl(input: &mut Input<'_>) -> IResult<TableDecl> {
    ws.parse_next(input)?;
    let start = input.current_token_start();
    keyword("table").parse_next(input)?;
    let rows = cut_err(table_body).parse_next(input)?;
    let end = input.current_token_start();

    Ok(TableDecl {
        span: Span::new(start..end),
        rows,
    })
}

fn statement<'a>(input: &mut Input<'a>) -> IResult<Statement<'a>> {
    alt((
        node_decl.map(Statement::Node),
        edge_decl.map(Statement::Edge),
        table_decl.map(Statement::Table),
    ))
    .parse_next(input)
}

fn automaton_body<'a>(input: &mut Input<'a>) -> IResult<AutomatonDecl<'a>> {
    let kind = identifier
        .context(Expected::Item("automaton kind"))
        .parse_next(input)?;
    punct('{').parse_next(input)?;
    let statements = repeat(0.., statement).parse_next(input)?;
    preceded(ws, '}')
        .context(Expected::Item("`node`, `edge`, `table` or `}`"))
        .parse_next(input)?;

    Ok(AutomatonDecl { kind, statements })
}

/// `automaton <kind> { ... }`
fn automaton_decl<'a>(input: &mut Input<'a>) -> IResult<AutomatonDecl<'a>> {
    keyword("automaton").parse_next(input)?;
    cut_err(automaton_body).parse_next(input)
}

fn end_of_input(input: &mut Input<'_>) -> IResult<()> {
    preceded(ws, eof)
        .void()
        .context(Expected::Item("`automaton` or end of input"))
        .parse_next(input)
}

fn document<'a>(input: &mut Input<'a>) -> IResult<Document<'a>> {
    let grammar = grammar_decl.parse_next(input)?;
    let automata = repeat(0.., automaton_decl).parse_next(input)?;
    end_of_input.parse_next(input)?;

    Ok(Document { grammar, automata })
}

/// Parse snapshot source text into a syntax tree.
pub(crate) fn parse_document(source: &str) -> Result<Document<'_>, Diagnostic> {
    let mut input = LocatingSlice::new(source);
    document.parse_next(&mut input).map_err(|err| {
        let error_pos = input.current_token_start();
        convert_error(err, error_pos, source)
    })
}

/// Convert a winnow error and the position it occurred at into a diagnostic.
fn convert_error(err: ErrMode<ContextError<Expected>>, error_pos: usize, source: &str) -> Diagnostic {
    let context_error = match err {
        ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
        ErrMode::Incomplete(_) => ContextError::new(),
    };
    let expected = context_error.context().next().copied();

    let error_end = source
        .get(error_pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(error_pos, |c| error_pos + c.len_utf8());
    let span = Span::new(error_pos..error_end);

    match expected {
        Some(Expected::StringEnd) => Diagnostic::error("unterminated string literal")
            .with_code(ErrorCode::E001)
            .with_label(span, ErrorCode::E001.description())
            .with_help("add a closing `\"` before the end of the line"),
        Some(Expected::Escape) => Diagnostic::error("invalid escape sequence")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
            .with_help("valid escapes: `\\n`, `\\t`, `\\\"`, `\\\\`"),
        other => {
            let what = other.map_or_else(|| "a declaration".to_string(), |e| e.to_string());
            if error_pos >= source.len() {
                Diagnostic::error(format!("unexpected end of input, expected {what}"))
                    .with_code(ErrorCode::E101)
                    .with_label(span, "input ends here")
            } else {
                Diagnostic::error(format!("expected {what}"))
                    .with_code(ErrorCode::E100)
                    .with_label(span, ErrorCode::E100.description())
            }
        }
    }
}
