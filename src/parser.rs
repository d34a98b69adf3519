use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while},
    character::complete::{anychar, char, digit1, one_of},
    combinator::{complete, cut, map, map_opt, map_res, opt, value, verify},
    error::{context, ErrorKind},
    multi::{fold_many0, separated_list0},
    sequence::{preceded, terminated, tuple},
    Err, IResult, Offset,
};

use crate::error::{ParseFailure, SyntaxError, SyntaxErrorKind};
use crate::value::{Map, Number, Value};

pub type Result<'a, R> = IResult<&'a str, R, ParseFailure<'a>>;
pub type ParseResult = std::result::Result<Value, SyntaxError>;

// Same cap as serde_json, so the fallback never recurses deeper than the
// fast path. Containers past this depth fail instead of blowing the stack.
const RECURSION_LIMIT: usize = 128;

fn depth_check(i: &str, depth: usize) -> Result<()> {
    if depth >= RECURSION_LIMIT {
        Err(Err::Failure(ParseFailure::new(
            i,
            SyntaxErrorKind::RecursionLimitExceeded,
        )))
    } else {
        Ok((i, ()))
    }
}

fn sp(i: &str) -> Result<&str> {
    take_while(|c| " \t\r\n".contains(c))(i)
}

/// The run of characters a bare (unquoted) token would span. Diagnostics
/// only, never interpreted.
fn bare_token(i: &str, is_key: bool) -> String {
    let delimiters = if is_key { " \t\r\n:,]})" } else { " \t\r\n,]})" };

    i.chars().take_while(|c| !delimiters.contains(*c)).collect()
}

fn boolean(i: &str) -> Result<bool> {
    alt((
        value(true, alt((tag("true"), tag("True")))),
        value(false, alt((tag("false"), tag("False")))),
    ))(i)
}

fn null(i: &str) -> Result<()> {
    value((), alt((tag("null"), tag("None"))))(i)
}

fn u16_hex(i: &str) -> Result<u16> {
    map_res(take(4usize), |s: &str| u16::from_str_radix(s, 16))(i).map_err(
        |e: Err<ParseFailure>| match e {
            Err::Error(mut e) => {
                e.kind = SyntaxErrorKind::InvalidHex(i.get(0..4).unwrap_or(i).to_owned());
                Err::Error(e)
            }
            e => e,
        },
    )
}

fn unicode_escape(i: &str) -> Result<char> {
    map_opt(
        alt((
            // Not a surrogate
            map(verify(u16_hex, |cp| !(0xD800..0xE000).contains(cp)), |cp| {
                cp as u32
            }),
            // See https://en.wikipedia.org/wiki/UTF-16#Code_points_from_U+010000_to_U+10FFFF for details
            map(
                verify(tuple((u16_hex, tag("\\u"), u16_hex)), |(high, _, low)| {
                    (0xD800..0xDC00).contains(high) && (0xDC00..0xE000).contains(low)
                }),
                |(high, _, low)| {
                    let high_ten = (high as u32) - 0xD800;
                    let low_ten = (low as u32) - 0xDC00;
                    (high_ten << 10) + low_ten + 0x10000
                },
            ),
        )),
        std::char::from_u32,
    )(i)
}

enum Fragment {
    Char(char),
    // Unrecognized escape, the backslash is preserved
    Verbatim(char),
}

fn parse_char(i: &str, quote: char) -> Result<Fragment> {
    let (i, c) = verify(anychar, |&c| c != quote)(i)?;

    if c != '\\' {
        return Ok((i, Fragment::Char(c)));
    }

    let (i, escaped) = anychar(i)?;

    match escaped {
        '"' | '\'' | '\\' | '/' => Ok((i, Fragment::Char(escaped))),
        'b' => Ok((i, Fragment::Char('\x08'))),
        'f' => Ok((i, Fragment::Char('\x0C'))),
        'n' => Ok((i, Fragment::Char('\n'))),
        'r' => Ok((i, Fragment::Char('\r'))),
        't' => Ok((i, Fragment::Char('\t'))),
        '0' => Ok((i, Fragment::Char('\0'))),
        'u' => map(cut(unicode_escape), Fragment::Char)(i),
        _ => Ok((i, Fragment::Verbatim(escaped))),
    }
}

fn quoted_string(i: &str, quote: char) -> Result<String> {
    let (i, _) = char(quote)(i)?;

    let (i, string) = fold_many0(
        |i| parse_char(i, quote),
        String::new,
        |mut string, fragment| {
            match fragment {
                Fragment::Char(c) => string.push(c),
                Fragment::Verbatim(c) => {
                    string.push('\\');
                    string.push(c);
                }
            }
            string
        },
    )(i)?;

    let (i, _) = cut(char(quote))(i).map_err(|e: Err<ParseFailure>| match e {
        Err::Failure(mut e) => {
            if let SyntaxErrorKind::NomError(_) = e.kind {
                e.kind = SyntaxErrorKind::MissingQuote;
            }
            Err::Failure(e)
        }
        e => e,
    })?;

    Ok((i, string))
}

fn double_quoted(i: &str) -> Result<String> {
    quoted_string(i, '"')
}

fn single_quoted(i: &str) -> Result<String> {
    quoted_string(i, '\'')
}

fn string(i: &str) -> Result<String> {
    context("string", alt((double_quoted, single_quoted)))(i)
}

fn number(i: &str) -> Result<Number> {
    let (rest, (sign, _, frac, exp)) = context(
        "number",
        tuple((
            opt(one_of("-+")),
            digit1,
            opt(complete(preceded(char('.'), digit1))),
            opt(complete(tuple((one_of("eE"), opt(one_of("-+")), digit1)))),
        )),
    )(i)?;

    let literal = &i[..i.offset(rest)];

    // A fraction or exponent makes it a float, everything else stays an
    // integer. Overflowing the native range is an error, not a widening.
    let number = if frac.is_some() || exp.is_some() {
        literal.parse().map(Number::Float).map_err(|_| ())
    } else if sign == Some('-') {
        literal.parse().map(Number::NegInt).map_err(|_| ())
    } else {
        literal.parse().map(Number::PosInt).map_err(|_| ())
    }
    .map_err(|_| {
        Err::Failure(ParseFailure::new(
            i,
            SyntaxErrorKind::InvalidNumber(literal.to_owned()),
        ))
    })?;

    Ok((rest, number))
}

/// Comma-separated literals, a trailing comma is tolerated after at least
/// one element.
fn elements(i: &str, depth: usize) -> Result<Vec<Value>> {
    let (i, items) = separated_list0(preceded(sp, char(',')), |i| literal(i, depth))(i)?;

    let i = if items.is_empty() {
        i
    } else {
        opt(preceded(sp, char(',')))(i)?.0
    };

    Ok((i, items))
}

fn array(i: &str, depth: usize) -> Result<Vec<Value>> {
    let (i, _) = char('[')(i)?;
    let (i, _) = depth_check(i, depth)?;

    context(
        "array",
        cut(terminated(
            |i| elements(i, depth + 1),
            preceded(sp, char(']')),
        )),
    )(i)
    .map_err(|e| match e {
        Err::Failure(mut e) => {
            // A specific kind means the failure came from a nested value
            if let SyntaxErrorKind::NomError(_) = e.kind {
                e.kind = SyntaxErrorKind::MissingArrayBracket;
            }
            Err::Failure(e)
        }
        e => e,
    })
}

fn group(i: &str, depth: usize) -> Result<Vec<Value>> {
    let (i, _) = char('(')(i)?;
    let (i, _) = depth_check(i, depth)?;

    context(
        "group",
        cut(terminated(
            |i| elements(i, depth + 1),
            preceded(sp, char(')')),
        )),
    )(i)
    .map_err(|e| match e {
        Err::Failure(mut e) => {
            if let SyntaxErrorKind::NomError(_) = e.kind {
                e.kind = SyntaxErrorKind::MissingParen;
            }
            Err::Failure(e)
        }
        e => e,
    })
}

fn key_value(i: &str, depth: usize) -> Result<(String, Value)> {
    let (i, _) = sp(i)?;

    if i.starts_with('}') || i.is_empty() {
        // Called in a loop by the member list, only an error can stop it
        return Err(Err::Error(ParseFailure::new(
            i,
            SyntaxErrorKind::NomError(ErrorKind::Char),
        )));
    }

    let (i, key) = string(i).map_err(|e| match e {
        Err::Error(_) => Err::Failure(ParseFailure::new(
            i,
            SyntaxErrorKind::InvalidKey(bare_token(i, true)),
        )),
        e => e,
    })?;

    let (i, _) = preceded(sp, char(':'))(i).map_err(|e: Err<ParseFailure>| match e {
        Err::Error(mut e) | Err::Failure(mut e) => {
            e.kind = SyntaxErrorKind::MissingColon;
            Err::Failure(e)
        }
        Err::Incomplete(n) => Err::Incomplete(n),
    })?;

    let (i, value) = literal(i, depth)?;

    Ok((i, (key, value)))
}

fn members(i: &str, depth: usize) -> Result<Map> {
    let (i, pairs) = separated_list0(preceded(sp, char(',')), |i| key_value(i, depth))(i)?;

    let i = if pairs.is_empty() {
        i
    } else {
        opt(preceded(sp, char(',')))(i)?.0
    };

    // Last write wins on duplicate keys
    Ok((i, pairs.into_iter().collect()))
}

fn object(i: &str, depth: usize) -> Result<Map> {
    let (i, _) = char('{')(i)?;
    let (i, _) = depth_check(i, depth)?;

    context(
        "map",
        cut(terminated(
            |i| members(i, depth + 1),
            preceded(sp, char('}')),
        )),
    )(i)
    .map_err(|e| match e {
        Err::Failure(mut e) => {
            // Anything more specific came out of a key or nested value
            if let SyntaxErrorKind::NomError(_) = e.kind {
                e.kind = SyntaxErrorKind::MissingObjectBrace;
            }
            Err::Failure(e)
        }
        e => e,
    })
}

fn literal(i: &str, depth: usize) -> Result<Value> {
    let (i, _) = sp(i)?;

    alt((
        map(|i| object(i, depth), Value::Object),
        map(|i| array(i, depth), Value::Array),
        map(|i| group(i, depth), Value::Array),
        map(string, Value::String),
        map(number, Value::Number),
        map(boolean, Value::Bool),
        map(null, |_| Value::Null),
    ))(i)
    .map_err(|e| match e {
        Err::Error(f) => {
            let token = bare_token(i, false);

            if matches!(f.kind, SyntaxErrorKind::NomError(_)) && !token.is_empty() {
                Err::Error(ParseFailure::new(i, SyntaxErrorKind::InvalidValue(token)))
            } else {
                Err::Error(f)
            }
        }
        e => e,
    })
}

fn unwrap_nom_error<'a, T>(
    source: &'a str,
    value: Result<'a, T>,
) -> std::result::Result<(&'a str, T), SyntaxError> {
    match value {
        Ok(v) => Ok(v),
        Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(SyntaxError::from_failure(source, e)),
        // Only complete parsers are used
        Err(Err::Incomplete(_)) => Err(SyntaxError::from_failure(
            source,
            ParseFailure::new(source, SyntaxErrorKind::NomError(ErrorKind::Complete)),
        )),
    }
}

/// Evaluates a whole, self-contained span against the restricted literal
/// grammar. Strict: trailing non-whitespace input is an error, and nothing
/// outside the grammar is ever interpreted or executed.
pub fn parse(s: &str) -> ParseResult {
    let (rest, value) = unwrap_nom_error(s, literal(s, 0))?;
    let (rest, _) = unwrap_nom_error(s, sp(rest))?;

    if rest.is_empty() {
        Ok(value)
    } else {
        Err(SyntaxError::from_failure(
            s,
            ParseFailure::new(rest, SyntaxErrorKind::CharsAfterRoot(rest.to_owned())),
        ))
    }
}
