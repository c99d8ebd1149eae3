//! Collection of NOM parsers for various things.
//! Generally only `parse` and `from_str` functions should be called
//! from outside of this module, they ensures that whole input is
//! consumed.
//! Other functions are composable parsers for use within this module
//! or as parameters for functions mentioned above.

use crate::keycode::{KeyCode, KeyName};

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, hex_digit1},
    combinator::{all_consuming, map, map_res},
    error::ParseError,
    sequence::{separated_pair, terminated},
    IResult, Input, Parser,
};

use std::str::FromStr;

pub fn address(s: &str) -> IResult<&str, (u8, u8)> {
    let byte = || map_res(digit1, u8::from_str);
    separated_pair(byte(), char(':'), byte()).parse(s)
}

/// One key token from a keymap file. Table names win over hex literals,
/// so `f1` is the function key while `f1h` is the raw code 0xf1.
pub fn key(s: &str) -> IResult<&str, KeyCode> {
    alt((map(name, KeyCode::Named), map(raw, KeyCode::Raw))).parse(s)
}

fn name(s: &str) -> IResult<&str, KeyName> {
    map_res(
        take_while1(|c: char| c.is_ascii_alphanumeric()),
        KeyName::from_str,
    )
    .parse(s)
}

/// Raw HID usage code with the `h` marker, e.g. `2ah`
fn raw(s: &str) -> IResult<&str, u32> {
    map_res(terminated(hex_digit1, char('h')), |digits| {
        u32::from_str_radix(digits, 16)
    })
    .parse(s)
}

/// Parses string with given parser ensuring that whole input is consumed.
pub fn parse<I, O, E, P>(parser: P, input: I) -> std::result::Result<O, E>
where
    I: Input,
    E: ParseError<I>,
    P: Parser<I, Output = O, Error = E>,
{
    use nom::Finish as _;
    all_consuming(parser)
        .parse(input)
        .finish()
        .map(|(_, value)| value)
}

/// Parses string using given parser, as `parse` do, but also converts string reference
/// in returned error to String, so it may be used in implementations of `FromStr`.
pub fn from_str<O, P>(parser: P, s: &str) -> std::result::Result<O, nom::error::Error<String>>
where
    for<'a> P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    match parse(parser, s) {
        Ok(value) => Ok(value),
        Err(nom::error::Error { input, code }) => Err(nom::error::Error {
            input: input.to_owned(),
            code,
        }),
    }
}
