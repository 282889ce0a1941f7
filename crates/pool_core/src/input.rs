//! Input loading: whitespace-separated tokens.
//!
//! ```text
//! eta gama delta alfa beta lambda
//! count
//! id time origin_x origin_y destination_x destination_y   (count records)
//! ```

use std::fmt::Write as _;
use std::io::Read;
use std::num::ParseIntError;
use std::str::FromStr;

use nom::bytes::complete::take_till1;
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{all_consuming, map_res, opt, recognize, verify};
use nom::error::{FromExternalError, ParseError};
use nom::multi::many0;
use nom::number::complete::double;
use nom::sequence::{pair, preceded};
use nom::IResult;
use tracing::warn;

use crate::error::InputError;
use crate::geometry::Coordinate;
use crate::params::DispatchParams;
use crate::request::Request;

/// Upper bound on records preallocated before they are actually read.
const MAX_PREALLOCATED_REQUESTS: usize = 1 << 16;

/// Everything a run needs, as read from input.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchInput {
    pub params: DispatchParams,
    pub requests: Vec<Request>,
}

fn token<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, &'a str, E> {
    preceded(multispace0, take_till1(|c: char| c.is_whitespace()))(input)
}

fn usize_<'a, E>(input: &'a str) -> IResult<&'a str, usize, E>
where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
{
    map_res(digit1, usize::from_str)(input)
}

fn i64_<'a, E>(input: &'a str) -> IResult<&'a str, i64, E>
where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
{
    map_res(recognize(pair(opt(char('-')), digit1)), i64::from_str)(input)
}

/// Request times and coordinates: `nan` and `inf` are rejected.
fn finite<'a, E: ParseError<&'a str>>(input: &'a str) -> IResult<&'a str, f64, E> {
    verify(double, |value: &f64| value.is_finite())(input)
}

/// Cursor over whitespace-separated tokens. Each field must consume its
/// whole token.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn next_with<T, P>(&mut self, field: &'static str, parser: P) -> Result<T, InputError>
    where
        P: FnMut(&'a str) -> IResult<&'a str, T>,
    {
        let (rest, word) = token::<nom::error::Error<&str>>(self.rest)
            .map_err(|_| InputError::UnexpectedEof { expected: field })?;
        let (_, value) = all_consuming(parser)(word).map_err(|_| InputError::InvalidNumber {
            field,
            token: word.to_string(),
        })?;
        self.rest = rest;
        Ok(value)
    }

    fn next_coordinate(
        &mut self,
        x_field: &'static str,
        y_field: &'static str,
    ) -> Result<Coordinate, InputError> {
        let x = self.next_with(x_field, finite)?;
        let y = self.next_with(y_field, finite)?;
        Ok(Coordinate::new(x, y))
    }

    fn remaining(self) -> usize {
        many0(token::<nom::error::Error<&str>>)(self.rest)
            .map(|(_, tokens)| tokens.len())
            .unwrap_or(0)
    }
}

pub fn parse_input(text: &str) -> Result<DispatchInput, InputError> {
    let mut tokens = Tokens::new(text);

    let params = DispatchParams {
        capacity: tokens.next_with("vehicle capacity", usize_)?,
        speed: tokens.next_with("vehicle speed", double)?,
        max_time_window: tokens.next_with("time window", double)?,
        max_origin_distance: tokens.next_with("origin distance", double)?,
        max_destination_distance: tokens.next_with("destination distance", double)?,
        min_efficiency: tokens.next_with("minimum efficiency", double)?,
    };
    params.validate()?;

    let count = tokens.next_with("request count", usize_)?;
    let mut requests = Vec::with_capacity(count.min(MAX_PREALLOCATED_REQUESTS));
    for _ in 0..count {
        let id = tokens.next_with("request id", i64_)?;
        let time = tokens.next_with("request time", finite)?;
        let origin = tokens.next_coordinate("origin x", "origin y")?;
        let destination = tokens.next_coordinate("destination x", "destination y")?;
        requests.push(Request::new(id, time, origin, destination));
    }

    let trailing = tokens.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the last request record");
    }

    Ok(DispatchInput { params, requests })
}

pub fn read_input<R: Read>(mut reader: R) -> Result<DispatchInput, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_input(&text)
}

/// Renders `params` and `requests` in the input format.
pub fn write_input(params: &DispatchParams, requests: &[Request]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "{} {} {} {} {} {}",
        params.capacity,
        params.speed,
        params.max_time_window,
        params.max_origin_distance,
        params.max_destination_distance,
        params.min_efficiency
    );
    let _ = writeln!(out, "{}", requests.len());
    for request in requests {
        let (origin, destination) = (request.origin(), request.destination());
        let _ = writeln!(
            out,
            "{} {} {} {} {} {}",
            request.id(),
            request.request_time(),
            origin.x,
            origin.y,
            destination.x,
            destination.y
        );
    }
    out
}
