//! Parser for text syndrome files.
//!
//! A syndrome file lists flagged ancillae as coordinates, either `(i, j)` or
//! the bare `i,j` form, separated by whitespace. Blank lines and lines
//! starting with `#` are ignored. Every coordinate in the file belongs to the
//! same syndrome.

use anyhow::{Context, Result, anyhow};
use log::debug;
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{char, i32 as integer, space0, space1};
use nom::combinator::{all_consuming, map};
use nom::multi::separated_list0;
use nom::sequence::{delimited, preceded, separated_pair, terminated};
use squec_core::Coord;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

fn bare_coord(input: &str) -> IResult<&str, Coord> {
    map(
        separated_pair(integer, delimited(space0, char(','), space0), integer),
        |(i, j)| Coord::new(i, j),
    )(input)
}

fn coord(input: &str) -> IResult<&str, Coord> {
    alt((
        delimited(
            terminated(char('('), space0),
            bare_coord,
            preceded(space0, char(')')),
        ),
        bare_coord,
    ))(input)
}

fn coord_list(input: &str) -> IResult<&str, Vec<Coord>> {
    delimited(space0, separated_list0(space1, coord), space0)(input)
}

/// Parses a syndrome from text.
///
/// # Returns
///
/// The set of coordinates named anywhere in the text, or an error naming the
/// first line that is not a coordinate list.
pub fn parse_syndrome(text: &str) -> Result<BTreeSet<Coord>> {
    let mut flagged = BTreeSet::new();
    for (num, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (_, coords) = all_consuming(coord_list)(trimmed)
            .map_err(|e| anyhow!("line {}: expected coordinates, {}", num + 1, e))?;
        flagged.extend(coords);
    }
    Ok(flagged)
}

/// Loads a syndrome file.
pub fn load_syndrome_file<P: AsRef<Path>>(path: P) -> Result<BTreeSet<Coord>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open syndrome file {}", path.display()))?;
    let flagged = parse_syndrome(&text)
        .with_context(|| format!("Failed to parse syndrome file {}", path.display()))?;
    debug!("loaded {} flagged ancillae from {}", flagged.len(), path.display());
    Ok(flagged)
}

/// Parses one coordinate given as a command-line argument.
pub fn parse_coord_arg(arg: &str) -> Result<Coord> {
    let (_, c) = all_consuming(delimited(space0, coord, space0))(arg)
        .map_err(|e| anyhow!("invalid coordinate {:?}: {}", arg, e))?;
    Ok(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(i: i32, j: i32) -> Coord {
        Coord::new(i, j)
    }

    #[test]
    fn parses_both_coordinate_forms() {
        let text = "(8, 12) 10,10\n12 , 12\t( 14,14 )\n";
        let flagged = parse_syndrome(text).unwrap();
        assert_eq!(
            flagged.into_iter().collect::<Vec<_>>(),
            vec![c(8, 12), c(10, 10), c(12, 12), c(14, 14)]
        );
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let text = "# shot 0\n\n   \n(-2, 4)\n# trailing\n(-2, 4) (0, 20)\n";
        let flagged = parse_syndrome(text).unwrap();
        assert_eq!(flagged.into_iter().collect::<Vec<_>>(), vec![c(-2, 4), c(0, 20)]);
        assert!(parse_syndrome("# nothing\n").unwrap().is_empty());
    }

    #[test]
    fn reports_offending_line() {
        let err = parse_syndrome("(1, 1)\n(2, x)\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"), "{}", err);
        assert!(parse_syndrome("(1, 1))").is_err());
        assert!(parse_syndrome("1,").is_err());
    }

    #[test]
    fn coordinate_arguments() {
        assert_eq!(parse_coord_arg("23,23").unwrap(), c(23, 23));
        assert_eq!(parse_coord_arg(" (-4, 2) ").unwrap(), c(-4, 2));
        assert!(parse_coord_arg("23").is_err());
        assert!(parse_coord_arg("1,2 3,4").is_err());
    }
}
