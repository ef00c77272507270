/// Ordered point lists, one `x y z` triple per line
use nom::{
    branch::alt,
    character::complete::{char, space0, space1},
    combinator::{all_consuming, value},
    number::complete::double,
    sequence::delimited,
    IResult,
};

use crate::error::{ResliceError, Result};
use crate::geometry::Point3D;

/// Parse a point list.
///
/// Coordinates are separated by commas and/or spaces. Text after `#` and
/// blank lines are ignored. Point order is preserved; it fixes the
/// orientation of the plane normal.
pub fn parse_points(input: &str) -> Result<Vec<Point3D>> {
    let mut points = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let (_, point) = all_consuming(parse_point)(line).map_err(|e| ResliceError::Parse {
            line: idx + 1,
            message: format!("expected three coordinates, got {:?} ({:?})", line, e),
        })?;
        points.push(point);
    }
    log::debug!("read {} points", points.len());
    Ok(points)
}

/// Parse a single `x,y,z` triple such as a command-line argument
pub fn parse_point_arg(input: &str) -> Result<Point3D> {
    all_consuming(parse_point)(input.trim())
        .map(|(_, p)| p)
        .map_err(|_| ResliceError::Parse {
            line: 1,
            message: format!("expected x,y,z, got {:?}", input),
        })
}

fn parse_point(input: &str) -> IResult<&str, Point3D> {
    let (input, _) = space0(input)?;
    let (input, x) = double(input)?;
    let (input, _) = separator(input)?;
    let (input, y) = double(input)?;
    let (input, _) = separator(input)?;
    let (input, z) = double(input)?;
    let (input, _) = space0(input)?;
    Ok((input, Point3D::new(x, y, z)))
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((value((), delimited(space0, char(','), space0)), value((), space1)))(input)
}
