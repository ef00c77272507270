/// Line ROIs from a bounding-box CSV export
use nom::{
    bytes::complete::take_till,
    character::complete::{char, i64 as integer, space0},
    combinator::all_consuming,
    multi::separated_list1,
    sequence::delimited,
    IResult,
};

use crate::error::{ResliceError, Result};

/// Column holding the box origin x; y, width and height follow it
const FIRST_BOX_COLUMN: usize = 4;

/// A straight line ROI between two pixel positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRoi {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl LineRoi {
    /// Diagonal of the box with origin (x, y) and size (w, h).
    /// `None` when the far corner does not fit in an `i64`.
    pub fn from_box(x: i64, y: i64, w: i64, h: i64) -> Option<Self> {
        Some(Self {
            x1: x,
            y1: y,
            x2: x.checked_add(w)?,
            y2: y.checked_add(h)?,
        })
    }

    /// ImageJ macro that draws the line and adds it to the ROI manager
    pub fn to_macro(&self) -> String {
        format!(
            "makeLine({}, {}, {}, {});\nroiManager(\"add\");",
            self.x1, self.y1, self.x2, self.y2
        )
    }
}

/// Read every row after the header. Columns 4 to 7 are x, y, w, h.
pub fn parse_line_rois(input: &str) -> Result<Vec<LineRoi>> {
    let mut rois = Vec::new();
    for (idx, raw) in input.lines().enumerate().skip(1) {
        let line = raw.trim_end();
        if line.is_empty() {
            continue;
        }
        let parse_err = |message: String| ResliceError::Parse {
            line: idx + 1,
            message,
        };

        let (_, fields) = split_fields(line).map_err(|e| parse_err(format!("{:?}", e)))?;
        if fields.len() < FIRST_BOX_COLUMN + 4 {
            return Err(parse_err(format!(
                "expected at least {} columns, found {}",
                FIRST_BOX_COLUMN + 4,
                fields.len()
            )));
        }

        let mut coords = [0i64; 4];
        for (slot, field) in coords.iter_mut().zip(&fields[FIRST_BOX_COLUMN..]) {
            *slot = field_integer(field)
                .map_err(|_| parse_err(format!("{:?} is not an integer", field)))?;
        }
        let [x, y, w, h] = coords;
        if x.checked_add(w).is_none() {
            return Err(parse_err(format!("x {} + width {} overflows", x, w)));
        }
        if y.checked_add(h).is_none() {
            return Err(parse_err(format!("y {} + height {} overflows", y, h)));
        }
        let roi = LineRoi::from_box(x, y, w, h)
            .ok_or_else(|| parse_err("box corner overflows".to_string()))?;
        rois.push(roi);
    }
    log::debug!("read {} line ROIs", rois.len());
    Ok(rois)
}

fn split_fields(line: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(char(','), take_till(|c: char| c == ','))(line)
}

fn field_integer(field: &str) -> std::result::Result<i64, nom::Err<nom::error::Error<&str>>> {
    all_consuming(delimited(space0, integer, space0))(field).map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Name,Slice,Type,Color,X,Y,Width,Height\n\
                          a,1,box,red,10,20,5,7\n\
                          b,2,box,red, 3 ,4,-2,0,extra\n";

    #[test]
    fn test_rows_become_box_diagonals() {
        let rois = parse_line_rois(EXPORT).unwrap();
        assert_eq!(
            rois,
            vec![
                LineRoi {
                    x1: 10,
                    y1: 20,
                    x2: 15,
                    y2: 27
                },
                LineRoi {
                    x1: 3,
                    y1: 4,
                    x2: 1,
                    y2: 4
                },
            ]
        );
    }

    #[test]
    fn test_header_only() {
        assert!(parse_line_rois("X,Y\n").unwrap().is_empty());
        assert!(parse_line_rois("").unwrap().is_empty());
    }

    #[test]
    fn test_short_row_is_an_error() {
        let err = parse_line_rois("h\n1,2,3,4,5\n").unwrap_err();
        assert!(matches!(err, ResliceError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_non_integer_field_is_an_error() {
        let err = parse_line_rois("h\n,,,,1.5,2,3,4\n").unwrap_err();
        assert!(matches!(err, ResliceError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_overflowing_corner_is_an_error() {
        let err = parse_line_rois("h\na,1,box,red,9223372036854775807,0,1,0\n").unwrap_err();
        match err {
            ResliceError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("width"));
            }
            other => panic!("unexpected error {:?}", other),
        }

        let err = parse_line_rois("h\na,1,box,red,0,-9223372036854775807,0,-2\n").unwrap_err();
        assert!(matches!(err, ResliceError::Parse { ref message, .. } if message.contains("height")));
        assert_eq!(LineRoi::from_box(i64::MAX, 0, 1, 0), None);
    }

    #[test]
    fn test_macro_text() {
        let roi = LineRoi::from_box(1, 2, 3, 4).unwrap();
        assert_eq!(
            roi.to_macro(),
            "makeLine(1, 2, 4, 6);\nroiManager(\"add\");"
        );
    }
}
