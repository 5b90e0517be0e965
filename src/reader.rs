use std::io::{self, Read};
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use std::num::{ParseIntError, ParseFloatError};

use common::{Point, Segment};

#[derive(Debug)]
pub enum ReadError {
    Open { file: String, error: io::Error, },
    Read { file: String, error: io::Error, },
    MissingHeader,
    InvalidHeader { line: usize, error: ParseIntError, },
    MissingRecord { expected: usize, found: usize, },
    ExtraRecord { expected: usize, line: usize, },
    TokenCount { line: usize, expected: usize, found: usize, },
    InvalidNumber { line: usize, token: String, error: ParseFloatError, },
}

/// Reads a segments file: a count line `n` followed by exactly `n` lines of `x1 y1 x2 y2`.
pub fn read_segments<P>(path: P) -> Result<Vec<Segment>, ReadError> where P: AsRef<Path> {
    let contents = read_file(path.as_ref())?;
    parse_segments(&contents)
}

/// Reads a points file: every non-blank line is `x y`.
pub fn read_points<P>(path: P) -> Result<Vec<Point>, ReadError> where P: AsRef<Path> {
    let contents = read_file(path.as_ref())?;
    parse_points(&contents)
}

pub fn parse_segments(contents: &str) -> Result<Vec<Segment>, ReadError> {
    let contents = unify_line_breaks(contents);
    let mut lines = contents.lines().enumerate().map(|(index, line)| (index + 1, line));

    let (header_no, header) = lines.next()
        .ok_or(ReadError::MissingHeader)?;
    let count: usize = header.trim().parse()
        .map_err(|error| ReadError::InvalidHeader { line: header_no, error, })?;

    let mut segments = Vec::with_capacity(count);
    while segments.len() < count {
        let (line_no, line) = lines.next()
            .ok_or(ReadError::MissingRecord { expected: count, found: segments.len(), })?;
        let [x1, y1, x2, y2] = parse_record::<[f64; 4]>(line_no, line)?;
        segments.push(Segment {
            src: Point { x: x1, y: y1, },
            dst: Point { x: x2, y: y2, },
        });
    }

    if let Some((line_no, _)) = lines.find(|&(_, line)| !line.trim().is_empty()) {
        return Err(ReadError::ExtraRecord { expected: count, line: line_no, });
    }

    Ok(segments)
}

pub fn parse_points(contents: &str) -> Result<Vec<Point>, ReadError> {
    let contents = unify_line_breaks(contents);
    let mut points = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let [x, y] = parse_record::<[f64; 2]>(index + 1, line)?;
        points.push(Point { x, y, });
    }
    Ok(points)
}

/// Turns `\r\n` and lone `\r` line breaks into `\n`.
fn unify_line_breaks(contents: &str) -> Cow<str> {
    if contents.contains('\r') {
        Cow::Owned(contents.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(contents)
    }
}

fn read_file(path: &Path) -> Result<String, ReadError> {
    let file_name = || path.to_string_lossy().to_string();
    let mut file = File::open(path)
        .map_err(|error| ReadError::Open { file: file_name(), error, })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|error| ReadError::Read { file: file_name(), error, })?;
    Ok(contents)
}

trait Record: Default + AsMut<[f64]> {}

impl Record for [f64; 2] {}
impl Record for [f64; 4] {}

fn parse_record<R>(line_no: usize, line: &str) -> Result<R, ReadError> where R: Record {
    let mut record = R::default();
    let tokens: Vec<&str> = line.split_whitespace().collect();
    {
        let fields = record.as_mut();
        if tokens.len() != fields.len() {
            return Err(ReadError::TokenCount { line: line_no, expected: fields.len(), found: tokens.len(), });
        }
        for (field, token) in fields.iter_mut().zip(tokens) {
            *field = token.parse()
                .map_err(|error| ReadError::InvalidNumber { line: line_no, token: token.to_string(), error, })?;
        }
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use tempfile;
    use common::{Point, Segment};
    use super::{ReadError, parse_segments, parse_points, read_segments, read_points};

    fn segment(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment { src: Point { x: x1, y: y1, }, dst: Point { x: x2, y: y2, }, }
    }

    #[test]
    fn segments_in_file_order() {
        let segments = parse_segments("2\n0 0 1 1\n1 1 2 0\n").unwrap();
        assert_eq!(segments, vec![segment(0., 0., 1., 1.), segment(1., 1., 2., 0.)]);
    }

    #[test]
    fn segments_loose_whitespace() {
        let segments = parse_segments(" 1 \r\n  -1.5\t2e1  3   .25\r\n\n\n").unwrap();
        assert_eq!(segments, vec![segment(-1.5, 20., 3., 0.25)]);
    }

    #[test]
    fn segments_carriage_returns() {
        let segments = parse_segments("2\r0 0 1 1\r1 1 2 0\r").unwrap();
        assert_eq!(segments, vec![segment(0., 0., 1., 1.), segment(1., 1., 2., 0.)]);
        let segments = parse_segments("2\r\n0 0 1 1\r1 1 2 0\n").unwrap();
        assert_eq!(segments, vec![segment(0., 0., 1., 1.), segment(1., 1., 2., 0.)]);
        match parse_segments("1\r0 0 1 1\r1 1 2 0\r") {
            Err(ReadError::ExtraRecord { expected: 1, line: 3, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_zero_count() {
        assert!(parse_segments("0\n").unwrap().is_empty());
    }

    #[test]
    fn segments_empty_file() {
        match parse_segments("") {
            Err(ReadError::MissingHeader) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_invalid_header() {
        match parse_segments("two\n0 0 1 1\n") {
            Err(ReadError::InvalidHeader { line: 1, .. }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse_segments("-1\n") {
            Err(ReadError::InvalidHeader { line: 1, .. }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_short_file() {
        match parse_segments("3\n0 0 1 1\n1 1 2 0\n") {
            Err(ReadError::MissingRecord { expected: 3, found: 2, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_extra_records() {
        match parse_segments("1\n0 0 1 1\n1 1 2 0\n") {
            Err(ReadError::ExtraRecord { expected: 1, line: 3, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_token_count() {
        match parse_segments("2\n0 0 1 1\n1 1 2\n") {
            Err(ReadError::TokenCount { line: 3, expected: 4, found: 3, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
        match parse_segments("1\n\n") {
            Err(ReadError::TokenCount { line: 2, expected: 4, found: 0, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn segments_invalid_number() {
        match parse_segments("1\n0 0 x 1\n") {
            Err(ReadError::InvalidNumber { line: 2, ref token, .. }) if token == "x" => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn points_skip_blank_lines() {
        let points = parse_points("1 2\n\n3 4\n").unwrap();
        assert_eq!(points, vec![Point { x: 1., y: 2., }, Point { x: 3., y: 4., }]);
        let points = parse_points("   \n5 6\n\t\n").unwrap();
        assert_eq!(points, vec![Point { x: 5., y: 6., }]);
    }

    #[test]
    fn points_carriage_returns() {
        let points = parse_points("1 2\r3 4\r").unwrap();
        assert_eq!(points, vec![Point { x: 1., y: 2., }, Point { x: 3., y: 4., }]);
        match parse_points("1 2\r\n\r3 4 5\r") {
            Err(ReadError::TokenCount { line: 3, expected: 2, found: 3, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn points_empty_file() {
        assert!(parse_points("").unwrap().is_empty());
        assert!(parse_points("\n\n").unwrap().is_empty());
    }

    #[test]
    fn points_token_count() {
        match parse_points("1 2\n\n3 4 5\n") {
            Err(ReadError::TokenCount { line: 3, expected: 2, found: 3, }) => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn points_invalid_number() {
        match parse_points("1 2\n3 four\n") {
            Err(ReadError::InvalidNumber { line: 2, ref token, .. }) if token == "four" => (),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let segments_path = dir.path().join("in.txt");
        let points_path = dir.path().join("out.txt");
        fs::write(&segments_path, "1\n0 0 2 2\n").unwrap();
        fs::write(&points_path, "1 1\n").unwrap();

        assert_eq!(read_segments(&segments_path).unwrap(), vec![segment(0., 0., 2., 2.)]);
        assert_eq!(read_points(&points_path).unwrap(), vec![Point { x: 1., y: 1., }]);
    }

    #[test]
    fn read_old_mac_line_breaks() {
        let dir = tempfile::tempdir().unwrap();
        let segments_path = dir.path().join("in.txt");
        let points_path = dir.path().join("out.txt");
        fs::write(&segments_path, "2\r0 0 1 1\r1 1 2 0\r").unwrap();
        fs::write(&points_path, "1 2\r\r3 4\r").unwrap();

        assert_eq!(read_segments(&segments_path).unwrap(), vec![segment(0., 0., 1., 1.), segment(1., 1., 2., 0.)]);
        assert_eq!(read_points(&points_path).unwrap(), vec![Point { x: 1., y: 2., }, Point { x: 3., y: 4., }]);
    }

    #[test]
    fn read_missing_file() {
        match read_points("/nonexistent/segplot/out.txt") {
            Err(ReadError::Open { ref file, .. }) => assert_eq!(file, "/nonexistent/segplot/out.txt"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
