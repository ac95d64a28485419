//! Interactive fallback for coordinate flags left off the command line

use std::io::{BufRead, Write};

use chrono::{Datelike, Local, NaiveDate};
use eyre::{Context, Result, eyre};

use solvr::domain::PuzzleCoordinate;

/// Most recent event year as of `today`; an event counts once December starts
pub fn latest_event_year(today: NaiveDate) -> u16 {
    let year = if today.month() == 12 { today.year() } else { today.year() - 1 };
    u16::try_from(year).unwrap_or(u16::MAX)
}

/// Build a coordinate, asking on `input` for every value that is None
pub fn resolve_coordinate<R: BufRead, W: Write>(
    year: Option<u16>,
    day: Option<u8>,
    part: Option<u8>,
    input: &mut R,
    output: &mut W,
) -> Result<PuzzleCoordinate> {
    let year = match year {
        Some(year) => year,
        None => ask(input, output, "Year", Some(latest_event_year(Local::now().date_naive())))?,
    };
    let day = match day {
        Some(day) => day,
        None => ask(input, output, "Day", None)?,
    };
    let part = match part {
        Some(part) => part,
        None => ask(input, output, "Part", Some(1))?,
    };

    PuzzleCoordinate::new(year, day, part).context("Invalid puzzle coordinate")
}

fn ask<T, R, W>(input: &mut R, output: &mut W, label: &str, default: Option<T>) -> Result<T>
where
    T: std::str::FromStr + std::fmt::Display,
    R: BufRead,
    W: Write,
{
    match &default {
        Some(value) => write!(output, "{} [{}]: ", label, value)?,
        None => write!(output, "{}: ", label)?,
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return default.ok_or_else(|| eyre!("No {} given", label.to_lowercase()));
    }

    let answer = line.trim();
    if answer.is_empty() {
        return default.ok_or_else(|| eyre!("No {} given", label.to_lowercase()));
    }
    answer
        .parse()
        .map_err(|_| eyre!("{} must be a number, got '{}'", label, answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_latest_event_year() {
        let december = NaiveDate::from_ymd_opt(2024, 12, 3).unwrap();
        let june = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert_eq!(latest_event_year(december), 2024);
        assert_eq!(latest_event_year(june), 2024);
    }

    #[test]
    fn test_all_flags_given_reads_nothing() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();

        let coordinate = resolve_coordinate(Some(2023), Some(5), Some(2), &mut input, &mut output).unwrap();

        assert_eq!(coordinate, PuzzleCoordinate::new(2023, 5, 2).unwrap());
        assert!(output.is_empty());
    }

    #[test]
    fn test_prompts_for_missing_values() {
        let mut input = Cursor::new(b"12\n\n".to_vec());
        let mut output = Vec::new();

        let coordinate = resolve_coordinate(Some(2022), None, None, &mut input, &mut output).unwrap();

        assert_eq!(coordinate.day(), 12);
        assert_eq!(coordinate.part(), 1);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Day: "));
        assert!(shown.contains("Part [1]: "));
    }

    #[test]
    fn test_missing_day_without_default_fails() {
        let mut input = Cursor::new(b"\n".to_vec());
        let mut output = Vec::new();

        let err = resolve_coordinate(Some(2022), None, Some(1), &mut input, &mut output).unwrap_err();
        assert!(err.to_string().contains("No day given"));
    }

    #[test]
    fn test_non_numeric_answer_fails() {
        let mut input = Cursor::new(b"seven\n".to_vec());
        let mut output = Vec::new();

        assert!(resolve_coordinate(Some(2022), None, Some(1), &mut input, &mut output).is_err());
    }

    #[test]
    fn test_out_of_range_coordinate_fails() {
        let mut input = Cursor::new(Vec::new());
        let mut output = Vec::new();

        let err = resolve_coordinate(Some(2022), Some(26), Some(1), &mut input, &mut output).unwrap_err();
        assert!(err.chain().any(|cause| cause.to_string().contains("Invalid coordinate")));
    }
}
