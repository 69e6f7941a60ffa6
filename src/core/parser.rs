use crate::domain::model::LocationRecord;
use crate::utils::error::{MapError, Result};

/// 拆分一行為地名與說明
///
/// The first whitespace run is the only delimiter. A line with no whitespace
/// yields an empty description; a blank line yields an empty name.
pub fn parse_line(line: &str) -> LocationRecord {
    let line = line.trim();

    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => LocationRecord::new(name, rest.trim_start()),
        None => LocationRecord::new(line, ""),
    }
}

/// 輸入檔必須是合法 UTF-8
pub fn decode_input(data: Vec<u8>) -> Result<String> {
    String::from_utf8(data)
        .map_err(|e| MapError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn parse_records(content: &str) -> Vec<LocationRecord> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    content.lines().map(parse_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_description() {
        let record = parse_line("Paris the city of lights");
        assert_eq!(record.name, "Paris");
        assert_eq!(record.description, "the city of lights");
    }

    #[test]
    fn test_name_only() {
        let record = parse_line("Tokyo");
        assert_eq!(record.name, "Tokyo");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_whitespace_run_is_single_delimiter() {
        let record = parse_line("Berlin \t  capital   of Germany  ");
        assert_eq!(record.name, "Berlin");
        assert_eq!(record.description, "capital   of Germany");
    }

    #[test]
    fn test_empty_line_gives_empty_name() {
        let record = parse_line("   ");
        assert_eq!(record.name, "");
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_parse_records_keeps_blank_lines() {
        let records = parse_records("\u{feff}Paris capital\r\n\r\nTokyo\n");
        assert_eq!(
            records,
            vec![
                LocationRecord::new("Paris", "capital"),
                LocationRecord::new("", ""),
                LocationRecord::new("Tokyo", ""),
            ]
        );
    }

    #[test]
    fn test_decode_input_rejects_invalid_utf8() {
        assert_eq!(decode_input(b"Paris\n".to_vec()).unwrap(), "Paris\n");

        match decode_input(vec![0xff, 0xfe, b'P']) {
            Err(MapError::IoError(e)) => assert_eq!(e.kind(), std::io::ErrorKind::InvalidData),
            other => panic!("expected InvalidData, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_records_empty_input() {
        assert!(parse_records("").is_empty());
    }
}
