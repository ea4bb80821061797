use std::io::{BufRead, Write};

use crate::models::DeviceIdentity;
use crate::{DiskSpeedError, Result};

/// Operator's answer to the device prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Interpret one line of prompt input. Empty means the default, yes.
pub fn parse_answer(line: &str) -> Option<Answer> {
    match line.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
        None | Some('y') => Some(Answer::Yes),
        Some('n') => Some(Answer::No),
        _ => None,
    }
}

/// Ask the operator to confirm testing `identity`
///
/// With `assume_yes` nothing is read. Unrecognised answers repeat the prompt.
/// Input closing before an answer is an error.
pub fn confirm_device<I: BufRead, W: Write>(
    input: &mut I,
    output: &mut W,
    identity: &DeviceIdentity,
    assume_yes: bool,
) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    loop {
        write!(output, "Test device '{}'? (Y/n) > ", identity)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(DiskSpeedError::Confirmation(
                "input closed before an answer was given".to_string(),
            ));
        }

        match parse_answer(&line) {
            Some(Answer::Yes) => return Ok(true),
            Some(Answer::No) => return Ok(false),
            None => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn identity() -> DeviceIdentity {
        DeviceIdentity::new("/dev/sdb1", "SanDisk Ultra Fit")
    }

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(""), Some(Answer::Yes));
        assert_eq!(parse_answer("\n"), Some(Answer::Yes));
        assert_eq!(parse_answer("Yes"), Some(Answer::Yes));
        assert_eq!(parse_answer(" N \n"), Some(Answer::No));
        assert_eq!(parse_answer("nope"), Some(Answer::No));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn test_assume_yes_reads_nothing() {
        let mut input = Cursor::new("n\n");
        let mut output = Vec::new();
        assert!(confirm_device(&mut input, &mut output, &identity(), true).unwrap());
        assert!(output.is_empty());
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_default_is_yes() {
        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(confirm_device(&mut input, &mut output, &identity(), false).unwrap());
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Test device '/dev/sdb1 (SanDisk Ultra Fit)'? (Y/n) > "
        );
    }

    #[test]
    fn test_decline_after_retry() {
        let mut input = Cursor::new("what\nn\n");
        let mut output = Vec::new();
        assert!(!confirm_device(&mut input, &mut output, &identity(), false).unwrap());
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches("(Y/n)").count(), 2);
    }

    #[test]
    fn test_closed_input_is_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        let err = confirm_device(&mut input, &mut output, &identity(), false).unwrap_err();
        assert!(matches!(err, DiskSpeedError::Confirmation(_)));
    }
}
