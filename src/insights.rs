//! Keyword scan of free-text notes.
//!
//! A deliberately small heuristic: each [`Finding`] has a handful of word
//! stems (English and Russian) and a fixed hint. Matching is
//! case-insensitive substring search.

use std::fmt;

use crate::error::{Error, Result};

/// Something the scan noticed in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finding {
    Pressure,
    Sleep,
    Spasm,
    /// Reported alone when nothing else matched.
    NothingObvious,
}

impl Finding {
    /// Findings that are looked for, in report order.
    pub const SCANNED: [Finding; 3] = [Finding::Pressure, Finding::Sleep, Finding::Spasm];

    fn stems(&self) -> &'static [&'static str] {
        match self {
            Finding::Pressure => &["pressure", "давлен"],
            Finding::Sleep => &["sleep", "slept", "insomnia", "сон", "спал"],
            Finding::Spasm => &["spasm", "спазм"],
            Finding::NothingObvious => &[],
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Finding::Pressure => "Blood pressure is mentioned. It may be worth checking your stress level.",
            Finding::Sleep => "Sleep is mentioned. Make sure your sleep was good quality.",
            Finding::Spasm => "Neck spasms are mentioned. Gentle relaxing exercises are recommended.",
            Finding::NothingObvious => "No obvious triggers found. Everything looks fine.",
        }
    }

    fn matches(&self, lowered: &str) -> bool {
        self.stems().iter().any(|stem| lowered.contains(stem))
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

/// Scan `text` and return what was found.
///
/// Never returns an empty list. Blank input is a [`Error::Validation`].
pub fn analyze(text: &str) -> Result<Vec<Finding>> {
    if text.trim().is_empty() {
        return Err(Error::Validation("there is no text to analyze".to_string()));
    }

    let lowered = text.to_lowercase();
    let found: Vec<Finding> = Finding::SCANNED
        .into_iter()
        .filter(|f| f.matches(&lowered))
        .collect();

    if found.is_empty() {
        Ok(vec![Finding::NothingObvious])
    } else {
        Ok(found)
    }
}

/// Render findings as a bulleted report.
pub fn report(findings: &[Finding]) -> String {
    let mut out = String::from("Analyzing your notes...\n");
    for finding in findings {
        out.push_str("- ");
        out.push_str(finding.hint());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_rejected() {
        assert!(matches!(analyze(""), Err(Error::Validation(_))));
        assert!(matches!(analyze("  \n\t"), Err(Error::Validation(_))));
    }

    #[test]
    fn test_nothing_obvious() {
        assert_eq!(analyze("walked in the park").unwrap(), vec![Finding::NothingObvious]);
    }

    #[test]
    fn test_findings_in_fixed_order() {
        let found = analyze("Neck SPASM after work, slept badly, pressure up").unwrap();
        assert_eq!(found, vec![Finding::Pressure, Finding::Sleep, Finding::Spasm]);
    }

    #[test]
    fn test_russian_stems() {
        let found = analyze("Давление 150/95, плохой сон").unwrap();
        assert_eq!(found, vec![Finding::Pressure, Finding::Sleep]);

        assert_eq!(analyze("Спазмы в шее").unwrap(), vec![Finding::Spasm]);
    }

    #[test]
    fn test_report() {
        let report = report(&[Finding::Spasm]);
        assert_eq!(
            report,
            "Analyzing your notes...\n- Neck spasms are mentioned. Gentle relaxing exercises are recommended.\n"
        );
    }
}
