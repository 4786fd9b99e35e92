use std::fmt;

use thiserror::Error;

pub const INDEX_REASON: &str = "Index must be a single letter like A, B, C";
pub const DAYS_REASON: &str = "Days must be a positive number";

/// Contest division as selected in the form. Trusted input: the presentation
/// layer only offers these four values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Division {
    Div1,
    #[default]
    Div2,
    Div3,
    Div4,
}

impl Division {
    pub const ALL: [Division; 4] = [
        Division::Div1,
        Division::Div2,
        Division::Div3,
        Division::Div4,
    ];

    /// Literal value sent in the `division` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Division::Div1 => "div. 1",
            Division::Div2 => "div. 2",
            Division::Div3 => "div. 3",
            Division::Div4 => "div. 4",
        }
    }

    /// Accepts `div. 2`, `Div. 2`, `div2` or just `2`.
    pub fn from_label(label: &str) -> Option<Self> {
        let compact: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect::<String>()
            .to_ascii_lowercase();
        let digit = compact.strip_prefix("div").unwrap_or(compact.as_str());
        match digit {
            "1" => Some(Division::Div1),
            "2" => Some(Division::Div2),
            "3" => Some(Division::Div3),
            "4" => Some(Division::Div4),
            _ => None,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Index,
    Days,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: FormField,
    pub reason: &'static str,
}

pub type ValidationResult = Result<FilterParams, ValidationError>;

/// Validated, normalized filter. The problem index is always upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterParams {
    division: Division,
    problem_index: char,
    lookback_days: u32,
}

impl FilterParams {
    pub fn division(&self) -> Division {
        self.division
    }

    pub fn problem_index(&self) -> char {
        self.problem_index
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Query pairs shared by both endpoints, in wire order.
    pub fn query_pairs(&self) -> [(&'static str, String); 3] {
        [
            ("division", self.division.as_query_value().to_string()),
            ("index", self.problem_index.to_string()),
            ("days", self.lookback_days.to_string()),
        ]
    }

    pub fn file_name(&self) -> String {
        export_file_name(self.division, &self.problem_index.to_string())
    }
}

/// Checks raw form input and produces normalized [`FilterParams`].
pub fn validate(division: Division, raw_index: &str, raw_days: &str) -> ValidationResult {
    let mut chars = raw_index.chars();
    let problem_index = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
        _ => {
            return Err(ValidationError {
                field: FormField::Index,
                reason: INDEX_REASON,
            })
        }
    };

    let lookback_days = match raw_days.trim().parse::<u32>() {
        Ok(days) if days > 0 => days,
        _ => {
            return Err(ValidationError {
                field: FormField::Days,
                reason: DAYS_REASON,
            })
        }
    };

    Ok(FilterParams {
        division,
        problem_index,
        lookback_days,
    })
}

/// `cf_<division without whitespace>_problem_<lower-case index>.csv`
///
/// Used both for the name shown before confirmation and the name the file is
/// saved under.
pub fn export_file_name(division: Division, index: &str) -> String {
    let division: String = division
        .as_query_value()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    format!("cf_{division}_problem_{}.csv", index.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_case_index_is_normalized() {
        let params = validate(Division::Div2, "a", "365").unwrap();
        assert_eq!(params.division(), Division::Div2);
        assert_eq!(params.problem_index(), 'A');
        assert_eq!(params.lookback_days(), 365);
    }

    #[test]
    fn index_with_two_letters_is_rejected() {
        let err = validate(Division::Div2, "AB", "365").unwrap_err();
        assert_eq!(err.field, FormField::Index);
        assert!(err.to_string().contains("single letter"));
    }

    #[test]
    fn index_is_checked_before_days() {
        let err = validate(Division::Div1, "", "-5").unwrap_err();
        assert_eq!(err.field, FormField::Index);
    }

    #[test]
    fn non_ascii_letter_is_rejected() {
        assert!(validate(Division::Div1, "é", "10").is_err());
        assert!(validate(Division::Div1, " a", "10").is_err());
    }

    #[test]
    fn negative_days_are_rejected() {
        let err = validate(Division::Div2, "A", "-5").unwrap_err();
        assert_eq!(err.field, FormField::Days);
        assert!(err.to_string().contains("positive number"));
    }

    #[test]
    fn days_allow_surrounding_whitespace() {
        let params = validate(Division::Div3, "b", " 30 ").unwrap();
        assert_eq!(params.lookback_days(), 30);
    }

    #[test]
    fn file_name_strips_spaces_and_lowers_index() {
        let params = validate(Division::Div1, "c", "7").unwrap();
        assert_eq!(params.file_name(), "cf_div.1_problem_c.csv");
        assert_eq!(export_file_name(Division::Div4, "F"), "cf_div.4_problem_f.csv");
    }

    #[test]
    fn query_pairs_use_literal_division() {
        let params = validate(Division::Div2, "a", "365").unwrap();
        assert_eq!(
            params.query_pairs(),
            [
                ("division", "div. 2".to_string()),
                ("index", "A".to_string()),
                ("days", "365".to_string()),
            ]
        );
    }

    #[test]
    fn division_labels_parse_loosely() {
        assert_eq!(Division::from_label("div. 3"), Some(Division::Div3));
        assert_eq!(Division::from_label("Div.1"), Some(Division::Div1));
        assert_eq!(Division::from_label("4"), Some(Division::Div4));
        assert_eq!(Division::from_label("div. 5"), None);
    }
}
