//! Risk classes ("Risikoklassen") used by the interaction source.
//!
//! The German labels end up inside persisted HTML and must not change.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskGrade {
    A,
    B,
    C,
    D,
    X,
    /// Grade "0": no information available.
    Unknown,
}

impl RiskGrade {
    pub const ALL: [RiskGrade; 6] = [
        RiskGrade::A,
        RiskGrade::B,
        RiskGrade::C,
        RiskGrade::D,
        RiskGrade::X,
        RiskGrade::Unknown,
    ];

    /// Exact match on the single-letter code; anything else is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(RiskGrade::A),
            "B" => Some(RiskGrade::B),
            "C" => Some(RiskGrade::C),
            "D" => Some(RiskGrade::D),
            "X" => Some(RiskGrade::X),
            "0" => Some(RiskGrade::Unknown),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            RiskGrade::A => "A",
            RiskGrade::B => "B",
            RiskGrade::C => "C",
            RiskGrade::D => "D",
            RiskGrade::X => "X",
            RiskGrade::Unknown => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskGrade::A => "Keine Massnahmen notwendig",
            RiskGrade::B => "Vorsichtsmassnahmen empfohlen",
            RiskGrade::C => "Regelmässige Überwachung",
            RiskGrade::D => "Kombination vermeiden",
            RiskGrade::X => "Kontraindiziert",
            RiskGrade::Unknown => "Keine Angaben",
        }
    }
}

/// Label for a raw grade code. Unrecognised codes give an empty string;
/// the upstream data does not enforce the enumeration.
pub fn risk_label(code: &str) -> &'static str {
    RiskGrade::from_code(code).map(RiskGrade::label).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_grade_has_its_exact_label() {
        let expected = [
            ("A", "Keine Massnahmen notwendig"),
            ("B", "Vorsichtsmassnahmen empfohlen"),
            ("C", "Regelmässige Überwachung"),
            ("D", "Kombination vermeiden"),
            ("X", "Kontraindiziert"),
            ("0", "Keine Angaben"),
        ];
        for (code, label) in expected {
            assert_eq!(risk_label(code), label, "grade {code}");
        }
    }

    #[test]
    fn codes_round_trip() {
        for grade in RiskGrade::ALL {
            assert_eq!(RiskGrade::from_code(grade.code()), Some(grade));
        }
    }

    #[test]
    fn unknown_codes_give_empty_label() {
        for code in ["", "a", "E", "XX", " B", "1"] {
            assert_eq!(risk_label(code), "", "grade {code:?}");
        }
    }
}
