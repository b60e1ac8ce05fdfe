use serde::{Deserialize, Serialize};

/// One entry of the guest roster. The name is the matching key: exact and
/// case-sensitive at reconciliation time, case-insensitive substring for
/// autocomplete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub name: String,
    /// How many seats the invitation covers. `None` means unbounded.
    pub max_guests: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attending {
    Yes,
    No,
}

impl Attending {
    /// The value written to the reservation-status column of the sheet.
    pub fn as_sheet_value(self) -> &'static str {
        match self {
            Attending::Yes => "Yes",
            Attending::No => "No",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attending_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Attending::Yes).expect("json"), "\"yes\"");
        assert_eq!(serde_json::to_string(&Attending::No).expect("json"), "\"no\"");
    }

    #[test]
    fn attending_sheet_values_are_capitalized() {
        assert_eq!(Attending::Yes.as_sheet_value(), "Yes");
        assert_eq!(Attending::No.as_sheet_value(), "No");
    }
}
