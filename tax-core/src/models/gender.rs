use serde::{Deserialize, Serialize};

/// Gender of the taxpayer. Working mother's child relief and grandparent
/// caregiver relief are only claimable by women.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Self::Female)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_words_and_initials() {
        assert_eq!(Gender::parse("male"), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse(" F "), Some(Gender::Female));
        assert_eq!(Gender::parse("m"), Some(Gender::Male));
        assert_eq!(Gender::parse("other"), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for gender in [Gender::Male, Gender::Female] {
            assert_eq!(Gender::parse(gender.as_str()), Some(gender));
        }
    }
}
