//! Assessment catalog types
//!
//! Defines the catalog record and the capability-category alphabet.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry.
///
/// Records are produced by the ingestion feed and never mutated after the
/// catalog is loaded. `url` is the stable identity of the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Product name
    pub name: String,

    /// Product page URL (unique across the catalog)
    pub url: String,

    /// Free-text description, may be empty
    #[serde(default)]
    pub description: String,

    /// Duration in minutes; `None` when unknown or unparseable
    #[serde(default, deserialize_with = "lenient_duration")]
    pub duration_minutes: Option<u32>,

    /// Whether the assessment can be taken remotely
    #[serde(default, deserialize_with = "lenient_flag")]
    pub remote_testing: bool,

    /// Whether the assessment is adaptive (IRT based)
    #[serde(default, deserialize_with = "lenient_flag")]
    pub adaptive_irt: bool,

    /// Capability categories measured by the assessment
    #[serde(default)]
    pub test_types: BTreeSet<TestType>,
}

impl AssessmentRecord {
    /// Create a record with only the required fields set
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            description: String::new(),
            duration_minutes: None,
            remote_testing: false,
            adaptive_irt: false,
            test_types: BTreeSet::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the duration in minutes
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Set the remote testing flag
    pub fn with_remote(mut self, remote: bool) -> Self {
        self.remote_testing = remote;
        self
    }

    /// Set the adaptive/IRT flag
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive_irt = adaptive;
        self
    }

    /// Add capability categories
    pub fn with_test_types(mut self, types: impl IntoIterator<Item = TestType>) -> Self {
        self.test_types.extend(types);
        self
    }

    /// Text fed to the embedding provider at ingestion time
    pub fn embedding_text(&self) -> String {
        format!("{}\n\n{}", self.name, self.description)
    }
}

/// Capability category of an assessment, identified by a single uppercase letter.
///
/// Equality, hashing, and ordering all go through [`TestType::code`], so
/// `Other('C')` and `Competencies` are the same category.
#[derive(Debug, Clone, Copy)]
pub enum TestType {
    /// A
    AbilityAptitude,
    /// B
    BiodataSituational,
    /// C
    Competencies,
    /// D
    Development,
    /// E
    Exercises,
    /// K
    KnowledgeSkills,
    /// P
    Personality,
    /// S
    Simulations,
    /// Any other uppercase letter; kept so unknown codes survive a round trip
    Other(char),
}

/// Label used for codes outside the known alphabet
pub const UNKNOWN_LABEL: &str = "Unknown";

impl TestType {
    /// All known categories in code order
    pub const KNOWN: [TestType; 8] = [
        TestType::AbilityAptitude,
        TestType::BiodataSituational,
        TestType::Competencies,
        TestType::Development,
        TestType::Exercises,
        TestType::KnowledgeSkills,
        TestType::Personality,
        TestType::Simulations,
    ];

    /// Parse a code; only single ASCII uppercase letters are valid
    pub fn from_code(code: char) -> Option<Self> {
        if !code.is_ascii_uppercase() {
            return None;
        }
        Some(match code {
            'A' => TestType::AbilityAptitude,
            'B' => TestType::BiodataSituational,
            'C' => TestType::Competencies,
            'D' => TestType::Development,
            'E' => TestType::Exercises,
            'K' => TestType::KnowledgeSkills,
            'P' => TestType::Personality,
            'S' => TestType::Simulations,
            other => TestType::Other(other),
        })
    }

    /// The single-letter code
    pub fn code(&self) -> char {
        match self {
            TestType::AbilityAptitude => 'A',
            TestType::BiodataSituational => 'B',
            TestType::Competencies => 'C',
            TestType::Development => 'D',
            TestType::Exercises => 'E',
            TestType::KnowledgeSkills => 'K',
            TestType::Personality => 'P',
            TestType::Simulations => 'S',
            TestType::Other(c) => *c,
        }
    }

    /// Resolve an `Other` holding a known letter to its named category
    pub fn canonical(self) -> Self {
        match self {
            TestType::Other(c) => TestType::from_code(c).unwrap_or(self),
            known => known,
        }
    }

    /// Human-readable label; unrecognized codes map to "Unknown"
    pub fn label(&self) -> &'static str {
        match self.canonical() {
            TestType::AbilityAptitude => "Ability & Aptitude",
            TestType::BiodataSituational => "Biodata & Situational Judgement",
            TestType::Competencies => "Competencies",
            TestType::Development => "Development & 360",
            TestType::Exercises => "Assessment Exercises",
            TestType::KnowledgeSkills => "Knowledge & Skills",
            TestType::Personality => "Personality & Behavior",
            TestType::Simulations => "Simulations",
            TestType::Other(_) => UNKNOWN_LABEL,
        }
    }

    /// Whether the code belongs to the known alphabet
    pub fn is_known(&self) -> bool {
        !matches!(self.canonical(), TestType::Other(_))
    }
}

impl PartialEq for TestType {
    fn eq(&self, other: &Self) -> bool {
        self.code() == other.code()
    }
}

impl Eq for TestType {}

impl Hash for TestType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code().hash(state);
    }
}

impl Ord for TestType {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(&other.code())
    }
}

impl PartialOrd for TestType {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for TestType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code().to_string())
    }
}

impl<'de> Deserialize<'de> for TestType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let trimmed = raw.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => TestType::from_code(c).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid test type code '{}'", raw))
            }),
            _ => Err(serde::de::Error::custom(format!(
                "test type code must be a single letter, got '{}'",
                raw
            ))),
        }
    }
}

// ============================================================================
// Lenient field parsing for the scraped feed
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Int(u64),
    Float(f64),
    Text(String),
}

/// Accepts integers, numeric strings, "", or null; anything else becomes `None`.
fn lenient_duration<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Int(n)) => u32::try_from(n).ok(),
        Some(RawScalar::Float(f)) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 => {
            u32::try_from(f as u64).ok()
        }
        Some(RawScalar::Text(s)) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

/// Accepts booleans or "Yes"/"No" strings; anything else becomes `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawScalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawScalar::Bool(b)) => b,
        Some(RawScalar::Text(s)) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true"
        ),
        _ => false,
    })
}
