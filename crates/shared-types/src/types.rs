use std::collections::BTreeMap;
use std::fmt;

/// Clause identifier such as `MD.018.081`
///
/// Two uppercase ASCII letters, a period, three digits, a period, three digits.
/// Codes compare by exact string equality and sort lexically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(transparent)]
pub struct ClauseCode(String);

impl ClauseCode {
    /// Length of every well-formed code
    pub const LEN: usize = 10;

    /// Validate a whole string as a clause code
    pub fn parse(s: &str) -> Option<Self> {
        if Self::is_valid(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    fn is_valid(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == Self::LEN
            && b[..2].iter().all(u8::is_ascii_uppercase)
            && b[2] == b'.'
            && b[3..6].iter().all(u8::is_ascii_digit)
            && b[6] == b'.'
            && b[7..].iter().all(u8::is_ascii_digit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClauseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ClauseCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ClauseCode::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid clause code: {}", s)))
    }
}

/// Text attributed to one clause code within one document
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClauseRecord {
    pub code: ClauseCode,
    pub text: String,
}

impl ClauseRecord {
    pub fn new(code: ClauseCode, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }

    /// Space-join a later fragment onto the clause text
    pub fn append(&mut self, fragment: &str) {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(fragment);
    }
}

/// All clauses of one document, keyed by code
///
/// Iteration is lexical by code so reports built from it are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ClauseMap {
    records: BTreeMap<ClauseCode, ClauseRecord>,
}

impl ClauseMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new record or append to the existing one for `code`
    pub fn accumulate(&mut self, code: ClauseCode, fragment: &str) {
        match self.records.get_mut(&code) {
            Some(record) => record.append(fragment),
            None => {
                let record = ClauseRecord::new(code.clone(), fragment.trim());
                self.records.insert(code, record);
            }
        }
    }

    pub fn get(&self, code: &ClauseCode) -> Option<&ClauseRecord> {
        self.records.get(code)
    }

    pub fn text(&self, code: &ClauseCode) -> Option<&str> {
        self.records.get(code).map(|r| r.text.as_str())
    }

    pub fn contains(&self, code: &ClauseCode) -> bool {
        self.records.contains_key(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &ClauseCode> {
        self.records.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<(ClauseCode, String)> for ClauseMap {
    fn from_iter<I: IntoIterator<Item = (ClauseCode, String)>>(iter: I) -> Self {
        let mut map = ClauseMap::new();
        for (code, text) in iter {
            map.accumulate(code, &text);
        }
        map
    }
}

/// A digit run found in clause text, with the text around it
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NumericToken {
    /// Verbatim digits; never parsed so leading zeros survive
    pub value: String,
    pub context_before: String,
    pub context_after: String,
}

impl NumericToken {
    pub fn new(
        value: impl Into<String>,
        context_before: impl Into<String>,
        context_after: impl Into<String>,
    ) -> Self {
        Self {
            value: value.into(),
            context_before: context_before.into(),
            context_after: context_after.into(),
        }
    }

    /// Empty slot used to pad the shorter side of a numeric alignment
    pub fn placeholder() -> Self {
        Self::default()
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for NumericToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            return f.write_str("-");
        }
        write!(
            f,
            "{} [{}] {}",
            self.context_before, self.value, self.context_after
        )
    }
}

/// Which documents carry a given clause code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    BothPresent,
    LeftOnly,
    RightOnly,
}

impl Presence {
    pub fn classify(in_left: bool, in_right: bool) -> Option<Self> {
        match (in_left, in_right) {
            (true, true) => Some(Presence::BothPresent),
            (true, false) => Some(Presence::LeftOnly),
            (false, true) => Some(Presence::RightOnly),
            (false, false) => None,
        }
    }

    /// Label used by the export layer
    pub fn label(&self) -> &'static str {
        match self {
            Presence::BothPresent => "Ambos",
            Presence::LeftOnly => "Solo Modelo",
            Presence::RightOnly => "Solo Verificación",
        }
    }
}
