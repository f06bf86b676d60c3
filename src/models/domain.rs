use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Desired attribute values keyed by attribute name
pub type Criteria = BTreeMap<String, AttributeValue>;

/// Per-attribute importance weights
pub type WeightMap = BTreeMap<String, f64>;

/// Well-known attribute names read by the prefilters and service scoring
pub mod attr {
    pub const ADOPTABLE: &str = "adoptable";
    pub const RESERVED: &str = "reserved";
    pub const TRAINING_STATUS: &str = "trainingStatus";
    pub const SERVICE_TYPE: &str = "serviceType";
    pub const TRAINING_SPECIALIZATION: &str = "trainingSpecialization";
    pub const OBEDIENCE_LEVEL: &str = "obedienceLevel";
    pub const SPECIALIZATIONS: &str = "specializations";
    pub const TEMPERAMENT: &str = "temperament";
    pub const GROUND_MANNERS: &str = "groundManners";
    pub const ARENA_BEHAVIOR: &str = "arenaBehavior";
    pub const RIDING_SAFE: &str = "ridingSafe";
    pub const MAX_RIDER_WEIGHT: &str = "maxRiderWeight";
}

/// A single attribute value, either on a candidate or in a set of criteria
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    #[serde(serialize_with = "serialize_number")]
    Number(f64),
    Text(String),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Convert a raw JSON value. `null` and nested objects have no attribute
    /// shape and are treated as absent.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n.as_f64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(items) => Some(Self::List(
                items.iter().filter_map(Self::from_json).collect(),
            )),
            Value::Null | Value::Object(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<&str>> for AttributeValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(Self::from).collect())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values.into_iter().map(Self::Text).collect())
    }
}

impl From<Vec<AttributeValue>> for AttributeValue {
    fn from(values: Vec<AttributeValue>) -> Self {
        Self::List(values)
    }
}

/// Animal subtype, used to select a candidate pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum AnimalType {
    Dog,
    Monkey,
    Bird,
    Horse,
}

impl AnimalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dog => "Dog",
            Self::Monkey => "Monkey",
            Self::Bird => "Bird",
            Self::Horse => "Horse",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalType {
    type Err = UnknownToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "dog" => Ok(Self::Dog),
            "monkey" => Ok(Self::Monkey),
            "bird" => Ok(Self::Bird),
            "horse" => Ok(Self::Horse),
            _ => Err(UnknownToken::AnimalType(token.to_string())),
        }
    }
}

impl TryFrom<String> for AnimalType {
    type Error = UnknownToken;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Kind of assignment a service match is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ServiceType {
    #[serde(rename = "SERVICE")]
    Service,
    #[serde(rename = "THERAPY")]
    Therapy,
    #[serde(rename = "SEARCH")]
    Search,
    #[serde(rename = "EQUINE_THERAPY")]
    EquineTherapy,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::Therapy => "THERAPY",
            Self::Search => "SEARCH",
            Self::EquineTherapy => "EQUINE_THERAPY",
        }
    }

    /// Candidate pool this service type draws from
    pub fn pool(&self) -> AnimalType {
        match self {
            Self::Service | Self::Therapy | Self::Search => AnimalType::Dog,
            Self::EquineTherapy => AnimalType::Horse,
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = UnknownToken;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_uppercase().as_str() {
            "SERVICE" => Ok(Self::Service),
            "THERAPY" => Ok(Self::Therapy),
            "SEARCH" => Ok(Self::Search),
            "EQUINE_THERAPY" => Ok(Self::EquineTherapy),
            _ => Err(UnknownToken::ServiceType(token.to_string())),
        }
    }
}

impl TryFrom<String> for ServiceType {
    type Error = UnknownToken;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Raised when a textual enum token is not recognized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownToken {
    #[error("invalid animal type: {0}")]
    AnimalType(String),
    #[error("unsupported service type: {0}")]
    ServiceType(String),
}

/// Errors raised while reading a candidate out of a store document
#[derive(Debug, Error)]
pub enum CandidateParseError {
    #[error("document is not a JSON object")]
    NotAnObject,
    #[error("document has no string id")]
    MissingId,
    #[error("document has no animalType")]
    MissingAnimalType,
    #[error(transparent)]
    UnknownType(#[from] UnknownToken),
}

/// A rescue animal under evaluation
///
/// Identity and subtype are fixed; everything else lives in an open-ended
/// attribute map so the engines never need per-subtype field access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Candidate {
    pub id: String,
    #[serde(rename = "animalType")]
    pub animal_type: AnimalType,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, animal_type: AnimalType) -> Self {
        Self {
            id: id.into(),
            animal_type,
            attributes: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.attribute(name).and_then(AttributeValue::as_number)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.attribute(name).and_then(AttributeValue::as_bool)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.attribute(name).and_then(AttributeValue::as_text)
    }

    pub fn list(&self, name: &str) -> Option<&[AttributeValue]> {
        self.attribute(name).and_then(AttributeValue::as_list)
    }

    /// Build a candidate from a store document
    pub fn from_document(doc: &Map<String, Value>) -> Result<Self, CandidateParseError> {
        let id = ["id", "$id", "_id"]
            .iter()
            .find_map(|key| doc.get(*key).and_then(Value::as_str))
            .ok_or(CandidateParseError::MissingId)?;

        let animal_type: AnimalType = doc
            .get("animalType")
            .and_then(Value::as_str)
            .ok_or(CandidateParseError::MissingAnimalType)?
            .parse()?;

        let attributes = doc
            .iter()
            .filter(|(key, _)| !is_reserved_key(key))
            .filter_map(|(key, value)| {
                AttributeValue::from_json(value).map(|v| (key.clone(), v))
            })
            .collect();

        Ok(Self {
            id: id.to_string(),
            animal_type,
            attributes,
        })
    }
}

fn is_reserved_key(key: &str) -> bool {
    matches!(key, "id" | "_id" | "animalType") || key.starts_with('$')
}

impl TryFrom<Value> for Candidate {
    type Error = CandidateParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(doc) => Self::from_document(&doc),
            _ => Err(CandidateParseError::NotAnObject),
        }
    }
}

/// Equality filter handed to the entity store
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalFilter {
    pub animal_type: AnimalType,
    pub equals: Criteria,
}

impl AnimalFilter {
    pub fn new(animal_type: AnimalType) -> Self {
        Self {
            animal_type,
            equals: Criteria::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<AttributeValue>) -> Self {
        self.equals.insert(name.to_string(), value.into());
        self
    }

    /// A candidate matches when it has the right subtype and every condition
    /// is present with an equal value
    pub fn matches(&self, candidate: &Candidate) -> bool {
        candidate.animal_type == self.animal_type
            && self
                .equals
                .iter()
                .all(|(name, want)| candidate.attribute(name) == Some(want))
    }
}

/// Client-specific needs attached to a service match request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientNeeds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specializations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rider_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobility_issues: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environmental_factors: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Scored match result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub animal: Candidate,
    #[serde(rename = "matchScore", serialize_with = "serialize_number")]
    pub match_score: f64,
}

/// Integral numbers are written as JSON integers, so `temperament: 4` and a
/// score of 95 read back as `4` and `95` rather than `4.0` and `95.0`
fn serialize_number<S: Serializer>(number: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    if number.fract() == 0.0 && number.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*number as i64)
    } else {
        serializer.serialize_f64(*number)
    }
}
