use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};

/// An untyped document parsed from external text and not yet trusted.
/// Objects keep the key order of the source text. Every number is held as `f64`, the only
/// numeric type a price is checked against.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Candidate>),
    Object(IndexMap<String, Candidate>),
}

impl Candidate {
    pub fn as_object(&self) -> Option<&IndexMap<String, Candidate>> {
        match self {
            Candidate::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Candidate::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Candidate::Null)
    }

    pub fn get(&self, key: &str) -> Option<&Candidate> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Candidate::Null => "null",
            Candidate::Bool(_) => "bool",
            Candidate::Number(_) => "number",
            Candidate::String(_) => "string",
            Candidate::Array(_) => "array",
            Candidate::Object(_) => "object",
        }
    }
}

impl<'de> Deserialize<'de> for Candidate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CandidateVisitor;

        impl<'de> de::Visitor<'de> for CandidateVisitor {
            type Value = Candidate;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Candidate::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(Candidate::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(Candidate::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(Candidate::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(Candidate::Number(v as f64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(Candidate::Number(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Candidate::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(Candidate::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<Candidate>()? {
                    values.push(value);
                }
                Ok(Candidate::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, Candidate>()? {
                    values.insert(key, value);
                }
                Ok(Candidate::Object(values))
            }
        }

        deserializer.deserialize_any(CandidateVisitor)
    }
}
