//! ABI fragments.
//!
//! A fragment is one element of a compiled module's JSON ABI. The typed view
//! exposes what merging needs (kind, name, parameter types); the original
//! JSON object is kept alongside and is what gets serialized, so every field
//! the compiler emitted survives the merge untouched.

use crate::error::FragmentError;
use crate::signature::{SignatureKey, canonical_key};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// The kinds of ABI element the kernel knows by name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FragmentKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
}

impl FragmentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Event => "event",
            Self::Error => "error",
            Self::Constructor => "constructor",
            Self::Fallback => "fallback",
            Self::Receive => "receive",
        }
    }

    pub fn from_abi_type(value: &str) -> Option<Self> {
        match value {
            "function" => Some(Self::Function),
            "event" => Some(Self::Event),
            "error" => Some(Self::Error),
            "constructor" => Some(Self::Constructor),
            "fallback" => Some(Self::Fallback),
            "receive" => Some(Self::Receive),
            _ => None,
        }
    }

    /// Whether fragments of this kind must carry a name.
    pub fn is_named(self) -> bool {
        matches!(self, Self::Function | Self::Event | Self::Error)
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parameter of a fragment's `inputs` (or `outputs`, or tuple
/// `components`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Option<String>,
    /// ABI encoding type (`uint256`, `tuple[]`, ...).
    pub abi_type: Option<String>,
    /// Compiler-resolved type (`struct Lib.Order`, `enum Side`, ...).
    pub internal_type: Option<String>,
    pub indexed: bool,
    pub components: Vec<Param>,
}

impl Param {
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "parameter is not a JSON object".to_string())?;
        let abi_type = string_field(object, "type");
        let internal_type = string_field(object, "internalType");
        if abi_type.is_none() && internal_type.is_none() {
            return Err("parameter has neither `internalType` nor `type`".to_string());
        }

        let components = match object.get("components") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    Param::from_value(item).map_err(|e| format!("component {i}: {e}"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err("`components` is not an array".to_string()),
        };

        Ok(Self {
            name: string_field(object, "name").filter(|name| !name.is_empty()),
            abi_type,
            internal_type,
            indexed: object
                .get("indexed")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            components,
        })
    }

    /// The canonical type tag used for signature identity.
    ///
    /// `internalType` when the compiler emitted one, otherwise `type`.
    pub fn type_tag(&self) -> &str {
        self.internal_type
            .as_deref()
            .or(self.abi_type.as_deref())
            .unwrap_or_default()
    }

    /// The ABI type, falling back to the internal type.
    pub fn display_type(&self) -> &str {
        self.abi_type
            .as_deref()
            .or(self.internal_type.as_deref())
            .unwrap_or_default()
    }
}

/// A fragment that is identified by name: `function`, `event`, `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedFragment {
    pub name: String,
    pub inputs: Vec<Param>,
    raw: Map<String, Value>,
}

/// A fragment without a name: `constructor`, `fallback`, `receive`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnnamedFragment {
    pub inputs: Vec<Param>,
    raw: Map<String, Value>,
}

/// One ABI element, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Function(NamedFragment),
    Event(NamedFragment),
    Error(NamedFragment),
    Constructor(UnnamedFragment),
    Fallback(UnnamedFragment),
    Receive(UnnamedFragment),
    /// A `type` the kernel does not recognize. Passed through as-is.
    Other {
        kind: String,
        raw: Map<String, Value>,
    },
}

impl Fragment {
    /// Read a fragment from one JSON ABI element.
    pub fn from_value(value: &Value) -> Result<Self, FragmentError> {
        let object = value.as_object().ok_or(FragmentError::NotAnObject)?;
        let kind_str = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(FragmentError::MissingType)?;

        let Some(kind) = FragmentKind::from_abi_type(kind_str) else {
            return Ok(Self::Other {
                kind: kind_str.to_string(),
                raw: object.clone(),
            });
        };

        let inputs = read_inputs(object, kind)?;
        let raw = object.clone();

        if kind.is_named() {
            let name = object
                .get("name")
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| FragmentError::MissingName {
                    kind: kind.to_string(),
                })?
                .to_string();
            let named = NamedFragment { name, inputs, raw };
            return Ok(match kind {
                FragmentKind::Event => Self::Event(named),
                FragmentKind::Error => Self::Error(named),
                _ => Self::Function(named),
            });
        }

        let unnamed = UnnamedFragment { inputs, raw };
        Ok(match kind {
            FragmentKind::Fallback => Self::Fallback(unnamed),
            FragmentKind::Receive => Self::Receive(unnamed),
            _ => Self::Constructor(unnamed),
        })
    }

    /// The known kind, or `None` for [`Fragment::Other`].
    pub fn kind(&self) -> Option<FragmentKind> {
        match self {
            Self::Function(_) => Some(FragmentKind::Function),
            Self::Event(_) => Some(FragmentKind::Event),
            Self::Error(_) => Some(FragmentKind::Error),
            Self::Constructor(_) => Some(FragmentKind::Constructor),
            Self::Fallback(_) => Some(FragmentKind::Fallback),
            Self::Receive(_) => Some(FragmentKind::Receive),
            Self::Other { .. } => None,
        }
    }

    /// The ABI `type` string.
    pub fn kind_str(&self) -> &str {
        match self {
            Self::Other { kind, .. } => kind,
            _ => self.kind().map(FragmentKind::as_str).unwrap_or_default(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Function(f) | Self::Event(f) | Self::Error(f) => Some(&f.name),
            _ => None,
        }
    }

    pub fn inputs(&self) -> &[Param] {
        match self {
            Self::Function(f) | Self::Event(f) | Self::Error(f) => &f.inputs,
            Self::Constructor(f) | Self::Fallback(f) | Self::Receive(f) => &f.inputs,
            Self::Other { .. } => &[],
        }
    }

    /// The original JSON object.
    pub fn raw(&self) -> &Map<String, Value> {
        match self {
            Self::Function(f) | Self::Event(f) | Self::Error(f) => &f.raw,
            Self::Constructor(f) | Self::Fallback(f) | Self::Receive(f) => &f.raw,
            Self::Other { raw, .. } => raw,
        }
    }

    /// A string-valued pass-through field, e.g. `stateMutability`.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.raw().get(key).and_then(Value::as_str)
    }

    /// The canonical signature key, for kinds that have one.
    pub fn signature_key(&self) -> Option<SignatureKey> {
        let kind = self.kind()?;
        Some(canonical_key(kind, self.name(), self.inputs()))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.raw().clone())
    }
}

impl Serialize for Fragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.raw().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Fragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Fragment::from_value(&value).map_err(serde::de::Error::custom)
    }
}

fn read_inputs(object: &Map<String, Value>, kind: FragmentKind) -> Result<Vec<Param>, FragmentError> {
    match object.get("inputs") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                Param::from_value(item)
                    .map_err(|reason| FragmentError::InvalidParam { position, reason })
            })
            .collect(),
        Some(_) => Err(FragmentError::InputsNotArray {
            kind: kind.to_string(),
        }),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}
