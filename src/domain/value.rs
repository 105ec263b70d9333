// SPDX-License-Identifier: MIT

//! Configuration value type.
//!
//! This module provides the `ConfigValue` enum, the tagged value stored inside
//! a [`ConfigMap`](crate::domain::ConfigMap), together with [`ValueKind`], the
//! runtime type tag used by validation rules, and [`Instance`], the carrier
//! for arbitrary application objects placed into a configuration.

use crate::domain::key::ConfigKey;
use crate::domain::map::ConfigMap;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A configuration value: a scalar, a sequence, a nested map, or an
/// application object.
///
/// Values compare by structural equality, except [`Instance`] values which
/// compare by identity. Validation rules compare value kinds exactly, with no
/// numeric coercion: `Int(10)` and `Float(10.0)` are different kinds.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::{ConfigValue, ValueKind};
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.kind(), ValueKind::Int);
/// assert_eq!(value.as_i64(), Some(42));
/// assert_eq!(value.as_f64(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigValue {
    /// An explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating-point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence of values.
    Seq(Vec<ConfigValue>),
    /// A nested configuration map.
    Map(ConfigMap),
    /// An arbitrary application object, checked by `TypeId`.
    Instance(Instance),
}

/// The runtime type tag of a [`ConfigValue`].
///
/// Used by validation rules for exact-kind comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Tag for [`ConfigValue::Null`].
    Null,
    /// Tag for [`ConfigValue::Bool`].
    Bool,
    /// Tag for [`ConfigValue::Int`].
    Int,
    /// Tag for [`ConfigValue::Float`].
    Float,
    /// Tag for [`ConfigValue::Str`].
    Str,
    /// Tag for [`ConfigValue::Seq`].
    Seq,
    /// Tag for [`ConfigValue::Map`].
    Map,
    /// Tag for [`ConfigValue::Instance`].
    Instance,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::Seq => "sequence",
            ValueKind::Map => "map",
            ValueKind::Instance => "instance",
        };
        write!(f, "{name}")
    }
}

/// An application object stored inside a configuration.
///
/// The object is reference-counted and shared; cloning an `Instance` clones
/// the handle, not the object. Equality is handle identity. The concrete type
/// is captured at construction for `TypeId`-based validation and for error
/// messages.
///
/// # Examples
///
/// ```
/// use dotcfg::domain::Instance;
///
/// struct Endpoint { url: String }
///
/// let instance = Instance::new(Endpoint { url: "http://localhost".into() });
/// assert!(instance.is::<Endpoint>());
/// assert_eq!(instance.downcast_ref::<Endpoint>().unwrap().url, "http://localhost");
/// ```
#[derive(Clone)]
pub struct Instance {
    value: Arc<dyn Any + Send + Sync>,
    type_id: TypeId,
    type_name: &'static str,
}

impl Instance {
    /// Wraps an application object.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Instance {
            value: Arc::new(value),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns `true` if the wrapped object is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the wrapped object as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// The `TypeId` captured at construction.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type name captured at construction, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}

impl ConfigValue {
    /// Wraps an application object as a configuration value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotcfg::domain::{ConfigValue, ValueKind};
    ///
    /// struct Endpoint;
    /// let value = ConfigValue::instance(Endpoint);
    /// assert_eq!(value.kind(), ValueKind::Instance);
    /// ```
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        ConfigValue::Instance(Instance::new(value))
    }

    /// Returns the runtime type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            ConfigValue::Null => ValueKind::Null,
            ConfigValue::Bool(_) => ValueKind::Bool,
            ConfigValue::Int(_) => ValueKind::Int,
            ConfigValue::Float(_) => ValueKind::Float,
            ConfigValue::Str(_) => ValueKind::Str,
            ConfigValue::Seq(_) => ValueKind::Seq,
            ConfigValue::Map(_) => ValueKind::Map,
            ConfigValue::Instance(_) => ValueKind::Instance,
        }
    }

    /// The type name used in validation error messages: the kind name, or the
    /// concrete type name for instance values.
    pub fn type_name(&self) -> String {
        match self {
            ConfigValue::Instance(instance) => instance.type_name().to_string(),
            other => other.kind().to_string(),
        }
    }

    /// Returns `true` for [`ConfigValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// The boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer value, if this is an integer. Floats are not coerced.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The float value, if this is a float. Integers are not coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The string value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The sequence elements, if this is a sequence.
    pub fn as_seq(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// The nested map, if this is a map.
    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The nested map, mutably, if this is a map.
    pub fn as_map_mut(&mut self) -> Option<&mut ConfigMap> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The instance handle, if this is an instance value.
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            ConfigValue::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Borrows the wrapped application object as a `T`, if this is an
    /// instance value of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_instance().and_then(Instance::downcast_ref)
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Int(n)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Int(i64::from(n))
    }
}

impl From<u32> for ConfigValue {
    fn from(n: u32) -> Self {
        ConfigValue::Int(i64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(x: f64) -> Self {
        ConfigValue::Float(x)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Str(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Str(s)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        ConfigValue::Map(map)
    }
}

impl From<Instance> for ConfigValue {
    fn from(instance: Instance) -> Self {
        ConfigValue::Instance(instance)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Int(n) => serializer.serialize_i64(*n),
            ConfigValue::Float(x) => serializer.serialize_f64(*x),
            ConfigValue::Str(s) => serializer.serialize_str(s),
            ConfigValue::Seq(items) => items.serialize(serializer),
            ConfigValue::Map(map) => map.serialize(serializer),
            ConfigValue::Instance(instance) => Err(ser::Error::custom(format!(
                "instance value [{}] cannot be serialized",
                instance.type_name()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = ConfigValue;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a configuration value")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(ConfigValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ConfigValue::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                match i64::try_from(v) {
                    Ok(n) => Ok(ConfigValue::Int(n)),
                    Err(_) => Ok(ConfigValue::Float(v as f64)),
                }
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(ConfigValue::Float(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ConfigValue::Str(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ConfigValue::Str(v))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ConfigValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(ConfigValue::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
                ConfigValue::deserialize(d)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<ConfigValue>()? {
                    items.push(item);
                }
                Ok(ConfigValue::Seq(items))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = ConfigMap::new();
                while let Some((key, value)) = access.next_entry::<ConfigKey, ConfigValue>()? {
                    map.insert(key, value);
                }
                Ok(ConfigValue::Map(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
