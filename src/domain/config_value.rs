// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type with type-safe conversions.
//!
//! Values are stored exactly as they appear in the file (after trimming) and only
//! converted when a caller asks for a typed value. The set of types a value can be
//! converted to through [`FromConfigValue`] is closed.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised for text that is not a literal of the requested kind.
#[derive(Debug, Error)]
#[error("{text:?} is not a valid {expected}")]
struct InvalidLiteral {
    text: String,
    expected: &'static str,
}

impl InvalidLiteral {
    fn into_conversion_error(self, key: &str) -> ConfigError {
        ConfigError::TypeConversionError {
            key: key.to_string(),
            target_type: self.expected.to_string(),
            source: Box::new(self),
        }
    }
}

/// Returns `true` if `text` is an optionally signed decimal number with an optional
/// fraction and exponent. Words such as `nan` and `inf` are rejected.
fn is_decimal_literal(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    let mut prev = '\0';
    body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| {
            let allowed = c.is_ascii_digit()
                || matches!(c, '.' | 'e' | 'E')
                || (matches!(c, '+' | '-') && matches!(prev, 'e' | 'E'));
            prev = c;
            allowed
        })
}

/// A raw configuration value.
///
/// # Examples
///
/// ```
/// use blockcfg::domain::ConfigValue;
///
/// let value = ConfigValue::from("42");
/// assert_eq!(value.as_str(), "42");
/// assert_eq!(value.as_i32("test.key").unwrap(), 42);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the value into a `String`.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive):
    /// - `true`: "true", "1"
    /// - `false`: "false", "0"
    ///
    /// Anything else, including "yes" and "on", is a conversion error.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockcfg::domain::ConfigValue;
    ///
    /// assert_eq!(ConfigValue::from("TRUE").as_bool("test.key").unwrap(), true);
    /// assert_eq!(ConfigValue::from("0").as_bool("test.key").unwrap(), false);
    /// assert!(ConfigValue::from("yes").as_bool("test.key").is_err());
    /// ```
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        if self.0.eq_ignore_ascii_case("true") || self.0 == "1" {
            Ok(true)
        } else if self.0.eq_ignore_ascii_case("false") || self.0 == "0" {
            Ok(false)
        } else {
            Err(self.invalid("boolean").into_conversion_error(key))
        }
    }

    /// Converts the value to an `i32`.
    pub fn as_i32(&self, key: &str) -> Result<i32> {
        self.0
            .parse::<i32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `i64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockcfg::domain::ConfigValue;
    ///
    /// let value = ConfigValue::from("10485760");
    /// assert_eq!(value.as_i64("Logging.maxFileSize").unwrap(), 10485760);
    /// ```
    pub fn as_i64(&self, key: &str) -> Result<i64> {
        self.0
            .parse::<i64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u32`.
    pub fn as_u32(&self, key: &str) -> Result<u32> {
        self.0
            .parse::<u32>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to a `u64`.
    pub fn as_u64(&self, key: &str) -> Result<u64> {
        self.0
            .parse::<u64>()
            .map_err(|e| ConfigError::from_parse_int_error(key.to_string(), e))
    }

    /// Converts the value to an `f32`.
    pub fn as_f32(&self, key: &str) -> Result<f32> {
        if !is_decimal_literal(&self.0) {
            return Err(self.invalid("float").into_conversion_error(key));
        }
        self.0
            .parse::<f32>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    /// Converts the value to an `f64`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockcfg::domain::ConfigValue;
    ///
    /// let value = ConfigValue::from("30.5");
    /// assert_eq!(value.as_f64("General.timeout").unwrap(), 30.5);
    /// ```
    pub fn as_f64(&self, key: &str) -> Result<f64> {
        if !is_decimal_literal(&self.0) {
            return Err(self.invalid("float").into_conversion_error(key));
        }
        self.0
            .parse::<f64>()
            .map_err(|e| ConfigError::from_parse_float_error(key.to_string(), e))
    }

    fn invalid(&self, expected: &'static str) -> InvalidLiteral {
        InvalidLiteral {
            text: self.0.clone(),
            expected,
        }
    }

    /// Parses the value into any type that implements `FromStr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockcfg::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("Server.bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        self.0
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for u32 {}
    impl Sealed for u64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
    impl Sealed for bool {}
    impl Sealed for String {}
}

/// The types a stored value can be converted to by the typed accessors.
///
/// The set is closed: integers (`i32`, `i64`, `u32`, `u64`), floating point
/// (`f32`, `f64`), `bool` and `String`. `Default` supplies the value returned when
/// a block or key is missing.
pub trait FromConfigValue: sealed::Sealed + Default + Sized {
    /// Human-readable name of the target type.
    const TYPE_NAME: &'static str;

    /// Converts `value`, naming `key` in any conversion error.
    fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self>;
}

macro_rules! impl_from_config_value {
    ($($ty:ty => $name:literal, $method:ident;)*) => {
        $(
            impl FromConfigValue for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_config_value(value: &ConfigValue, key: &str) -> Result<Self> {
                    value.$method(key)
                }
            }
        )*
    };
}

impl_from_config_value! {
    i32 => "i32", as_i32;
    i64 => "i64", as_i64;
    u32 => "u32", as_u32;
    u64 => "u64", as_u64;
    f32 => "f32", as_f32;
    f64 => "f64", as_f64;
    bool => "bool", as_bool;
}

impl FromConfigValue for String {
    const TYPE_NAME: &'static str = "string";

    fn from_config_value(value: &ConfigValue, _key: &str) -> Result<Self> {
        Ok(value.as_string())
    }
}
