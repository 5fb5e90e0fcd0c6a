//! Lossless scalar coercion.
//!
//! A coercion succeeds only when the converted value represents exactly the
//! same quantity: integers within the target range, integral floats to
//! integers, integers to floats that hold them exactly, `f64` to `f32`
//! without rounding, and one-character strings to `char`.

use alloc::string::String;

use crate::info::ScalarKind;
use crate::object::Value;

const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
const U128_BOUND: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

#[derive(Clone, Copy)]
enum Number {
    Int(i128),
    UInt(u128),
    Float(f64),
}

impl Number {
    fn of(value: &Value) -> Option<Self> {
        let number = match *value {
            Value::I8(v) => Self::Int(v.into()),
            Value::I16(v) => Self::Int(v.into()),
            Value::I32(v) => Self::Int(v.into()),
            Value::I64(v) => Self::Int(v.into()),
            Value::I128(v) => Self::Int(v),
            Value::U8(v) => Self::UInt(v.into()),
            Value::U16(v) => Self::UInt(v.into()),
            Value::U32(v) => Self::UInt(v.into()),
            Value::U64(v) => Self::UInt(v.into()),
            Value::U128(v) => Self::UInt(v),
            Value::F32(v) => Self::Float(v.into()),
            Value::F64(v) => Self::Float(v),
            _ => return None,
        };
        Some(number)
    }

    fn to_i128(self) -> Option<i128> {
        match self {
            Self::Int(v) => Some(v),
            Self::UInt(v) => i128::try_from(v).ok(),
            Self::Float(f) => {
                (f.is_finite() && f.fract() == 0.0 && f.abs() < I128_BOUND).then_some(f as i128)
            }
        }
    }

    fn to_u128(self) -> Option<u128> {
        match self {
            Self::Int(v) => u128::try_from(v).ok(),
            Self::UInt(v) => Some(v),
            Self::Float(f) => {
                (f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f < U128_BOUND)
                    .then_some(f as u128)
            }
        }
    }

    fn to_f64(self) -> Option<f64> {
        match self {
            Self::Int(v) => {
                let f = v as f64;
                (f.abs() < I128_BOUND && f as i128 == v).then_some(f)
            }
            Self::UInt(v) => {
                let f = v as f64;
                (f < U128_BOUND && f as u128 == v).then_some(f)
            }
            Self::Float(f) => Some(f),
        }
    }

    fn to_f32(self) -> Option<f32> {
        match self {
            Self::Float(f) => {
                let narrowed = f as f32;
                (f64::from(narrowed) == f || f.is_nan()).then_some(narrowed)
            }
            exact => {
                let wide = exact.to_f64()?;
                let narrowed = wide as f32;
                let back = Self::Float(narrowed.into());
                match exact {
                    Self::Int(v) => (back.to_i128() == Some(v)).then_some(narrowed),
                    Self::UInt(v) => (back.to_u128() == Some(v)).then_some(narrowed),
                    Self::Float(_) => None,
                }
            }
        }
    }
}

macro_rules! narrow {
    ($number:expr, $via:ident, $ty:ty, $variant:ident) => {
        $number
            .and_then(Number::$via)
            .and_then(|v| <$ty>::try_from(v).ok())
            .map(Value::$variant)
    };
}

impl Value {
    /// Converts the value to `kind` without losing information.
    ///
    /// Returns `None` when the value cannot be represented exactly. `isize`
    /// and `usize` have no variant of their own and travel as `I64` and
    /// `U64`; coercing to them checks the platform range.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_dynamic::{info::ScalarKind, object::Value};
    ///
    /// assert_eq!(Value::F64(4.0).coerce(ScalarKind::I8), Some(Value::I8(4)));
    /// assert_eq!(Value::F64(4.5).coerce(ScalarKind::I8), None);
    /// assert_eq!(Value::from("x").coerce(ScalarKind::Char), Some(Value::Char('x')));
    /// assert_eq!(Value::from("xy").coerce(ScalarKind::Char), None);
    /// assert_eq!(Value::F64(0.1).coerce(ScalarKind::F32), None);
    /// assert_eq!(Value::Null.coerce(ScalarKind::Unit), Some(Value::Null));
    /// ```
    pub fn coerce(&self, kind: ScalarKind) -> Option<Value> {
        let number = Number::of(self);
        match kind {
            ScalarKind::Unit => self.is_null().then_some(Value::Null),
            ScalarKind::Bool => match self {
                Self::Bool(v) => Some(Self::Bool(*v)),
                _ => None,
            },
            ScalarKind::Char => match self {
                Self::Char(c) => Some(Self::Char(*c)),
                Self::String(text) => {
                    let mut chars = text.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Some(Self::Char(c)),
                        _ => None,
                    }
                }
                _ => None,
            },
            ScalarKind::String => match self {
                Self::String(text) => Some(Self::String(text.clone())),
                Self::Char(c) => Some(Self::String(String::from(*c))),
                _ => None,
            },
            ScalarKind::I8 => narrow!(number, to_i128, i8, I8),
            ScalarKind::I16 => narrow!(number, to_i128, i16, I16),
            ScalarKind::I32 => narrow!(number, to_i128, i32, I32),
            ScalarKind::I64 => narrow!(number, to_i128, i64, I64),
            ScalarKind::I128 => number.and_then(Number::to_i128).map(Self::I128),
            ScalarKind::Isize => number
                .and_then(Number::to_i128)
                .and_then(|v| isize::try_from(v).ok())
                .map(|v| Self::I64(v as i64)),
            ScalarKind::U8 => narrow!(number, to_u128, u8, U8),
            ScalarKind::U16 => narrow!(number, to_u128, u16, U16),
            ScalarKind::U32 => narrow!(number, to_u128, u32, U32),
            ScalarKind::U64 => narrow!(number, to_u128, u64, U64),
            ScalarKind::U128 => number.and_then(Number::to_u128).map(Self::U128),
            ScalarKind::Usize => number
                .and_then(Number::to_u128)
                .and_then(|v| usize::try_from(v).ok())
                .map(|v| Self::U64(v as u64)),
            ScalarKind::F32 => number.and_then(Number::to_f32).map(Self::F32),
            ScalarKind::F64 => number.and_then(Number::to_f64).map(Self::F64),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::info::ScalarKind;
    use crate::object::Value;

    #[test]
    fn integer_ranges() {
        assert_eq!(Value::I64(-1).coerce(ScalarKind::U64), None);
        assert_eq!(Value::U64(u64::MAX).coerce(ScalarKind::I64), None);
        assert_eq!(
            Value::U64(u64::MAX).coerce(ScalarKind::I128),
            Some(Value::I128(u64::MAX.into()))
        );
        assert_eq!(Value::I8(-3).coerce(ScalarKind::I32), Some(Value::I32(-3)));
        assert_eq!(Value::U32(7).coerce(ScalarKind::Usize), Some(Value::U64(7)));
    }

    #[test]
    fn float_exactness() {
        assert_eq!(
            Value::I64(1 << 53).coerce(ScalarKind::F64),
            Some(Value::F64(9_007_199_254_740_992.0))
        );
        assert_eq!(Value::I64((1 << 53) + 1).coerce(ScalarKind::F64), None);
        assert_eq!(Value::I32(16_777_217).coerce(ScalarKind::F32), None);
        assert_eq!(Value::F32(1.5).coerce(ScalarKind::F64), Some(Value::F64(1.5)));
        assert_eq!(Value::F64(1.5).coerce(ScalarKind::F32), Some(Value::F32(1.5)));
        assert_eq!(Value::F64(f64::INFINITY).coerce(ScalarKind::I64), None);
    }

    #[test]
    fn non_numeric_kinds() {
        assert_eq!(Value::Bool(true).coerce(ScalarKind::I32), None);
        assert_eq!(Value::from("1").coerce(ScalarKind::I32), None);
        assert_eq!(
            Value::Char('k').coerce(ScalarKind::String),
            Some(Value::from("k"))
        );
        assert_eq!(Value::I32(0).coerce(ScalarKind::Unit), None);
    }
}
