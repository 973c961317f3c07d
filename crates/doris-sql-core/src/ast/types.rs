//! Doris column and cast target types.

use core::fmt;

/// A field of a `STRUCT<...>` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field name.
    pub name: String,
    /// Field type.
    pub data_type: DataType,
}

/// Doris data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// BOOLEAN
    Boolean,
    /// TINYINT (1 byte).
    TinyInt,
    /// SMALLINT (2 bytes).
    SmallInt,
    /// INT (4 bytes).
    Int,
    /// BIGINT (8 bytes).
    BigInt,
    /// LARGEINT (16 bytes).
    LargeInt,
    /// FLOAT
    Float,
    /// DOUBLE
    Double,
    /// DECIMAL with precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after decimal point.
        scale: Option<u16>,
    },
    /// DATE
    Date,
    /// DATETIME with optional fractional-second precision.
    DateTime(Option<u8>),
    /// CHAR(n)
    Char(Option<u32>),
    /// VARCHAR(n)
    Varchar(Option<u32>),
    /// STRING
    String,
    /// TEXT
    Text,
    /// JSON
    Json,
    /// HLL
    Hll,
    /// BITMAP
    Bitmap,
    /// VARIANT
    Variant,
    /// ARRAY<T>
    Array(Box<DataType>),
    /// MAP<K, V>
    Map(Box<DataType>, Box<DataType>),
    /// STRUCT<name: T, ...>
    Struct(Vec<StructField>),
    /// Any other type name, kept verbatim.
    Custom(String),
}

impl DataType {
    /// Resolves a parameterless type name (case-insensitive).
    ///
    /// Names that take parameters (`DECIMAL`, `VARCHAR`, `ARRAY`, ...) resolve
    /// to their unparameterized form.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "TINYINT" => Self::TinyInt,
            "SMALLINT" => Self::SmallInt,
            "INT" | "INTEGER" => Self::Int,
            "BIGINT" => Self::BigInt,
            "LARGEINT" => Self::LargeInt,
            "FLOAT" => Self::Float,
            "DOUBLE" => Self::Double,
            "DECIMAL" | "DECIMALV2" | "DECIMALV3" => Self::Decimal {
                precision: None,
                scale: None,
            },
            "DATE" | "DATEV2" => Self::Date,
            "DATETIME" | "DATETIMEV2" | "TIMESTAMP" => Self::DateTime(None),
            "CHAR" => Self::Char(None),
            "VARCHAR" => Self::Varchar(None),
            "STRING" => Self::String,
            "TEXT" => Self::Text,
            "JSON" | "JSONB" => Self::Json,
            "HLL" => Self::Hll,
            "BITMAP" => Self::Bitmap,
            "VARIANT" => Self::Variant,
            _ => Self::Custom(name.to_string()),
        }
    }

    /// Returns true for DATE and DATETIME.
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime(_))
    }

    /// Returns the SQL representation of the data type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Boolean => String::from("BOOLEAN"),
            Self::TinyInt => String::from("TINYINT"),
            Self::SmallInt => String::from("SMALLINT"),
            Self::Int => String::from("INT"),
            Self::BigInt => String::from("BIGINT"),
            Self::LargeInt => String::from("LARGEINT"),
            Self::Float => String::from("FLOAT"),
            Self::Double => String::from("DOUBLE"),
            Self::Decimal { precision, scale } => match (precision, scale) {
                (Some(p), Some(s)) => format!("DECIMAL({p}, {s})"),
                (Some(p), None) => format!("DECIMAL({p})"),
                _ => String::from("DECIMAL"),
            },
            Self::Date => String::from("DATE"),
            Self::DateTime(precision) => match precision {
                Some(p) => format!("DATETIME({p})"),
                None => String::from("DATETIME"),
            },
            Self::Char(len) => match len {
                Some(n) => format!("CHAR({n})"),
                None => String::from("CHAR"),
            },
            Self::Varchar(len) => match len {
                Some(n) => format!("VARCHAR({n})"),
                None => String::from("VARCHAR"),
            },
            Self::String => String::from("STRING"),
            Self::Text => String::from("TEXT"),
            Self::Json => String::from("JSON"),
            Self::Hll => String::from("HLL"),
            Self::Bitmap => String::from("BITMAP"),
            Self::Variant => String::from("VARIANT"),
            Self::Array(element) => format!("ARRAY<{}>", element.to_sql()),
            Self::Map(key, value) => format!("MAP<{}, {}>", key.to_sql(), value.to_sql()),
            Self::Struct(fields) => {
                let fields: Vec<String> = fields
                    .iter()
                    .map(|field| format!("{}: {}", field.name, field.data_type.to_sql()))
                    .collect();
                format!("STRUCT<{}>", fields.join(", "))
            }
            Self::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_aliases() {
        assert_eq!(DataType::from_name("integer"), DataType::Int);
        assert_eq!(DataType::from_name("DATETIMEV2"), DataType::DateTime(None));
        assert_eq!(DataType::from_name("jsonb"), DataType::Json);
        assert_eq!(
            DataType::from_name("geometry"),
            DataType::Custom(String::from("geometry"))
        );
    }

    #[test]
    fn test_nested_to_sql() {
        let ty = DataType::Map(
            Box::new(DataType::String),
            Box::new(DataType::Array(Box::new(DataType::Decimal {
                precision: Some(10),
                scale: Some(2),
            }))),
        );
        assert_eq!(ty.to_sql(), "MAP<STRING, ARRAY<DECIMAL(10, 2)>>");
    }

    #[test]
    fn test_struct_to_sql() {
        let ty = DataType::Struct(vec![StructField {
            name: String::from("a"),
            data_type: DataType::Int,
        }]);
        assert_eq!(ty.to_string(), "STRUCT<a: INT>");
    }
}
