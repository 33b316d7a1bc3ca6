/*!
Helpers to (de)serialize periods as records with one field per component,
for use with Serde's [`with` attribute].

By default, [`DateTimePeriod`](crate::DateTimePeriod) and
[`DatePeriod`](crate::DatePeriod) serialize as their ISO 8601
string (`"P1Y2DT3H"`). Some record formats want the components as separate
integer fields instead. The modules here do that:

* [`datetime_period::codec::components`](self::components) for `DateTimePeriod`
* [`datetime_period::codec::date_components`](self::date_components) for `DatePeriod`

# Record layout

The record has the fields `years`, `months`, `days`, `hours`, `minutes`
(32-bit signed) and `seconds`, `nanoseconds` (64-bit signed), in that order.

Only nonzero fields are written, so the zero period is an empty record. When
reading, fields may come in any order and absent fields are zero. Unknown or
repeated fields are errors. A `DatePeriod` never writes clock fields, and
reading one fails if a clock field is present and nonzero.

# Example

```
use datetime_period::{DateTimePeriod, DatePeriod};

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct Record {
    #[serde(with = "datetime_period::codec::components")]
    elapsed: DateTimePeriod,
    #[serde(with = "datetime_period::codec::date_components")]
    term: DatePeriod,
}

let json = r#"{"elapsed":{"days":1,"seconds":30},"term":{"months":6}}"#;
let got: Record = serde_json::from_str(json)?;
assert_eq!(got.elapsed, DateTimePeriod::new(0, 0, 1, 0, 0, 30, 0));
assert_eq!(got.term, DatePeriod::new(0, 6, 0));
assert_eq!(serde_json::to_string(&got)?, json);

# Ok::<(), Box<dyn std::error::Error>>(())
```

[`with` attribute]: https://serde.rs/field-attrs.html#with
*/

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;

use crate::{Field, PeriodComponents};

const DATE_TIME_RECORD: &str = "DateTimePeriod";
const DATE_RECORD: &str = "DatePeriod";

const FIELDS: &[&str] = &[
    Field::Years.name(),
    Field::Months.name(),
    Field::Days.name(),
    Field::Hours.name(),
    Field::Minutes.name(),
    Field::Seconds.name(),
    Field::Nanoseconds.name(),
];

/// Convenience routines for (de)serializing [`DateTimePeriod`](crate::DateTimePeriod) as a record
/// of components.
pub mod components {
    use crate::{DateTimePeriod, Period};

    /// Serialize a `DateTimePeriod` as a record of its nonzero components.
    #[inline]
    pub fn serialize<S: serde::Serializer>(
        period: &DateTimePeriod,
        se: S,
    ) -> Result<S::Ok, S::Error> {
        super::serialize_components(&period.components(), super::DATE_TIME_RECORD, se)
    }

    /// Deserialize a `DateTimePeriod` from a record of components.
    #[inline]
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        de: D,
    ) -> Result<DateTimePeriod, D::Error> {
        super::deserialize_components(de, super::DATE_TIME_RECORD)
            .map(DateTimePeriod::from_components)
    }
}

/// Convenience routines for (de)serializing [`DatePeriod`](crate::DatePeriod) as a record of
/// components.
pub mod date_components {
    use serde::de;

    use crate::{DatePeriod, Period, PeriodError};

    /// Serialize a `DatePeriod` as a record of its nonzero components.
    #[inline]
    pub fn serialize<S: serde::Serializer>(
        period: &DatePeriod,
        se: S,
    ) -> Result<S::Ok, S::Error> {
        super::serialize_components(&period.components(), super::DATE_RECORD, se)
    }

    /// Deserialize a `DatePeriod` from a record of components. Clock fields
    /// may be present only if they are zero.
    #[inline]
    pub fn deserialize<'de, D: serde::Deserializer<'de>>(
        de: D,
    ) -> Result<DatePeriod, D::Error> {
        let c = super::deserialize_components(de, super::DATE_RECORD)?;
        if let Some((field, value)) = c.first_nonzero_clock() {
            debug!("rejected date period record with nonzero {field} = {value}");
            return Err(de::Error::custom(PeriodError::NonZeroClockField { field, value }));
        }
        Ok(DatePeriod::new(c.years, c.months, c.days))
    }
}

fn serialize_components<S: serde::Serializer>(
    c: &PeriodComponents,
    name: &'static str,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let len = Field::ALL.into_iter().filter(|&field| c.get(field) != 0).count();
    let mut record = serializer.serialize_struct(name, len)?;
    if c.years != 0 {
        record.serialize_field(Field::Years.name(), &c.years)?;
    }
    if c.months != 0 {
        record.serialize_field(Field::Months.name(), &c.months)?;
    }
    if c.days != 0 {
        record.serialize_field(Field::Days.name(), &c.days)?;
    }
    if c.hours != 0 {
        record.serialize_field(Field::Hours.name(), &c.hours)?;
    }
    if c.minutes != 0 {
        record.serialize_field(Field::Minutes.name(), &c.minutes)?;
    }
    if c.seconds != 0 {
        record.serialize_field(Field::Seconds.name(), &c.seconds)?;
    }
    if c.nanoseconds != 0 {
        record.serialize_field(Field::Nanoseconds.name(), &c.nanoseconds)?;
    }
    record.end()
}

fn deserialize_components<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
    name: &'static str,
) -> Result<PeriodComponents, D::Error> {
    deserializer.deserialize_struct(name, FIELDS, ComponentsVisitor { name })
}

/// Field keys may arrive by name (self-describing formats) or by index.
impl<'de> serde::Deserialize<'de> for Field {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "one of: {FIELDS:?}")
            }

            fn visit_u64<E: de::Error>(self, index: u64) -> Result<Field, E> {
                Field::from_index(index)
                    .ok_or_else(|| E::custom(format_args!("unexpected index {index}")))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Field, E> {
                Field::from_name(value).ok_or_else(|| E::unknown_field(value, FIELDS))
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct ComponentsVisitor {
    name: &'static str,
}

impl<'de> Visitor<'de> for ComponentsVisitor {
    type Value = PeriodComponents;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct {}", self.name)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<PeriodComponents, A::Error> {
        let mut c = PeriodComponents::default();
        let mut seen = [false; Field::ALL.len()];
        while let Some(field) = map.next_key::<Field>()? {
            if std::mem::replace(&mut seen[field.index()], true) {
                return Err(de::Error::duplicate_field(field.name()));
            }
            match field {
                Field::Years => c.years = map.next_value()?,
                Field::Months => c.months = map.next_value()?,
                Field::Days => c.days = map.next_value()?,
                Field::Hours => c.hours = map.next_value()?,
                Field::Minutes => c.minutes = map.next_value()?,
                Field::Seconds => c.seconds = map.next_value()?,
                Field::Nanoseconds => c.nanoseconds = map.next_value()?,
            }
        }
        Ok(c)
    }
}
