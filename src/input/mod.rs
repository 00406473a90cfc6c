//! Conversion of raw form input into typed records
//!
//! The session loop hands this module the raw `key=value` text the user
//! typed; nothing weakly typed ever reaches the store. Conversion is a
//! fallible step returning [`InputError`] rather than coercing bad values.

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::InputError;
use crate::models::PropertyRecord;

/// Image reference substituted when the form leaves the field blank,
/// matching the card renderer's expectations.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=200&width=300";

/// Field names the add form accepts
const KNOWN_FIELDS: [&str; 10] = [
    "id",
    "name",
    "location",
    "price",
    "size",
    "rating",
    "bedrooms",
    "bathrooms",
    "description",
    "image",
];

/// Weakly-typed carrier for one submitted add form
///
/// Holds the raw field text exactly as entered. [`into_record`]
/// (Self::into_record) is the only way out, so a form can never bypass
/// validation.
#[derive(Debug, Default)]
pub struct PropertyForm {
    fields: HashMap<String, String>,
}

impl PropertyForm {
    /// Parse `key=value` pairs out of a raw input line
    ///
    /// Values may be double-quoted to contain spaces
    /// (`name="Oceanview Villa"`). Later duplicates of a key overwrite
    /// earlier ones, like repeated form fields.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let mut fields = HashMap::new();
        for (key, value) in tokenize(input)? {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                return Err(InputError::Malformed(format!("unknown field '{key}'")));
            }
            fields.insert(key, value);
        }
        Ok(Self { fields })
    }

    /// Convert the form into a validated record
    pub fn into_record(self) -> Result<PropertyRecord, InputError> {
        let record = PropertyRecord {
            id: self.required_number("id")?,
            name: self.required_text("name")?.to_string(),
            location: self.required_text("location")?.to_string(),
            price: self.required_number("price")?,
            size: self.required_number("size")?,
            rating: self.required_number("rating")?,
            bedrooms: self.optional_number("bedrooms")?,
            bathrooms: self.optional_number("bathrooms")?,
            description: self.fields.get("description").cloned().unwrap_or_default(),
            image: match self.fields.get("image") {
                Some(url) if !url.trim().is_empty() => url.clone(),
                _ => PLACEHOLDER_IMAGE.to_string(),
            },
        };
        record.validate()?;
        Ok(record)
    }

    fn required_text(&self, field: &'static str) -> Result<&str, InputError> {
        match self.fields.get(field) {
            Some(value) if value.trim().is_empty() => Err(InputError::EmptyField { field }),
            Some(value) => Ok(value),
            None => Err(InputError::MissingField { field }),
        }
    }

    fn required_number<T: FromStr>(&self, field: &'static str) -> Result<T, InputError> {
        let raw = self.required_text(field)?;
        raw.trim().parse().map_err(|_| InputError::NotANumber {
            field,
            value: raw.to_string(),
        })
    }

    /// An absent or blank optional field means "not applicable"
    fn optional_number<T: FromStr>(&self, field: &'static str) -> Result<Option<T>, InputError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => raw
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| InputError::NotANumber {
                    field,
                    value: raw.clone(),
                }),
        }
    }
}

/// Split a raw line into `key=value` pairs, honoring double quotes
fn tokenize(input: &str) -> Result<Vec<(String, String)>, InputError> {
    let mut pairs = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        loop {
            match chars.next() {
                Some('=') => break,
                Some(c) if c.is_whitespace() => {
                    return Err(InputError::Malformed(format!(
                        "expected '=' after '{key}'"
                    )));
                }
                Some(c) => key.push(c),
                None => {
                    return Err(InputError::Malformed(format!(
                        "expected '=' after '{key}'"
                    )));
                }
            }
        }
        if key.is_empty() {
            return Err(InputError::Malformed("field name before '=' is empty".into()));
        }

        let mut value = String::new();
        if chars.next_if(|&c| c == '"').is_some() {
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                value.push(c);
            }
            if !closed {
                return Err(InputError::Malformed(format!(
                    "unterminated quote in value of '{key}'"
                )));
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                value.push(c);
            }
        }

        pairs.push((key, value));
    }

    Ok(pairs)
}
