//! Field validation and normalization for contacts and their children.
//!
//! Everything here is pure: input goes in, a normalized record or a
//! `ContactError` comes out.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::commands::{ContactFields, NewChildren};
use crate::domain::error::ContactError;
use crate::domain::models::{ValidChildren, ValidContact};

pub const MAX_STATE_LEN: usize = 2;
pub const MAX_ZIP_LEN: usize = 5;
pub const MAX_PHONE_LEN: usize = 10;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Validate and normalize the scalar fields of a contact.
///
/// Checks run in field order and the first failure wins.
pub fn validate_contact(fields: &ContactFields) -> Result<ValidContact, ContactError> {
    let first_name = required("firstName", &fields.first_name)?;
    let last_name = required("lastName", &fields.last_name)?;
    let state = bounded("state", fields.state.as_deref(), MAX_STATE_LEN)?;
    let zip = bounded("zip", fields.zip.as_deref(), MAX_ZIP_LEN)?;
    let phone = bounded("phone", fields.phone.as_deref(), MAX_PHONE_LEN)?;
    let birthday = parse_birthday(fields.birthday.as_deref())?;

    Ok(ValidContact {
        first_name,
        last_name,
        street: optional(fields.street.as_deref()),
        city: optional(fields.city.as_deref()),
        state,
        zip,
        phone,
        email: optional(fields.email.as_deref()),
        birthday,
    })
}

/// A hobby or pet name must be non-empty after trimming
pub fn validate_child_name(raw: &str) -> Result<String, ContactError> {
    required("name", raw)
}

pub fn validate_children(children: &NewChildren) -> Result<ValidChildren, ContactError> {
    let hobbies = children
        .hobbies
        .iter()
        .map(|name| validate_child_name(name))
        .collect::<Result<Vec<_>, _>>()?;
    let pets = children
        .pets
        .iter()
        .map(|name| validate_child_name(name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidChildren { hobbies, pets })
}

/// Parse an optional birthday.
///
/// Blank input means "no birthday" and is not an error. Otherwise the value
/// must be an ISO 8601 date, optionally followed by a time component, and only
/// the date part is kept.
pub fn parse_birthday(raw: Option<&str>) -> Result<Option<NaiveDate>, ContactError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if !has_iso_date_shape(trimmed) {
        return Err(ContactError::InvalidDate(raw.to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(Some(date));
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Some(datetime.date()));
        }
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Some(datetime.date_naive()));
    }

    Err(ContactError::InvalidDate(raw.to_string()))
}

/// `YYYY-MM-DD` with exactly four, two and two digits, then end of input or
/// a `T`/space time separator. chrono alone accepts signs and short fields.
fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    let date_ok = bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    date_ok && matches!(bytes.get(10), None | Some(b'T') | Some(b' '))
}

fn required(field: &str, value: &str) -> Result<String, ContactError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ContactError::missing(field));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn bounded(field: &str, value: Option<&str>, max: usize) -> Result<Option<String>, ContactError> {
    let value = optional(value);
    if let Some(ref v) = value {
        if v.chars().count() > max {
            return Err(ContactError::too_long(field, max));
        }
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fred() -> ContactFields {
        ContactFields {
            first_name: "Fred".to_string(),
            last_name: "Flintstone".to_string(),
            street: Some("345 Cave Stone Rd".to_string()),
            city: Some("Bedrock".to_string()),
            state: Some("NA".to_string()),
            zip: Some("123".to_string()),
            phone: Some("1".to_string()),
            email: Some("fred@bedrock.com".to_string()),
            birthday: Some("1970-01-01".to_string()),
        }
    }

    #[test]
    fn test_validate_contact_accepts_full_record() {
        let valid = validate_contact(&fred()).expect("Fred should validate");

        assert_eq!(valid.first_name, "Fred");
        assert_eq!(valid.last_name, "Flintstone");
        assert_eq!(valid.state.as_deref(), Some("NA"));
        assert_eq!(valid.zip.as_deref(), Some("123"));
        assert_eq!(valid.birthday, NaiveDate::from_ymd_opt(1970, 1, 1));
    }

    #[test]
    fn test_validate_contact_trims_and_drops_blank_optionals() {
        let fields = ContactFields {
            first_name: "  Barney ".to_string(),
            last_name: "Rubble".to_string(),
            street: Some("   ".to_string()),
            city: Some(" Bedrock ".to_string()),
            email: Some(String::new()),
            ..Default::default()
        };

        let valid = validate_contact(&fields).unwrap();
        assert_eq!(valid.first_name, "Barney");
        assert_eq!(valid.street, None);
        assert_eq!(valid.city.as_deref(), Some("Bedrock"));
        assert_eq!(valid.email, None);
        assert_eq!(valid.birthday, None);
    }

    #[test]
    fn test_validate_contact_missing_names() {
        let mut fields = fred();
        fields.first_name = String::new();
        match validate_contact(&fields) {
            Err(ContactError::MissingField(field)) => assert_eq!(field, "firstName"),
            other => panic!("expected MissingField, got {:?}", other),
        }

        let mut fields = fred();
        fields.last_name = "   ".to_string();
        match validate_contact(&fields) {
            Err(ContactError::MissingField(field)) => assert_eq!(field, "lastName"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_contact_length_limits() {
        let cases = [
            ("state", {
                let mut f = fred();
                f.state = Some("NAX".to_string());
                f
            }, 2),
            ("zip", {
                let mut f = fred();
                f.zip = Some("123456".to_string());
                f
            }, 5),
            ("phone", {
                let mut f = fred();
                f.phone = Some("12345678901".to_string());
                f
            }, 10),
        ];

        for (expected_field, fields, expected_max) in cases {
            match validate_contact(&fields) {
                Err(ContactError::FieldTooLong { field, max }) => {
                    assert_eq!(field, expected_field);
                    assert_eq!(max, expected_max);
                }
                other => panic!("expected FieldTooLong for {}, got {:?}", expected_field, other),
            }
        }

        // Exactly at the limit is fine
        let mut fields = fred();
        fields.phone = Some("1234567890".to_string());
        fields.zip = Some("12345".to_string());
        assert!(validate_contact(&fields).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut fields = fred();
        fields.state = Some("ÅÖ".to_string());
        assert!(validate_contact(&fields).is_ok());
    }

    #[test]
    fn test_first_failure_wins() {
        let fields = ContactFields {
            first_name: String::new(),
            last_name: String::new(),
            zip: Some("1234567".to_string()),
            ..Default::default()
        };
        match validate_contact(&fields) {
            Err(ContactError::MissingField(field)) => assert_eq!(field, "firstName"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_birthday_blank_is_absent() {
        assert_eq!(parse_birthday(None).unwrap(), None);
        assert_eq!(parse_birthday(Some("")).unwrap(), None);
        assert_eq!(parse_birthday(Some("   \t")).unwrap(), None);
    }

    #[test]
    fn test_parse_birthday_accepts_iso_forms() {
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1);
        assert_eq!(parse_birthday(Some("1970-01-01")).unwrap(), expected);
        assert_eq!(parse_birthday(Some(" 1970-01-01 ")).unwrap(), expected);
        assert_eq!(parse_birthday(Some("1970-01-01T08:30:00")).unwrap(), expected);
        assert_eq!(parse_birthday(Some("1970-01-01 08:30")).unwrap(), expected);
        assert_eq!(parse_birthday(Some("1970-01-01T08:30:00+02:00")).unwrap(), expected);
        assert_eq!(
            parse_birthday(Some("2000-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2000, 2, 29)
        );
    }

    #[test]
    fn test_parse_birthday_rejects_garbage() {
        let rejected = [
            "not-a-date",
            "01/02/1970",
            "1970-13-01",
            "2015-02-30",
            "1970-1",
            "1970-1-1",
            "1970-01-1",
            "+1970-01-01",
            "70-01-01",
            "1970-01-01x",
            "19700-01-01",
        ];
        for raw in rejected {
            match parse_birthday(Some(raw)) {
                Err(ContactError::InvalidDate(value)) => assert_eq!(value, raw),
                other => panic!("expected InvalidDate for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_validate_children() {
        let children = NewChildren {
            hobbies: vec![" Bowling ".to_string(), "Golf".to_string()],
            pets: vec!["Dino".to_string()],
        };
        let valid = validate_children(&children).unwrap();
        assert_eq!(valid.hobbies, vec!["Bowling", "Golf"]);
        assert_eq!(valid.pets, vec!["Dino"]);

        let children = NewChildren {
            hobbies: vec![],
            pets: vec!["".to_string()],
        };
        match validate_children(&children) {
            Err(ContactError::MissingField(field)) => assert_eq!(field, "name"),
            other => panic!("expected MissingField, got {:?}", other),
        }
    }
}
