//! Validating records and decoding JSON into them
//!
//! A record implements [`Validate`] by building a [`Schema`] over its own fields.
//! Building the schema may fail; such failures are reported under the
//! [`PRE_CHECK_KEY`](crate::PRE_CHECK_KEY) sentinel key.

use crate::error::{ParseError, ValidationError, ValidationResult};
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use std::io;
use tracing::debug;

/// A record that knows how to validate itself
pub trait Validate {
    /// Build the schema for this record.
    ///
    /// `Ok(None)` means the record has no rules and is always valid. An `Err` is
    /// reported as a pre-check failure instead of running any pipe.
    fn rules(&self) -> anyhow::Result<Option<Schema>>;
}

/// Fail-fast validation of a record
pub fn validate<T: Validate + ?Sized>(record: &T) -> Result<(), ValidationError> {
    match record.rules() {
        Ok(Some(schema)) => schema.validate(),
        Ok(None) => Ok(()),
        Err(err) => Err(pre_check(err)),
    }
}

/// Exhaustive validation of a record
pub fn validate_all<T: Validate + ?Sized>(record: &T) -> ValidationResult<()> {
    match record.rules() {
        Ok(Some(schema)) => schema.validate_all(),
        Ok(None) => Ok(()),
        Err(err) => Err(pre_check(err).into()),
    }
}

/// Decode `bytes` as JSON into `T`, then validate every field.
///
/// Decoding errors are returned without validating.
pub fn from_slice<T>(bytes: &[u8]) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_slice(bytes)?;
    checked(record)
}

/// Decode a JSON string into `T`, then validate every field
pub fn from_str<T>(input: &str) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
{
    let record: T = serde_json::from_str(input)?;
    checked(record)
}

/// Decode JSON from a reader into `T`, then validate every field
pub fn from_reader<T, R>(reader: R) -> Result<T, ParseError>
where
    T: DeserializeOwned + Validate,
    R: io::Read,
{
    let record: T = serde_json::from_reader(reader)?;
    checked(record)
}

fn checked<T: Validate>(record: T) -> Result<T, ParseError> {
    let schema = match record.rules() {
        Ok(Some(schema)) => schema,
        Ok(None) => return Ok(record),
        Err(err) => return Err(ParseError::PreCheck(pre_check(err))),
    };

    schema.validate_all().map_err(ParseError::Invalid)?;
    Ok(record)
}

fn pre_check(err: anyhow::Error) -> ValidationError {
    debug!(error = %err, "schema construction failed");
    ValidationError::pre_check(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{IntAction, StringAction};
    use crate::error::PRE_CHECK_KEY;
    use crate::pipe::{int_pipe, string_pipe};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct SignUp {
        email: String,
        password: String,
        age: i64,
    }

    impl Validate for SignUp {
        fn rules(&self) -> anyhow::Result<Option<Schema>> {
            Ok(Some(
                Schema::builder()
                    .field("email", string_pipe(self.email.clone(), [StringAction::not_empty(), StringAction::email()]))
                    .field("password", string_pipe(self.password.clone(), [StringAction::min_length(8)]))
                    .field("age", int_pipe(self.age, [IntAction::gte(18)]))
                    .build(),
            ))
        }
    }

    #[derive(Debug, Deserialize)]
    struct Anything {
        #[allow(dead_code)]
        note: String,
    }

    impl Validate for Anything {
        fn rules(&self) -> anyhow::Result<Option<Schema>> {
            Ok(None)
        }
    }

    #[derive(Debug, Deserialize)]
    struct Broken {
        pattern: String,
    }

    impl Validate for Broken {
        fn rules(&self) -> anyhow::Result<Option<Schema>> {
            let action = StringAction::pattern(&self.pattern)?;
            Ok(Some(Schema::builder().field("pattern", string_pipe("x", [action])).build()))
        }
    }

    #[test]
    fn test_valid_record_decodes() {
        let record: SignUp =
            from_str(r#"{"email": "user@example.com", "password": "hunter22!", "age": 30}"#).unwrap();
        assert_eq!(record.age, 30);
        assert!(validate(&record).is_ok());
    }

    #[test]
    fn test_invalid_record_reports_every_field() {
        let err = from_slice::<SignUp>(br#"{"email": "nope", "password": "short", "age": 12}"#).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.len(), 3);
        assert!(errors.has_key("email"));
        assert!(errors.has_key("password"));
        assert!(errors.has_key("age"));
    }

    #[test]
    fn test_decode_error_skips_validation() {
        let err = from_str::<SignUp>(r#"{"email": "nope", "age": "#).unwrap_err();
        assert!(err.is_decode());
        assert!(err.validation_errors().is_none());

        let err = from_str::<SignUp>(r#"{"email": "nope", "password": "short", "age": "old"}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_reader_input() {
        let input = io::Cursor::new(r#"{"email": "", "password": "long enough", "age": 40}"#);
        let err = from_reader::<SignUp, _>(input).unwrap_err();
        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.keys(), vec!["email"]);
        assert_eq!(errors.get("email").unwrap().message(), "cannot be empty");
    }

    #[test]
    fn test_record_without_rules_is_valid() {
        let record: Anything = from_str(r#"{"note": ""}"#).unwrap();
        assert!(validate(&record).is_ok());
        assert!(validate_all(&record).is_ok());
    }

    #[test]
    fn test_rule_construction_failure_uses_sentinel_key() {
        let record = Broken { pattern: "(".to_string() };

        let error = validate(&record).unwrap_err();
        assert_eq!(error.key(), PRE_CHECK_KEY);
        assert!(error.is_pre_check());

        let errors = validate_all(&record).unwrap_err();
        assert_eq!(errors.keys(), vec![PRE_CHECK_KEY]);

        match from_str::<Broken>(r#"{"pattern": "["}"#) {
            Err(ParseError::PreCheck(error)) => assert_eq!(error.key(), PRE_CHECK_KEY),
            other => panic!("expected pre-check failure, got {:?}", other),
        }
    }

    #[test]
    fn test_fail_fast_on_record() {
        let record = SignUp {
            email: String::new(),
            password: "short".to_string(),
            age: 10,
        };
        assert_eq!(validate(&record).unwrap_err().key(), "email");
    }
}
