//! Schemas: named pipes validated together
//!
//! [`Schema::validate`] walks the fields in registration order and stops at the first
//! failing one. [`Schema::validate_all`] validates every field, one worker per field,
//! and collects every failure. The collected order follows worker completion and is
//! not stable across runs.

use crate::config::SchemaConfig;
use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::pipe::Field;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

/// A fixed set of keyed pipes
#[derive(Clone, Default)]
pub struct Schema {
    fields: Vec<Arc<dyn Field>>,
    config: SchemaConfig,
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("fields", &self.keys())
            .field("config", &self.config)
            .finish()
    }
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Build from a key-to-pipe mapping. Each pipe takes its mapping key.
    ///
    /// Registration order is the mapping's iteration order; use a `BTreeMap` or
    /// the builder when fail-fast order matters.
    pub fn from_map<K, I>(pipes: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Box<dyn Field>)>,
    {
        pipes
            .into_iter()
            .fold(SchemaBuilder::new(), |builder, (key, pipe)| builder.boxed(key, pipe))
            .build()
    }

    /// Build from pipes that already carry their keys (see [`entry`](crate::entry)),
    /// keeping the given order
    pub fn from_entries<I>(pipes: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Field>>,
    {
        pipes
            .into_iter()
            .fold(SchemaBuilder::new(), |builder, pipe| {
                let key = pipe.key().to_string();
                builder.boxed(key, pipe)
            })
            .build()
    }

    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field keys in registration order
    pub fn keys(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.key()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&dyn Field> {
        self.fields
            .iter()
            .find(|field| field.key() == key)
            .map(|field| &**field)
    }

    /// Validate fields in registration order and return the first failure.
    ///
    /// Fields after the failing one are not evaluated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for field in &self.fields {
            if let Err(error) = field.validate() {
                debug!(key = %error.key, code = %error.cause.code, "field validation failed");
                return Err(error);
            }
        }
        Ok(())
    }

    /// Validate every field and collect every failure.
    ///
    /// Fields run on scoped worker threads, one per field, when the configuration
    /// allows it. The call returns only after every worker has finished.
    pub fn validate_all(&self) -> ValidationResult<()> {
        let errors = if self.config.runs_in_parallel(self.fields.len()) {
            self.collect_parallel()
        } else {
            self.collect_sequential()
        };

        debug!(
            fields = self.fields.len(),
            failed = errors.len(),
            "exhaustive validation finished"
        );
        errors.into_result()
    }

    /// Like [`validate_all`](Self::validate_all), with one tokio task per field.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn validate_all_async(&self) -> ValidationResult<()> {
        if !self.config.runs_in_parallel(self.fields.len()) {
            return self.collect_sequential().into_result();
        }

        let errors = Arc::new(tokio::sync::Mutex::new(ValidationErrors::new()));

        let mut handles = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let field = Arc::clone(field);
            let errors = Arc::clone(&errors);
            handles.push(tokio::spawn(async move {
                if let Err(error) = field.validate() {
                    errors.lock().await.add(error);
                }
            }));
        }

        for handle in handles {
            if let Err(join_error) = handle.await {
                if join_error.is_panic() {
                    std::panic::resume_unwind(join_error.into_panic());
                }
                warn!("validation task cancelled before completion");
            }
        }

        let errors = match Arc::try_unwrap(errors) {
            Ok(errors) => errors.into_inner(),
            Err(shared) => shared.lock().await.clone(),
        };

        debug!(
            fields = self.fields.len(),
            failed = errors.len(),
            "exhaustive validation finished"
        );
        errors.into_result()
    }

    fn collect_sequential(&self) -> ValidationErrors {
        self.fields
            .iter()
            .filter_map(|field| field.validate().err())
            .collect()
    }

    fn collect_parallel(&self) -> ValidationErrors {
        let errors = Mutex::new(ValidationErrors::new());

        let record = |field: &dyn Field| {
            if let Err(error) = field.validate() {
                errors.lock().add(error);
            }
        };

        thread::scope(|scope| {
            for field in &self.fields {
                let field: &dyn Field = &**field;
                let spawned = thread::Builder::new()
                    .name("elif-pipes-worker".to_string())
                    .spawn_scoped(scope, move || record(field));

                if let Err(err) = spawned {
                    warn!(key = %field.key(), error = %err, "failed to spawn worker, validating inline");
                    record(field);
                }
            }
        });

        errors.into_inner()
    }
}

/// Builder for schemas with an explicit registration order.
///
/// Inserting a key that is already present replaces the earlier pipe in place.
/// Pipes without a key are always appended.
#[derive(Default)]
pub struct SchemaBuilder {
    fields: Vec<Box<dyn Field>>,
    config: SchemaConfig,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pipe under `key`
    pub fn field<F>(self, key: impl Into<String>, pipe: F) -> Self
    where
        F: Field + 'static,
    {
        self.boxed(key, Box::new(pipe))
    }

    /// Insert a pipe that already carries its key
    pub fn pipe<F>(self, pipe: F) -> Self
    where
        F: Field + 'static,
    {
        let key = pipe.key().to_string();
        self.boxed(key, Box::new(pipe))
    }

    /// Insert an already type-erased pipe under `key`
    pub fn boxed(mut self, key: impl Into<String>, mut pipe: Box<dyn Field>) -> Self {
        pipe.set_key(key.into());

        let existing = match pipe.key() {
            "" => None,
            key => self.fields.iter().position(|field| field.key() == key),
        };

        match existing {
            Some(index) => self.fields[index] = pipe,
            None => self.fields.push(pipe),
        }
        self
    }

    pub fn config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            fields: self.fields.into_iter().map(Arc::from).collect(),
            config: self.config,
        }
    }
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("fields", &self.fields.iter().map(|field| field.key()).collect::<Vec<_>>())
            .field("config", &self.config)
            .finish()
    }
}
