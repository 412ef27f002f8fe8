//! Composable request validation.
//!
//! A [`Validator`] checks one rule against a typed request. A
//! [`ValidationAggregator`] runs an ordered list of them and stops at the
//! first failure, so the error a caller sees is always the earliest rule
//! broken in declaration order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::errors::ValidationError;
use crate::domain::user::models::AuthenticationRequest;
use crate::domain::user::models::RegistrationRequest;
use crate::domain::user::ports::UserFinder;

/// Reads one string field out of a request.
pub type FieldAccessor<T> = fn(&T) -> &str;

/// A single rule check against a request of type `T`.
#[async_trait]
pub trait Validator<T>: Send + Sync {
    async fn validate(&self, request: &T) -> Result<(), UserError>;
}

/// Ordered, fail-fast composition of validators.
pub struct ValidationAggregator<T> {
    validators: Vec<Box<dyn Validator<T>>>,
}

impl<T> ValidationAggregator<T>
where
    T: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Append a rule; rules run in the order they were added.
    pub fn with(mut self, validator: impl Validator<T> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T> Default for ValidationAggregator<T>
where
    T: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T> Validator<T> for ValidationAggregator<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        for validator in &self.validators {
            validator.validate(request).await?;
        }

        Ok(())
    }
}

/// Field must be non-empty.
pub struct Required<T> {
    field: &'static str,
    value: FieldAccessor<T>,
}

impl<T> Required<T> {
    pub fn new(field: &'static str, value: FieldAccessor<T>) -> Self {
        Self { field, value }
    }
}

#[async_trait]
impl<T> Validator<T> for Required<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        if (self.value)(request).is_empty() {
            return Err(ValidationError::new(self.field, "required").into());
        }

        Ok(())
    }
}

/// Field must have at least `min` characters.
pub struct MinLength<T> {
    field: &'static str,
    min: usize,
    value: FieldAccessor<T>,
}

impl<T> MinLength<T> {
    pub fn new(field: &'static str, min: usize, value: FieldAccessor<T>) -> Self {
        Self { field, min, value }
    }
}

#[async_trait]
impl<T> Validator<T> for MinLength<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        if (self.value)(request).chars().count() < self.min {
            return Err(ValidationError::new(self.field, format!("min={}", self.min)).into());
        }

        Ok(())
    }
}

/// Field must have at most `max` characters.
pub struct MaxLength<T> {
    field: &'static str,
    max: usize,
    value: FieldAccessor<T>,
}

impl<T> MaxLength<T> {
    pub fn new(field: &'static str, max: usize, value: FieldAccessor<T>) -> Self {
        Self { field, max, value }
    }
}

#[async_trait]
impl<T> Validator<T> for MaxLength<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        if (self.value)(request).chars().count() > self.max {
            return Err(ValidationError::new(self.field, format!("max={}", self.max)).into());
        }

        Ok(())
    }
}

/// Field must consist of ASCII letters and digits only.
pub struct Alphanumeric<T> {
    field: &'static str,
    value: FieldAccessor<T>,
}

impl<T> Alphanumeric<T> {
    pub fn new(field: &'static str, value: FieldAccessor<T>) -> Self {
        Self { field, value }
    }
}

#[async_trait]
impl<T> Validator<T> for Alphanumeric<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        let value = (self.value)(request);
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ValidationError::new(self.field, "alphanum").into());
        }

        Ok(())
    }
}

/// Field must equal another field of the same request.
pub struct EqualsField<T> {
    field: &'static str,
    other_field: &'static str,
    value: FieldAccessor<T>,
    other_value: FieldAccessor<T>,
}

impl<T> EqualsField<T> {
    pub fn new(
        field: &'static str,
        value: FieldAccessor<T>,
        other_field: &'static str,
        other_value: FieldAccessor<T>,
    ) -> Self {
        Self {
            field,
            other_field,
            value,
            other_value,
        }
    }
}

#[async_trait]
impl<T> Validator<T> for EqualsField<T>
where
    T: Send + Sync + 'static,
{
    async fn validate(&self, request: &T) -> Result<(), UserError> {
        if (self.value)(request) != (self.other_value)(request) {
            return Err(
                ValidationError::new(self.field, format!("eqfield={}", self.other_field)).into(),
            );
        }

        Ok(())
    }
}

/// Username must not belong to a stored user.
///
/// A `NotFound` from the store means the name is free. Any other store
/// failure propagates unchanged.
pub struct UsernameUniqueness<F>
where
    F: UserFinder,
{
    finder: Arc<F>,
}

impl<F> UsernameUniqueness<F>
where
    F: UserFinder,
{
    pub fn new(finder: Arc<F>) -> Self {
        Self { finder }
    }
}

#[async_trait]
impl<F> Validator<RegistrationRequest> for UsernameUniqueness<F>
where
    F: UserFinder,
{
    async fn validate(&self, request: &RegistrationRequest) -> Result<(), UserError> {
        match self.finder.get_by_username(request.username()).await {
            Ok(user) if user.id.is_persisted() => {
                Err(ValidationError::new("username", "unique").into())
            }
            Ok(_) | Err(UserError::NotFound(_)) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Rules applied before registering, in order.
pub fn registration_validator<F>(finder: Arc<F>) -> ValidationAggregator<RegistrationRequest>
where
    F: UserFinder,
{
    ValidationAggregator::new()
        .with(Required::new("username", RegistrationRequest::username))
        .with(MinLength::new("username", 3, RegistrationRequest::username))
        .with(MaxLength::new("username", 15, RegistrationRequest::username))
        .with(Alphanumeric::new("username", RegistrationRequest::username))
        .with(Required::new("password", RegistrationRequest::password))
        .with(MinLength::new("password", 6, RegistrationRequest::password))
        .with(EqualsField::new(
            "password",
            RegistrationRequest::password,
            "password_confirmation",
            RegistrationRequest::password_confirmation,
        ))
        .with(UsernameUniqueness::new(finder))
}

/// Rules applied before authenticating, in order.
pub fn authentication_validator() -> ValidationAggregator<AuthenticationRequest> {
    ValidationAggregator::new()
        .with(Required::new("username", AuthenticationRequest::username))
        .with(Required::new("password", AuthenticationRequest::password))
}
