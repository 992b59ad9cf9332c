//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module defines the composable validator framework the matching algorithm runs requests
// through. A validator is a pure check over `(request, book, candidate resting order)`; validators
// compose into ordered chains configured per matcher instance.
//
// Three chains exist per matcher: new-order, cancel, and per-candidate match validation. The
// first two short-circuit on the first non-NoError result. The match chain treats
// `ContinueWithoutMatching` as a soft outcome: it is remembered but later validators still run,
// and any hard error overrides it.
//
// | Name                   | Description                                            |
// |------------------------|--------------------------------------------------------|
// | OrderRequestValidator  | Trait implemented by every validator.                  |
// | ValidatorChain         | Ordered list of boxed validators.                      |
//--------------------------------------------------------------------------------------------------

pub mod validators;

use crate::domain::models::request::ClientOrderRequest;
use crate::domain::models::types::ValidationResponse;
use crate::domain::services::orderbook::book::{PassiveOrder, PassiveOrderBook};

/// A single validation rule.
///
/// `passive` is `Some` only in the match phase, where the rule inspects one candidate resting
/// order at a time. Insert and cancel validators are invoked with `None`.
pub trait OrderRequestValidator<X = ()>: Send + Sync {
    /// Checks the request against the book and, during matching, the candidate resting order.
    fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        book: &PassiveOrderBook<X>,
        passive: Option<&PassiveOrder<X>>,
    ) -> ValidationResponse;
}

/// An ordered chain of validators, composed at construction time.
pub struct ValidatorChain<X = ()> {
    validators: Vec<Box<dyn OrderRequestValidator<X>>>,
}

impl<X> ValidatorChain<X> {
    /// Creates an empty chain. An empty chain validates everything to `NoError`.
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Appends a validator, returning the chain for further composition.
    pub fn with(mut self, validator: impl OrderRequestValidator<X> + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Number of validators in the chain.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true when no validators are configured.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Runs the chain for the insert and cancel phases: the first non-`NoError` response
    /// short-circuits and is returned.
    pub fn validate(
        &self,
        request: &ClientOrderRequest<X>,
        book: &PassiveOrderBook<X>,
    ) -> ValidationResponse {
        for validator in &self.validators {
            let response = validator.validate(request, book, None);
            if response != ValidationResponse::NoError {
                return response;
            }
        }
        ValidationResponse::NoError
    }

    /// Runs the chain for the match phase against one candidate resting order.
    ///
    /// Only results outside `{NoError, ContinueWithoutMatching}` short-circuit. A
    /// `ContinueWithoutMatching` is remembered and returned when every remaining validator
    /// passes, so a later hard error still wins over an earlier skip.
    pub fn validate_match(
        &self,
        request: &ClientOrderRequest<X>,
        book: &PassiveOrderBook<X>,
        passive: &PassiveOrder<X>,
    ) -> ValidationResponse {
        let mut outcome = ValidationResponse::NoError;
        for validator in &self.validators {
            match validator.validate(request, book, Some(passive)) {
                ValidationResponse::NoError => {}
                ValidationResponse::ContinueWithoutMatching => {
                    outcome = ValidationResponse::ContinueWithoutMatching;
                }
                error => return error,
            }
        }
        outcome
    }
}

impl<X> Default for ValidatorChain<X> {
    fn default() -> Self {
        Self::new()
    }
}
