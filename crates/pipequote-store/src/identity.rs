//! # Identity Module
//!
//! The validated-identity contract. Credentials, token signing and expiry
//! all live in the external issuer; this module only models the answer to
//! "is this token good, and for whom?".
//!
//! Every repository operation takes an [`Identity`] parameter explicitly.
//! There is no ambient "current user" anywhere in the system - an identity
//! exists in a scope only because someone validated a token in that scope.

use crate::error::{StoreError, StoreResult};

/// Outcome of validating an opaque token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    pub valid: bool,
    /// Who the token belongs to; present only when `valid`.
    pub subject: Option<String>,
}

impl TokenValidation {
    /// A successful validation for `subject`.
    pub fn accepted(subject: impl Into<String>) -> Self {
        TokenValidation {
            valid: true,
            subject: Some(subject.into()),
        }
    }

    /// A failed validation.
    pub fn rejected() -> Self {
        TokenValidation {
            valid: false,
            subject: None,
        }
    }
}

/// A validated identity.
///
/// The field is private: the only way to obtain one is through
/// [`authenticate`], so holding an `Identity` is proof that a token
/// validation succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    subject: String,
}

impl Identity {
    /// The authenticated subject (operator username).
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Validates opaque tokens.
///
/// Implementations wrap whatever the deployment uses to issue tokens; the
/// store never sees a credential, only the opaque token and the verdict.
pub trait IdentityGateway {
    fn validate(&self, token: &str) -> TokenValidation;
}

/// Exchanges a token for an [`Identity`], or `Unauthorized`.
pub fn authenticate<G: IdentityGateway>(gateway: &G, token: &str) -> StoreResult<Identity> {
    let validation = gateway.validate(token);
    match (validation.valid, validation.subject) {
        (true, Some(subject)) => Ok(Identity { subject }),
        _ => Err(StoreError::Unauthorized),
    }
}

// =============================================================================
// Static Token Gateway
// =============================================================================

/// Single-operator [`IdentityGateway`]: one pre-shared token, one subject.
///
/// Matches the deployment this system actually runs in - a one-person
/// trading business - and doubles as the test implementation.
#[derive(Debug, Clone)]
pub struct StaticTokenGateway {
    token: String,
    subject: String,
}

impl StaticTokenGateway {
    pub fn new(token: impl Into<String>, subject: impl Into<String>) -> Self {
        StaticTokenGateway {
            token: token.into(),
            subject: subject.into(),
        }
    }
}

impl IdentityGateway for StaticTokenGateway {
    fn validate(&self, token: &str) -> TokenValidation {
        if !token.is_empty() && token == self.token {
            TokenValidation::accepted(self.subject.clone())
        } else {
            TokenValidation::rejected()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
