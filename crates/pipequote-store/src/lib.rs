//! # pipequote-store: Persistence and Service Layer for PipeQuote
//!
//! This crate provides storage access and the callable service surface for
//! the PipeQuote system. All data lives in a key-addressed JSON blob store
//! behind the [`gateway::BlobGateway`] trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      PipeQuote Data Flow                            │
//! │                                                                     │
//! │  Caller (HTTP layer, CLI, tests)                                    │
//! │       │  token ──► IdentityGateway ──► Identity                     │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 pipequote-store (THIS CRATE)                │   │
//! │  │                                                             │   │
//! │  │   ┌──────────────────┐      ┌─────────────────────────┐    │   │
//! │  │   │  Repositories    │      │      BlobGateway        │    │   │
//! │  │   │  configurations  │◄────►│  get/put whole lists    │    │   │
//! │  │   │  quotations      │      │  "configurations"       │    │   │
//! │  │   └──────────────────┘      │  "quotations"           │    │   │
//! │  │                             └─────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  pipequote-core (pricing, aggregation, retention, rendering)        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`gateway`] - Blob storage abstraction and the in-memory implementation
//! - [`identity`] - Validated-identity contract; no credentials in here
//! - [`repository`] - Configuration and quotation operations
//! - [`response`] - The `{ success, data | error }` API envelope
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use pipequote_store::gateway::MemoryGateway;
//! use pipequote_store::identity::{authenticate, StaticTokenGateway};
//! use pipequote_store::repository::ConfigurationRepository;
//!
//! let gateway = MemoryGateway::new();
//! let tokens = StaticTokenGateway::new("secret-token", "operator");
//! let identity = authenticate(&tokens, "secret-token").unwrap();
//!
//! let configs = ConfigurationRepository::new(gateway);
//! assert!(configs.list(&identity).unwrap().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod identity;
pub mod repository;
pub mod response;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use gateway::{BlobGateway, MemoryGateway, CONFIGURATIONS_KEY, QUOTATIONS_KEY};
pub use identity::{authenticate, Identity, IdentityGateway};
pub use repository::{ConfigurationRepository, QuotationRepository};
pub use response::ApiResponse;
