//! TokenSwap Conversion Core
//!
//! Keeps the two amount fields of a swap form consistent with the price
//! ratio of the selected instruments while the user edits either one.
//!
//! # Features
//!
//! - Derivation of the non-edited amount, gated by an edit marker so the two
//!   fields never re-derive each other
//! - Incremental input sanitising and validation into an error set
//! - Submission gate and button label
//! - A form aggregate that runs derive-then-validate on every event
//!
//! # Example
//!
//! ```rust
//! use tokenswap_common::{CatalogStatus, Instrument, PriceCatalog};
//! use tokenswap_swap::{Field, FormState};
//!
//! let mut form = FormState::default();
//! form.apply_catalog(CatalogStatus::from_catalog(PriceCatalog::new(vec![
//!     Instrument::new("A", 2.0),
//!     Instrument::new("B", 4.0),
//! ])));
//!
//! form.focus(Field::Source);
//! form.input_source("10");
//! assert_eq!(form.state().target_amount.text(), "5");
//! ```

pub mod amount;
pub mod config;
pub mod edit;
pub mod engine;
pub mod error;
pub mod form;
pub mod gate;
pub mod quote;
pub mod state;
pub mod submit;
pub mod validator;

pub use amount::{sanitize, AmountField, AmountValue};
pub use config::SelectionDefaults;
pub use edit::{clear_editing, mark_editing, EditMarker};
pub use engine::{derive, derive_with_outcome, swap_direction, Derivation};
pub use error::{SubmitError, SubmitResult};
pub use form::FormState;
pub use gate::{can_submit, describe_submit_state, SubmitLabel};
pub use quote::QuoteSummary;
pub use state::{ConversionState, Field};
pub use submit::{submit, SwapReceipt};
pub use validator::{validate, validate_with_balances, Balances, ErrorSet};
