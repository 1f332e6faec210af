//! Validation of configuration and raw inputs.
//!
//! # Example
//!
//! ```
//! use timeseries_regressor::validation::{validate_predict_ahead, verify_same_index};
//!
//! assert_eq!(validate_predict_ahead(&[1, 2], true).unwrap(), vec![1, 2]);
//! assert!(validate_predict_ahead(&[1, 1], true).is_err());
//! assert!(verify_same_index(&[0, 1], &[0, 2], "fit").is_err());
//! ```

pub mod horizons;
pub mod input;

pub use horizons::{validate_predict_ahead, validate_quantiles};
pub use input::{assert_no_missing, check_monospaced, verify_same_index};
