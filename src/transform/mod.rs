//! Target transformations applied around the trainable model.
//!
//! Provides shift/difference of the target and the scaling seam.
//!
//! # Example
//!
//! ```
//! use timeseries_regressor::core::Series;
//! use timeseries_regressor::transform::{inverse_difference, shift_target};
//!
//! let y = Series::from_values("y", vec![1.0, 2.0, 4.0, 7.0]);
//!
//! // Learn one-step-ahead differences
//! let diffed = shift_target(&y, true, &[1]).unwrap();
//! assert_eq!(&diffed.values()[0][..3], &[1.0, 2.0, 3.0]);
//!
//! // Adding y back yields the absolute value one step ahead
//! let restored = inverse_difference(&diffed, &y).unwrap();
//! assert_eq!(&restored.values()[0][..3], &[2.0, 4.0, 7.0]);
//! ```

pub mod diff;
pub mod scale;

pub use diff::{inverse_difference, lead, shift_target, target_column_name};
pub use scale::{BoxedScaler, Scaler};
