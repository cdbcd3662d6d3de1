//! `license-sniff` — classify informal license declarations.
//!
//! A declared license may be an SPDX-style expression, a short name, full
//! license text, a URL or a pointer to a file. [`license`] turns any of those
//! into a normalized identifier:
//!
//! ```
//! use license_sniff::license;
//!
//! assert_eq!(license(Some("Apache-2.0 OR MIT")).as_deref(), Some("Apache-2.0 OR MIT"));
//! assert_eq!(license(Some("asdf\nMIT\nasdf")).as_deref(), Some("MIT*"));
//! assert_eq!(license(Some("SEE LICENSE IN LICENSE.md")).as_deref(), Some("Custom: LICENSE.md"));
//! assert_eq!(license(Some("this is empty, hi")), None);
//! ```

pub mod config;
pub mod license;
pub mod models;

pub use license::classifier::{classify, license, license_value};
pub use license::normalize::LicenseError;
pub use models::Classification;
