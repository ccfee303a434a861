//! Failure reporting: details, collectors and the validation error
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

mod collector;
mod detail;
mod error;
mod report;

pub(crate) use collector::ConversionErrorCollector;
pub use collector::{ErrorCollector, ErrorCollectorFactory, StandardErrorCollector};
pub use detail::ErrorDetail;
pub use error::{LocationError, ValidationError};
pub use report::{ErrorReport, ReportEntry};
