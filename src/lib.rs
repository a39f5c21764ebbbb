//! Content-defined, line-granularity common-segment detection across
//! source trees: shred (C3) -> build cliques (C5) -> coalesce (C6),
//! serialized through the SHIF-A (C4) and SCF-B (C7) interchange formats,
//! with triviality (C8) and bookkeeping (C9) filters on top.
pub mod cancel;
pub mod clique;
pub mod coalesce;
pub mod eligibility;
pub mod error;
pub mod filters;
pub mod magicbits;
pub mod model;
pub mod normalize;
pub mod report_helpers;
pub mod reporter;
pub mod scf_b;
pub mod shif_a;
pub mod shred;
pub mod triviality;
pub mod walk;

pub use error::Error;

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_tests;
