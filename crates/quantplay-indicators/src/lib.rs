//! Return-series indicators for quantplay.
//!
//! - [`Indicators`] - Beta and rolling beta against a benchmark
//! - [`sample_covariance`] - Sample covariance of paired observations
//!
//! `β = Cov(R_i, R_m) / Var(R_m)`

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quantplay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod beta;
mod moments;

pub use beta::Indicators;
pub use moments::sample_covariance;
