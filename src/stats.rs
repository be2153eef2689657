//! # Stats
//!
//! $$
//! \rho_{xy}=\frac{\operatorname{cov}(x,y)}{\sigma_x\sigma_y}
//! $$
//!
pub mod correlation;

pub use correlation::pearson;
pub use correlation::round_to;
pub use correlation::sample_covariance;
