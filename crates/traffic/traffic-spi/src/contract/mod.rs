//! Contract module containing trait definitions for the estimator and allocator

mod congestion_estimator;
mod timing_allocator;

pub use congestion_estimator::CongestionEstimator;
pub use timing_allocator::TimingAllocator;
