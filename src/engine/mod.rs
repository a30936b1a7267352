/// Community Impact Index composite scoring.
pub mod cii;
/// Cleaner-hours percentile selection.
pub mod cleaner_hours;
pub mod normalize;
/// ROI projection for operator and cloud levers.
pub mod roi;
pub mod summary;
pub mod types;
