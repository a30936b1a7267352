/// File export of scores, trends, and reports.
pub mod export;
