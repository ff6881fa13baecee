use analytics::AnalyticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Unknown report type '{0}'")]
    UnknownReport(String),

    #[error("The selected filters result in no data; adjust the classification or side filters")]
    EmptyResult,

    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
}
