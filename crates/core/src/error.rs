use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AdbirtError {
    #[error("daily_ad_budget must be a finite, non-negative number (got {0})")]
    InvalidBudget(f64),

    #[error("target_country must name at least one country")]
    EmptyTargetCountry,

    #[error("unknown subscription tier: '{0}'")]
    UnknownTier(String),

    #[error(
        "unknown agent selection: '{0}' (expected one of conversion_prediction, \
         budget_allocation, bid_optimization, ad_personalization)"
    )]
    UnknownCapability(String),
}
