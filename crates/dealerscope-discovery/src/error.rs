use thiserror::Error;

/// Terminal failures of a discovery run.
///
/// Per-call provider failures and per-record persistence failures are
/// absorbed inside the pipeline and reflected in the outcome's counts; only
/// the two cases below abort the run.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The anchor postal code could not be resolved to a coordinate. This is
    /// an input problem, not a transient fault, so there is no retry.
    #[error("could not geocode postal code \"{postal_code}\"")]
    GeocodeFailed { postal_code: String },

    /// A non-recoverable store failure, e.g. the summary row insert.
    #[error(transparent)]
    Db(#[from] dealerscope_db::DbError),
}
