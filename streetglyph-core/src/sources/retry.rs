use log::{info, warn};

use super::{AreaQuery, StreetDataSource};
use crate::config::RetryPolicy;
use crate::error::Error;
use crate::model::RawWay;

/// Queries `source`, retrying transient failures with a fixed delay
///
/// At most `policy.max_attempts` queries are issued. Non-transient failures
/// surface immediately as [`Error::StreetDataRejected`]; running out of
/// attempts yields [`Error::StreetDataUnavailable`].
pub async fn fetch_with_retry<S: StreetDataSource>(
    source: &S,
    query: &AreaQuery,
    policy: &RetryPolicy,
) -> Result<Vec<RawWay>, Error> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match source.fetch_ways(query).await {
            Ok(ways) => {
                if attempt > 1 {
                    info!("Street data query succeeded on attempt {attempt}");
                }
                return Ok(ways);
            }
            Err(err) if !err.is_transient() => return Err(Error::StreetDataRejected(err)),
            Err(err) if attempt >= max_attempts => {
                return Err(Error::StreetDataUnavailable {
                    attempts: attempt,
                    last: err,
                });
            }
            Err(err) => {
                warn!(
                    "Street data attempt {attempt}/{max_attempts} failed ({err}), retrying in {:?}",
                    policy.delay()
                );
                tokio::time::sleep(policy.delay()).await;
            }
        }
    }
}
