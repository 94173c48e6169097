use tracing::{debug, warn};

use crate::check::{classify, ValidityChecker};
use crate::models::{Profile, Validity};

use super::CheckOutcome;

/// Check each profile in order, one at a time.
pub async fn check_profiles(
    profiles: &[Profile],
    checker: &dyn ValidityChecker,
) -> Vec<CheckOutcome> {
    check_profiles_with(profiles, checker, |_| {}).await
}

/// Like [`check_profiles`], handing each outcome to `on_outcome` as soon as
/// its check finishes.
pub async fn check_profiles_with<F>(
    profiles: &[Profile],
    checker: &dyn ValidityChecker,
    mut on_outcome: F,
) -> Vec<CheckOutcome>
where
    F: FnMut(&CheckOutcome),
{
    let mut outcomes = Vec::with_capacity(profiles.len());

    for profile in profiles {
        let validity = classify(&checker.check(&profile.name).await);
        match &validity {
            Validity::Valid => debug!(profile = %profile.name, "Profile is valid"),
            Validity::InvalidCredentials => {
                warn!(profile = %profile.name, "Profile has invalid credentials")
            }
            Validity::UnexpectedError(error) => {
                warn!(profile = %profile.name, error = %error, "Profile check failed")
            }
        }
        let outcome = CheckOutcome {
            profile: profile.name.clone(),
            validity,
        };
        on_outcome(&outcome);
        outcomes.push(outcome);
    }

    outcomes
}
