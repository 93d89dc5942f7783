use crate::Role;

/// Decide whether a set of granted roles satisfies an allowed set.
///
/// Plain function, no closure factories: callers pass the resolved user's
/// roles and the roles an endpoint accepts. An empty `allowed` slice means
/// the endpoint only requires authentication, not a particular role.
pub fn authorize(granted: &[Role], allowed: &[Role]) -> bool {
    allowed.is_empty() || granted.iter().any(|role| allowed.contains(role))
}
