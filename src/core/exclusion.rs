use crate::models::{ProfileSummary, RelationSnapshot};

/// How invisible profiles are treated by discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvisibilityPolicy {
    /// Invisible profiles never appear to anyone
    #[default]
    Strict,
    /// Invisible profiles still appear to users they mutually liked
    MutualLikeOverride,
}

/// Hard exclusion rules applied before any filter matching
///
/// A candidate is excluded when it is the requester, is deleted or
/// administratively blocked, has no location, shares an active block edge with
/// the requester in either direction, or was complained about by the requester.
/// Invisibility is handled according to `policy`.
pub fn is_excluded(
    requester: &ProfileSummary,
    candidate: &ProfileSummary,
    relations: &RelationSnapshot,
    policy: InvisibilityPolicy,
) -> bool {
    let me = requester.session_id.as_str();
    let them = candidate.session_id.as_str();

    if me == them || candidate.is_deleted || candidate.is_blocked || candidate.location.is_none() {
        return true;
    }

    if relations
        .blocks
        .iter()
        .any(|edge| edge.links(me, them) || edge.links(them, me))
    {
        return true;
    }

    // Complaints only hide the target from the complainant
    if relations.complaints.iter().any(|edge| edge.links(me, them)) {
        return true;
    }

    if candidate.is_invisible {
        return match policy {
            InvisibilityPolicy::Strict => true,
            InvisibilityPolicy::MutualLikeOverride => !is_mutual_like(me, them, relations),
        };
    }

    false
}

/// Both users have an active like towards each other
pub fn is_mutual_like(a: &str, b: &str, relations: &RelationSnapshot) -> bool {
    let forward = relations.likes.iter().any(|edge| edge.links(a, b));
    let backward = relations.likes.iter().any(|edge| edge.links(b, a));
    forward && backward
}
