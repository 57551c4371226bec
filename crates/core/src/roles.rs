//! User roles and the post-status rules that depend on them.
//!
//! Post status transitions are permissive: any status may be set from any
//! other. Roles only narrow which statuses a selector offers.

use serde::{Deserialize, Serialize};

use crate::status::PostStatus;

/// Role reported by the identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Agency staff with full access.
    Admin,
    /// A client user; sees only their own brand. Unknown roles land here.
    #[default]
    #[serde(other)]
    User,
}

/// Statuses offered in the status selector for `role`.
///
/// Clients cannot mark a post as posted.
pub fn selectable_statuses(role: Role) -> Vec<PostStatus> {
    PostStatus::ALL
        .iter()
        .copied()
        .filter(|s| role == Role::Admin || *s != PostStatus::Posted)
        .collect()
}

/// Whether `role` may set a post to `to`. The current status is not
/// consulted; every transition is allowed.
pub fn can_set_status(role: Role, _from: PostStatus, to: PostStatus) -> bool {
    selectable_statuses(role).contains(&to)
}

/// Whether a client may approve a post in `status`.
///
/// Approval is offered only before scheduling.
pub fn can_client_approve(status: PostStatus) -> bool {
    !matches!(
        status,
        PostStatus::Approved | PostStatus::Scheduled | PostStatus::Posted
    )
}
