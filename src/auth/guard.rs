//! Authorization guard.
//!
//! Pure decision functions over an authenticated identity. Handlers call
//! these before mutating state and map a denial to the HTTP status the
//! route calls for.

use std::fmt;

use crate::company::Company;
use crate::db::Role;

use super::token::Claims;

/// The caller of a request, as established by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub role: Role,
}

impl From<&Claims> for Identity {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The caller does not own the resource.
    NotOwner,
    /// The caller's role may not perform the operation.
    WrongRole { required: Role },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotOwner => f.write_str("not the owner of this resource"),
            DenialReason::WrongRole { required } => write!(f, "requires role {required}"),
        }
    }
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied(DenialReason),
}

impl Decision {
    /// Check if the request may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }

    /// Convert into a `Result`, keeping the denial reason.
    pub fn into_result(self) -> Result<(), DenialReason> {
        match self {
            Decision::Allowed => Ok(()),
            Decision::Denied(reason) => Err(reason),
        }
    }
}

/// Allow only the identity that owns a resource.
///
/// # Examples
///
/// ```
/// use jobportal::auth::guard::{authorize_owner, Decision, DenialReason, Identity};
/// use jobportal::Role;
///
/// let me = Identity { id: 1, role: Role::Recruiter };
/// assert_eq!(authorize_owner(&me, 1), Decision::Allowed);
/// assert_eq!(authorize_owner(&me, 2), Decision::Denied(DenialReason::NotOwner));
/// ```
pub fn authorize_owner(identity: &Identity, owner_id: i64) -> Decision {
    if identity.id == owner_id {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::NotOwner)
    }
}

/// Allow posting a job under `company` only for the company's owner.
pub fn authorize_job_creation(identity: &Identity, company: &Company) -> Decision {
    authorize_owner(identity, company.owner_id)
}

/// Allow only identities registered with `required`.
pub fn require_role(identity: &Identity, required: Role) -> Decision {
    if identity.role == required {
        Decision::Allowed
    } else {
        Decision::Denied(DenialReason::WrongRole { required })
    }
}
