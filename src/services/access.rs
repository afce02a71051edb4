use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccessError {
    #[error("role does not permit mutating operations")]
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Viewer,
}

impl Role {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "viewer" => Some(Role::Viewer),
            _ => None,
        }
    }
}

/// Capability required by every mutating core operation. Obtainable only for
/// roles that are allowed to write, so a viewer configuration cannot reach
/// the store-mutating code paths.
#[derive(Debug)]
pub struct WriteToken {
    _private: (),
}

impl WriteToken {
    pub fn for_role(role: Role) -> Result<Self, AccessError> {
        match role {
            Role::Admin => Ok(Self { _private: () }),
            Role::Viewer => Err(AccessError::ReadOnly),
        }
    }
}
