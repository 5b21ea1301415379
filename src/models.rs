use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/login`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Profile returned by `GET /api/user/me`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub display_name: String,
}

/// One application invitation as listed by `GET /api/invitation/application`.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct Invitation {
    pub id: String,
    pub status: String,
}

impl Invitation {
    /// Label shown in the settings list.
    pub fn label(&self) -> String {
        format!("{} ({})", self.id, self.status)
    }
}

/// Whether an invitation can be redeemed once or many times.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvitationCategory {
    #[default]
    Unique,
    Permanent,
}

impl InvitationCategory {
    pub const ALL: [InvitationCategory; 2] = [InvitationCategory::Unique, InvitationCategory::Permanent];

    /// Wire name, also used as `<option>` value.
    pub fn as_str(self) -> &'static str {
        match self {
            InvitationCategory::Unique => "UNIQUE",
            InvitationCategory::Permanent => "PERMANENT",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_uses_camel_case_fields() {
        let user: User = serde_json::from_str(r#"{"id":"u-1","displayName":"Alice","login":"alice"}"#).unwrap();
        assert_eq!(user, User { id: "u-1".into(), display_name: "Alice".into() });
    }

    #[test]
    fn invitation_label() {
        let inv = Invitation { id: "abc".into(), status: "CREATED".into() };
        assert_eq!(inv.label(), "abc (CREATED)");
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(serde_json::to_string(&InvitationCategory::Permanent).unwrap(), "\"PERMANENT\"");
        assert_eq!(InvitationCategory::parse("unique"), Some(InvitationCategory::Unique));
        assert_eq!(InvitationCategory::parse("forever"), None);
        assert_eq!(InvitationCategory::default(), InvitationCategory::Unique);
    }
}
