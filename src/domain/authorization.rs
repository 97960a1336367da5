use serde::{Deserialize, Serialize};

/// Claims carried by a Jobly bearer token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// User context extracted from authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub is_admin: bool,
}

impl UserContext {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }
}

impl From<Claims> for UserContext {
    fn from(claims: Claims) -> Self {
        Self::new(claims.username, claims.is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_from_claims() {
        let claims = Claims {
            username: "admin".to_string(),
            is_admin: true,
            iat: 0,
            exp: None,
        };

        let ctx = UserContext::from(claims);
        assert_eq!(ctx, UserContext::new("admin", true));
    }

    #[test]
    fn test_claims_default_to_non_admin() {
        let claims: Claims = serde_json::from_str(r#"{"username":"u1","iat":0}"#).unwrap();
        assert!(!claims.is_admin);
        assert_eq!(claims.exp, None);
    }
}
