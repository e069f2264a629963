//! Form-encoded request bodies
//!
//! Every request is a flat list of form fields. The `cmd` field selects the
//! operation, a few operation-specific fields follow, and the fixed protocol
//! fields `lang` and `app` close the body:
//!
//! | Operation      | cmd            | username | password | iprange | ip  |
//! |----------------|----------------|----------|----------|---------|-----|
//! | Open           | open           | yes      | yes      | yes/no  |     |
//! | Close          | close          |          |          |         |     |
//! | CloseAll       | closeall       | yes      | yes      |         |     |
//! | GetConnections | getconnections | yes      | yes      |         |     |
//! | DisconnectIp   | disconnect     | yes      | yes      |         | yes |

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use zeroize::Zeroize;

use crate::error::ProtocolError;
use crate::operation::Operation;
use crate::secret::Password;

/// Account credentials
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    /// Gateway account name
    pub user: String,
    /// Gateway account password
    pub password: Password,
    /// Connect to the fee network (`iprange=yes`) when opening a session
    pub fee: bool,
}

impl Credentials {
    /// Create credentials for the free address range
    pub fn new(user: impl Into<String>, password: impl Into<Password>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
            fee: false,
        }
    }

    /// Select the fee network
    pub fn with_fee(mut self, fee: bool) -> Self {
        self.fee = fee;
        self
    }
}

/// An ordered set of form fields for one gateway request
///
/// Field values are wiped when the body is dropped since the body carries the
/// account password.
#[derive(Clone, PartialEq, Eq)]
pub struct RequestBody {
    fields: Vec<(&'static str, String)>,
}

impl RequestBody {
    /// Build the body for `operation`
    ///
    /// `ip` is only read for [`Operation::DisconnectIp`], where it is required
    /// and must not be empty.
    pub fn build(
        operation: Operation,
        credentials: &Credentials,
        ip: Option<&str>,
        app_id: &str,
    ) -> Result<Self, ProtocolError> {
        let mut fields = vec![("cmd", operation.keyword().to_string())];

        if operation.requires_credentials() {
            fields.push(("username", credentials.user.clone()));
            fields.push(("password", credentials.password.expose().to_string()));
        }

        match operation {
            Operation::Open => {
                let iprange = if credentials.fee { "yes" } else { "no" };
                fields.push(("iprange", iprange.to_string()));
            }
            Operation::DisconnectIp => {
                let ip = ip
                    .filter(|ip| !ip.is_empty())
                    .ok_or(ProtocolError::MissingField("ip"))?;
                fields.push(("ip", ip.to_string()));
            }
            Operation::Close | Operation::CloseAll | Operation::GetConnections => {}
        }

        fields.push(("lang", String::new()));
        fields.push(("app", app_id.to_string()));

        Ok(Self { fields })
    }

    /// Value of a field, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Field names in wire order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the body has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialized as a sequence of pairs, which is what form encoders accept.
impl Serialize for RequestBody {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            seq.serialize_element(&(name, value.as_str()))?;
        }
        seq.end()
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.fields {
            if *name == "password" {
                map.entry(name, &"[REDACTED]");
            } else {
                map.entry(name, value);
            }
        }
        map.finish()
    }
}

impl Drop for RequestBody {
    fn drop(&mut self) {
        for (_, value) in &mut self.fields {
            value.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APP: &str = "test-app";

    fn creds() -> Credentials {
        Credentials::new("alice", "s3cret")
    }

    fn names(body: &RequestBody) -> Vec<&'static str> {
        body.field_names().collect()
    }

    #[test]
    fn test_open_fields() {
        let body = RequestBody::build(Operation::Open, &creds(), None, APP).unwrap();
        assert_eq!(
            names(&body),
            ["cmd", "username", "password", "iprange", "lang", "app"]
        );
        assert_eq!(body.get("cmd"), Some("open"));
        assert_eq!(body.get("username"), Some("alice"));
        assert_eq!(body.get("password"), Some("s3cret"));
        assert_eq!(body.get("lang"), Some(""));
        assert_eq!(body.get("app"), Some(APP));
    }

    #[test]
    fn test_fee_maps_to_iprange() {
        let free = RequestBody::build(Operation::Open, &creds(), None, APP).unwrap();
        assert_eq!(free.get("iprange"), Some("no"));

        let fee = RequestBody::build(Operation::Open, &creds().with_fee(true), None, APP).unwrap();
        assert_eq!(fee.get("iprange"), Some("yes"));
    }

    #[test]
    fn test_fee_ignored_outside_open() {
        let creds = creds().with_fee(true);
        for op in [Operation::CloseAll, Operation::GetConnections] {
            let body = RequestBody::build(op, &creds, None, APP).unwrap();
            assert_eq!(body.get("iprange"), None);
        }
    }

    #[test]
    fn test_close_has_no_credentials() {
        let body = RequestBody::build(Operation::Close, &creds(), None, APP).unwrap();
        assert_eq!(names(&body), ["cmd", "lang", "app"]);
        assert_eq!(body.get("cmd"), Some("close"));
    }

    #[test]
    fn test_closeall_and_getconnections_fields() {
        let body = RequestBody::build(Operation::CloseAll, &creds(), None, APP).unwrap();
        assert_eq!(names(&body), ["cmd", "username", "password", "lang", "app"]);
        assert_eq!(body.get("cmd"), Some("closeall"));

        let body = RequestBody::build(Operation::GetConnections, &creds(), None, APP).unwrap();
        assert_eq!(names(&body), ["cmd", "username", "password", "lang", "app"]);
        assert_eq!(body.get("cmd"), Some("getconnections"));
    }

    #[test]
    fn test_disconnect_ip_fields() {
        let body =
            RequestBody::build(Operation::DisconnectIp, &creds(), Some("10.0.0.8"), APP).unwrap();
        assert_eq!(
            names(&body),
            ["cmd", "username", "password", "ip", "lang", "app"]
        );
        assert_eq!(body.get("cmd"), Some("disconnect"));
        assert_eq!(body.get("ip"), Some("10.0.0.8"));
    }

    #[test]
    fn test_disconnect_ip_requires_ip() {
        let missing = RequestBody::build(Operation::DisconnectIp, &creds(), None, APP);
        assert!(matches!(missing, Err(ProtocolError::MissingField("ip"))));

        let empty = RequestBody::build(Operation::DisconnectIp, &creds(), Some(""), APP);
        assert!(matches!(empty, Err(ProtocolError::MissingField("ip"))));
    }

    #[test]
    fn test_ip_ignored_outside_disconnect() {
        let body = RequestBody::build(Operation::Open, &creds(), Some("10.0.0.8"), APP).unwrap();
        assert_eq!(body.get("ip"), None);
    }

    #[test]
    fn test_debug_redacts_password() {
        let body = RequestBody::build(Operation::Open, &creds(), None, APP).unwrap();
        let debug = format!("{:?}", body);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("alice"));
    }

    #[test]
    fn test_serializes_as_pairs() {
        let body = RequestBody::build(Operation::Close, &creds(), None, APP).unwrap();
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"[["cmd","close"],["lang",""],["app","test-app"]]"#);
    }
}
