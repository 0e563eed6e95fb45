//! Core data types for soliddata.
//!
//! Two layers live here: the blueprint declarations ([`Blueprint`],
//! [`ServerDecl`], [`PersonDecl`]) exactly as they are read from JSON or YAML,
//! and the resolved [`Person`] record the registry builds from them.

use serde::{Deserialize, Serialize};

/// A declarative description of a small social network hosted across servers.
///
/// ```json
/// { "servers": [
///     { "name": "alpha", "location": "http://a",
///       "people": [ { "id": "p1", "name": "Ada", "description": "…", "friends": [] } ] }
/// ] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blueprint {
    pub servers: Vec<ServerDecl>,
}

/// One LDP server. Each server becomes a root container on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerDecl {
    /// Short name; used for the `ldpc-{name}` container directory.
    pub name: String,

    /// Base URL every WebID on this server is built from, e.g. `"http://a"`.
    pub location: String,

    pub people: Vec<PersonDecl>,
}

/// A person as declared in the blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonDecl {
    /// Identifier, unique across all servers of a blueprint.
    pub id: String,

    pub name: String,

    pub description: String,

    /// Ids of declared friends, possibly living on other servers.
    ///
    /// Order and duplicates are preserved.
    pub friends: Vec<String>,

    /// Whether the person owns a sensor document.
    #[serde(default)]
    pub sensor: bool,
}

/// Whether a person owns a sensor document, and where it lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorPresence {
    NoSensor,
    HasSensor { sensor_url: String },
}

impl SensorPresence {
    pub fn is_present(&self) -> bool {
        matches!(self, SensorPresence::HasSensor { .. })
    }

    /// The sensor document URL, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            SensorPresence::NoSensor => None,
            SensorPresence::HasSensor { sensor_url } => Some(sensor_url),
        }
    }
}

/// A person registered against the server that hosts them.
///
/// `friend_webids` is empty until [`Registry::resolve`](crate::Registry::resolve)
/// has run; afterwards it holds the symmetric closure of the friend relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub description: String,
    pub declared_friends: Vec<String>,
    pub sensor: SensorPresence,
    pub server_name: String,
    pub server_location: String,
    pub webid: String,
    pub friend_webids: Vec<String>,
}

impl Person {
    /// Attach a declaration to the server it was declared on.
    pub fn from_decl(decl: &PersonDecl, server: &ServerDecl) -> Self {
        let sensor = if decl.sensor {
            SensorPresence::HasSensor {
                sensor_url: sensor_url(&server.location, &decl.id),
            }
        } else {
            SensorPresence::NoSensor
        };

        Self {
            id: decl.id.clone(),
            name: decl.name.clone(),
            description: decl.description.clone(),
            declared_friends: decl.friends.clone(),
            sensor,
            server_name: server.name.clone(),
            server_location: server.location.clone(),
            webid: webid_url(&server.location, &decl.id),
            friend_webids: Vec::new(),
        }
    }

    /// True when `id` appears among this person's declared friends.
    pub fn declares(&self, id: &str) -> bool {
        self.declared_friends.iter().any(|f| f == id)
    }
}

/// `{location}/{id}/profile/card#me`
pub fn webid_url(location: &str, id: &str) -> String {
    format!("{location}/{id}/profile/card#me")
}

/// `{location}/{id}/little-sister/sensor#sensor`
pub fn sensor_url(location: &str, id: &str) -> String {
    format!("{location}/{id}/little-sister/sensor#sensor")
}

/// The three RDF documents a person's container can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// `profile/card`, the WebID profile.
    Profile,
    /// `little-sister/inbox`
    Inbox,
    /// `little-sister/sensor`, only for people with a sensor.
    Sensor,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Profile => write!(f, "profile"),
            DocumentKind::Inbox => write!(f, "inbox"),
            DocumentKind::Sensor => write!(f, "sensor"),
        }
    }
}

/// Parses a [`DocumentKind`] from its lowercase name.
impl std::str::FromStr for DocumentKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(DocumentKind::Profile),
            "inbox" => Ok(DocumentKind::Inbox),
            "sensor" => Ok(DocumentKind::Sensor),
            _ => Err(format!(
                "unknown document kind {:?}; expected one of: profile, inbox, sensor",
                s
            )),
        }
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webid_and_sensor_urls() {
        assert_eq!(webid_url("http://a", "p1"), "http://a/p1/profile/card#me");
        assert_eq!(
            sensor_url("http://a", "p1"),
            "http://a/p1/little-sister/sensor#sensor"
        );
    }

    #[test]
    fn sensor_defaults_to_false() {
        let json = r#"{ "id": "p1", "name": "Ada", "description": "d", "friends": ["p2"] }"#;
        let decl: PersonDecl = serde_json::from_str(json).unwrap();
        assert!(!decl.sensor);
        assert_eq!(decl.friends, vec!["p2".to_string()]);
    }

    #[test]
    fn missing_friends_is_a_parse_error() {
        let json = r#"{ "id": "p1", "name": "Ada", "description": "d" }"#;
        assert!(serde_json::from_str::<PersonDecl>(json).is_err());
    }

    #[test]
    fn from_decl_attaches_server() {
        let server = ServerDecl {
            name: "alpha".into(),
            location: "http://a".into(),
            people: vec![],
        };
        let decl = PersonDecl {
            id: "p1".into(),
            name: "Ada".into(),
            description: "d".into(),
            friends: vec![],
            sensor: true,
        };
        let p = Person::from_decl(&decl, &server);
        assert_eq!(p.server_name, "alpha");
        assert_eq!(p.webid, "http://a/p1/profile/card#me");
        assert_eq!(p.sensor.url(), Some("http://a/p1/little-sister/sensor#sensor"));
        assert!(p.friend_webids.is_empty());
    }

    #[test]
    fn document_kind_parses() {
        assert_eq!("inbox".parse::<DocumentKind>(), Ok(DocumentKind::Inbox));
        assert!("card".parse::<DocumentKind>().is_err());
        assert_eq!(DocumentKind::Sensor.to_string(), "sensor");
    }
}
