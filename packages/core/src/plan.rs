//! Pure planning: everything a run will create, computed without touching
//! the filesystem.
//!
//! [`build_plan`] registers every person, resolves the friend graph and
//! serializes every document. The resulting [`Plan`] can be printed for a
//! dry run or handed to [`apply`](crate::writer::apply).

use std::fmt;
use std::path::PathBuf;

use crate::documents::document_graph;
use crate::error::GenerateError;
use crate::graph::Registry;
use crate::layout::Layout;
use crate::render::GraphSerializer;
use crate::types::{Blueprint, DocumentKind, Person};
use crate::validation::validate_blueprint;

/// A server root container, destroyed and recreated on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerContainer {
    pub name: String,
    pub location: String,
    pub path: PathBuf,
}

/// One serialized document and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDocument {
    pub kind: DocumentKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Everything created for one person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonContainer {
    pub id: String,
    pub webid: String,
    /// Directories in creation order; none may exist beforehand.
    pub dirs: Vec<PathBuf>,
    pub documents: Vec<PlannedDocument>,
}

/// The complete, ordered set of effects of a run.
///
/// Server containers come first, in blueprint order; people follow in
/// registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub servers: Vec<ServerContainer>,
    pub people: Vec<PersonContainer>,
}

/// Counts reported after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub servers: usize,
    pub people: usize,
    pub directories: usize,
    pub documents: usize,
}

impl Plan {
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            servers: self.servers.len(),
            people: self.people.len(),
            directories: self.people.iter().map(|p| p.dirs.len()).sum(),
            documents: self.people.iter().map(|p| p.documents.len()).sum(),
        }
    }

    pub fn person(&self, id: &str) -> Option<&PersonContainer> {
        self.people.iter().find(|p| p.id == id)
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} server{}, {} {}, {} directories, {} documents",
            self.servers,
            if self.servers == 1 { "" } else { "s" },
            self.people,
            if self.people == 1 { "person" } else { "people" },
            self.directories,
            self.documents
        )
    }
}

/// Lists every effect, one per line, as a dry run prints it.
///
/// ```text
/// recreate  out/ldpc-alpha  (alpha, http://a)
/// mkdir     out/ldpc-alpha/p1
/// write     out/ldpc-alpha/p1/little-sister/inbox  (inbox, 312 bytes)
/// ```
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.servers {
            writeln!(f, "recreate  {}  ({}, {})", s.path.display(), s.name, s.location)?;
        }
        for p in &self.people {
            for d in &p.dirs {
                writeln!(f, "mkdir     {}", d.display())?;
            }
            for doc in &p.documents {
                writeln!(
                    f,
                    "write     {}  ({}, {} bytes)",
                    doc.path.display(),
                    doc.kind,
                    doc.contents.len()
                )?;
            }
        }
        Ok(())
    }
}

/// Validate, register, resolve and serialize a blueprint.
///
/// Fails on the first malformed field, dangling friend reference or
/// serialization error. No filesystem access happens here.
pub fn build_plan(
    blueprint: &Blueprint,
    layout: &Layout,
    serializer: &dyn GraphSerializer,
) -> Result<Plan, GenerateError> {
    validate_blueprint(blueprint)?;

    let mut registry = Registry::new();
    let mut plan = Plan::default();

    for server in &blueprint.servers {
        registry.register_server(server);
        plan.servers.push(ServerContainer {
            name: server.name.clone(),
            location: server.location.clone(),
            path: layout.base_path(&server.name),
        });
    }

    // Friends may live on any server, so resolution waits for all of them.
    registry.resolve()?;

    for person in registry.people() {
        plan.people.push(plan_person(person, layout, serializer)?);
    }

    Ok(plan)
}

fn plan_person(
    person: &Person,
    layout: &Layout,
    serializer: &dyn GraphSerializer,
) -> Result<PersonContainer, GenerateError> {
    let pl = layout.person_layout(&person.server_name, &person.id, person.sensor.is_present());

    let mut targets = vec![(DocumentKind::Inbox, pl.inbox)];
    if let Some(sensor) = pl.sensor {
        targets.push((DocumentKind::Sensor, sensor));
    }
    targets.push((DocumentKind::Profile, pl.card));

    let mut documents = Vec::with_capacity(targets.len());
    for (kind, path) in targets {
        let Some(graph) = document_graph(person, kind) else {
            continue;
        };
        let contents = serializer
            .serialize(&graph)
            .map_err(|source| GenerateError::Serialize {
                document: path.display().to_string(),
                source,
            })?;
        documents.push(PlannedDocument {
            kind,
            path,
            contents,
        });
    }

    Ok(PersonContainer {
        id: person.id.clone(),
        webid: person.webid.clone(),
        dirs: pl.dirs,
        documents,
    })
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TurtleSerializer;
    use crate::types::{PersonDecl, ServerDecl};

    fn blueprint() -> Blueprint {
        Blueprint {
            servers: vec![
                ServerDecl {
                    name: "s1".into(),
                    location: "http://a".into(),
                    people: vec![PersonDecl {
                        id: "p1".into(),
                        name: "Ada".into(),
                        description: "d".into(),
                        friends: vec![],
                        sensor: true,
                    }],
                },
                ServerDecl {
                    name: "s2".into(),
                    location: "http://b".into(),
                    people: vec![PersonDecl {
                        id: "p2".into(),
                        name: "Bo".into(),
                        description: "d".into(),
                        friends: vec!["p1".into()],
                        sensor: false,
                    }],
                },
            ],
        }
    }

    #[test]
    fn plan_orders_servers_then_people() {
        let layout = Layout::new("/out", false);
        let plan = build_plan(&blueprint(), &layout, &TurtleSerializer).unwrap();

        assert_eq!(plan.servers[0].path, PathBuf::from("/out/ldpc-s1"));
        assert_eq!(plan.servers[1].path, PathBuf::from("/out/ldpc-s2"));
        let ids: Vec<&str> = plan.people.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn sensor_document_only_for_sensor_owner() {
        let layout = Layout::new("/out", false);
        let plan = build_plan(&blueprint(), &layout, &TurtleSerializer).unwrap();

        let p1 = plan.person("p1").unwrap();
        let kinds: Vec<DocumentKind> = p1.documents.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![DocumentKind::Inbox, DocumentKind::Sensor, DocumentKind::Profile]
        );
        assert_eq!(plan.person("p2").unwrap().documents.len(), 2);
        assert_eq!(
            plan.summary(),
            PlanSummary {
                servers: 2,
                people: 2,
                directories: 10,
                documents: 5
            }
        );
    }

    #[test]
    fn backlink_reaches_the_profile() {
        let layout = Layout::new("/out", true);
        let plan = build_plan(&blueprint(), &layout, &TurtleSerializer).unwrap();
        let card = plan
            .person("p1")
            .unwrap()
            .documents
            .iter()
            .find(|d| d.kind == DocumentKind::Profile)
            .unwrap();
        assert_eq!(card.path, PathBuf::from("/out/p1/profile/card"));
        assert!(card.contents.contains("<http://b/p2/profile/card#me>"));
    }

    #[test]
    fn dangling_friend_fails_planning() {
        let mut bp = blueprint();
        bp.servers[1].people[0].friends.push("ghost".into());
        let err = build_plan(&bp, &Layout::new("/out", false), &TurtleSerializer).unwrap_err();
        assert!(matches!(err, GenerateError::Reference(_)));
    }

    #[test]
    fn bad_location_is_a_serialization_failure() {
        let mut bp = blueprint();
        bp.servers[0].location = "http://a b".into();
        let err = build_plan(&bp, &Layout::new("/out", false), &TurtleSerializer).unwrap_err();
        assert!(matches!(err, GenerateError::Serialize { .. }));
    }

    #[test]
    fn display_lists_every_effect() {
        let plan = build_plan(&blueprint(), &Layout::new("/out", false), &TurtleSerializer).unwrap();
        let text = plan.to_string();
        assert_eq!(text.lines().filter(|l| l.starts_with("recreate")).count(), 2);
        assert!(text.contains("recreate  /out/ldpc-s2  (s2, http://b)"));
        assert_eq!(text.lines().filter(|l| l.starts_with("mkdir")).count(), 10);
        assert_eq!(text.lines().filter(|l| l.starts_with("write")).count(), 5);
    }
}
