use std::collections::HashMap;

use thiserror::Error;

use crate::types::{Blueprint, Person, ServerDecl};

/// A declared friend id with no registered person behind it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("person {person:?} declares unknown friend {friend:?}")]
pub struct ReferenceError {
    pub person: String,
    pub friend: String,
}

/// Every [`Person`] of a blueprint, keyed by id across all servers.
///
/// The orchestrator builds one registry per run, resolves it, reads it while
/// emitting documents, then drops it.
///
/// People are kept in registration order. A duplicate id replaces the earlier
/// person in place (last write wins).
#[derive(Debug, Default)]
pub struct Registry {
    people: Vec<Person>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every person of every server of a blueprint.
    pub fn from_blueprint(blueprint: &Blueprint) -> Self {
        let mut r = Self::new();
        for server in &blueprint.servers {
            r.register_server(server);
        }
        r
    }

    /// Register the people of one server, attaching its name and location.
    pub fn register_server(&mut self, server: &ServerDecl) {
        for decl in &server.people {
            self.add(Person::from_decl(decl, server));
        }
    }

    /// Insert a person. If a person with the same `id` already exists, it is replaced.
    pub fn add(&mut self, person: Person) {
        match self.index.get(&person.id) {
            Some(&slot) => {
                tracing::warn!(
                    id = %person.id,
                    previous = %self.people[slot].server_name,
                    replacement = %person.server_name,
                    "duplicate person id; keeping the later declaration"
                );
                self.people[slot] = person;
            }
            None => {
                self.index.insert(person.id.clone(), self.people.len());
                self.people.push(person);
            }
        }
    }

    /// Retrieve a person by id.
    pub fn get(&self, id: &str) -> Option<&Person> {
        self.index.get(id).map(|&i| &self.people[i])
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Iterate over all people in registration order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    /// Fill in `friend_webids` for every person.
    ///
    /// Each declared edge `p -> f` adds `f`'s WebID to `p`, and adds `p`'s
    /// WebID to `f` unless `f` declares `p` itself (in which case `f`'s own
    /// pass adds it). The result is symmetric. Duplicate declarations are
    /// not collapsed.
    ///
    /// Must only be called once all servers are registered, since friends may
    /// live on a server registered later.
    pub fn resolve(&mut self) -> Result<(), ReferenceError> {
        for i in 0..self.people.len() {
            let id = self.people[i].id.clone();
            let webid = self.people[i].webid.clone();
            let declared = self.people[i].declared_friends.clone();

            for fid in &declared {
                let j = *self.index.get(fid).ok_or_else(|| ReferenceError {
                    person: id.clone(),
                    friend: fid.clone(),
                })?;

                let friend_webid = self.people[j].webid.clone();
                self.people[i].friend_webids.push(friend_webid);

                // backlink
                if !self.people[j].declares(&id) {
                    self.people[j].friend_webids.push(webid.clone());
                }
            }
        }

        Ok(())
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PersonDecl;

    fn person(id: &str, friends: &[&str]) -> PersonDecl {
        PersonDecl {
            id: id.into(),
            name: id.to_uppercase(),
            description: format!("{id} description"),
            friends: friends.iter().map(|f| f.to_string()).collect(),
            sensor: false,
        }
    }

    fn server(name: &str, location: &str, people: Vec<PersonDecl>) -> ServerDecl {
        ServerDecl {
            name: name.into(),
            location: location.into(),
            people,
        }
    }

    fn webids(r: &Registry, id: &str) -> Vec<String> {
        r.get(id).unwrap().friend_webids.clone()
    }

    #[test]
    fn cross_server_backlink() {
        let bp = Blueprint {
            servers: vec![
                server("s1", "http://a", vec![person("p1", &[])]),
                server("s2", "http://b", vec![person("p2", &["p1"])]),
            ],
        };
        let mut r = Registry::from_blueprint(&bp);
        r.resolve().unwrap();

        assert_eq!(webids(&r, "p1"), vec!["http://b/p2/profile/card#me"]);
        assert_eq!(webids(&r, "p2"), vec!["http://a/p1/profile/card#me"]);
    }

    #[test]
    fn reciprocal_declaration_is_not_doubled() {
        let bp = Blueprint {
            servers: vec![server(
                "s1",
                "http://a",
                vec![person("p1", &["p2"]), person("p2", &["p1"])],
            )],
        };
        let mut r = Registry::from_blueprint(&bp);
        r.resolve().unwrap();

        assert_eq!(webids(&r, "p1"), vec!["http://a/p2/profile/card#me"]);
        assert_eq!(webids(&r, "p2"), vec!["http://a/p1/profile/card#me"]);
    }

    #[test]
    fn symmetric_for_every_declared_edge() {
        let bp = Blueprint {
            servers: vec![
                server("s1", "http://a", vec![person("a", &["b", "c"]), person("b", &[])]),
                server("s2", "http://b", vec![person("c", &["b"]), person("d", &["a"])]),
            ],
        };
        let mut r = Registry::from_blueprint(&bp);
        r.resolve().unwrap();

        for p in r.people() {
            for fid in &p.declared_friends {
                let f = r.get(fid).unwrap();
                assert!(p.friend_webids.contains(&f.webid), "{} -> {}", p.id, f.id);
                assert!(f.friend_webids.contains(&p.webid), "{} <- {}", p.id, f.id);
            }
        }
        assert_eq!(webids(&r, "b").len(), 2);
    }

    #[test]
    fn dangling_reference_fails() {
        let bp = Blueprint {
            servers: vec![server("s1", "http://a", vec![person("p1", &["ghost"])])],
        };
        let mut r = Registry::from_blueprint(&bp);
        assert_eq!(
            r.resolve(),
            Err(ReferenceError {
                person: "p1".into(),
                friend: "ghost".into()
            })
        );
    }

    #[test]
    fn duplicate_id_keeps_later_registration() {
        let bp = Blueprint {
            servers: vec![
                server("s1", "http://a", vec![person("p1", &[])]),
                server("s2", "http://b", vec![person("p1", &[])]),
            ],
        };
        let r = Registry::from_blueprint(&bp);
        assert_eq!(r.len(), 1);
        let p = r.get("p1").unwrap();
        assert_eq!(p.server_name, "s2");
        assert_eq!(p.webid, "http://b/p1/profile/card#me");
    }

    #[test]
    fn duplicate_declared_friend_is_not_deduplicated() {
        let bp = Blueprint {
            servers: vec![server(
                "s1",
                "http://a",
                vec![person("p1", &["p2", "p2"]), person("p2", &[])],
            )],
        };
        let mut r = Registry::from_blueprint(&bp);
        r.resolve().unwrap();
        assert_eq!(webids(&r, "p1").len(), 2);
        assert_eq!(webids(&r, "p2").len(), 2);
    }

    #[test]
    fn registration_order_is_kept() {
        let bp = Blueprint {
            servers: vec![
                server("s1", "http://a", vec![person("z", &[]), person("a", &[])]),
                server("s2", "http://b", vec![person("m", &[])]),
            ],
        };
        let r = Registry::from_blueprint(&bp);
        let ids: Vec<&str> = r.people().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }
}
