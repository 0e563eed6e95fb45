//! Serialization of [`RdfGraph`]s into document text.
//!
//! The generator only depends on the [`GraphSerializer`] trait; any engine
//! that turns triples plus namespace bindings into bytes can be plugged in.
//! [`TurtleSerializer`] is the built-in engine.

use thiserror::Error;

use crate::rdf::vocab::RDF_TYPE;
use crate::rdf::{Namespace, RdfGraph, Term, Triple};

/// Errors returned when a graph cannot be serialized.
#[derive(Debug, Error, PartialEq)]
pub enum SerializeError {
    #[error("IRI {0:?} contains characters not allowed in Turtle")]
    InvalidIri(String),

    #[error("literal {0:?} used as subject or predicate")]
    LiteralPosition(String),
}

/// Turns a graph into the textual content of a document.
pub trait GraphSerializer {
    fn serialize(&self, graph: &RdfGraph) -> Result<String, SerializeError>;
}

/// Writes graphs as Turtle.
///
/// ```text
/// @prefix foaf: <http://xmlns.com/foaf/0.1/> .
///
/// <> a foaf:PersonalProfileDocument ;
///     foaf:maker <#me> ;
///     foaf:primaryTopic <#me> .
///
/// <#me> a foaf:Person ;
///     foaf:knows <http://b/p2/profile/card#me>, <http://c/p3/profile/card#me> .
/// ```
///
/// Subjects appear in first-seen order, predicates are grouped per subject in
/// first-seen order, and objects of a repeated predicate are comma-joined.
/// Duplicate triples are written as they occur.
#[derive(Debug, Clone, Copy, Default)]
pub struct TurtleSerializer;

impl GraphSerializer for TurtleSerializer {
    fn serialize(&self, graph: &RdfGraph) -> Result<String, SerializeError> {
        let prefixes = graph.prefixes();
        let mut out = String::new();

        for ns in prefixes {
            check_iri(ns.iri)?;
            out.push_str(&format!("@prefix {}: <{}> .\n", ns.prefix, ns.iri));
        }

        for (subject, predicates) in group(graph.triples()) {
            out.push('\n');
            out.push_str(&subject_term(subject, prefixes)?);

            for (i, (predicate, objects)) in predicates.iter().enumerate() {
                out.push_str(if i == 0 { " " } else { " ;\n    " });
                out.push_str(&predicate_term(predicate, prefixes)?);
                for (k, object) in objects.iter().enumerate() {
                    out.push_str(if k == 0 { " " } else { ", " });
                    out.push_str(&object_term(object, prefixes)?);
                }
            }
            out.push_str(" .\n");
        }

        Ok(out)
    }
}

// --- helpers -----------------------------------------------------------------

type PredicateGroup<'a> = Vec<(&'a Term, Vec<&'a Term>)>;

// Subject -> predicate -> objects, all in first-seen order.
fn group(triples: &[Triple]) -> Vec<(&Term, PredicateGroup<'_>)> {
    let mut subjects: Vec<(&Term, PredicateGroup<'_>)> = Vec::new();

    for t in triples {
        let slot = match subjects.iter().position(|(s, _)| *s == &t.subject) {
            Some(i) => i,
            None => {
                subjects.push((&t.subject, Vec::new()));
                subjects.len() - 1
            }
        };
        let predicates = &mut subjects[slot].1;
        match predicates.iter_mut().find(|(p, _)| *p == &t.predicate) {
            Some((_, objects)) => objects.push(&t.object),
            None => predicates.push((&t.predicate, vec![&t.object])),
        }
    }

    subjects
}

fn subject_term(term: &Term, prefixes: &[Namespace]) -> Result<String, SerializeError> {
    match term {
        Term::Iri(iri) => iri_term(iri, prefixes),
        Term::Literal(s) => Err(SerializeError::LiteralPosition(s.clone())),
    }
}

fn predicate_term(term: &Term, prefixes: &[Namespace]) -> Result<String, SerializeError> {
    match term {
        Term::Iri(iri) if iri == RDF_TYPE => Ok("a".to_string()),
        Term::Iri(iri) => iri_term(iri, prefixes),
        Term::Literal(s) => Err(SerializeError::LiteralPosition(s.clone())),
    }
}

fn object_term(term: &Term, prefixes: &[Namespace]) -> Result<String, SerializeError> {
    match term {
        Term::Iri(iri) => iri_term(iri, prefixes),
        Term::Literal(s) => Ok(literal(s)),
    }
}

fn iri_term(iri: &str, prefixes: &[Namespace]) -> Result<String, SerializeError> {
    check_iri(iri)?;
    for ns in prefixes {
        if let Some(local) = iri.strip_prefix(ns.iri) {
            if is_local_name(local) {
                return Ok(format!("{}:{}", ns.prefix, local));
            }
        }
    }
    Ok(format!("<{}>", iri))
}

// IRIREF excludes controls, space, and <>"{}|^`\
fn check_iri(iri: &str) -> Result<(), SerializeError> {
    let bad = iri
        .chars()
        .any(|c| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\'));
    if bad {
        Err(SerializeError::InvalidIri(iri.to_string()))
    } else {
        Ok(())
    }
}

// Conservative PN_LOCAL: ASCII letters, digits, '_' and '-', not starting with '-'.
fn is_local_name(s: &str) -> bool {
    !s.is_empty()
        && !s.starts_with('-')
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

// --- tests -------------------------------------------------------------------
