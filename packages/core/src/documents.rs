//! RDF graphs for the documents in a person's container.
//!
//! Every document is described relative to itself: the document is the empty
//! IRI `<>` and its primary topic is a fragment of it (`#me`, `#inbox`,
//! `#sensor`). Nothing here touches the filesystem.

use crate::rdf::vocab::{DC, DCTERMS, FOAF, RDF, SIOC, SSN};
use crate::rdf::{RdfGraph, Term};
use crate::types::{DocumentKind, Person};

const DOC: &str = "";
const ME: &str = "#me";
const INBOX: &str = "#inbox";
const SENSOR: &str = "#sensor";

/// Placeholder literal for sensor readings; no live data is modelled.
pub const NO_READING: &str = "n/a";

/// The WebID profile (`profile/card`).
pub fn profile_graph(person: &Person) -> RdfGraph {
    let mut g = RdfGraph::new();
    g.bind(RDF);
    g.bind(DCTERMS);
    g.bind(FOAF);
    g.bind(SIOC);

    let doc = Term::iri(DOC);
    let me = Term::iri(ME);

    g.add(
        doc.clone(),
        DCTERMS.term("title"),
        Term::literal(format!("WebID profile of {}", person.name)),
    );
    g.add(doc.clone(), RDF.term("type"), FOAF.term("PersonalProfileDocument"));
    g.add(doc.clone(), FOAF.term("maker"), me.clone());
    g.add(doc, FOAF.term("primaryTopic"), me.clone());

    g.add(me.clone(), RDF.term("type"), FOAF.term("Person"));
    g.add(me.clone(), FOAF.term("name"), Term::literal(&person.name));
    g.add(
        me.clone(),
        DCTERMS.term("description"),
        Term::literal(&person.description),
    );

    if let Some(url) = person.sensor.url() {
        g.add(me.clone(), SIOC.term("container_of"), Term::iri(url));
    }

    for webid in &person.friend_webids {
        g.add(me.clone(), FOAF.term("knows"), Term::iri(webid));
    }

    g
}

/// The inbox (`little-sister/inbox`).
pub fn inbox_graph(person: &Person) -> RdfGraph {
    let mut g = RdfGraph::new();
    g.bind(RDF);
    g.bind(DCTERMS);
    g.bind(FOAF);
    g.bind(SIOC);

    let doc = Term::iri(DOC);
    let inbox = Term::iri(INBOX);

    g.add(
        doc.clone(),
        DCTERMS.term("title"),
        Term::literal(format!("Inbox of {}", person.name)),
    );
    g.add(doc.clone(), FOAF.term("maker"), Term::iri(&person.webid));
    g.add(doc, FOAF.term("primaryTopic"), inbox.clone());

    g.add(inbox, RDF.term("type"), SIOC.term("Space"));

    g
}

/// The sensor document (`little-sister/sensor`).
///
/// Independent of who owns it: observation and value are placeholders.
pub fn sensor_graph() -> RdfGraph {
    let mut g = RdfGraph::new();
    g.bind(SSN);
    g.bind(DC);
    g.bind(FOAF);

    let doc = Term::iri(DOC);
    let sensor = Term::iri(SENSOR);

    g.add(doc.clone(), RDF.term("type"), FOAF.term("Document"));
    g.add(doc.clone(), DC.term("title"), Term::literal("Sensor document"));
    g.add(doc, FOAF.term("primaryTopic"), sensor.clone());

    g.add(sensor.clone(), RDF.term("type"), SSN.term("Sensor"));
    g.add(sensor.clone(), SSN.term("observes"), Term::literal(NO_READING));
    g.add(sensor, SSN.term("hasValue"), Term::literal(NO_READING));

    g
}

/// The graph for one document kind, or `None` when the person has no sensor
/// and `kind` is [`DocumentKind::Sensor`].
pub fn document_graph(person: &Person, kind: DocumentKind) -> Option<RdfGraph> {
    match kind {
        DocumentKind::Profile => Some(profile_graph(person)),
        DocumentKind::Inbox => Some(inbox_graph(person)),
        DocumentKind::Sensor => person.sensor.is_present().then(sensor_graph),
    }
}

// --- tests -------------------------------------------------------------------
