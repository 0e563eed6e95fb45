//! A minimal RDF model: terms, triples, and graphs with prefix bindings.
//!
//! Graphs here are ordered multisets: triples keep insertion order and
//! duplicates are retained. Serialization lives in [`crate::render`].

/// An RDF term in subject, predicate or object position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI, absolute or relative to the document (`""`, `"#me"`).
    Iri(String),
    /// A plain string literal.
    Literal(String),
}

impl Term {
    pub fn iri(s: impl Into<String>) -> Self {
        Term::Iri(s.into())
    }

    pub fn literal(s: impl Into<String>) -> Self {
        Term::Literal(s.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Term,
    pub object: Term,
}

/// A namespace IRI with a preferred prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: &'static str,
    pub iri: &'static str,
}

impl Namespace {
    /// A term inside this namespace.
    pub fn term(&self, local: &str) -> Term {
        Term::Iri(format!("{}{}", self.iri, local))
    }
}

/// A set of triples plus the namespace bindings used when serializing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RdfGraph {
    prefixes: Vec<Namespace>,
    triples: Vec<Triple>,
}

impl RdfGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a namespace. Binding the same prefix twice keeps the latest IRI.
    pub fn bind(&mut self, ns: Namespace) {
        self.prefixes.retain(|p| p.prefix != ns.prefix);
        self.prefixes.push(ns);
    }

    pub fn add(&mut self, subject: Term, predicate: Term, object: Term) {
        self.triples.push(Triple {
            subject,
            predicate,
            object,
        });
    }

    pub fn prefixes(&self) -> &[Namespace] {
        &self.prefixes
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Number of triples with the given predicate.
    pub fn count_predicate(&self, predicate: &Term) -> usize {
        self.triples.iter().filter(|t| &t.predicate == predicate).count()
    }

    /// All objects of `(subject, predicate, ?)`.
    pub fn objects(&self, subject: &Term, predicate: &Term) -> Vec<&Term> {
        self.triples
            .iter()
            .filter(|t| &t.subject == subject && &t.predicate == predicate)
            .map(|t| &t.object)
            .collect()
    }
}

/// Vocabularies used by the generated documents.
pub mod vocab {
    use super::Namespace;

    pub const RDF: Namespace = Namespace {
        prefix: "rdf",
        iri: "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
    };

    pub const DCTERMS: Namespace = Namespace {
        prefix: "dcterms",
        iri: "http://purl.org/dc/terms/",
    };

    /// DCTERMS bound under the shorter `dc` prefix.
    pub const DC: Namespace = Namespace {
        prefix: "dc",
        iri: DCTERMS.iri,
    };

    pub const FOAF: Namespace = Namespace {
        prefix: "foaf",
        iri: "http://xmlns.com/foaf/0.1/",
    };

    pub const SIOC: Namespace = Namespace {
        prefix: "sioc",
        iri: "http://rdfs.org/sioc/ns#",
    };

    /// Semantic Sensor Network ontology.
    pub const SSN: Namespace = Namespace {
        prefix: "ssn",
        iri: "http://purl.oclc.org/NET/ssnx/ssn#",
    };

    pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

#[cfg(test)]
mod tests {
    use super::vocab::*;
    use super::*;

    #[test]
    fn namespace_term() {
        assert_eq!(
            FOAF.term("knows"),
            Term::iri("http://xmlns.com/foaf/0.1/knows")
        );
        assert_eq!(RDF.term("type"), Term::iri(RDF_TYPE));
    }

    #[test]
    fn duplicates_are_retained() {
        let mut g = RdfGraph::new();
        let me = Term::iri("#me");
        g.add(me.clone(), FOAF.term("knows"), Term::iri("http://b/x"));
        g.add(me.clone(), FOAF.term("knows"), Term::iri("http://b/x"));
        assert_eq!(g.len(), 2);
        assert_eq!(g.count_predicate(&FOAF.term("knows")), 2);
        assert_eq!(g.objects(&me, &FOAF.term("knows")).len(), 2);
    }

    #[test]
    fn objects_outlive_query_terms() {
        let mut g = RdfGraph::new();
        g.add(Term::iri(""), FOAF.term("maker"), Term::iri("#me"));
        let makers = g.objects(&Term::iri(""), &FOAF.term("maker"));
        assert_eq!(makers, vec![&Term::iri("#me")]);
    }

    #[test]
    fn rebinding_prefix_replaces() {
        let mut g = RdfGraph::new();
        g.bind(DCTERMS);
        g.bind(Namespace {
            prefix: "dcterms",
            iri: "http://example.org/",
        });
        assert_eq!(g.prefixes().len(), 1);
        assert_eq!(g.prefixes()[0].iri, "http://example.org/");
    }
}
