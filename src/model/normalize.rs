//! Result normalization: matched triples into a deduplicated graph view
//!
//! Nodes are keyed by stringified identity in an insertion-ordered map. The first
//! representation of an id wins; later occurrences with different labels or
//! properties are ignored. Edges are never deduplicated: one edge per triple, in
//! input order.

use indexmap::map::Entry;
use indexmap::IndexMap;

use super::{EdgeView, GraphView, NodeView};
use crate::store::{StoreNode, StoreRelationship};

/// One matched `(start)-[relationship]-(end)` row
#[derive(Debug, Clone, Copy)]
pub struct Triple<'a> {
    pub start: &'a StoreNode,
    pub relationship: &'a StoreRelationship,
    pub end: &'a StoreNode,
}

impl<'a> Triple<'a> {
    pub fn new(
        start: &'a StoreNode,
        relationship: &'a StoreRelationship,
        end: &'a StoreNode,
    ) -> Self {
        Self {
            start,
            relationship,
            end,
        }
    }
}

/// Build the graph view for an ordered sequence of triples
pub fn normalize<'a, I>(triples: I) -> GraphView
where
    I: IntoIterator<Item = Triple<'a>>,
{
    let triples = triples.into_iter();
    let (lower, _) = triples.size_hint();

    let mut nodes: IndexMap<String, NodeView> = IndexMap::with_capacity(lower * 2);
    let mut edges = Vec::with_capacity(lower);

    for triple in triples {
        let from = insert_first_seen(&mut nodes, triple.start);
        let to = insert_first_seen(&mut nodes, triple.end);

        edges.push(EdgeView {
            from,
            to,
            label: triple.relationship.rel_type.clone(),
        });
    }

    GraphView {
        nodes: nodes.into_values().collect(),
        edges,
    }
}

fn insert_first_seen(nodes: &mut IndexMap<String, NodeView>, node: &StoreNode) -> String {
    let id = node.identity.to_string();
    if let Entry::Vacant(slot) = nodes.entry(id.clone()) {
        slot.insert(NodeView::from(node));
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rel(id: i64, start: &StoreNode, end: &StoreNode, rel_type: &str) -> StoreRelationship {
        StoreRelationship::new(id, start.identity, end.identity, rel_type)
    }

    #[test]
    fn test_shared_endpoint_is_emitted_once() {
        let a = StoreNode::new(1, &["Person"]);
        let b = StoreNode::new(2, &["Person"]);
        let c = StoreNode::new(3, &["Person"]);
        let ab = rel(10, &a, &b, "KNOWS");
        let ac = rel(11, &a, &c, "KNOWS");

        let graph = normalize([Triple::new(&a, &ab, &b), Triple::new(&a, &ac, &c)]);

        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(
            graph.edges,
            vec![
                EdgeView {
                    from: "1".into(),
                    to: "2".into(),
                    label: "KNOWS".into(),
                },
                EdgeView {
                    from: "1".into(),
                    to: "3".into(),
                    label: "KNOWS".into(),
                },
            ]
        );
    }

    #[test]
    fn test_first_seen_representation_wins() {
        let a1 = StoreNode::new(1, &["A"]).with_property("p", 1);
        let a2 = StoreNode::new(1, &["A", "Stale"]).with_property("p", 2);
        let b = StoreNode::new(2, &["B"]);
        let c = StoreNode::new(3, &["C"]);
        let r1 = rel(10, &a1, &b, "R");
        let r2 = rel(11, &a2, &c, "R2");

        let graph = normalize([Triple::new(&a1, &r1, &b), Triple::new(&a2, &r2, &c)]);

        let a = &graph.nodes[0];
        assert_eq!(a.id, "1");
        assert_eq!(a.labels, vec!["A"]);
        assert_eq!(a.properties.get("p"), Some(&json!(1)));
    }

    #[test]
    fn test_repeated_triples_keep_every_edge() {
        let a = StoreNode::new(1, &[]);
        let b = StoreNode::new(2, &[]);
        let r = rel(10, &a, &b, "LINKS");

        let graph = normalize([
            Triple::new(&a, &r, &b),
            Triple::new(&a, &r, &b),
            Triple::new(&b, &r, &a),
        ]);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.edges[2].from, "2");
        assert_eq!(graph.edges[2].to, "1");
    }

    #[test]
    fn test_self_loop() {
        let a = StoreNode::new(5, &["Loop"]);
        let r = rel(1, &a, &a, "SELF");

        let graph = normalize([Triple::new(&a, &r, &a)]);

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_no_triples() {
        let graph = normalize(std::iter::empty());
        assert!(graph.is_empty());
    }
}
