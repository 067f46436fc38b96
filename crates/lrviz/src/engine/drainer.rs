//! One reveal step: move the next pending transition into the diagram.

use log::{trace, warn};

use lrviz_core::{automaton::ItemSetNode, geometry::Point, identifier::Id};

use super::{DiagramState, PendingQueues, RevealAnomaly, RevealDelta, RevealOutcome};

/// Where an endpoint of the edge being revealed comes from.
enum Endpoint {
    Visible,
    Pending,
    Missing,
}

fn locate(id: Id, queues: &PendingQueues, diagram: &DiagramState) -> Endpoint {
    if diagram.contains_node(id) {
        Endpoint::Visible
    } else if queues.contains_node(id) {
        Endpoint::Pending
    } else {
        Endpoint::Missing
    }
}

/// Reveals the first pending edge together with any endpoint not yet visible.
///
/// Both endpoints are checked before anything is mutated apart from the
/// dequeue itself, so a step either applies completely or only consumes a
/// rejected edge.
pub(super) fn reveal_next_edge(
    queues: &mut PendingQueues,
    diagram: &mut DiagramState,
    node_offset: f32,
) -> RevealOutcome {
    let Some(edge) = queues.pop_edge() else {
        return RevealOutcome::NothingToReveal;
    };

    for endpoint in [edge.source(), edge.target()] {
        if let Endpoint::Missing = locate(endpoint, queues, diagram) {
            let anomaly = RevealAnomaly::DanglingEndpoint {
                edge: edge.id(),
                endpoint,
            };
            warn!(edge:% = edge.id(), endpoint:% = endpoint; "Dropping transition with dangling endpoint");
            return RevealOutcome::Rejected(anomaly);
        }
    }

    let mut nodes_added = Vec::with_capacity(2);

    let source_was_visible = diagram.contains_node(edge.source());
    if !source_was_visible {
        materialize(edge.source(), None, queues, diagram, &mut nodes_added);
    }

    // A self-loop's target became visible with its source above.
    if !diagram.contains_node(edge.target()) {
        let placement = if source_was_visible {
            diagram
                .node(edge.source())
                .map(|source| source.position().offset(node_offset))
        } else {
            None
        };
        materialize(edge.target(), placement, queues, diagram, &mut nodes_added);
    }

    trace!(
        edge:% = edge.id(),
        nodes_added = nodes_added.len();
        "Transition revealed"
    );
    diagram.push_edge(edge.clone());

    RevealOutcome::Revealed(RevealDelta { nodes_added, edge })
}

/// Moves a pending node into the diagram, optionally overriding its position.
fn materialize(
    id: Id,
    placement: Option<Point>,
    queues: &mut PendingQueues,
    diagram: &mut DiagramState,
    nodes_added: &mut Vec<ItemSetNode>,
) {
    // Presence was checked by the caller.
    let Some(mut node) = queues.remove_node(id) else {
        return;
    };
    if let Some(position) = placement {
        node.set_position(position);
    }
    nodes_added.push(node.clone());
    diagram.push_node(node);
}
