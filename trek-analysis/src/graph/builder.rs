//! Weighted graph construction from the static link table plus realized
//! player transitions.
//!
//! Game paths occasionally traverse edges absent from the scraped link
//! table (redirects, the GNU-FDL footer link). Those are tolerated: logged,
//! added to the graph, and kept in an unrecognized-edge set. Unknown
//! article names become real nodes.
//!
//! Two backtrack accounting conventions exist and are selected explicitly,
//! each with its own checked weight-sum identity:
//!
//! - [`BackEdgePolicy::Exclude`]: only clean forward transitions count.
//!   `sum(w) == sum(raw_len) - 2 * sum(back_clicks) - n_paths`
//! - [`BackEdgePolicy::Include`]: a synthetic back node absorbs one edge
//!   event per back click, attributed to the article popped from.
//!   `sum(w) == sum(raw_len) - sum(back_clicks) - n_paths`

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::warn;

use trek_core::errors::GraphError;
use trek_core::types::collections::{FxHashMap, FxHashSet};
use trek_core::types::BACK_TOKEN;

use crate::corpus::NormalizedPath;
use crate::loader::{Article, Link};

/// How back clicks are accounted in the weighted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackEdgePolicy {
    /// No back node; a back click only removes the popped forward edge.
    #[default]
    Exclude,
    /// A synthetic back node with one (popped-from -> back) edge event per
    /// back click.
    Include,
}

/// The directed article graph with realized transition counts.
#[derive(Debug)]
pub struct WeightedGraph {
    graph: DiGraph<String, u32>,
    node_index: FxHashMap<String, NodeIndex>,
    back_node: Option<NodeIndex>,
    unrecognized: FxHashSet<(String, String)>,
    path_only_nodes: usize,
    static_link_count: usize,
    policy: BackEdgePolicy,
}

impl WeightedGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Sum of all edge weights: the total transition-event count.
    pub fn weight_sum(&self) -> u64 {
        self.graph
            .edge_references()
            .map(|e| u64::from(*e.weight()))
            .sum()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    /// Realized transition count for an edge, `None` if the edge does not
    /// exist at all.
    pub fn weight(&self, source: &str, target: &str) -> Option<u32> {
        let &a = self.node_index.get(source)?;
        let &b = self.node_index.get(target)?;
        self.graph
            .find_edge(a, b)
            .map(|edge| self.graph[edge])
    }

    pub fn in_degree(&self, name: &str) -> Option<usize> {
        let &node = self.node_index.get(name)?;
        Some(self.graph.edges_directed(node, Direction::Incoming).count())
    }

    pub fn out_degree(&self, name: &str) -> Option<usize> {
        let &node = self.node_index.get(name)?;
        Some(self.graph.edges_directed(node, Direction::Outgoing).count())
    }

    /// Edges observed in paths but absent from the static link table.
    pub fn unrecognized_edges(&self) -> &FxHashSet<(String, String)> {
        &self.unrecognized
    }

    /// Nodes created for path tokens unknown to the article table.
    pub fn path_only_node_count(&self) -> usize {
        self.path_only_nodes
    }

    pub fn policy(&self) -> BackEdgePolicy {
        self.policy
    }

    /// All (source, target, weight) edges, back edges included.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
                *e.weight(),
            )
        })
    }
}

struct GraphBuilder {
    graph: DiGraph<String, u32>,
    node_index: FxHashMap<String, NodeIndex>,
    back_node: Option<NodeIndex>,
    unrecognized: FxHashSet<(String, String)>,
    path_only_nodes: usize,
    extra_back_init: usize,
    policy: BackEdgePolicy,
}

impl GraphBuilder {
    /// Get or create a node; unknown names count as path-only nodes and,
    /// under the Include policy, get their zero back edge immediately so
    /// the edge-count postcondition stays exact.
    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        self.path_only_nodes += 1;
        if let Some(back) = self.back_node {
            self.graph.add_edge(idx, back, 0);
            self.extra_back_init += 1;
        }
        idx
    }

    fn bump(&mut self, a: NodeIndex, b: NodeIndex) {
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] += 1,
            None => {
                self.unrecognized
                    .insert((self.graph[a].clone(), self.graph[b].clone()));
                self.graph.add_edge(a, b, 1);
            }
        }
    }
}

/// Build the weighted graph over `articles` from `links` and the replayed
/// transitions of `paths`.
pub fn build_graph(
    articles: &[Article],
    links: &[Link],
    paths: &[NormalizedPath],
    policy: BackEdgePolicy,
) -> Result<WeightedGraph, GraphError> {
    let mut graph: DiGraph<String, u32> =
        DiGraph::with_capacity(articles.len() + 1, links.len());
    let mut node_index: FxHashMap<String, NodeIndex> = FxHashMap::default();

    for article in articles {
        let idx = graph.add_node(article.name.clone());
        node_index.insert(article.name.clone(), idx);
    }
    let back_node = match policy {
        BackEdgePolicy::Include => {
            let idx = graph.add_node(BACK_TOKEN.to_string());
            node_index.insert(BACK_TOKEN.to_string(), idx);
            Some(idx)
        }
        BackEdgePolicy::Exclude => None,
    };

    // Zero-weight edges for the static topology; link rows are a set, so
    // duplicates collapse.
    let mut static_link_count = 0usize;
    for link in links {
        let (Some(&a), Some(&b)) = (node_index.get(&link.source), node_index.get(&link.target))
        else {
            warn!(
                source = %link.source,
                target = %link.target,
                "link references an unknown article; skipped"
            );
            continue;
        };
        if graph.find_edge(a, b).is_none() {
            graph.add_edge(a, b, 0);
            static_link_count += 1;
        }
    }
    if let Some(back) = back_node {
        for article in articles {
            let idx = node_index[&article.name];
            graph.add_edge(idx, back, 0);
        }
    }

    let mut builder = GraphBuilder {
        graph,
        node_index,
        back_node,
        unrecognized: FxHashSet::default(),
        path_only_nodes: 0,
        extra_back_init: 0,
        policy,
    };

    for path in paths {
        for pair in path.clean.windows(2) {
            let a = builder.node(&pair[0]);
            let b = builder.node(&pair[1]);
            builder.bump(a, b);
        }
        if let Some(back) = builder.back_node {
            for origin in &path.back_origins {
                let o = builder.node(origin);
                match builder.graph.find_edge(o, back) {
                    Some(edge) => builder.graph[edge] += 1,
                    // Unreachable: every node gets its zero back edge at
                    // creation under the Include policy.
                    None => {
                        builder.graph.add_edge(o, back, 1);
                        builder.extra_back_init += 1;
                    }
                }
            }
        }
    }

    if !builder.unrecognized.is_empty() {
        warn!(
            count = builder.unrecognized.len(),
            "edges present in paths but not in the link table"
        );
    }

    let result = WeightedGraph {
        graph: builder.graph,
        node_index: builder.node_index,
        back_node: builder.back_node,
        unrecognized: builder.unrecognized,
        path_only_nodes: builder.path_only_nodes,
        static_link_count,
        policy,
    };

    check_postconditions(&result, articles.len(), builder.extra_back_init, paths)?;
    Ok(result)
}

/// Node-count, edge-count, and weight-sum identities. A violation means
/// the build itself is wrong.
fn check_postconditions(
    graph: &WeightedGraph,
    article_count: usize,
    extra_back_init: usize,
    paths: &[NormalizedPath],
) -> Result<(), GraphError> {
    let back_nodes = usize::from(graph.back_node.is_some());
    let expected_nodes = article_count + graph.path_only_nodes + back_nodes;
    if graph.node_count() != expected_nodes {
        return Err(GraphError::NodeCountMismatch {
            expected: expected_nodes,
            found: graph.node_count(),
        });
    }

    let back_edges = match graph.policy {
        BackEdgePolicy::Include => article_count + extra_back_init,
        BackEdgePolicy::Exclude => 0,
    };
    let expected_edges = graph.static_link_count + graph.unrecognized.len() + back_edges;
    if graph.edge_count() != expected_edges {
        return Err(GraphError::EdgeCountMismatch {
            expected: expected_edges,
            found: graph.edge_count(),
        });
    }

    let total_raw: u64 = paths.iter().map(|p| p.raw_length() as u64).sum();
    let total_back: u64 = paths.iter().map(|p| p.back_clicks() as u64).sum();
    let n_paths = paths.len() as u64;
    let expected_weight = match graph.policy {
        BackEdgePolicy::Exclude => total_raw - 2 * total_back - n_paths,
        BackEdgePolicy::Include => total_raw - total_back - n_paths,
    };
    if graph.weight_sum() != expected_weight {
        return Err(GraphError::WeightSumMismatch {
            expected: expected_weight,
            found: graph.weight_sum(),
        });
    }

    Ok(())
}
