//! Global symbol dependency graph and cycle detection
//!
//! Nodes are the non-parameter symbols declared at global scope, which
//! covers both plain globals and function heads. An edge A -> B exists
//! when B's name appears as a whole word in one of A's assignment
//! contexts. Reads inside comparisons do not create edges: the right
//! side of a comparison operator is stripped from the context line
//! first, so `f[x_] := If[state == idle, ...]` does not depend on
//! `idle`.
//!
//! Strongly connected components are computed with two iterative DFS
//! passes, so each cycle is reported exactly once regardless of how
//! many members it has. Self recursion is ordinary in this language and
//! never reported.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::semantic::table::SymbolTable;
use crate::text::{clean_line, contains_word};

/// Above this many symbols the graph is skipped entirely; quadratic
/// context scanning on generated files is not worth the findings.
pub const MAX_GRAPH_SYMBOLS: usize = 200;

static COMPARISON_RHS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(===|=!=|==|!=|>=|<=|>|<)\s*[^,;\]\)}]*").expect("Invalid regex pattern")
});

pub struct DependencyGraph {
    names: Vec<String>,
    edges: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Builds the graph from the global non-parameter symbols in the
    /// table, in declaration order. Returns an empty graph when the file
    /// declares more than [`MAX_GRAPH_SYMBOLS`] symbols.
    pub fn from_table(table: &SymbolTable) -> Self {
        if table.all_symbols().count() > MAX_GRAPH_SYMBOLS {
            tracing::debug!(
                limit = MAX_GRAPH_SYMBOLS,
                "dependency graph skipped, too many symbols"
            );
            return Self {
                names: Vec::new(),
                edges: Vec::new(),
            };
        }

        let nodes: Vec<&crate::semantic::symbols::Symbol> = table
            .global_symbols()
            .into_iter()
            .filter(|s| !s.is_parameter)
            .collect();

        let names: Vec<String> = nodes.iter().map(|s| s.name.clone()).collect();
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_str(), i))
            .collect();

        let mut edges: Vec<HashSet<usize>> = vec![HashSet::new(); names.len()];

        for (source, symbol) in nodes.iter().enumerate() {
            for assignment in &symbol.assignments {
                let cleaned = clean_line(&assignment.context);
            let context = COMPARISON_RHS.replace_all(&cleaned, "");

                for (name, &target) in &index {
                    if target != source && contains_word(&context, name) {
                        edges[source].insert(target);
                    }
                }
            }
        }

        let edges = edges
            .into_iter()
            .map(|set| {
                let mut targets: Vec<usize> = set.into_iter().collect();
                targets.sort_unstable();
                targets
            })
            .collect();

        Self { names, edges }
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn depends_on(&self, from: &str, to: &str) -> bool {
        let Some(f) = self.names.iter().position(|n| n == from) else {
            return false;
        };
        let Some(t) = self.names.iter().position(|n| n == to) else {
            return false;
        };
        self.edges[f].contains(&t)
    }

    /// Cycles as strongly connected components with more than one
    /// member, each listed once with members in declaration order.
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let n = self.names.len();
        if n == 0 {
            return Vec::new();
        }

        // First pass: finish order
        let mut finish_order = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut stack = vec![(start, 0usize)];
            visited[start] = true;
            while let Some(&mut (node, ref mut next)) = stack.last_mut() {
                if *next < self.edges[node].len() {
                    let child = self.edges[node][*next];
                    *next += 1;
                    if !visited[child] {
                        visited[child] = true;
                        stack.push((child, 0));
                    }
                } else {
                    finish_order.push(node);
                    stack.pop();
                }
            }
        }

        // Second pass: components on the transposed graph
        let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (from, targets) in self.edges.iter().enumerate() {
            for &to in targets {
                reverse[to].push(from);
            }
        }

        let mut component = vec![usize::MAX; n];
        let mut current = 0;
        for &start in finish_order.iter().rev() {
            if component[start] != usize::MAX {
                continue;
            }
            let mut stack = vec![start];
            component[start] = current;
            while let Some(node) = stack.pop() {
                for &prev in &reverse[node] {
                    if component[prev] == usize::MAX {
                        component[prev] = current;
                        stack.push(prev);
                    }
                }
            }
            current += 1;
        }

        let mut members: Vec<Vec<usize>> = vec![Vec::new(); current];
        for node in 0..n {
            members[component[node]].push(node);
        }

        members
            .into_iter()
            .filter(|m| m.len() > 1)
            .map(|m| m.into_iter().map(|i| self.names[i].clone()).collect())
            .collect()
    }
}
