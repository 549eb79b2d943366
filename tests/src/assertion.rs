//! Assertion types and builders for verifying step results.

use crate::{HarnessError, HarnessResult, World};
use sift_graph::{GraphRead, ListenableGraph};

/// Expectations about one named view, by element name.
#[derive(Debug, Default, Clone)]
pub struct ViewAssertion {
    pub vertices: Option<Vec<String>>,
    pub edges: Option<Vec<String>>,
    pub vertex_count: Option<usize>,
    pub edge_count: Option<usize>,
    pub contains: Vec<String>,
    pub excludes: Vec<String>,
}

impl ViewAssertion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expect exactly these vertices, in any order.
    pub fn vertices<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.vertices = Some(sorted(names));
        self
    }

    /// Expect exactly these edges, in any order.
    pub fn edges<'a>(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.edges = Some(sorted(names));
        self
    }

    pub fn vertex_count(mut self, n: usize) -> Self {
        self.vertex_count = Some(n);
        self
    }

    pub fn edge_count(mut self, n: usize) -> Self {
        self.edge_count = Some(n);
        self
    }

    /// Expect the named vertex to be held.
    pub fn contains(mut self, vertex: &str) -> Self {
        self.contains.push(vertex.to_string());
        self
    }

    /// Expect the named vertex not to be held.
    pub fn excludes(mut self, vertex: &str) -> Self {
        self.excludes.push(vertex.to_string());
        self
    }

    fn verify(&self, step: &str, view_name: &str, world: &World) -> HarnessResult<()> {
        let view = world.view(view_name)?;
        let fail = |message: String| {
            Err(HarnessError::assertion_failed(
                step,
                format!("view '{}': {}", view_name, message),
            ))
        };

        if let Some(ref expected) = self.vertices {
            let actual = world.vertex_names(view.vertex_set());
            if &actual != expected {
                return fail(format!("expected vertices {:?}, got {:?}", expected, actual));
            }
        }

        if let Some(ref expected) = self.edges {
            let actual = world.edge_names(view.edge_set());
            if &actual != expected {
                return fail(format!("expected edges {:?}, got {:?}", expected, actual));
            }
        }

        if let Some(expected) = self.vertex_count {
            if view.vertex_count() != expected {
                return fail(format!(
                    "expected {} vertices, got {}",
                    expected,
                    view.vertex_count()
                ));
            }
        }

        if let Some(expected) = self.edge_count {
            if view.edge_count() != expected {
                return fail(format!("expected {} edges, got {}", expected, view.edge_count()));
            }
        }

        for name in &self.contains {
            if !view.contains_vertex(world.v(name)?) {
                return fail(format!("expected vertex {} to be held", name));
            }
        }

        for name in &self.excludes {
            if view.contains_vertex(world.v(name)?) {
                return fail(format!("expected vertex {} to be absent", name));
            }
        }

        Ok(())
    }
}

/// A complete assertion for a step result.
#[derive(Debug, Default, Clone)]
pub struct Assertion {
    pub views: Vec<(String, ViewAssertion)>,

    // Base assertions
    pub base_vertex_count: Option<usize>,
    pub base_edge_count: Option<usize>,
    pub base_listener_count: Option<usize>,

    // Error assertions
    pub error: Option<String>,
}

impl Assertion {
    /// Create a new empty assertion.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add expectations for a named view.
    pub fn view(mut self, name: &str, build: impl FnOnce(ViewAssertion) -> ViewAssertion) -> Self {
        self.views.push((name.to_string(), build(ViewAssertion::new())));
        self
    }

    pub fn base_vertices(mut self, n: usize) -> Self {
        self.base_vertex_count = Some(n);
        self
    }

    pub fn base_edges(mut self, n: usize) -> Self {
        self.base_edge_count = Some(n);
        self
    }

    /// Expect `n` listeners registered on the base.
    pub fn base_listeners(mut self, n: usize) -> Self {
        self.base_listener_count = Some(n);
        self
    }

    /// Expect the step to fail with an error whose message contains `text`.
    pub fn error(mut self, text: &str) -> Self {
        self.error = Some(text.to_string());
        self
    }

    /// Verify the assertion against a step outcome.
    pub fn verify(&self, step: &str, result: &HarnessResult<()>, world: &World) -> HarnessResult<()> {
        if let Some(ref expected_error) = self.error {
            match result {
                Err(e) if e.to_string().contains(expected_error) => {}
                Err(e) => {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!("expected error containing '{}', got: {}", expected_error, e),
                    ))
                }
                Ok(()) => {
                    return Err(HarnessError::assertion_failed(
                        step,
                        format!(
                            "expected error containing '{}', but step succeeded",
                            expected_error
                        ),
                    ))
                }
            }
        } else if let Err(e) = result {
            return Err(HarnessError::assertion_failed(step, format!("step failed: {}", e)));
        }

        let base = world.base().borrow();
        if let Some(expected) = self.base_vertex_count {
            if base.vertex_count() != expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected {} base vertices, got {}", expected, base.vertex_count()),
                ));
            }
        }
        if let Some(expected) = self.base_edge_count {
            if base.edge_count() != expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected {} base edges, got {}", expected, base.edge_count()),
                ));
            }
        }
        if let Some(expected) = self.base_listener_count {
            if base.listener_count() != expected {
                return Err(HarnessError::assertion_failed(
                    step,
                    format!("expected {} base listeners, got {}", expected, base.listener_count()),
                ));
            }
        }
        drop(base);

        for (name, assertion) in &self.views {
            assertion.verify(step, name, world)?;
        }
        Ok(())
    }
}

fn sorted<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_graph::GraphConfig;
    use sift_subgraph::SubgraphConfig;

    fn world() -> World {
        let mut world = World::new(GraphConfig::directed());
        world.add_vertex("A").unwrap();
        world.add_vertex("B").unwrap();
        world.add_edge("AB", "A", "B").unwrap();
        world.open_view("sub", Some(&["B"]), None, SubgraphConfig::default()).unwrap();
        world
    }

    #[test]
    fn test_matching_assertion_passes() {
        let world = world();
        let assertion = Assertion::new()
            .base_vertices(2)
            .base_edges(1)
            .base_listeners(1)
            .view("sub", |v| v.vertices(["B"]).edges([]).contains("B").excludes("A"));

        assert!(assertion.verify("check", &Ok(()), &world).is_ok());
    }

    #[test]
    fn test_mismatch_reports_view() {
        let world = world();
        let assertion = Assertion::new().view("sub", |v| v.vertex_count(2));

        let err = assertion.verify("check", &Ok(()), &world).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Assertion failed in step 'check': view 'sub': expected 2 vertices, got 1"
        );
    }

    #[test]
    fn test_expected_error() {
        let world = world();
        let failed: HarnessResult<()> = Err(HarnessError::UnknownVertex("Z".into()));

        assert!(Assertion::new().error("Unknown vertex").verify("s", &failed, &world).is_ok());
        assert!(Assertion::new().error("Unknown vertex").verify("s", &Ok(()), &world).is_err());
        assert!(Assertion::new().verify("s", &failed, &world).is_err());
    }
}
