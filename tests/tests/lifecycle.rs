//! Subscription lifecycle of views.

use pretty_assertions::assert_eq;
use sift_tests::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

mod detach {
    use super::*;

    pub fn scenario() -> Scenario {
        Scenario::new("detach")
            .vertices(["A", "B", "C"])
            .edge("AB", "A", "B")
            .edge("BC", "B", "C")
            .view("live", None, None)
            .view("closed", None, None)
            .step(
                "detach_closed",
                |w| {
                    assert!(w.detach_view("closed")?);
                    Ok(())
                },
                |a| a.base_listeners(1).view("live", |v| v.vertex_count(3)),
            )
            .step("remove_b", |w| w.remove_base_vertex("B").map(drop), |a| {
                a.base_listeners(1)
                    .view("live", |v| v.vertices(["A", "C"]).edges([]))
            })
            .step(
                "closed_view_is_gone",
                |w| w.view("closed").map(drop),
                |a| a.error("Unknown view"),
            )
    }

    #[test]
    fn test_detached_view_leaves_base() {
        scenario().run().unwrap();
    }
}

// ========== TEST: detach_unregisters_once ==========
#[test]
fn test_detach_unregisters_once() {
    // GIVEN two views of one base
    let base = Rc::new(RefCell::new(Graph::directed()));
    let a = base.borrow_mut().add_vertex();
    let view = Subgraph::new(base.clone(), None, None);
    let other = Subgraph::new(base.clone(), None, None);

    // WHEN detach one
    assert!(view.detach());

    // THEN its registration is gone AND the other still follows the base
    assert_eq!(base.borrow().listener_count(), 1);
    base.borrow_mut().remove_vertex(a);
    assert_eq!(other.vertex_count(), 0);
    assert!(other.detach());
    assert_eq!(base.borrow().listener_count(), 0);
}

// ========== TEST: views_register_one_listener_each ==========
#[test]
fn test_views_register_one_listener_each() {
    let base = Rc::new(RefCell::new(Graph::directed()));
    let views: Vec<_> = (0..3).map(|_| Subgraph::new(base.clone(), None, None)).collect();
    assert_eq!(base.borrow().listener_count(), 3);

    drop(views);
    assert_eq!(base.borrow().listener_count(), 0);
}

// ========== TEST: drop_while_base_borrowed_is_pruned_later ==========
#[test]
fn test_drop_while_base_borrowed_is_pruned_later() {
    // GIVEN a view dropped while the base is borrowed
    let base = Rc::new(RefCell::new(Graph::directed()));
    let a = base.borrow_mut().add_vertex();
    let view = Subgraph::new(base.clone(), None, None);
    {
        let _guard = base.borrow();
        drop(view);
    }

    // THEN the registration stays behind until the next mutation
    assert_eq!(base.borrow().listener_count(), 1);
    assert!(base.borrow_mut().remove_vertex(a));
    assert_eq!(base.borrow().vertex_count(), 0);
    assert_eq!(base.borrow().listener_count(), 0);
}

// ========== TEST: registry_does_not_grow_with_dropped_views ==========
#[test]
fn test_registry_does_not_grow_with_dropped_views() {
    // GIVEN views repeatedly dropped while the base is borrowed
    let base = Rc::new(RefCell::new(Graph::directed()));
    for _ in 0..5 {
        let view = Subgraph::new(base.clone(), None, None);
        let _guard = base.borrow();
        drop(view);
    }

    // THEN registering a new listener prunes the dead ones
    let live = Subgraph::new(base.clone(), None, None);
    assert_eq!(base.borrow().listener_count(), 1);

    // AND additions prune too
    drop(live);
    let _kept = Subgraph::new(base.clone(), None, None);
    {
        let view = Subgraph::new(base.clone(), None, None);
        let _guard = base.borrow();
        drop(view);
    }
    assert_eq!(base.borrow().listener_count(), 2);
    base.borrow_mut().add_vertex();
    assert_eq!(base.borrow().listener_count(), 1);
}

// ========== TEST: base_outlives_views ==========
#[test]
fn test_base_outlives_views() {
    let base = Rc::new(RefCell::new(Graph::undirected()));
    let (a, b) = {
        let mut graph = base.borrow_mut();
        (graph.add_vertex(), graph.add_vertex())
    };
    base.borrow_mut().add_edge(a, b).unwrap();

    {
        let view = Subgraph::new(base.clone(), Some(&HashSet::from([a])), None);
        assert_eq!(view.degree_of(a), Ok(0));
        assert_eq!(view.to_string(), format!("([{}], [])", a));
    }

    assert_eq!(Rc::strong_count(&base), 1);
    assert_eq!(base.borrow().degree_of(a), Ok(1));
}
