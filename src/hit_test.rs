#![allow(clippy::float_cmp)]

use std::rc::Rc;

use super::*;

fn button(x: f64, y: f64, w: f64, h: f64) -> ButtonRegion {
    ButtonRegion { x, y, width: w, height: h, callback: Rc::new(|| {}) }
}

fn hit_origins(buttons: &[ButtonRegion], pt: Point) -> Vec<(f64, f64)> {
    hit_test(buttons, pt).map(|b| (b.x, b.y)).collect()
}

#[test]
fn no_buttons_no_hits() {
    assert_eq!(hit_test(&[], Point::new(0.0, 0.0)).count(), 0);
}

#[test]
fn point_in_single_button_hits_it() {
    let buttons = [button(0.0, 0.0, 10.0, 10.0), button(20.0, 0.0, 10.0, 10.0)];
    assert_eq!(hit_origins(&buttons, Point::new(25.0, 5.0)), [(20.0, 0.0)]);
}

#[test]
fn point_between_buttons_misses() {
    let buttons = [button(0.0, 0.0, 10.0, 10.0), button(20.0, 0.0, 10.0, 10.0)];
    assert!(hit_origins(&buttons, Point::new(15.0, 5.0)).is_empty());
}

#[test]
fn overlapping_buttons_all_hit_in_registration_order() {
    let buttons = [button(10.0, 10.0, 40.0, 40.0), button(0.0, 0.0, 100.0, 100.0), button(20.0, 20.0, 5.0, 5.0)];
    assert_eq!(hit_origins(&buttons, Point::new(22.0, 22.0)), [(10.0, 10.0), (0.0, 0.0), (20.0, 20.0)]);
}

#[test]
fn shared_edge_hits_both_neighbours() {
    let buttons = [button(0.0, 0.0, 10.0, 10.0), button(10.0, 0.0, 10.0, 10.0)];
    assert_eq!(hit_origins(&buttons, Point::new(10.0, 5.0)).len(), 2);
}

#[test]
fn zero_size_button_hits_only_its_origin() {
    let buttons = [button(5.0, 5.0, 0.0, 0.0)];
    assert_eq!(hit_origins(&buttons, Point::new(5.0, 5.0)).len(), 1);
    assert!(hit_origins(&buttons, Point::new(5.1, 5.0)).is_empty());
}
