#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::input::Point;
use crate::scene::ButtonRegion;

/// Every button containing `pt`, in registration order.
///
/// There is no early exit: overlapping buttons under the point all match.
pub fn hit_test(buttons: &[ButtonRegion], pt: Point) -> impl Iterator<Item = &ButtonRegion> {
    buttons.iter().filter(move |b| b.contains(pt))
}
