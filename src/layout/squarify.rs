use super::Rect;

/// An item to be laid out, paired with its layout mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem<T> {
    pub data: T,
    pub mass: f64,
}

impl<T> LayoutItem<T> {
    pub fn new(data: T, mass: f64) -> Self {
        Self { data, mass }
    }
}

/// An item with its assigned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed<T> {
    pub data: T,
    pub rect: Rect,
}

/// Squarified treemap layout.
///
/// Items are placed in descending mass order. Each emitted rectangle is at least
/// `min_size` on both axes, even when its proportional share is smaller; the floor
/// may then produce small overlaps. Items without a positive mass are skipped.
/// Empty input, zero total mass or a zero-area container all yield an empty result.
pub fn squarify<T>(items: Vec<LayoutItem<T>>, container: Rect, min_size: f64) -> Vec<Placed<T>> {
    // Non-positive masses don't take part in the layout
    let offered = items.len();
    let items: Vec<LayoutItem<T>> = items
        .into_iter()
        .filter(|item| item.mass > 0.0 && item.mass.is_finite())
        .collect();
    if items.len() < offered {
        tracing::debug!(
            "Squarify: dropped {} of {} items without positive mass",
            offered - items.len(),
            offered
        );
    }
    if items.is_empty() {
        return Vec::new();
    }

    let total: f64 = items.iter().map(|item| item.mass).sum();
    if total <= 0.0 || !total.is_finite() {
        tracing::debug!(
            "Squarify: nothing to lay out ({} items, total mass {})",
            items.len(),
            total
        );
        return Vec::new();
    }

    // Stable sort keeps input order for equal masses
    let mut sorted = items;
    sorted.sort_by(|a, b| b.mass.total_cmp(&a.mass));

    let masses: Vec<f64> = sorted.iter().map(|item| item.mass).collect();
    let rects = squarify_masses(&masses, total, container, min_size);

    sorted
        .into_iter()
        .zip(rects)
        .map(|(item, rect)| Placed {
            data: item.data,
            rect,
        })
        .collect()
}

/// Lay out pre-sorted masses, returning rectangles in the same order.
/// May return fewer rectangles than masses if the container runs out of area.
fn squarify_masses(masses: &[f64], total: f64, container: Rect, min_size: f64) -> Vec<Rect> {
    let mut result = Vec::with_capacity(masses.len());
    let mut start = 0;
    let mut remaining_mass = total;
    let mut current = container;

    while start < masses.len() && current.w > 0.0 && current.h > 0.0 {
        let row = layout_row(&masses[start..], current, remaining_mass, min_size);
        if row.rects.is_empty() {
            tracing::warn!(
                "Squarify: no progress at item {} of {} in {:.1}x{:.1}, stopping",
                start,
                masses.len(),
                current.w,
                current.h
            );
            break;
        }

        // The row consumes its first tile's (floored) thickness from the container
        let first = row.rects[0];
        current = if current.w >= current.h {
            Rect {
                x: current.x + first.w,
                y: current.y,
                w: (current.w - first.w).max(0.0),
                h: current.h,
            }
        } else {
            Rect {
                x: current.x,
                y: current.y + first.h,
                w: current.w,
                h: (current.h - first.h).max(0.0),
            }
        };

        start += row.rects.len();
        remaining_mass -= row.mass;
        result.extend(row.rects);
    }

    result
}

struct Row {
    rects: Vec<Rect>,
    mass: f64,
}

/// Grow a row greedily from the front of `masses` until the worst aspect ratio
/// would get strictly worse, then position it along the container's shorter side.
fn layout_row(masses: &[f64], container: Rect, remaining_mass: f64, min_size: f64) -> Row {
    if masses.is_empty() {
        return Row {
            rects: Vec::new(),
            mass: 0.0,
        };
    }

    // Wide containers get a column on the left, tall ones a row on top
    let horizontal = container.w >= container.h;
    let side = if horizontal { container.h } else { container.w };
    let main_axis = if horizontal { container.w } else { container.h };

    let mut row_len = 0;
    let mut row_mass = 0.0;
    let mut best_ratio = f64::INFINITY;
    let mut test_mass = 0.0;

    for (i, &mass) in masses.iter().enumerate() {
        test_mass += mass;
        let thickness = (test_mass / remaining_mass) * main_axis;
        let worst = worst_ratio(&masses[..=i], test_mass, thickness, side);

        if worst > best_ratio && row_len > 0 {
            break;
        }

        best_ratio = worst;
        row_len = i + 1;
        row_mass = test_mass;
    }

    let thickness = (row_mass / remaining_mass) * main_axis;
    let mut offset = 0.0;
    let rects = masses[..row_len]
        .iter()
        .map(|&mass| {
            let length = (mass / row_mass) * side;
            let rect = if horizontal {
                Rect {
                    x: container.x,
                    y: container.y + offset,
                    w: thickness.max(min_size),
                    h: length.max(min_size),
                }
            } else {
                Rect {
                    x: container.x + offset,
                    y: container.y,
                    w: length.max(min_size),
                    h: thickness.max(min_size),
                }
            };
            offset += length;
            rect
        })
        .collect();

    Row {
        rects,
        mass: row_mass,
    }
}

/// Worst (longest / shortest side) ratio over a candidate row.
/// Both sides are floored at one pixel so sub-pixel tiles don't blow up the metric.
fn worst_ratio(row: &[f64], row_mass: f64, thickness: f64, side: f64) -> f64 {
    let mut worst: f64 = 0.0;
    for &mass in row {
        let length = (mass / row_mass) * side;
        let ratio = (thickness / length.max(1.0)).max(length.max(1.0) / thickness.max(1.0));
        worst = worst.max(ratio);
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(masses: &[f64]) -> Vec<LayoutItem<usize>> {
        masses
            .iter()
            .enumerate()
            .map(|(i, &m)| LayoutItem::new(i, m))
            .collect()
    }

    fn area_of(placed: &[Placed<usize>], id: usize) -> f64 {
        placed.iter().find(|p| p.data == id).map(|p| p.rect.area()).unwrap()
    }

    #[test]
    fn single_item_fills_container() {
        let placed = squarify(items(&[42.0]), Rect::new(0.0, 0.0, 1920.0, 1080.0), 0.0);
        assert_eq!(placed.len(), 1);
        let r = placed[0].rect;
        assert_eq!((r.x, r.y), (0.0, 0.0));
        assert!((r.w - 1920.0).abs() < 1e-9);
        assert!((r.h - 1080.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_and_zero_area_yield_nothing() {
        let none: Vec<LayoutItem<usize>> = Vec::new();
        assert!(squarify(none, Rect::new(0.0, 0.0, 100.0, 100.0), 8.0).is_empty());
        assert!(squarify(items(&[3.0, 2.0]), Rect::new(0.0, 0.0, 0.0, 0.0), 8.0).is_empty());
        assert!(squarify(items(&[3.0, 2.0]), Rect::new(0.0, 0.0, 100.0, 0.0), 0.0).is_empty());
        assert!(squarify(items(&[0.0, 0.0]), Rect::new(0.0, 0.0, 100.0, 100.0), 0.0).is_empty());
    }

    #[test]
    fn layout_preserves_area() {
        let masses = [400.0, 300.0, 200.0, 100.0, 75.0, 30.0, 12.0];
        let container = Rect::new(10.0, 5.0, 500.0, 200.0);
        let placed = squarify(items(&masses), container, 0.0);
        assert_eq!(placed.len(), masses.len());
        let total: f64 = placed.iter().map(|p| p.rect.area()).sum();
        assert!((total - container.area()).abs() < 1e-6);
    }

    #[test]
    fn area_is_proportional_to_mass() {
        let container = Rect::new(0.0, 0.0, 300.0, 180.0);
        let placed = squarify(items(&[50.0, 100.0, 25.0, 25.0]), container, 0.0);
        let (a, b) = (area_of(&placed, 1), area_of(&placed, 0));
        assert!((a / b - 2.0).abs() < 1e-9);
        let (c, d) = (area_of(&placed, 2), area_of(&placed, 3));
        assert!((c - d).abs() < 1e-9);
    }

    #[test]
    fn siblings_do_not_overlap_and_stay_inside() {
        let masses = [9.0, 7.0, 6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0, 1.0];
        let container = Rect::new(0.0, 0.0, 640.0, 360.0);
        let placed = squarify(items(&masses), container, 0.0);
        let eps = 1e-6;
        for (i, a) in placed.iter().enumerate() {
            let r = a.rect;
            assert!(r.x >= -eps && r.y >= -eps);
            assert!(r.x + r.w <= container.w + eps && r.y + r.h <= container.h + eps);
            for b in &placed[i + 1..] {
                assert!(
                    r.intersection_area(&b.rect) < eps,
                    "{:?} overlaps {:?}",
                    r,
                    b.rect
                );
            }
        }
    }

    #[test]
    fn non_positive_masses_are_skipped() {
        let container = Rect::new(0.0, 0.0, 40.0, 40.0);
        let placed = squarify(items(&[0.0, 4.0, -1.0, f64::NAN]), container, 0.0);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].data, 1);
        assert_eq!(placed[0].rect, Rect::new(0.0, 0.0, 40.0, 40.0));
    }

    #[test]
    fn places_in_descending_mass_order() {
        let placed = squarify(items(&[1.0, 5.0, 3.0]), Rect::new(0.0, 0.0, 90.0, 60.0), 0.0);
        let order: Vec<usize> = placed.iter().map(|p| p.data).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn greedy_row_stops_when_ratio_worsens() {
        // 150x100, masses 100 and 50: the first column alone is a perfect square,
        // adding the second would stretch it, so each ends up in its own strip.
        let placed = squarify(items(&[100.0, 50.0]), Rect::new(0.0, 0.0, 150.0, 100.0), 0.0);
        assert_eq!(placed[0].rect, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(placed[1].rect, Rect::new(100.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn equal_masses_share_a_row() {
        let placed = squarify(items(&[1.0, 1.0, 1.0, 1.0]), Rect::new(0.0, 0.0, 100.0, 100.0), 0.0);
        // Two columns of two
        assert_eq!(placed[0].rect, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(placed[1].rect, Rect::new(0.0, 50.0, 50.0, 50.0));
        assert_eq!(placed[2].rect.x, 50.0);
        assert_eq!(placed[3].rect.y, 50.0);
    }

    #[test]
    fn tiny_shares_are_floored_to_min_size() {
        let placed = squarify(items(&[10_000.0, 1.0]), Rect::new(0.0, 0.0, 200.0, 100.0), 8.0);
        assert_eq!(placed.len(), 2);
        for p in &placed {
            assert!(p.rect.w >= 8.0 && p.rect.h >= 8.0, "{:?}", p.rect);
        }
    }

    #[test]
    fn floor_exhausts_container_and_leaves_tail_unplaced() {
        let masses: Vec<f64> = (0..200).map(|i| (1 + i % 5) as f64).collect();
        let container = Rect::new(0.0, 0.0, 40.0, 20.0);
        let placed = squarify(items(&masses), container, 8.0);

        assert_eq!(placed.len(), 61);
        for p in &placed {
            assert!(p.rect.w >= 8.0 && p.rect.h >= 8.0, "{:?}", p.rect);
        }
        // Largest masses win the space that is left
        let mut expected: Vec<usize> = (0..200).collect();
        expected.sort_by(|&a, &b| masses[b].total_cmp(&masses[a]));
        let order: Vec<usize> = placed.iter().map(|p| p.data).collect();
        assert_eq!(order, expected[..61]);

        let max_right = placed.iter().map(|p| p.rect.right()).fold(0.0, f64::max);
        assert!((max_right - 47.0).abs() < 1e-9);
    }

    #[test]
    fn generic_over_payload() {
        let placed = squarify(
            vec![LayoutItem::new("a", 2.0), LayoutItem::new("b", 1.0)],
            Rect::new(0.0, 0.0, 30.0, 20.0),
            0.0,
        );
        assert_eq!(placed[0].data, "a");
        assert!((placed[0].rect.area() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let masses = [13.7, 8.1, 8.1, 5.5, 2.25, 0.4];
        let container = Rect::new(0.0, 0.0, 333.3, 211.7);
        let a = squarify(items(&masses), container, 8.0);
        let b = squarify(items(&masses), container, 8.0);
        assert_eq!(a, b);
    }
}
