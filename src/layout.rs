//! Fixed-arity grid tiling.
//!
//! [`placements`] is a pure function from a window count and screen size to
//! a list of target rectangles; it knows nothing about window identity.
//! [`arrange`] applies a placement list to concrete windows through a
//! [`WindowSystem`], de-maximizing each window first so the window manager
//! does not fight the resize.
//!
//! The layout is deliberately fixed-arity: one to four windows get a
//! dedicated arrangement, and every window beyond the fourth stacks on the
//! right-hand quadrants instead of shrinking the grid further.

use crate::traits::{WindowHandle, WindowSystem};
use log::warn;

/// Pixels left free at the bottom of a single fullscreen window for a
/// taskbar or panel.
pub const BOTTOM_MARGIN: u32 = 10;

/// Target rectangle for one window, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Compute placements for `count` windows on a `screen_w` × `screen_h`
/// screen.
///
/// The result always holds exactly `count` entries, paired positionally
/// with the caller's window order:
///
/// * 1 window — fullscreen, minus [`BOTTOM_MARGIN`] at the bottom.
/// * 2 windows — two equal-width, full-height columns.
/// * 3 windows — full-height left half; the right half splits into two
///   half-height rows.
/// * 4 windows — a 2×2 grid of equal quadrants.
/// * 5 or more — the first four as the quadrant rule; each further window
///   takes the top-right (even index) or bottom-right (odd index) quadrant
///   rectangle, covering whatever was placed there before.  The overlap is
///   intentional: beyond four windows the layout stacks rather than
///   subdivides.
pub fn placements(count: usize, screen_w: u32, screen_h: u32) -> Vec<Placement> {
    let half_w = screen_w / 2;
    let half_h = screen_h / 2;
    let right = half_w as i32;
    let bottom = half_h as i32;

    match count {
        0 => Vec::new(),
        1 => vec![Placement {
            x: 0,
            y: 0,
            width: screen_w,
            height: screen_h.saturating_sub(BOTTOM_MARGIN),
        }],
        2 => vec![
            Placement {
                x: 0,
                y: 0,
                width: half_w,
                height: screen_h,
            },
            Placement {
                x: right,
                y: 0,
                width: half_w,
                height: screen_h,
            },
        ],
        3 => vec![
            Placement {
                x: 0,
                y: 0,
                width: half_w,
                height: screen_h,
            },
            Placement {
                x: right,
                y: 0,
                width: half_w,
                height: half_h,
            },
            Placement {
                x: right,
                y: bottom,
                width: half_w,
                height: half_h,
            },
        ],
        _ => {
            let top_right = Placement {
                x: right,
                y: 0,
                width: half_w,
                height: half_h,
            };
            let bottom_right = Placement {
                x: right,
                y: bottom,
                width: half_w,
                height: half_h,
            };
            let mut out = vec![
                Placement {
                    x: 0,
                    y: 0,
                    width: half_w,
                    height: half_h,
                },
                Placement {
                    x: 0,
                    y: bottom,
                    width: half_w,
                    height: half_h,
                },
                top_right,
                bottom_right,
            ];
            for i in 4..count {
                out.push(if i % 2 == 0 { top_right } else { bottom_right });
            }
            out
        }
    }
}

/// De-maximize and place `windows` according to [`placements`].
///
/// Failures are per-window: a rejected request is logged and the sweep
/// continues with the remaining windows.  Returns the placement list that
/// was applied, so callers can record the geometry they asked for.
pub fn arrange<W: WindowSystem>(sys: &W, windows: &[WindowHandle]) -> Vec<Placement> {
    let (screen_w, screen_h) = sys.screen_size();
    let placements = placements(windows.len(), screen_w, screen_h);
    for (window, placement) in windows.iter().zip(&placements) {
        if let Err(e) = sys.request_demaximize(*window) {
            warn!("de-maximize request for {} failed: {}", window, e);
        }
        if let Err(e) = sys.set_geometry(*window, placement) {
            warn!("placing {} failed, leaving it where it is: {}", window, e);
        }
    }
    placements
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::fake::{FakeOp, FakeWindowSystem};

    const W: u32 = 1920;
    const H: u32 = 1080;

    fn overlaps(a: &Placement, b: &Placement) -> bool {
        let ax2 = a.x + a.width as i32;
        let ay2 = a.y + a.height as i32;
        let bx2 = b.x + b.width as i32;
        let by2 = b.y + b.height as i32;
        a.x < bx2 && b.x < ax2 && a.y < by2 && b.y < ay2
    }

    #[test]
    fn zero_windows_yield_no_placements() {
        assert!(placements(0, W, H).is_empty());
    }

    #[test]
    fn placement_count_matches_window_count() {
        for count in 0..10 {
            assert_eq!(placements(count, W, H).len(), count);
        }
    }

    #[test]
    fn single_window_fills_screen_minus_margin() {
        let ps = placements(1, W, H);
        assert_eq!(
            ps[0],
            Placement {
                x: 0,
                y: 0,
                width: W,
                height: H - BOTTOM_MARGIN,
            }
        );
    }

    #[test]
    fn two_windows_split_into_columns() {
        let ps = placements(2, W, H);
        assert_eq!(ps[0].width, W / 2);
        assert_eq!(ps[1].width, W / 2);
        assert_eq!(ps[0].height, H);
        assert_eq!(ps[1].height, H);
        assert_eq!(ps[0].x, 0);
        assert_eq!(ps[1].x, (W / 2) as i32);
    }

    #[test]
    fn three_windows_left_column_right_stack() {
        let ps = placements(3, W, H);
        assert_eq!(ps[0].height, H);
        assert_eq!(ps[1].y, 0);
        assert_eq!(ps[2].y, (H / 2) as i32);
        assert_eq!(ps[1].height, H / 2);
        assert_eq!(ps[2].height, H / 2);
    }

    #[test]
    fn four_windows_form_quadrants() {
        let ps = placements(4, W, H);
        let expected = [
            (0, 0),
            (0, (H / 2) as i32),
            ((W / 2) as i32, 0),
            ((W / 2) as i32, (H / 2) as i32),
        ];
        for (p, (x, y)) in ps.iter().zip(expected) {
            assert_eq!((p.x, p.y), (x, y));
            assert_eq!((p.width, p.height), (W / 2, H / 2));
        }
    }

    #[test]
    fn no_overlap_up_to_four_windows() {
        for count in 1..=4 {
            let ps = placements(count, W, H);
            for i in 0..ps.len() {
                for j in (i + 1)..ps.len() {
                    assert!(
                        !overlaps(&ps[i], &ps[j]),
                        "windows {} and {} overlap with count {}",
                        i,
                        j,
                        count
                    );
                }
            }
        }
    }

    #[test]
    fn coverage_up_to_four_leaves_only_the_fixed_margin() {
        let screen_area = u64::from(W) * u64::from(H);
        let margin_area = u64::from(W) * u64::from(BOTTOM_MARGIN);
        for count in 1..=4 {
            let ps = placements(count, W, H);
            let area: u64 = ps
                .iter()
                .map(|p| u64::from(p.width) * u64::from(p.height))
                .sum();
            // No overlap (asserted above), so total area tells coverage.
            if count == 1 {
                assert_eq!(area, screen_area - margin_area);
            } else {
                assert_eq!(area, screen_area, "count {} does not cover", count);
            }
        }
    }

    #[test]
    fn extra_windows_alternate_right_quadrants() {
        let ps = placements(7, W, H);
        let top_right = ps[2];
        let bottom_right = ps[3];
        assert_eq!(ps[4], top_right);
        assert_eq!(ps[5], bottom_right);
        assert_eq!(ps[6], top_right);
    }

    #[test]
    fn placements_are_deterministic() {
        assert_eq!(placements(3, W, H), placements(3, W, H));
        assert_eq!(placements(5, 2560, 1440), placements(5, 2560, 1440));
    }

    #[test]
    fn arrange_demaximizes_before_placing_each_window() {
        let sys = FakeWindowSystem::new(1);
        let a = sys.open_window(0, 800, 600);
        let b = sys.open_window(0, 800, 600);
        arrange(&sys, &[a, b]);

        let ops = sys.taken_ops();
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0], FakeOp::Demaximize(a));
        assert!(matches!(ops[1], FakeOp::SetGeometry(h, _) if h == a));
        assert_eq!(ops[2], FakeOp::Demaximize(b));
        assert!(matches!(ops[3], FakeOp::SetGeometry(h, _) if h == b));
    }

    #[test]
    fn arrange_returns_the_applied_placements() {
        let sys = FakeWindowSystem::new(1);
        let a = sys.open_window(0, 800, 600);
        let applied = arrange(&sys, &[a]);
        assert_eq!(applied, placements(1, 1920, 1080));
        assert_eq!(sys.geometry(a), Some((1920, 1080 - BOTTOM_MARGIN)));
    }
}
